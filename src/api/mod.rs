//! Wire shapes of a chat-completion response.
//!
//! Every field is captured as an untyped [`Value`] so that `null` and absent
//! collapse to `None` and unknown keys are ignored. Turning these into typed
//! values, with a path for every mismatch, happens in
//! [`crate::core::response`].

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default, Debug)]
pub struct ChatCompletionEnvelope {
    pub id: Option<Value>,
    pub model: Option<Value>,
    pub created: Option<Value>,
    pub system_fingerprint: Option<Value>,
    pub choices: Option<Value>,
    pub usage: Option<Value>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ChoiceEnvelope {
    pub message: Option<Value>,
    pub finish_reason: Option<Value>,
}

#[derive(Deserialize, Default, Debug)]
pub struct MessageEnvelope {
    pub content: Option<Value>,
}

#[derive(Deserialize, Default, Debug)]
pub struct UsageEnvelope {
    pub prompt_tokens: Option<Value>,
    pub completion_tokens: Option<Value>,
    pub total_tokens: Option<Value>,
    pub prompt_tokens_details: Option<Value>,
    pub completion_tokens_details: Option<Value>,
}

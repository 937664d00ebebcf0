//! Decoding and shape checking of a completion response.
//!
//! [`decode`] turns raw text into a JSON tree. [`Response::from_value`] then
//! pulls every field the renderer needs into typed structs up front, so that
//! rendering itself cannot fail on a missing key or a wrong type. Absent and
//! `null` values become `None`; present values of the wrong shape become
//! [`FormatError::MalformedResponse`] naming the offending path.

use chrono::{DateTime, Local, TimeZone};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::{ChatCompletionEnvelope, ChoiceEnvelope, MessageEnvelope, UsageEnvelope};
use crate::core::error::FormatError;

/// A completion response reduced to the fields that get rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub id: Option<String>,
    pub model: Option<String>,
    pub created: Option<DateTime<Local>>,
    pub system_fingerprint: Option<String>,
    /// Only the first choice is rendered; later ones are counted but not inspected.
    pub first_choice: Option<Choice>,
    pub choice_count: usize,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub content: String,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    pub prompt_tokens_details: Option<Vec<TokenDetail>>,
    pub completion_tokens_details: Option<Vec<TokenDetail>>,
}

/// One entry of a `*_tokens_details` mapping, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDetail {
    pub category: String,
    pub count: i64,
}

/// Parse `input` as JSON.
pub fn decode(input: &str) -> Result<Value, FormatError> {
    let value = serde_json::from_str(input)?;
    debug!(bytes = input.len(), "Decoded response JSON");
    Ok(value)
}

/// Decode `input` and extract a [`Response`] from it.
pub fn parse_response(input: &str) -> Result<Response, FormatError> {
    Response::from_value(decode(input)?)
}

impl Response {
    /// Extract the rendered fields from a decoded tree.
    ///
    /// A top-level value that is not an object has none of the expected
    /// fields, so it yields an empty response rather than an error.
    pub fn from_value(value: Value) -> Result<Self, FormatError> {
        if !value.is_object() {
            debug!("Top-level JSON value is not an object; rendering placeholders");
            return Ok(Response::default());
        }

        let fields: ChatCompletionEnvelope = envelope(value, "$")?;

        let choices = match fields.choices {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(FormatError::malformed(
                    "choices",
                    format!("expected an array, found {}", kind_of(&other)),
                ))
            }
        };
        let choice_count = choices.len();
        let first_choice = choices
            .into_iter()
            .next()
            .map(|choice| Choice::from_value(choice, "choices[0]"))
            .transpose()?;

        let usage = fields
            .usage
            .map(|usage| Usage::from_value(usage, "usage"))
            .transpose()?;

        let response = Response {
            id: optional_text(fields.id, "id")?,
            model: optional_text(fields.model, "model")?,
            created: fields
                .created
                .map(|created| timestamp(created, "created"))
                .transpose()?,
            system_fingerprint: optional_text(fields.system_fingerprint, "system_fingerprint")?,
            first_choice,
            choice_count,
            usage,
        };
        debug!(
            choices = response.choice_count,
            has_usage = response.usage.is_some(),
            "Extracted response fields"
        );
        Ok(response)
    }
}

impl Choice {
    fn from_value(value: Value, path: &str) -> Result<Self, FormatError> {
        let choice: ChoiceEnvelope = envelope(value, path)?;

        let message_path = format!("{path}.message");
        let message: MessageEnvelope = match choice.message {
            Some(message) => envelope(message, &message_path)?,
            None => return Err(FormatError::malformed(message_path, "missing")),
        };

        let content_path = format!("{message_path}.content");
        let content = match message.content {
            Some(Value::String(content)) => content,
            Some(other) => {
                return Err(FormatError::malformed(
                    content_path,
                    format!("expected a string, found {}", kind_of(&other)),
                ))
            }
            None => return Err(FormatError::malformed(content_path, "missing")),
        };

        Ok(Choice {
            content,
            finish_reason: optional_text(choice.finish_reason, &format!("{path}.finish_reason"))?,
        })
    }
}

impl Usage {
    fn from_value(value: Value, path: &str) -> Result<Self, FormatError> {
        let usage: UsageEnvelope = envelope(value, path)?;

        Ok(Usage {
            prompt_tokens: count_or_zero(usage.prompt_tokens, &format!("{path}.prompt_tokens"))?,
            completion_tokens: count_or_zero(
                usage.completion_tokens,
                &format!("{path}.completion_tokens"),
            )?,
            total_tokens: count_or_zero(usage.total_tokens, &format!("{path}.total_tokens"))?,
            prompt_tokens_details: usage
                .prompt_tokens_details
                .map(|details| token_details(details, &format!("{path}.prompt_tokens_details")))
                .transpose()?,
            completion_tokens_details: usage
                .completion_tokens_details
                .map(|details| {
                    token_details(details, &format!("{path}.completion_tokens_details"))
                })
                .transpose()?,
        })
    }

    /// Whether either details mapping was present.
    pub fn has_details(&self) -> bool {
        self.prompt_tokens_details.is_some() || self.completion_tokens_details.is_some()
    }
}

fn envelope<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, FormatError> {
    if !value.is_object() {
        return Err(FormatError::malformed(
            path,
            format!("expected an object, found {}", kind_of(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|err| FormatError::malformed(path, err.to_string()))
}

/// Scalars are coerced to text; containers are rejected.
fn optional_text(value: Option<Value>, path: &str) -> Result<Option<String>, FormatError> {
    match value {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(FormatError::malformed(
            path,
            format!("expected a scalar, found {}", kind_of(&other)),
        )),
    }
}

fn integer(value: &Value, path: &str) -> Result<i64, FormatError> {
    value.as_i64().ok_or_else(|| {
        FormatError::malformed(path, format!("expected an integer, found {}", kind_of(value)))
    })
}

fn count_or_zero(value: Option<Value>, path: &str) -> Result<i64, FormatError> {
    value.map_or(Ok(0), |value| integer(&value, path))
}

fn timestamp(value: Value, path: &str) -> Result<DateTime<Local>, FormatError> {
    let seconds = integer(&value, path)?;
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| FormatError::malformed(path, format!("timestamp {seconds} is out of range")))
}

fn token_details(value: Value, path: &str) -> Result<Vec<TokenDetail>, FormatError> {
    let entries: Map<String, Value> = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(FormatError::malformed(
                path,
                format!("expected an object, found {}", kind_of(&other)),
            ))
        }
    };

    entries
        .into_iter()
        .map(|(category, count)| {
            let count = integer(&count, &format!("{path}.{category}"))?;
            Ok::<_, FormatError>(TokenDetail { category, count })
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn malformed_path(result: Result<Response, FormatError>) -> String {
        match result {
            Err(FormatError::MalformedResponse { path, .. }) => path,
            other => panic!("expected a malformed response error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(matches!(
            parse_response("{not json}"),
            Err(FormatError::Decode(_))
        ));
    }

    #[test]
    fn full_response_is_extracted() {
        let response = parse_response(
            r#"{"id":"abc","model":"m1","created":0,"system_fingerprint":"fp_1",
                "choices":[{"message":{"content":"hi"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":3,"completion_tokens":2,"total_tokens":5}}"#,
        )
        .expect("response should parse");

        assert_eq!(response.id.as_deref(), Some("abc"));
        assert_eq!(response.model.as_deref(), Some("m1"));
        assert_eq!(response.created.map(|t| t.timestamp()), Some(0));
        assert_eq!(response.system_fingerprint.as_deref(), Some("fp_1"));
        assert_eq!(
            response.first_choice,
            Some(Choice {
                content: "hi".to_string(),
                finish_reason: Some("stop".to_string()),
            })
        );
        assert_eq!(response.choice_count, 1);
        let usage = response.usage.expect("usage present");
        assert_eq!(
            (usage.prompt_tokens, usage.completion_tokens, usage.total_tokens),
            (3, 2, 5)
        );
        assert!(!usage.has_details());
    }

    #[test]
    fn non_object_top_level_yields_empty_response() {
        for input in ["[1, 2, 3]", "42", "\"text\"", "null", "true"] {
            assert_eq!(
                parse_response(input).expect("non-object input should not fail"),
                Response::default(),
                "input {input}"
            );
        }
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let response = Response::from_value(json!({
            "id": null,
            "model": null,
            "created": null,
            "system_fingerprint": null,
            "choices": null,
            "usage": null,
        }))
        .expect("nulls should be accepted");
        assert_eq!(response, Response::default());
    }

    #[test]
    fn scalar_text_fields_are_coerced() {
        let response = Response::from_value(json!({"id": 12345, "model": true}))
            .expect("scalars should be coerced");
        assert_eq!(response.id.as_deref(), Some("12345"));
        assert_eq!(response.model.as_deref(), Some("true"));
    }

    #[test]
    fn container_text_field_is_malformed() {
        let path = malformed_path(Response::from_value(json!({"model": ["a"]})));
        assert_eq!(path, "model");
    }

    #[test]
    fn choices_must_be_an_array() {
        let path = malformed_path(Response::from_value(json!({"choices": {"0": {}}})));
        assert_eq!(path, "choices");
    }

    #[test]
    fn empty_choices_has_no_first_choice() {
        let response = Response::from_value(json!({"choices": []})).expect("empty choices");
        assert_eq!(response.first_choice, None);
        assert_eq!(response.choice_count, 0);
    }

    #[test]
    fn missing_message_is_malformed() {
        let path = malformed_path(Response::from_value(json!({
            "choices": [{"finish_reason": "stop"}]
        })));
        assert_eq!(path, "choices[0].message");
    }

    #[test]
    fn missing_content_is_malformed() {
        let path = malformed_path(Response::from_value(json!({
            "choices": [{"message": {"role": "assistant"}}]
        })));
        assert_eq!(path, "choices[0].message.content");
    }

    #[test]
    fn non_string_content_is_malformed() {
        let path = malformed_path(Response::from_value(json!({
            "choices": [{"message": {"content": null}}]
        })));
        assert_eq!(path, "choices[0].message.content");
    }

    #[test]
    fn only_first_choice_is_inspected() {
        let response = Response::from_value(json!({
            "choices": [
                {"message": {"content": "first"}},
                "not even an object"
            ]
        }))
        .expect("later choices are not inspected");
        assert_eq!(response.choice_count, 2);
        assert_eq!(
            response.first_choice.map(|c| c.content),
            Some("first".to_string())
        );
    }

    #[test]
    fn missing_usage_counters_default_to_zero() {
        let response =
            Response::from_value(json!({"usage": {"total_tokens": 7}})).expect("usage parses");
        let usage = response.usage.expect("usage present");
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 7);
    }

    #[test]
    fn fractional_counter_is_malformed() {
        let path = malformed_path(Response::from_value(json!({
            "usage": {"prompt_tokens": 1.5}
        })));
        assert_eq!(path, "usage.prompt_tokens");
    }

    #[test]
    fn token_details_keep_insertion_order() {
        let response = parse_response(
            r#"{"usage":{"prompt_tokens_details":{"text_tokens":9,"audio_tokens":0,"cached_tokens":4}}}"#,
        )
        .expect("details parse");
        let details = response
            .usage
            .and_then(|usage| usage.prompt_tokens_details)
            .expect("prompt details present");
        let categories: Vec<&str> = details.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(categories, ["text_tokens", "audio_tokens", "cached_tokens"]);
        assert_eq!(details[2].count, 4);
    }

    #[test]
    fn either_details_mapping_marks_usage_as_detailed() {
        let response = Response::from_value(json!({
            "usage": {"completion_tokens_details": {}}
        }))
        .expect("empty details parse");
        let usage = response.usage.expect("usage present");
        assert!(usage.has_details());
        assert_eq!(usage.prompt_tokens_details, None);
        assert_eq!(usage.completion_tokens_details, Some(Vec::new()));
    }

    #[test]
    fn detail_value_must_be_an_integer() {
        let path = malformed_path(Response::from_value(json!({
            "usage": {"completion_tokens_details": {"reasoning_tokens": "lots"}}
        })));
        assert_eq!(path, "usage.completion_tokens_details.reasoning_tokens");
    }

    #[test]
    fn out_of_range_timestamp_is_malformed() {
        let path = malformed_path(Response::from_value(json!({"created": i64::MAX})));
        assert_eq!(path, "created");
    }
}

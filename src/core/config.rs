use crate::core::constants::DEFAULT_WRAP_WIDTH;

/// Knobs that shape how a response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Column width at which metadata values are wrapped. `0` disables wrapping.
    pub wrap_width: usize,
}

impl RenderConfig {
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

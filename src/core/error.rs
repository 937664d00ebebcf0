//! Error types for decoding and rendering a completion response.

use std::fmt;
use std::io;

/// Errors that can stop a response from being rendered.
#[derive(Debug)]
pub enum FormatError {
    /// The input is not syntactically valid JSON.
    Decode(serde_json::Error),
    /// The input decoded, but a present value has the wrong structure.
    MalformedResponse { path: String, reason: String },
    /// Writing the rendered output failed.
    Io(io::Error),
}

impl FormatError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::MalformedResponse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            FormatError::Decode(err) => {
                eprintln!("❌ Error parsing JSON: {err}");
            }
            FormatError::MalformedResponse { path, reason } => {
                eprintln!("❌ Malformed response at `{path}`: {reason}");
            }
            FormatError::Io(err) => {
                eprintln!("❌ Failed to write output: {err}");
            }
        }
    }

    /// Returns the exit code for this error.
    ///
    /// Decode failures keep the conventional `1`; clap reserves `2` for usage
    /// errors, so shape and output failures use their own codes.
    pub fn exit_code(&self) -> i32 {
        match self {
            FormatError::Decode(_) => 1,
            FormatError::MalformedResponse { .. } => 3,
            FormatError::Io(_) => 4,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Decode(err) => write!(f, "Error parsing JSON: {err}"),
            FormatError::MalformedResponse { path, reason } => {
                write!(f, "Malformed response at `{path}`: {reason}")
            }
            FormatError::Io(err) => write!(f, "Failed to write output: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Decode(err) => Some(err),
            FormatError::Io(err) => Some(err),
            FormatError::MalformedResponse { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Decode(err)
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        FormatError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_exit_with_one_and_mention_position() {
        let err: FormatError = serde_json::from_str::<serde_json::Value>("{not json}")
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 1);
        let message = err.to_string();
        assert!(message.starts_with("Error parsing JSON: "), "{message}");
        assert!(message.contains("line 1"), "{message}");
    }

    #[test]
    fn malformed_errors_name_the_offending_path() {
        let err = FormatError::malformed("choices", "expected an array");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "Malformed response at `choices`: expected an array"
        );
    }

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let decode = FormatError::Decode(
            serde_json::from_str::<serde_json::Value>("[").unwrap_err(),
        );
        let malformed = FormatError::malformed("usage", "expected an object");
        let io = FormatError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));

        let codes = [decode.exit_code(), malformed.exit_code(), io.exit_code()];
        assert!(codes.iter().all(|code| *code != 0 && *code != 2));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }
}

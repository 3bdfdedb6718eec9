use thiserror::Error;

/// Errors raised while assembling and validating connection arguments.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// A required argument was absent or empty.
    #[error("Bad or missing --{flag}{detail}")]
    MissingArgument { flag: &'static str, detail: &'static str },

    /// An argument was present but not in the expected format. `expected`
    /// names the format for callers; the message matches a missing argument.
    #[error("Bad or missing --{flag}")]
    InvalidFormat { flag: &'static str, expected: &'static str },

    /// The JSON argument overlay could not be parsed.
    #[error("invalid JSON arguments: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

impl ArgumentError {
    pub(crate) fn missing(flag: &'static str) -> Self {
        Self::MissingArgument { flag, detail: "" }
    }
}

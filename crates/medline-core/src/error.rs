use serde::Serialize;
use thiserror::Error;

/// Coarse classification of everything that can go wrong during a submission.
///
/// Each crate's error type maps onto one of these so the server can pick a
/// status code and a user-facing message without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The submitted form was rejected before any outbound call.
    Validation,
    /// The completion endpoint could not be reached, timed out, or returned
    /// a non-success status.
    Transport,
    /// The completion endpoint answered with a payload we could not use.
    ResponseFormat,
    /// The mail relay refused the connection, the credentials or the message.
    Delivery,
    /// Required configuration is missing or malformed.
    Configuration,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::Transport => "transport",
            FailureKind::ResponseFormat => "response_format",
            FailureKind::Delivery => "delivery",
            FailureKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("please describe your symptoms")]
    MissingSymptoms,

    #[error("age must be between {min} and {max}, got {got}")]
    AgeOutOfRange { min: u32, max: u32, got: u32 },

    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid clinic directory: {0}")]
    InvalidDirectory(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CoreError::MissingSymptoms
            | CoreError::AgeOutOfRange { .. }
            | CoreError::UnknownRegion(_)
            | CoreError::InvalidEmail(_) => FailureKind::Validation,
            CoreError::InvalidDirectory(_) | CoreError::Serialization(_) => {
                FailureKind::Configuration
            }
        }
    }
}

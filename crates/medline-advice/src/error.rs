use std::time::Duration;

use medline_core::error::FailureKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("completion endpoint is not configured: {0}")]
    Config(String),

    #[error("could not reach completion endpoint: {0}")]
    Transport(String),

    #[error("completion request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected completion response: {0}")]
    ResponseFormat(String),
}

impl AdviceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdviceError::Config(_) => FailureKind::Configuration,
            AdviceError::Transport(_)
            | AdviceError::Timeout { .. }
            | AdviceError::Status { .. } => FailureKind::Transport,
            AdviceError::ResponseFormat(_) => FailureKind::ResponseFormat,
        }
    }
}

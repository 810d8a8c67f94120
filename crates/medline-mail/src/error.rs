use std::time::Duration;

use medline_core::error::FailureKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail is not configured: {0}")]
    Config(String),

    #[error("invalid recipient address: {0}")]
    Recipient(String),

    #[error("could not build message: {0}")]
    Message(String),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("SMTP delivery timed out after {after:?}")]
    Timeout { after: Duration },
}

impl MailError {
    pub fn kind(&self) -> FailureKind {
        match self {
            MailError::Config(_) => FailureKind::Configuration,
            MailError::Recipient(_)
            | MailError::Message(_)
            | MailError::Smtp(_)
            | MailError::Timeout { .. } => FailureKind::Delivery,
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use medline_advice::error::AdviceError;
use medline_core::error::{CoreError, FailureKind};
use medline_export::error::ExportError;
use medline_mail::error::MailError;

/// Unified error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// An expected failure with a message fit to show the user.
    Failure { kind: FailureKind, message: String },
    /// A bug or an environment problem. Logged, never shown.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Failure {
            kind: FailureKind::Validation,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ApiError::Failure { kind, .. } => Some(*kind),
            ApiError::Internal(_) => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
            Some(FailureKind::Transport)
            | Some(FailureKind::ResponseFormat)
            | Some(FailureKind::Delivery) => StatusCode::BAD_GATEWAY,
            Some(FailureKind::Configuration) => StatusCode::SERVICE_UNAVAILABLE,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Failure { message, .. } => message.clone(),
            ApiError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// Log internal errors with their detail. Returns `self` for chaining.
    pub(crate) fn logged(self) -> Self {
        match &self {
            ApiError::Internal(msg) => tracing::error!("internal error: {msg}"),
            ApiError::Failure { kind, message } => {
                tracing::warn!(kind = %kind, "request failed: {message}")
            }
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let this = self.logged();
        let status = this.status();
        let kind = this.kind().map(|k| k.as_str()).unwrap_or("internal");
        let body = ErrorBody {
            error: this.public_message(),
            kind,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Failure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<AdviceError> for ApiError {
    fn from(e: AdviceError) -> Self {
        ApiError::Failure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<MailError> for ApiError {
    fn from(e: MailError) -> Self {
        ApiError::Failure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tera::Error> for ApiError {
    fn from(e: tera::Error) -> Self {
        ApiError::Internal(format!("template rendering failed: {e}"))
    }
}

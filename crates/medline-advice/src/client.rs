//! Chat-completion client.
//!
//! One request per submission: the prompt goes out as a single user message,
//! the first choice's content comes back trimmed. There is no retry. Every
//! way the call can fail is folded into an [`AdviceError`] so callers only
//! ever see a `Result`.
//!
//! The request timeout is always set. An endpoint that accepts the
//! connection and then stalls surfaces as [`AdviceError::Timeout`] instead of
//! holding the submission open.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AdviceResult;
use crate::error::AdviceError;

/// Upper bound on how much of an error body we keep for the message.
const MAX_ERROR_BODY_CHARS: usize = 300;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ── Types ────────────────────────────────────────────────────────────────────

/// How the API key is presented to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthHeader {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `<name>: <key>`, for gateways that use a dedicated key header.
    Header(String),
}

/// Everything needed to reach one completion endpoint.
#[derive(Clone)]
pub struct CompletionEndpoint {
    pub url: String,
    pub model: String,
    pub api_key: String,
    pub auth: AuthHeader,
    pub extra_headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl std::fmt::Debug for CompletionEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEndpoint")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("api_key", &redact_key(&self.api_key))
            .field("auth", &self.auth)
            .field("extra_headers", &self.extra_headers)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn redact_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}

/// A single message in the completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ── Source abstraction ───────────────────────────────────────────────────────

/// Anything that can turn a prompt into advice text.
///
/// The server holds one of these behind an `Arc<dyn AdviceSource>` so tests
/// can swap in a canned implementation.
#[async_trait]
pub trait AdviceSource: Send + Sync {
    async fn fetch(&self, prompt: &str) -> AdviceResult;
}

// ── Client ───────────────────────────────────────────────────────────────────

pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    model: String,
    timeout: Duration,
}

impl CompletionClient {
    /// Build a client for `endpoint`.
    ///
    /// Fails when the key is blank: sending an unauthenticated request to a
    /// hosted endpoint is never what the caller meant.
    pub fn new(endpoint: &CompletionEndpoint) -> Result<Self, AdviceError> {
        let api_key = endpoint.api_key.trim();
        if api_key.is_empty() {
            return Err(AdviceError::Config("missing API key".to_string()));
        }
        if endpoint.url.trim().is_empty() {
            return Err(AdviceError::Config("missing endpoint URL".to_string()));
        }
        if endpoint.model.trim().is_empty() {
            return Err(AdviceError::Config("missing model identifier".to_string()));
        }

        let mut headers = HeaderMap::new();

        let (auth_name, auth_value) = match &endpoint.auth {
            AuthHeader::Bearer => (AUTHORIZATION, format!("Bearer {api_key}")),
            AuthHeader::Header(name) => (parse_header_name(name)?, api_key.to_string()),
        };
        let mut auth_value = HeaderValue::from_str(&auth_value).map_err(|_| {
            AdviceError::Config("API key contains characters not allowed in a header".to_string())
        })?;
        auth_value.set_sensitive(true);
        headers.insert(auth_name, auth_value);

        for (name, value) in &endpoint.extra_headers {
            let value = HeaderValue::from_str(value)
                .map_err(|_| AdviceError::Config(format!("invalid value for header {name}")))?;
            headers.insert(parse_header_name(name)?, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(endpoint.timeout)
            .connect_timeout(endpoint.timeout.min(MAX_CONNECT_TIMEOUT))
            .build()
            .map_err(|e| AdviceError::Config(e.to_string()))?;

        Ok(Self {
            http,
            url: endpoint.url.clone(),
            model: endpoint.model.clone(),
            timeout: endpoint.timeout,
        })
    }

    /// Send `prompt` and return the trimmed advice text.
    pub async fn fetch(&self, prompt: &str) -> AdviceResult {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: prompt.to_string(),
            }],
        };

        info!(model = %self.model, url = %self.url, "requesting advice");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion endpoint rejected request");
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let advice = parse_completion(&text)?;
        info!(advice_len = advice.len(), "advice received");
        Ok(advice)
    }

    fn transport_error(&self, e: reqwest::Error) -> AdviceError {
        let err = if e.is_timeout() {
            AdviceError::Timeout {
                after: self.timeout,
            }
        } else {
            AdviceError::Transport(e.to_string())
        };
        warn!(error = %err, "advice request failed");
        err
    }
}

#[async_trait]
impl AdviceSource for CompletionClient {
    async fn fetch(&self, prompt: &str) -> AdviceResult {
        CompletionClient::fetch(self, prompt).await
    }
}

fn parse_header_name(name: &str) -> Result<HeaderName, AdviceError> {
    HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| AdviceError::Config(format!("invalid header name: {name}")))
}

/// Pull the first choice's text out of a completion response body.
pub fn parse_completion(body: &str) -> AdviceResult {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| AdviceError::ResponseFormat(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AdviceError::ResponseFormat("response contained no choices".to_string()))?;

    let content = choice.message.content.ok_or_else(|| {
        AdviceError::ResponseFormat("first choice has no message content".to_string())
    })?;

    Ok(content.trim().to_string())
}

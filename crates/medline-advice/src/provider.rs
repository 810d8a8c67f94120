//! Hosted chat-completion providers MediLine knows how to talk to.
//!
//! Every provider speaks the same OpenAI-style `/chat/completions` shape;
//! they differ only in URL, default model, which environment variable holds
//! the key, and a few courtesy headers. Anything else can be reached through
//! [`Provider::Custom`] with an explicit URL and model.

use std::str::FromStr;

use crate::error::AdviceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Together,
    OpenRouter,
    OpenAi,
    Custom,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Together => "together",
            Provider::OpenRouter => "openrouter",
            Provider::OpenAi => "openai",
            Provider::Custom => "custom",
        }
    }

    pub fn default_url(&self) -> Option<&'static str> {
        match self {
            Provider::Together => Some("https://api.together.xyz/v1/chat/completions"),
            Provider::OpenRouter => Some("https://openrouter.ai/api/v1/chat/completions"),
            Provider::OpenAi => Some("https://api.openai.com/v1/chat/completions"),
            Provider::Custom => None,
        }
    }

    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            Provider::Together => Some("mistralai/Mixtral-8x7B-Instruct-v0.1"),
            Provider::OpenRouter => Some("mistralai/mixtral-8x7b"),
            Provider::OpenAi => Some("gpt-4"),
            Provider::Custom => None,
        }
    }

    /// Provider-specific variable holding the API key. `MEDLINE_API_KEY`
    /// takes precedence over this in the server config.
    pub fn key_var(&self) -> Option<&'static str> {
        match self {
            Provider::Together => Some("TOGETHER_API_KEY"),
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Custom => None,
        }
    }

    /// Extra headers the provider asks clients to send. OpenRouter uses
    /// `HTTP-Referer` and `X-Title` to attribute traffic to an app.
    pub fn extra_headers(&self, referer: Option<&str>) -> Vec<(String, String)> {
        match self {
            Provider::OpenRouter => {
                let mut headers = vec![("X-Title".to_string(), "AI Health Checker".to_string())];
                if let Some(referer) = referer {
                    headers.push(("HTTP-Referer".to_string(), referer.to_string()));
                }
                headers
            }
            _ => Vec::new(),
        }
    }
}

impl FromStr for Provider {
    type Err = AdviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "together" | "together.ai" => Ok(Provider::Together),
            "openrouter" => Ok(Provider::OpenRouter),
            "openai" => Ok(Provider::OpenAi),
            "custom" => Ok(Provider::Custom),
            other => Err(AdviceError::Config(format!("unknown provider: {other}"))),
        }
    }
}

//! Startup configuration from environment variables.
//!
//! Read once in `main` and handed to constructors; nothing else in the
//! server touches the environment. [`MedlineConfig::from_lookup`] takes any
//! variable source so tests never mutate the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use medline_advice::client::{AuthHeader, CompletionEndpoint};
use medline_advice::provider::Provider;
use medline_mail::{MailSettings, SmtpTls};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct MedlineConfig {
    pub bind: SocketAddr,
    pub provider: Provider,
    pub endpoint: CompletionEndpoint,
    /// `None` disables report emails.
    pub mail: Option<MailSettings>,
    /// JSON clinic directory; the built-in UAE directory when unset.
    pub clinics_file: Option<PathBuf>,
}

impl MedlineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind: SocketAddr = parse_value(
            "MEDLINE_BIND",
            get("MEDLINE_BIND").as_deref().unwrap_or(DEFAULT_BIND),
        )?;

        let provider = match get("MEDLINE_PROVIDER") {
            Some(name) => Provider::from_str(&name).map_err(|e| ConfigError::Invalid {
                var: "MEDLINE_PROVIDER",
                reason: e.to_string(),
            })?,
            None => Provider::default(),
        };

        let api_key = get("MEDLINE_API_KEY")
            .or_else(|| provider.key_var().and_then(|var| get(var)))
            .ok_or_else(|| {
                ConfigError::Missing(match provider.key_var() {
                    Some(var) => format!("MEDLINE_API_KEY or {var}"),
                    None => "MEDLINE_API_KEY".to_string(),
                })
            })?;

        let url = get("MEDLINE_COMPLETION_URL")
            .or_else(|| provider.default_url().map(str::to_string))
            .ok_or_else(|| ConfigError::Missing("MEDLINE_COMPLETION_URL".to_string()))?;
        let model = get("MEDLINE_MODEL")
            .or_else(|| provider.default_model().map(str::to_string))
            .ok_or_else(|| ConfigError::Missing("MEDLINE_MODEL".to_string()))?;

        let auth = match get("MEDLINE_AUTH_HEADER") {
            Some(name) if name.eq_ignore_ascii_case("authorization") => AuthHeader::Bearer,
            Some(name) => AuthHeader::Header(name),
            None => AuthHeader::Bearer,
        };

        let timeout_secs: u64 = parse_var(&get, "MEDLINE_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "MEDLINE_REQUEST_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        let referer = get("MEDLINE_REFERER");
        let endpoint = CompletionEndpoint {
            url,
            model,
            api_key,
            auth,
            extra_headers: provider.extra_headers(referer.as_deref()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let mail = mail_settings(&get)?;
        let clinics_file = get("MEDLINE_CLINICS_FILE").map(PathBuf::from);

        Ok(Self {
            bind,
            provider,
            endpoint,
            mail,
            clinics_file,
        })
    }
}

fn mail_settings<G>(get: &G) -> Result<Option<MailSettings>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(sender) = get("EMAIL_ADDRESS") else {
        return Ok(None);
    };
    let password =
        get("EMAIL_PASSWORD").ok_or_else(|| ConfigError::Missing("EMAIL_PASSWORD".to_string()))?;

    let mut settings = MailSettings::new(sender, password);
    if let Some(host) = get("SMTP_HOST") {
        settings.host = host;
    }
    if let Some(port) = parse_var(get, "SMTP_PORT")? {
        settings.port = port;
    }
    if let Some(tls) = get("SMTP_TLS") {
        settings.tls = SmtpTls::from_str(&tls).map_err(|e| ConfigError::Invalid {
            var: "SMTP_TLS",
            reason: e.to_string(),
        })?;
    }
    let timeout_secs = parse_var(get, "SMTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_SMTP_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            var: "SMTP_TIMEOUT_SECS",
            reason: "must be at least 1".to_string(),
        });
    }
    settings.timeout = Duration::from_secs(timeout_secs);

    Ok(Some(settings))
}

fn parse_var<G, T>(get: &G, var: &'static str) -> Result<Option<T>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(var).map(|raw| parse_value(var, &raw)).transpose()
}

fn parse_value<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}

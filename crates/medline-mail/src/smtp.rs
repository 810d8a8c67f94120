//! SMTP delivery.
//!
//! One connection and one attempt per report. The transport's own socket
//! timeout is set, and the whole exchange is additionally bounded by
//! `tokio::time::timeout` so a relay that trickles responses cannot hold a
//! submission open.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, warn};

use crate::error::MailError;
use crate::message::build_message;
use crate::settings::{MailSettings, SmtpTls};

/// Anything that can deliver a rendered report to an address.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, destination: &str, report: &[u8]) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    settings: MailSettings,
}

impl SmtpMailer {
    pub fn new(settings: MailSettings) -> Result<Self, MailError> {
        if settings.sender.trim().is_empty() {
            return Err(MailError::Config("missing sender address".to_string()));
        }
        if settings.password.is_empty() {
            return Err(MailError::Config("missing sender password".to_string()));
        }
        if settings.host.trim().is_empty() {
            return Err(MailError::Config("missing SMTP host".to_string()));
        }

        let host = settings.host.trim();
        let builder = match settings.tls {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Config(e.to_string()))?,
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Config(e.to_string()))?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.sender.trim().to_string(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            transport,
            settings,
        })
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn send(&self, destination: &str, report: &[u8]) -> Result<(), MailError> {
        let message = build_message(&self.settings.sender, destination, report)?;
        let timeout = self.settings.timeout;

        info!(
            host = %self.settings.host,
            port = self.settings.port,
            bytes = report.len(),
            "sending report email"
        );

        match tokio::time::timeout(timeout, self.transport.send(message)).await {
            Ok(Ok(response)) => {
                info!(code = %response.code(), "report email accepted");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "report email failed");
                Err(MailError::Smtp(e.to_string()))
            }
            Err(_) => {
                warn!(after = ?timeout, "report email timed out");
                Err(MailError::Timeout { after: timeout })
            }
        }
    }
}

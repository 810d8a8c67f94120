use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use medline_advice::CompletionClient;
use medline_core::models::clinic::ClinicDirectory;
use medline_mail::{ReportMailer, SmtpMailer};
use medline_server::config::MedlineConfig;
use medline_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = MedlineConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let clinics = match &config.clinics_file {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                eyre::eyre!("failed to read clinic directory at {}: {e}", path.display())
            })?;
            ClinicDirectory::from_json(&json)?
        }
        None => ClinicDirectory::uae(),
    };

    let advice = CompletionClient::new(&config.endpoint)?;

    let mailer: Option<Arc<dyn ReportMailer>> = match config.mail.clone() {
        Some(settings) => Some(Arc::new(SmtpMailer::new(settings)?)),
        None => {
            tracing::warn!("EMAIL_ADDRESS not set, report emails are disabled");
            None
        }
    };

    let state = AppState::new(Arc::new(advice), mailer, clinics)?;

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "medline-server listening");

    axum::serve(listener, medline_server::app(state)).await?;
    Ok(())
}

use std::sync::Arc;

use tera::Tera;

use medline_advice::AdviceSource;
use medline_core::models::clinic::ClinicDirectory;
use medline_export::layout::ReportComposer;
use medline_mail::ReportMailer;

use crate::views;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub advice: Arc<dyn AdviceSource>,
    /// `None` when no sender account is configured.
    pub mailer: Option<Arc<dyn ReportMailer>>,
    pub clinics: Arc<ClinicDirectory>,
    pub composer: Arc<ReportComposer>,
    pub pages: Arc<Tera>,
}

impl AppState {
    pub fn new(
        advice: Arc<dyn AdviceSource>,
        mailer: Option<Arc<dyn ReportMailer>>,
        clinics: ClinicDirectory,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            advice,
            mailer,
            clinics: Arc::new(clinics),
            composer: Arc::new(ReportComposer::default()),
            pages: Arc::new(views::load()?),
        })
    }
}

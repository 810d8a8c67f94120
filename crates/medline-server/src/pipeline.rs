//! One submission, end to end.
//!
//! Validate → compose prompt → fetch advice → look up clinics → lay out and
//! render the report → optionally email it. Every step runs once, in order.
//! Validation happens before anything leaves the process, and a failed
//! email never costs the user their advice.

use base64::Engine as _;
use base64::engine::general_purpose;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use medline_advice::prompt;
use medline_core::models::intake::{Intake, IntakeForm};
use medline_export::pdf::render_pdf;

use crate::error::ApiError;
use crate::state::AppState;

/// Outcome of the optional email step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
    /// No address on the intake.
    NotRequested,
    Sent { to: String },
    Failed { to: String, reason: String },
    /// An address was given but no sender account is configured.
    Unavailable { to: String },
}

impl Delivery {
    /// One line for the result page.
    pub fn summary(&self) -> String {
        match self {
            Delivery::NotRequested => String::new(),
            Delivery::Sent { to } => format!("Report sent to {to}."),
            Delivery::Failed { to, reason } => {
                format!("Could not email the report to {to}: {reason}")
            }
            Delivery::Unavailable { to } => {
                format!("Email delivery is not configured, so nothing was sent to {to}.")
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Delivery::Failed { .. } | Delivery::Unavailable { .. })
    }
}

/// Everything a finished submission produced.
#[derive(Debug)]
pub struct Assessment {
    pub id: Uuid,
    pub intake: Intake,
    pub advice: String,
    pub clinics: Vec<String>,
    pub report: RenderedReport,
    pub delivery: Delivery,
}

/// File name offered when the report is downloaded.
pub const REPORT_FILENAME: &str = "AI_Health_Report.pdf";

#[derive(Debug)]
pub struct RenderedReport {
    pub pdf: Vec<u8>,
    pub page_count: usize,
}

impl RenderedReport {
    /// The PDF as standard base64, for JSON bodies and `data:` links.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.pdf)
    }
}

/// Run the full pipeline for one form submission.
pub async fn assess(state: &AppState, form: IntakeForm) -> Result<Assessment, ApiError> {
    let intake = form.validate(&state.clinics)?;
    let id = Uuid::new_v4();
    info!(assessment = %id, region = %intake.region(), "assessment started");

    let prompt = prompt::compose(&intake);
    let advice = state.advice.fetch(&prompt).await.inspect_err(|e| {
        warn!(assessment = %id, kind = %e.kind(), "advice unavailable");
    })?;

    let clinics = state.clinics.lookup(intake.region().as_str()).to_vec();
    let report = render_report(state, &intake, &advice)?;
    let delivery = deliver(state, &intake, &report.pdf).await;

    info!(
        assessment = %id,
        pages = report.page_count,
        delivery = delivery_status(&delivery),
        "assessment complete"
    );

    Ok(Assessment {
        id,
        intake,
        advice,
        clinics,
        report,
        delivery,
    })
}

/// Lay out and render a report for an already validated intake.
fn render_report(
    state: &AppState,
    intake: &Intake,
    advice: &str,
) -> Result<RenderedReport, ApiError> {
    let clinics = state.clinics.lookup(intake.region().as_str());
    let report = state.composer.build(intake, advice, clinics);
    let pdf = render_pdf(&report)?;
    Ok(RenderedReport {
        pdf,
        page_count: report.page_count(),
    })
}

/// Email `pdf` to the intake's contact address, if it has one.
///
/// Never fails: the outcome is reported as a [`Delivery`] instead.
async fn deliver(state: &AppState, intake: &Intake, pdf: &[u8]) -> Delivery {
    let Some(to) = intake.contact_email() else {
        return Delivery::NotRequested;
    };
    let to = to.to_string();

    let Some(mailer) = &state.mailer else {
        warn!("report email requested but mail is not configured");
        return Delivery::Unavailable { to };
    };

    match mailer.send(&to, pdf).await {
        Ok(()) => Delivery::Sent { to },
        Err(e) => {
            warn!(kind = %e.kind(), "report email failed: {e}");
            Delivery::Failed {
                to,
                reason: e.to_string(),
            }
        }
    }
}

fn delivery_status(delivery: &Delivery) -> &'static str {
    match delivery {
        Delivery::NotRequested => "not_requested",
        Delivery::Sent { .. } => "sent",
        Delivery::Failed { .. } => "failed",
        Delivery::Unavailable { .. } => "unavailable",
    }
}

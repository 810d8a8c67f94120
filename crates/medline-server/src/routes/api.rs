use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use uuid::Uuid;

use medline_core::models::clinic::ClinicRegion;
use medline_core::models::intake::IntakeForm;

use crate::error::ApiError;
use crate::pipeline::{self, Delivery};
use crate::state::AppState;

pub async fn list_regions(State(state): State<AppState>) -> Json<Vec<ClinicRegion>> {
    Json(state.clinics.entries().to_vec())
}

#[derive(Serialize)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub region: String,
    pub advice: String,
    pub clinics: Vec<String>,
    pub page_count: usize,
    /// The rendered report, base64-encoded.
    pub report_pdf: String,
    pub delivery: Delivery,
}

pub async fn create_assessment(
    State(state): State<AppState>,
    body: Result<Json<IntakeForm>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let Json(form) = body.map_err(|e| ApiError::validation(e.body_text()))?;
    let assessment = pipeline::assess(&state, form).await?;

    Ok(Json(AssessmentResponse {
        id: assessment.id,
        region: assessment.intake.region().to_string(),
        advice: assessment.advice,
        clinics: assessment.clinics,
        page_count: assessment.report.page_count,
        report_pdf: assessment.report.to_base64(),
        delivery: assessment.delivery,
    }))
}

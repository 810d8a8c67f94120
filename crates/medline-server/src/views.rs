//! HTML pages, rendered with Tera.
//!
//! Templates are compiled into the binary. Their names end in `.html` so
//! Tera autoescapes every interpolated value; symptom and advice text are
//! user or model supplied.

use serde::Serialize;
use tera::{Context, Tera};

use medline_core::models::clinic::ClinicDirectory;
use medline_core::models::intake::{
    Gender, IntakeForm, Lifestyle, MAX_AGE, MIN_AGE, SymptomDuration,
};

use crate::pipeline::{Assessment, REPORT_FILENAME};

pub const BASE_PAGE: &str = "base.html";
pub const FORM_PAGE: &str = "form.html";
pub const RESULT_PAGE: &str = "result.html";

pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (BASE_PAGE, include_str!("../templates/base.html")),
        (FORM_PAGE, include_str!("../templates/form.html")),
        (RESULT_PAGE, include_str!("../templates/result.html")),
    ])?;
    Ok(tera)
}

#[derive(Serialize)]
struct Choice {
    value: &'static str,
    label: &'static str,
}

/// Field values echoed back into the form, as strings.
#[derive(Debug, Clone, Serialize)]
pub struct FormValues {
    pub age: String,
    pub gender: String,
    pub region: String,
    pub duration: String,
    pub symptoms: String,
    pub history: String,
    pub medications: String,
    pub lifestyle: String,
    pub email: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            age: String::new(),
            gender: Gender::Male.key().to_string(),
            region: String::new(),
            duration: SymptomDuration::UnderOneDay.key().to_string(),
            symptoms: String::new(),
            history: String::new(),
            medications: String::new(),
            lifestyle: Lifestyle::No.key().to_string(),
            email: String::new(),
        }
    }
}

impl From<&IntakeForm> for FormValues {
    fn from(form: &IntakeForm) -> Self {
        Self {
            age: form.age.to_string(),
            gender: form.gender.key().to_string(),
            region: form.region.clone(),
            duration: form.duration.key().to_string(),
            symptoms: form.symptoms.clone(),
            history: form.history.clone(),
            medications: form.medications.clone(),
            lifestyle: form.lifestyle.key().to_string(),
            email: form.email.clone().unwrap_or_default(),
        }
    }
}

/// The intake form, optionally refilled and with an error banner.
pub fn render_form(
    tera: &Tera,
    clinics: &ClinicDirectory,
    values: &FormValues,
    error: Option<&str>,
    mail_enabled: bool,
) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("regions", &clinics.regions().collect::<Vec<_>>());
    context.insert(
        "genders",
        &Gender::ALL
            .iter()
            .map(|g| Choice { value: g.key(), label: g.label() })
            .collect::<Vec<_>>(),
    );
    context.insert(
        "durations",
        &SymptomDuration::ALL
            .iter()
            .map(|d| Choice { value: d.key(), label: d.label() })
            .collect::<Vec<_>>(),
    );
    context.insert(
        "lifestyles",
        &Lifestyle::ALL
            .iter()
            .map(|l| Choice { value: l.key(), label: l.label() })
            .collect::<Vec<_>>(),
    );
    context.insert("values", values);
    context.insert("error", &error.unwrap_or_default());
    context.insert("min_age", &MIN_AGE);
    context.insert("max_age", &MAX_AGE);
    context.insert("mail_enabled", &mail_enabled);
    tera.render(FORM_PAGE, &context)
}

/// The advice page with clinics, email outcome and a download link.
///
/// The link carries the PDF rendered for this assessment, so nothing needs to
/// be posted back to download it.
pub fn render_result(tera: &Tera, assessment: &Assessment) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("advice", &assessment.advice);
    context.insert("region", assessment.intake.region().as_str());
    context.insert("clinics", &assessment.clinics);
    context.insert("delivery", &assessment.delivery.summary());
    context.insert("delivery_failed", &assessment.delivery.is_failure());
    context.insert("page_count", &assessment.report.page_count);
    context.insert("pdf_base64", &assessment.report.to_base64());
    context.insert("pdf_filename", REPORT_FILENAME);
    tera.render(RESULT_PAGE, &context)
}

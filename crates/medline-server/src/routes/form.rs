//! The browser-facing form.
//!
//! Failures re-render the form with the message and the user's input
//! instead of returning JSON.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{Html, IntoResponse, Response};

use medline_core::models::intake::IntakeForm;

use crate::error::ApiError;
use crate::pipeline;
use crate::state::AppState;
use crate::views::{self, FormValues};

pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = views::render_form(
        &state.pages,
        &state.clinics,
        &FormValues::default(),
        None,
        state.mailer.is_some(),
    )?;
    Ok(Html(page))
}

pub async fn check(
    State(state): State<AppState>,
    form: Result<Form<IntakeForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable intake form");
            return form_error(
                &state,
                &FormValues::default(),
                ApiError::validation("Please fill in every field. Age must be a whole number."),
            );
        }
    };

    let values = FormValues::from(&form);
    match pipeline::assess(&state, form).await {
        Ok(assessment) => match views::render_result(&state.pages, &assessment) {
            Ok(page) => Html(page).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        },
        Err(e) => form_error(&state, &values, e),
    }
}

fn form_error(state: &AppState, values: &FormValues, error: ApiError) -> Response {
    let error = error.logged();
    let status = error.status();
    let message = error.public_message();
    match views::render_form(
        &state.pages,
        &state.clinics,
        values,
        Some(&message),
        state.mailer.is_some(),
    ) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

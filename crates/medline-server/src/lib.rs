//! medline-server
//!
//! HTML form surface and JSON API over the assessment pipeline.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod views;

use state::AppState;

/// Build the full router over `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // HTML form surface
        .route("/", get(routes::form::show_form))
        .route("/check", post(routes::form::check))
        // JSON API
        .route("/api/regions", get(routes::api::list_regions))
        .route("/api/assessments", post(routes::api::create_assessment))
        .layer(axum_mw::from_fn(middleware::access_log::access_log))
        .layer(cors)
        .with_state(state)
}

pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{doc::ApiDoc, routes::health, state::AppState};
use axum::{Json, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the full application router over the given state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(routes::courses::router())
        .merge(routes::disciplines::router())
        .merge(routes::people::router())
        .merge(routes::offerings::router())
        .merge(routes::video_lessons::router())
        .merge(routes::stats::router())
        .merge(routes::import::router())
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}

//! # REST Routes
//!
//! Router wiring for the REST API.

use crate::api::rest::handlers::{
    self, AppState,
};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the full API router over the shared state.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/quotes", post(handlers::create_quote))
        .route(
            "/api/v1/suppliers/{id}/completion-stats",
            get(handlers::get_completion_stats),
        )
        .route(
            "/api/v1/suppliers/{id}/market-analytics",
            get(handlers::get_market_analytics),
        )
        .route(
            "/api/v1/suppliers/{id}/rates",
            put(handlers::upsert_rate).delete(handlers::opt_out_rate),
        )
        .route(
            "/api/v1/suppliers/{id}/rates/bulk",
            post(handlers::bulk_upsert_rates),
        )
        .route(
            "/api/v1/suppliers/{id}/exclusions",
            post(handlers::add_exclusion).delete(handlers::remove_exclusion),
        )
        .route(
            "/api/v1/rate-adjustments/preview",
            post(handlers::preview_adjustment),
        )
        .route(
            "/api/v1/rate-adjustments/apply",
            post(handlers::apply_adjustment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! # REST API
//!
//! REST endpoints using axum for quoting and rate card management.
//!
//! # Endpoints
//!
//! ## Quotes
//! - `POST /api/v1/quotes` - Price a job request
//!
//! ## Suppliers
//! - `GET /api/v1/suppliers/{id}/completion-stats` - Rate card completion
//! - `GET /api/v1/suppliers/{id}/market-analytics` - Market comparison
//! - `PUT /api/v1/suppliers/{id}/rates` - Upsert one rate slot
//! - `POST /api/v1/suppliers/{id}/rates/bulk` - Upsert many rate slots
//! - `DELETE /api/v1/suppliers/{id}/rates` - Opt out of a rate slot
//! - `POST /api/v1/suppliers/{id}/exclusions` - Add an exclusion
//! - `DELETE /api/v1/suppliers/{id}/exclusions` - Remove an exclusion
//!
//! ## Rate adjustments
//! - `POST /api/v1/rate-adjustments/preview` - Preview a bulk change
//! - `POST /api/v1/rate-adjustments/apply` - Apply a bulk change
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use onsite_pricing::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState { /* services */ });
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AdjustmentRequest, AppState, ErrorResponse, ExclusionRequest, HealthResponse, QuoteRequest,
    QuoteResponse, RateSlotRequest, UpsertRateRequest,
};
pub use routes::create_router;

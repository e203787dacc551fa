//! # REST Handlers
//!
//! Request/response DTOs and handler functions for the REST API.
//!
//! DTOs are camelCase on the wire. Monetary values cross the wire as
//! integer cents; fractional values (hours, percentages) as JSON
//! numbers. Unavailability is a 200 with `available = false`;
//! validation failures are 400; storage failures are 500 and never
//! masquerade as an empty result.

use crate::application::error::ApplicationError;
use crate::application::services::{
    AdjustmentFilters, BulkAdjustmentService, CompletionStats, CompletionStatsService,
    MarketAnalytics, MarketAnalyticsService, PriceQuote, PricingEngine, RateCatalogService,
};
use crate::domain::entities::{JobRequest, RateKey, ResponseTimeExclusion, ServiceExclusion};
use crate::domain::value_objects::{
    CityId, CountryCode, LocationScope, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Shared state for all REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote computation.
    pub pricing: PricingEngine,
    /// Completion accounting.
    pub completion_stats: CompletionStatsService,
    /// Bulk percentage adjustments.
    pub bulk_adjustment: BulkAdjustmentService,
    /// Market comparisons.
    pub market_analytics: MarketAnalyticsService,
    /// Rate and exclusion writes.
    pub rate_catalog: RateCatalogService,
}

/// Error body returned for every non-success response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Handler error mapped onto HTTP status codes.
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApplicationError::Validation(_) | ApplicationError::Domain(_) => {
                StatusCode::BAD_REQUEST
            }
            ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApplicationError::Repository(_) | ApplicationError::Internal(_) => {
                error!(error = %self.0, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn validation(msg: impl Into<String>) -> ApiError {
    ApiError(ApplicationError::validation(msg))
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/quotes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Service type, by category name or wire name.
    pub service_type: String,
    /// `same_day`, `next_day`, or `scheduled`.
    pub service_level: String,
    /// Duration in minutes, 120 to 960 inclusive.
    pub duration_minutes: u32,
    /// Site city identifier.
    pub city: String,
    /// ISO alpha-2 country code.
    pub country: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM[:SS]`.
    pub scheduled_date_time: String,
    /// IANA timezone name for the site.
    pub timezone: String,
}

impl QuoteRequest {
    fn into_job(self) -> ApiResult<JobRequest> {
        let service_type: ServiceType = self
            .service_type
            .parse()
            .map_err(|e| validation(format!("{e}")))?;
        let service_level: ServiceLevel = self
            .service_level
            .parse()
            .map_err(|e| validation(format!("{e}")))?;
        let country = CountryCode::new(&self.country).map_err(ApplicationError::from)?;
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|_| validation(format!("unknown timezone {:?}", self.timezone)))?;
        let scheduled_at = parse_local_datetime(&self.scheduled_date_time)?;

        Ok(JobRequest::new(
            service_type,
            service_level,
            self.duration_minutes,
            CityId::new(self.city),
            country,
            scheduled_at,
            timezone,
        )
        .map_err(ApplicationError::from)?)
    }
}

fn parse_local_datetime(value: &str) -> ApiResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| validation(format!("invalid scheduledDateTime {value:?}")))
}

/// Breakdown section of a quote response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    /// Duration in fractional hours.
    pub duration_hours: f64,
    /// True for out-of-hours jobs.
    #[serde(rename = "isOOH")]
    pub is_ooh: bool,
    /// Out-of-hours premium percent.
    pub ooh_premium_percent: f64,
    /// Platform fee percent.
    pub platform_fee_percent: f64,
}

/// Body of a quote response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// True when at least one supplier can take the job.
    pub available: bool,
    /// Number of suppliers the quote spans.
    pub supplier_count: usize,
    /// Cheapest supplier total in cents.
    pub min_price_cents: Option<i64>,
    /// Most expensive supplier total in cents.
    pub max_price_cents: Option<i64>,
    /// Mean supplier total in cents.
    pub estimated_price_cents: Option<i64>,
    /// Reason message, present when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Computation inputs, present when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BreakdownResponse>,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            available: quote.available,
            supplier_count: quote.supplier_count,
            min_price_cents: quote.min_price.map(|c| c.cents()),
            max_price_cents: quote.max_price.map(|c| c.cents()),
            estimated_price_cents: quote.estimated_price.map(|c| c.cents()),
            message: quote.message,
            breakdown: quote.breakdown.map(|b| BreakdownResponse {
                duration_hours: b.duration_hours.to_f64().unwrap_or_default(),
                is_ooh: b.is_ooh,
                ooh_premium_percent: b.ooh_premium_percent.to_f64().unwrap_or_default(),
                platform_fee_percent: b.platform_fee_percent.to_f64().unwrap_or_default(),
            }),
        }
    }
}

/// POST /api/v1/quotes
///
/// Validates the request, resolves rates, and returns a quote. No-match
/// conditions come back as 200 with `available = false`.
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<Json<QuoteResponse>> {
    let job = request.into_job()?;
    let quote = state.pricing.quote(&job).await?;
    Ok(Json(QuoteResponse::from(quote)))
}

// ---------------------------------------------------------------------------
// Completion stats
// ---------------------------------------------------------------------------

/// Body of a completion stats response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatsResponse {
    /// Non-excluded slots.
    pub total: u64,
    /// Slots with a configured amount.
    pub configured: u64,
    /// Slots without an amount.
    pub missing: u64,
    /// Slots removed by exclusions.
    pub excluded: u64,
    /// Completion percentage, one decimal place.
    pub percentage: f64,
    /// Per service type rows.
    pub by_service_type: Vec<GroupedStatsRow>,
    /// Per location kind rows.
    pub by_location_type: Vec<GroupedStatsRow>,
}

/// One grouped completion row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedStatsRow {
    /// Group label (service type wire name or `countries`/`cities`).
    pub group: String,
    /// Configured slots in the group.
    pub configured: u64,
    /// Missing slots in the group.
    pub missing: u64,
    /// Non-excluded slots in the group.
    pub total: u64,
}

impl From<CompletionStats> for CompletionStatsResponse {
    fn from(stats: CompletionStats) -> Self {
        Self {
            total: stats.total,
            configured: stats.configured,
            missing: stats.missing,
            excluded: stats.excluded,
            percentage: stats.percentage.to_f64().unwrap_or_default(),
            by_service_type: stats
                .by_service_type
                .into_iter()
                .map(|row| GroupedStatsRow {
                    group: row.service_type.as_wire_str().to_string(),
                    configured: row.configured,
                    missing: row.missing,
                    total: row.total,
                })
                .collect(),
            by_location_type: stats
                .by_location_type
                .into_iter()
                .map(|row| GroupedStatsRow {
                    group: row.location_type.to_string(),
                    configured: row.configured,
                    missing: row.missing,
                    total: row.total,
                })
                .collect(),
        }
    }
}

/// GET /api/v1/suppliers/{id}/completion-stats
pub async fn get_completion_stats(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
) -> ApiResult<Json<CompletionStatsResponse>> {
    let stats = state
        .completion_stats
        .for_supplier(&SupplierId::new(supplier_id))
        .await?;
    Ok(Json(CompletionStatsResponse::from(stats)))
}

// ---------------------------------------------------------------------------
// Bulk adjustments
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/rate-adjustments/{preview,apply}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRequest {
    /// The supplier whose rates are adjusted.
    pub supplier_id: String,
    /// Percentage change, e.g. `10` or `-5.5`.
    pub adjustment_percent: f64,
    /// Restrict to these service types.
    #[serde(default)]
    pub service_types: Option<Vec<String>>,
    /// Restrict to these tiers.
    #[serde(default)]
    pub service_levels: Option<Vec<String>>,
    /// Restrict to these countries.
    #[serde(default)]
    pub country_codes: Option<Vec<String>>,
    /// Restrict to these cities.
    #[serde(default)]
    pub city_ids: Option<Vec<String>>,
}

impl AdjustmentRequest {
    fn percent(&self) -> ApiResult<Decimal> {
        Decimal::from_f64(self.adjustment_percent)
            .ok_or_else(|| validation("adjustmentPercent is not a finite number"))
    }

    fn filters(&self) -> ApiResult<AdjustmentFilters> {
        let service_types = self
            .service_types
            .as_ref()
            .map(|types| {
                types
                    .iter()
                    .map(|t| t.parse::<ServiceType>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|e| validation(format!("{e}")))?;
        let service_levels = self
            .service_levels
            .as_ref()
            .map(|levels| {
                levels
                    .iter()
                    .map(|l| l.parse::<ServiceLevel>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|e| validation(format!("{e}")))?;
        let country_codes = self
            .country_codes
            .as_ref()
            .map(|codes| {
                codes
                    .iter()
                    .map(CountryCode::new)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(ApplicationError::from)?;
        let city_ids = self
            .city_ids
            .as_ref()
            .map(|ids| ids.iter().map(CityId::new).collect());

        Ok(AdjustmentFilters {
            service_types,
            service_levels,
            country_codes,
            city_ids,
        })
    }
}

/// One row of an adjustment preview response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentPreviewResponse {
    /// Rate record identifier.
    pub id: Uuid,
    /// Service type wire name.
    pub service_type: String,
    /// Tier wire name.
    pub service_level: String,
    /// Country of the row.
    pub country_code: String,
    /// City of the row, when city-scoped.
    pub city_id: Option<String>,
    /// Amount before the change.
    pub current_rate_usd_cents: i64,
    /// Amount after the change.
    pub new_rate_usd_cents: i64,
    /// The requested percentage change.
    pub change_percent: f64,
}

/// Body of an apply response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAdjustmentResponse {
    /// Number of rate rows written.
    pub updated_count: u64,
}

/// POST /api/v1/rate-adjustments/preview
pub async fn preview_adjustment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustmentRequest>,
) -> ApiResult<Json<Vec<AdjustmentPreviewResponse>>> {
    let supplier_id = SupplierId::new(&request.supplier_id);
    let rows = state
        .bulk_adjustment
        .preview(&supplier_id, request.percent()?, &request.filters()?)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| AdjustmentPreviewResponse {
                id: *row.id.as_uuid(),
                service_type: row.service_type.as_wire_str().to_string(),
                service_level: row.service_level.as_wire_str().to_string(),
                country_code: row.country_code.to_string(),
                city_id: row.city_id.map(|c| c.to_string()),
                current_rate_usd_cents: row.current_rate.cents(),
                new_rate_usd_cents: row.new_rate.cents(),
                change_percent: row.change_percent.to_f64().unwrap_or_default(),
            })
            .collect(),
    ))
}

/// POST /api/v1/rate-adjustments/apply
pub async fn apply_adjustment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustmentRequest>,
) -> ApiResult<Json<AppliedAdjustmentResponse>> {
    let supplier_id = SupplierId::new(&request.supplier_id);
    let applied = state
        .bulk_adjustment
        .apply(&supplier_id, request.percent()?, &request.filters()?)
        .await?;
    Ok(Json(AppliedAdjustmentResponse {
        updated_count: applied.updated_count,
    }))
}

// ---------------------------------------------------------------------------
// Market analytics
// ---------------------------------------------------------------------------

/// One market comparison row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    /// Service type wire name.
    pub service_type: String,
    /// Tier wire name.
    pub service_level: String,
    /// Country grouping the sample.
    pub country_code: String,
    /// The supplier's own amount in cents.
    pub supplier_rate: i64,
    /// Sample mean in cents.
    pub market_average: i64,
    /// Sample median in cents.
    pub market_median: i64,
    /// Cheapest sample amount in cents.
    pub market_min: i64,
    /// Most expensive sample amount in cents.
    pub market_max: i64,
    /// Sample size.
    pub sample_size: usize,
    /// Percent difference from the mean.
    pub percent_difference: f64,
    /// `below`, `at`, or `above`.
    pub positioning: String,
}

/// Body of a market analytics response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalyticsResponse {
    /// Number of configured rates the supplier has.
    pub total_rates_set: u64,
    /// Plurality positioning.
    pub average_positioning: String,
    /// 0 to 100 competitiveness score.
    pub competitive_score: f64,
    /// Advisory messages.
    pub recommendations: Vec<String>,
    /// All comparisons with a sufficient sample.
    pub comparisons: Vec<ComparisonResponse>,
}

impl From<MarketAnalytics> for MarketAnalyticsResponse {
    fn from(analytics: MarketAnalytics) -> Self {
        Self {
            total_rates_set: analytics.total_rates_set,
            average_positioning: positioning_str(analytics.average_positioning),
            competitive_score: analytics.competitive_score.to_f64().unwrap_or_default(),
            recommendations: analytics.recommendations,
            comparisons: analytics
                .comparisons
                .into_iter()
                .map(|c| ComparisonResponse {
                    service_type: c.service_type.as_wire_str().to_string(),
                    service_level: c.service_level.as_wire_str().to_string(),
                    country_code: c.country_code.to_string(),
                    supplier_rate: c.supplier_rate.cents(),
                    market_average: c.market_average.cents(),
                    market_median: c.market_median.cents(),
                    market_min: c.market_min.cents(),
                    market_max: c.market_max.cents(),
                    sample_size: c.sample_size,
                    percent_difference: c.percent_difference.to_f64().unwrap_or_default(),
                    positioning: positioning_str(c.positioning),
                })
                .collect(),
        }
    }
}

fn positioning_str(positioning: crate::application::services::Positioning) -> String {
    use crate::application::services::Positioning;
    match positioning {
        Positioning::Below => "below",
        Positioning::At => "at",
        Positioning::Above => "above",
        Positioning::Mixed => "mixed",
    }
    .to_string()
}

/// GET /api/v1/suppliers/{id}/market-analytics
pub async fn get_market_analytics(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
) -> ApiResult<Json<MarketAnalyticsResponse>> {
    let analytics = state
        .market_analytics
        .for_supplier(&SupplierId::new(supplier_id))
        .await?;
    Ok(Json(MarketAnalyticsResponse::from(analytics)))
}

// ---------------------------------------------------------------------------
// Rate catalog writes
// ---------------------------------------------------------------------------

/// Identifies one rate slot in supplier-facing requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSlotRequest {
    /// Service type, by category name or wire name.
    pub service_type: String,
    /// `same_day`, `next_day`, or `scheduled`.
    pub service_level: String,
    /// ISO alpha-2 country code of the scope.
    pub country: String,
    /// City identifier for city-scoped slots.
    #[serde(default)]
    pub city_id: Option<String>,
}

impl RateSlotRequest {
    fn into_key(self, supplier_id: &SupplierId) -> ApiResult<RateKey> {
        let service_type: ServiceType = self
            .service_type
            .parse()
            .map_err(|e| validation(format!("{e}")))?;
        let service_level: ServiceLevel = self
            .service_level
            .parse()
            .map_err(|e| validation(format!("{e}")))?;
        let country = CountryCode::new(&self.country).map_err(ApplicationError::from)?;
        let scope = match self.city_id {
            Some(city) => LocationScope::city(CityId::new(city), country),
            None => LocationScope::country_wide(country),
        };
        Ok(RateKey::new(
            supplier_id.clone(),
            scope,
            service_type,
            service_level,
        ))
    }
}

/// Body of `PUT /api/v1/suppliers/{id}/rates`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRateRequest {
    /// The slot to write.
    #[serde(flatten)]
    pub slot: RateSlotRequest,
    /// Hourly amount in cents; null leaves a price gap.
    pub amount_usd_cents: Option<i64>,
}

/// Body of a rate upsert response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    /// Rate record identifier.
    pub id: Uuid,
    /// Hourly amount in cents, when configured.
    pub amount_usd_cents: Option<i64>,
    /// Cached serviceable flag.
    pub serviceable: bool,
    /// Record version.
    pub version: u64,
}

/// PUT /api/v1/suppliers/{id}/rates
pub async fn upsert_rate(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
    Json(request): Json<UpsertRateRequest>,
) -> ApiResult<Json<RateResponse>> {
    let supplier_id = SupplierId::new(supplier_id);
    let key = request.slot.into_key(&supplier_id)?;
    let amount = request
        .amount_usd_cents
        .map(UsdCents::new)
        .transpose()
        .map_err(ApplicationError::from)?;

    let rate = state.rate_catalog.upsert_rate(&key, amount).await?;
    Ok(Json(RateResponse {
        id: *rate.id().as_uuid(),
        amount_usd_cents: rate.amount().map(|a| a.cents()),
        serviceable: rate.serviceable(),
        version: rate.version(),
    }))
}

/// One entry of a bulk upsert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRateEntry {
    /// The slot to write.
    #[serde(flatten)]
    pub slot: RateSlotRequest,
    /// Hourly amount in cents; null leaves a price gap.
    pub amount_usd_cents: Option<i64>,
}

/// POST /api/v1/suppliers/{id}/rates/bulk
pub async fn bulk_upsert_rates(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
    Json(entries): Json<Vec<BulkRateEntry>>,
) -> ApiResult<Json<AppliedAdjustmentResponse>> {
    let supplier_id = SupplierId::new(supplier_id);
    let mut writes = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.slot.into_key(&supplier_id)?;
        let amount = entry
            .amount_usd_cents
            .map(UsdCents::new)
            .transpose()
            .map_err(ApplicationError::from)?;
        writes.push((key, amount));
    }

    let written = state.rate_catalog.bulk_upsert(&supplier_id, &writes).await?;
    Ok(Json(AppliedAdjustmentResponse {
        updated_count: written,
    }))
}

/// DELETE /api/v1/suppliers/{id}/rates
pub async fn opt_out_rate(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
    Json(request): Json<RateSlotRequest>,
) -> ApiResult<StatusCode> {
    let supplier_id = SupplierId::new(supplier_id);
    let key = request.into_key(&supplier_id)?;
    if state.rate_catalog.opt_out(&key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError(ApplicationError::not_found("Rate", key.to_string())))
    }
}

// ---------------------------------------------------------------------------
// Exclusions
// ---------------------------------------------------------------------------

/// Body of exclusion add/remove requests.
///
/// A request without `serviceLevel` targets the whole service type at
/// the location; with it, a single response-time slot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRequest {
    /// Service type, by category name or wire name.
    pub service_type: String,
    /// Optional tier; absent means the whole service type.
    #[serde(default)]
    pub service_level: Option<String>,
    /// ISO alpha-2 country code of the scope.
    pub country: String,
    /// City identifier for city-scoped exclusions.
    #[serde(default)]
    pub city_id: Option<String>,
}

enum ExclusionKind {
    Service(ServiceExclusion),
    Response(ResponseTimeExclusion),
}

impl ExclusionRequest {
    fn into_kind(self, supplier_id: &SupplierId) -> ApiResult<ExclusionKind> {
        let service_type: ServiceType = self
            .service_type
            .parse()
            .map_err(|e| validation(format!("{e}")))?;
        let country = CountryCode::new(&self.country).map_err(ApplicationError::from)?;
        let scope = match self.city_id {
            Some(city) => LocationScope::city(CityId::new(city), country),
            None => LocationScope::country_wide(country),
        };

        match self.service_level {
            None => Ok(ExclusionKind::Service(ServiceExclusion::new(
                supplier_id.clone(),
                scope,
                service_type,
            ))),
            Some(level) => {
                let service_level: ServiceLevel =
                    level.parse().map_err(|e| validation(format!("{e}")))?;
                Ok(ExclusionKind::Response(ResponseTimeExclusion::new(
                    supplier_id.clone(),
                    scope,
                    service_type,
                    service_level,
                )))
            }
        }
    }
}

/// POST /api/v1/suppliers/{id}/exclusions
pub async fn add_exclusion(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
    Json(request): Json<ExclusionRequest>,
) -> ApiResult<StatusCode> {
    let supplier_id = SupplierId::new(supplier_id);
    match request.into_kind(&supplier_id)? {
        ExclusionKind::Service(exclusion) => {
            state.rate_catalog.add_service_exclusion(&exclusion).await?;
        }
        ExclusionKind::Response(exclusion) => {
            state.rate_catalog.add_response_exclusion(&exclusion).await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/suppliers/{id}/exclusions
pub async fn remove_exclusion(
    State(state): State<Arc<AppState>>,
    Path(supplier_id): Path<String>,
    Json(request): Json<ExclusionRequest>,
) -> ApiResult<StatusCode> {
    let supplier_id = SupplierId::new(supplier_id);
    let removed = match request.into_kind(&supplier_id)? {
        ExclusionKind::Service(exclusion) => {
            state
                .rate_catalog
                .remove_service_exclusion(&exclusion)
                .await?
        }
        ExclusionKind::Response(exclusion) => {
            state
                .rate_catalog
                .remove_response_exclusion(&exclusion)
                .await?
        }
    };
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError(ApplicationError::not_found(
            "Exclusion",
            supplier_id.as_str(),
        )))
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Body of the health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
}

/// GET /api/v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

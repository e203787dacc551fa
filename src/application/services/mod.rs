//! # Application Services
//!
//! One service per read or write surface of the pricing core.
//!
//! - [`LocationResolver`]: city-over-country rate resolution
//! - [`AvailabilityService`]: serviceability filtering with reasons
//! - [`PricingEngine`]: quote computation
//! - [`CompletionStatsService`]: rate card completion accounting
//! - [`BulkAdjustmentService`]: preview-then-apply percentage changes
//! - [`MarketAnalyticsService`]: cross-supplier rate comparisons
//! - [`RateCatalogService`]: rate and exclusion write paths

pub mod availability;
pub mod bulk_adjustment;
pub mod completion_stats;
pub mod location_resolver;
pub mod market_analytics;
pub mod pricing;
pub mod rate_catalog;

pub use availability::{AvailabilityOutcome, AvailabilityService, UnavailableReason};
pub use bulk_adjustment::{
    AdjustmentFilters, AdjustmentPreviewRow, AppliedAdjustment, BulkAdjustmentService,
};
pub use completion_stats::{
    CompletionStats, CompletionStatsService, LocationTypeStats, ServiceTypeStats,
};
pub use location_resolver::{LocationResolver, ResolutionOutcome, ResolvedRate};
pub use market_analytics::{MarketAnalytics, MarketAnalyticsService, Positioning, RateComparison};
pub use pricing::{PriceQuote, PricingConfig, PricingEngine, QuoteBreakdown};
pub use rate_catalog::RateCatalogService;

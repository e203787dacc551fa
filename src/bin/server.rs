//! Pricing service entry point.
//!
//! Loads settings, wires the repository adapters (PostgreSQL when a
//! database URL is configured, in-memory otherwise), and serves the
//! REST API.

use anyhow::Context;
use onsite_pricing::api::rest::{create_router, AppState};
use onsite_pricing::application::services::{
    AvailabilityService, BulkAdjustmentService, CompletionStatsService, LocationResolver,
    MarketAnalyticsService, PricingEngine, RateCatalogService,
};
use onsite_pricing::infrastructure::persistence::in_memory::{
    InMemoryCoverageRepository, InMemoryExclusionRepository, InMemoryRateRepository,
    InMemorySupplierRepository,
};
use onsite_pricing::infrastructure::persistence::postgres::{
    PostgresCoverageRepository, PostgresExclusionRepository, PostgresRateRepository,
    PostgresSupplierRepository,
};
use onsite_pricing::infrastructure::persistence::traits::{
    CoverageRepository, ExclusionRepository, RateRepository, SupplierRepository,
};
use onsite_pricing::infrastructure::settings::Settings;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Repositories {
    rates: Arc<dyn RateRepository>,
    suppliers: Arc<dyn SupplierRepository>,
    coverage: Arc<dyn CoverageRepository>,
    exclusions: Arc<dyn ExclusionRepository>,
}

async fn build_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match &settings.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(settings.database.max_connections)
                .connect(url)
                .await
                .context("connecting to PostgreSQL")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("running migrations")?;
            info!("using PostgreSQL storage");
            Ok(Repositories {
                rates: Arc::new(PostgresRateRepository::new(pool.clone())),
                suppliers: Arc::new(PostgresSupplierRepository::new(pool.clone())),
                coverage: Arc::new(PostgresCoverageRepository::new(pool.clone())),
                exclusions: Arc::new(PostgresExclusionRepository::new(pool)),
            })
        }
        None => {
            info!("no database URL configured, using in-memory storage");
            Ok(Repositories {
                rates: Arc::new(InMemoryRateRepository::new()),
                suppliers: Arc::new(InMemorySupplierRepository::new()),
                coverage: Arc::new(InMemoryCoverageRepository::new()),
                exclusions: Arc::new(InMemoryExclusionRepository::new()),
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("loading settings")?;
    let repos = build_repositories(&settings).await?;

    let resolver = LocationResolver::new(repos.rates.clone(), repos.coverage.clone());
    let availability =
        AvailabilityService::new(repos.suppliers.clone(), repos.exclusions.clone());
    let pricing = PricingEngine::new(
        resolver,
        availability,
        settings.pricing.to_config(),
    );
    let completion_stats = CompletionStatsService::new(
        repos.rates.clone(),
        repos.suppliers.clone(),
        repos.coverage.clone(),
        repos.exclusions.clone(),
    );
    let bulk_adjustment =
        BulkAdjustmentService::new(repos.rates.clone(), repos.suppliers.clone());
    let market_analytics =
        MarketAnalyticsService::new(repos.rates.clone(), repos.suppliers.clone());
    let rate_catalog = RateCatalogService::new(
        repos.rates,
        repos.suppliers,
        repos.exclusions,
    );

    let state = Arc::new(AppState {
        pricing,
        completion_stats,
        bulk_adjustment,
        market_analytics,
        rate_catalog,
    });
    let router = create_router(state);

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "pricing service listening");
    axum::serve(listener, router).await.context("serving")?;
    Ok(())
}

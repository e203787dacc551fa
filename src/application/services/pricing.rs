//! # Pricing Engine
//!
//! Turns a validated job request into a customer-facing price quote.
//!
//! Per serviceable supplier the price is the hourly rate times the
//! fractional duration, an optional 25% out-of-hours premium, then a 15%
//! platform fee. The base amount stays fractional; rounding to whole
//! cents happens after the premium and again after the fee, ties up.
//! The quote reports the extrema across suppliers plus the arithmetic
//! mean as the estimated price.
//!
//! Unavailability is a business outcome, not an error: the quote comes
//! back with `available = false` and a reason message, and errors are
//! reserved for invalid input and storage failure.

use crate::application::error::ApplicationResult;
use crate::application::services::availability::{AvailabilityOutcome, AvailabilityService};
use crate::application::services::location_resolver::LocationResolver;
use crate::domain::entities::JobRequest;
use crate::domain::services::business_hours;
use crate::domain::value_objects::money::{round_to_cents, UsdCents};
use rust_decimal::Decimal;
use serde::Serialize;

/// Pricing percentages applied on top of supplier rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Premium applied to out-of-hours jobs, in whole percent.
    pub ooh_premium_percent: Decimal,
    /// Platform fee applied to every job, in whole percent.
    pub platform_fee_percent: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            ooh_premium_percent: Decimal::from(25),
            platform_fee_percent: Decimal::from(15),
        }
    }
}

/// Per-quote computation inputs echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    /// Job duration in fractional hours.
    pub duration_hours: Decimal,
    /// True when the job falls outside business hours.
    #[serde(rename = "isOOH")]
    pub is_ooh: bool,
    /// Out-of-hours premium in whole percent.
    pub ooh_premium_percent: Decimal,
    /// Platform fee in whole percent.
    pub platform_fee_percent: Decimal,
}

/// A price quote for a job request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// True when at least one supplier can take the job.
    pub available: bool,
    /// Number of suppliers the quote spans.
    pub supplier_count: usize,
    /// Cheapest supplier total.
    pub min_price: Option<UsdCents>,
    /// Most expensive supplier total.
    pub max_price: Option<UsdCents>,
    /// Mean supplier total, rounded to the nearest cent.
    pub estimated_price: Option<UsdCents>,
    /// Reason message, present when unavailable.
    pub message: Option<String>,
    /// Computation inputs, present when available.
    pub breakdown: Option<QuoteBreakdown>,
}

impl PriceQuote {
    fn unavailable(message: &str) -> Self {
        Self {
            available: false,
            supplier_count: 0,
            min_price: None,
            max_price: None,
            estimated_price: None,
            message: Some(message.to_string()),
            breakdown: None,
        }
    }
}

/// Computes price quotes from resolved, filtered supplier rates.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    resolver: LocationResolver,
    availability: AvailabilityService,
    config: PricingConfig,
}

impl PricingEngine {
    /// Creates a pricing engine.
    #[must_use]
    pub fn new(
        resolver: LocationResolver,
        availability: AvailabilityService,
        config: PricingConfig,
    ) -> Self {
        Self {
            resolver,
            availability,
            config,
        }
    }

    /// Produces a quote for a validated job request.
    ///
    /// # Errors
    ///
    /// Returns an error on repository failure, arithmetic overflow, or a
    /// scheduled local time that does not exist in the site timezone.
    /// No-match conditions are reported inside the quote, not as errors.
    pub async fn quote(&self, job: &JobRequest) -> ApplicationResult<PriceQuote> {
        let resolution = self
            .resolver
            .resolve(
                job.city_id(),
                job.country(),
                job.service_type(),
                job.service_level(),
            )
            .await?;

        let available = match self
            .availability
            .available_suppliers(job, &resolution)
            .await?
        {
            AvailabilityOutcome::Unavailable(reason) => {
                return Ok(PriceQuote::unavailable(reason.message()));
            }
            AvailabilityOutcome::Serviceable(available) => available,
        };

        let is_ooh = business_hours::is_out_of_hours_for(job)?;
        let duration_hours = job.duration_hours();

        let mut totals = Vec::with_capacity(available.len());
        for candidate in &available {
            // Resolution only yields usable rates, which carry an amount.
            let amount = candidate.rate.amount().unwrap_or(UsdCents::ZERO);
            totals.push(self.supplier_total(amount, duration_hours, is_ooh)?);
        }

        let min_price = totals.iter().min().copied();
        let max_price = totals.iter().max().copied();
        let sum: Decimal = totals.iter().map(UsdCents::to_decimal).sum();
        let estimated_price = Some(round_to_cents(sum / Decimal::from(totals.len()))?);

        Ok(PriceQuote {
            available: true,
            supplier_count: available.len(),
            min_price,
            max_price,
            estimated_price,
            message: None,
            breakdown: Some(QuoteBreakdown {
                duration_hours,
                is_ooh,
                ooh_premium_percent: self.config.ooh_premium_percent,
                platform_fee_percent: self.config.platform_fee_percent,
            }),
        })
    }

    /// One supplier's total: base, optional OOH premium, platform fee.
    fn supplier_total(
        &self,
        hourly: UsdCents,
        duration_hours: Decimal,
        is_ooh: bool,
    ) -> ApplicationResult<UsdCents> {
        let base = hourly.to_decimal() * duration_hours;
        let with_premium = if is_ooh {
            let factor = Decimal::ONE + self.config.ooh_premium_percent / Decimal::ONE_HUNDRED;
            round_to_cents(base * factor)?.to_decimal()
        } else {
            base
        };
        let fee_factor = Decimal::ONE + self.config.platform_fee_percent / Decimal::ONE_HUNDRED;
        Ok(round_to_cents(with_premium * fee_factor)?)
    }
}

//! # Market Analytics Engine
//!
//! Compares one supplier's rates against the whole catalog.
//!
//! Each of the supplier's configured rates is compared against every
//! catalog row sharing its `(service type, service level, country)`
//! group, the supplier's own row included. Groups with fewer than two
//! configured amounts carry no market signal and are skipped. The median
//! of an even-sized sample is the upper-middle element of the sorted
//! amounts.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::Rate;
use crate::domain::value_objects::money::round_to_cents;
use crate::domain::value_objects::{
    CountryCode, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use crate::infrastructure::persistence::traits::{RateRepository, SupplierRepository};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Where a rate sits relative to its market sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    /// More than 5% below the market average.
    Below,
    /// Within 5% of the market average.
    At,
    /// More than 5% above the market average.
    Above,
    /// No single positioning has a plurality.
    Mixed,
}

/// One rate compared against its market sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateComparison {
    /// Service type of the compared rate.
    pub service_type: ServiceType,
    /// Tier of the compared rate.
    pub service_level: ServiceLevel,
    /// Country grouping the sample.
    pub country_code: CountryCode,
    /// The supplier's own hourly amount.
    pub supplier_rate: UsdCents,
    /// Mean of the sample, rounded to the nearest cent.
    pub market_average: UsdCents,
    /// Upper-middle element of the sorted sample.
    pub market_median: UsdCents,
    /// Cheapest sample amount.
    pub market_min: UsdCents,
    /// Most expensive sample amount.
    pub market_max: UsdCents,
    /// Number of configured amounts in the sample.
    pub sample_size: usize,
    /// `(supplier - average) / average * 100`.
    pub percent_difference: Decimal,
    /// Band classification at the 5% threshold.
    pub positioning: Positioning,
}

/// A supplier's full market analytics summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalytics {
    /// Number of configured rates the supplier has.
    pub total_rates_set: u64,
    /// Plurality positioning across comparisons, ties resolve to mixed.
    pub average_positioning: Positioning,
    /// 0 to 100 score, 50 at market parity.
    pub competitive_score: Decimal,
    /// Advisory messages derived from the comparisons.
    pub recommendations: Vec<String>,
    /// Every comparison with a sufficient sample.
    pub comparisons: Vec<RateComparison>,
}

const POSITIONING_BAND_PERCENT: i64 = 5;
const OUTLIER_THRESHOLD_PERCENT: i64 = 20;

/// Computes market comparisons over the rate catalog.
#[derive(Debug, Clone)]
pub struct MarketAnalyticsService {
    rates: Arc<dyn RateRepository>,
    suppliers: Arc<dyn SupplierRepository>,
}

impl MarketAnalyticsService {
    /// Creates a market analytics service.
    #[must_use]
    pub fn new(rates: Arc<dyn RateRepository>, suppliers: Arc<dyn SupplierRepository>) -> Self {
        Self { rates, suppliers }
    }

    /// Computes the market summary for a supplier.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for unknown suppliers and
    /// repository errors on storage failure.
    pub async fn for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> ApplicationResult<MarketAnalytics> {
        if self.suppliers.get(supplier_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "Supplier",
                supplier_id.as_str(),
            ));
        }

        let own_rates: Vec<Rate> = self
            .rates
            .find_by_supplier(supplier_id)
            .await?
            .into_iter()
            .filter(|r| r.is_configured())
            .collect();
        let total_rates_set = own_rates.len() as u64;

        let mut comparisons = Vec::new();
        for rate in &own_rates {
            let Some(amount) = rate.amount() else {
                continue;
            };
            let key = rate.key();
            let country = key.scope.country().clone();

            let sample: Vec<i64> = self
                .rates
                .find_for_service(key.service_type, key.service_level)
                .await?
                .iter()
                .filter(|r| r.key().scope.country() == &country)
                .filter_map(|r| r.amount().map(|a| a.cents()))
                .collect();

            if let Some(comparison) =
                build_comparison(key.service_type, key.service_level, country, amount, sample)?
            {
                comparisons.push(comparison);
            }
        }

        let average_positioning = plurality_positioning(&comparisons);
        let competitive_score = competitive_score(&comparisons);
        let recommendations = recommendations(average_positioning, &comparisons);

        Ok(MarketAnalytics {
            total_rates_set,
            average_positioning,
            competitive_score,
            recommendations,
            comparisons,
        })
    }
}

fn build_comparison(
    service_type: ServiceType,
    service_level: ServiceLevel,
    country_code: CountryCode,
    supplier_rate: UsdCents,
    mut sample: Vec<i64>,
) -> ApplicationResult<Option<RateComparison>> {
    if sample.len() < 2 {
        return Ok(None);
    }
    sample.sort_unstable();

    let sum: Decimal = sample.iter().map(|c| Decimal::from(*c)).sum();
    let average = round_to_cents(sum / Decimal::from(sample.len()))?;
    let median = UsdCents::new(sample[sample.len() / 2])?;
    let min = UsdCents::new(sample[0])?;
    let max = UsdCents::new(sample[sample.len() - 1])?;

    let percent_difference = if average.cents() == 0 {
        Decimal::ZERO
    } else {
        (supplier_rate.to_decimal() - average.to_decimal()) / average.to_decimal()
            * Decimal::ONE_HUNDRED
    };

    let band = Decimal::from(POSITIONING_BAND_PERCENT);
    let positioning = if percent_difference < -band {
        Positioning::Below
    } else if percent_difference > band {
        Positioning::Above
    } else {
        Positioning::At
    };

    Ok(Some(RateComparison {
        service_type,
        service_level,
        country_code,
        supplier_rate,
        market_average: average,
        market_median: median,
        market_min: min,
        market_max: max,
        sample_size: sample.len(),
        percent_difference,
        positioning,
    }))
}

fn plurality_positioning(comparisons: &[RateComparison]) -> Positioning {
    let below = comparisons
        .iter()
        .filter(|c| c.positioning == Positioning::Below)
        .count();
    let at = comparisons
        .iter()
        .filter(|c| c.positioning == Positioning::At)
        .count();
    let above = comparisons
        .iter()
        .filter(|c| c.positioning == Positioning::Above)
        .count();

    let best = below.max(at).max(above);
    if best == 0 {
        return Positioning::Mixed;
    }
    let winners = [below, at, above].iter().filter(|&&n| n == best).count();
    if winners > 1 {
        return Positioning::Mixed;
    }
    if below == best {
        Positioning::Below
    } else if above == best {
        Positioning::Above
    } else {
        Positioning::At
    }
}

fn competitive_score(comparisons: &[RateComparison]) -> Decimal {
    let base = Decimal::from(50);
    if comparisons.is_empty() {
        return base;
    }
    let mean_diff: Decimal = comparisons
        .iter()
        .map(|c| c.percent_difference)
        .sum::<Decimal>()
        / Decimal::from(comparisons.len());

    let shift = Decimal::TWO * mean_diff.abs();
    let score = if mean_diff < Decimal::ZERO {
        base + shift
    } else {
        base - shift
    };
    score.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

fn recommendations(overall: Positioning, comparisons: &[RateComparison]) -> Vec<String> {
    let mut out = Vec::new();
    match overall {
        Positioning::Above => out.push(
            "Your rates are above the market average; lowering them could win more jobs."
                .to_string(),
        ),
        Positioning::Below => out.push(
            "Your rates are below the market average; there may be room to raise them."
                .to_string(),
        ),
        Positioning::At | Positioning::Mixed => {}
    }

    let threshold = Decimal::from(OUTLIER_THRESHOLD_PERCENT);
    for comparison in comparisons {
        if comparison.percent_difference.abs() > threshold {
            let direction = if comparison.percent_difference > Decimal::ZERO {
                "above"
            } else {
                "below"
            };
            out.push(format!(
                "{} ({}) in {} is more than 20% {} the market average",
                comparison.service_type.display_name(),
                comparison.service_level,
                comparison.country_code,
                direction,
            ));
        }
    }
    out
}

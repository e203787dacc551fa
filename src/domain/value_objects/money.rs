//! # Money Value Object
//!
//! USD amounts as an integer number of cents.
//!
//! All customer-facing prices and supplier rates in the marketplace are
//! USD-denominated integer cents. Fractional intermediates (duration
//! multiplication, percentage surcharges) are computed with
//! [`rust_decimal::Decimal`] and rounded back to whole cents with a
//! half-up rule, so the same inputs always produce the same output.
//!
//! # Examples
//!
//! ```
//! use onsite_pricing::domain::value_objects::money::UsdCents;
//! use rust_decimal::Decimal;
//!
//! let rate = UsdCents::from_dollars(100).unwrap();
//! let adjusted = rate.apply_percent(Decimal::new(15, 0)).unwrap();
//! assert_eq!(adjusted.cents(), 11500);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative USD amount in whole cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UsdCents(i64);

impl UsdCents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole cents.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` if `cents` is negative.
    pub fn new(cents: i64) -> DomainResult<Self> {
        if cents < 0 {
            return Err(DomainError::NegativeAmount(cents));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from whole dollars.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` for negative dollars and
    /// `DomainError::ArithmeticOverflow` if the cent value overflows.
    pub fn from_dollars(dollars: i64) -> DomainResult<Self> {
        let cents = dollars
            .checked_mul(100)
            .ok_or(DomainError::ArithmeticOverflow)?;
        Self::new(cents)
    }

    /// Returns the amount in whole cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal number of cents.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Adds two amounts with overflow checking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ArithmeticOverflow` on overflow.
    pub fn checked_add(&self, other: Self) -> DomainResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(DomainError::ArithmeticOverflow)
    }

    /// Applies a percentage change, rounding half-up to the nearest cent.
    ///
    /// `percent` is expressed in whole percentage points, so `15` means
    /// a 15% increase and `-10` a 10% decrease.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` if the result would be
    /// negative (a decrease of more than 100%), or
    /// `DomainError::ArithmeticOverflow` if the result exceeds `i64`.
    pub fn apply_percent(&self, percent: Decimal) -> DomainResult<Self> {
        let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;
        round_to_cents(self.to_decimal() * factor)
    }
}

impl fmt::Display for UsdCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Rounds a decimal cent amount to whole cents, ties away from zero.
///
/// This is the single rounding rule for the pricing engine; every
/// fractional intermediate passes through here.
///
/// # Errors
///
/// Returns `DomainError::NegativeAmount` for negative results and
/// `DomainError::ArithmeticOverflow` if the value does not fit in `i64`.
pub fn round_to_cents(value: Decimal) -> DomainResult<UsdCents> {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let cents = rounded.to_i64().ok_or(DomainError::ArithmeticOverflow)?;
    UsdCents::new(cents)
}

//! # Job Request
//!
//! A validated incoming job descriptor.
//!
//! Duration bounds are enforced at construction so no later stage can see
//! an out-of-range job. The scheduled time is a local wall-clock value in
//! the site's IANA timezone; classification against business hours happens
//! in that zone, never in server or UTC time.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CityId, CountryCode, ServiceLevel, ServiceType};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;

/// Minimum accepted job duration in minutes (2 hours).
pub const MIN_DURATION_MINUTES: u32 = 120;

/// Maximum accepted job duration in minutes (16 hours).
pub const MAX_DURATION_MINUTES: u32 = 960;

/// A validated job descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    service_type: ServiceType,
    service_level: ServiceLevel,
    duration_minutes: u32,
    city_id: CityId,
    country: CountryCode,
    scheduled_at: NaiveDateTime,
    timezone: Tz,
}

impl JobRequest {
    /// Creates a job request, validating the duration bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDuration` when `duration_minutes` is
    /// outside `[120, 960]`.
    pub fn new(
        service_type: ServiceType,
        service_level: ServiceLevel,
        duration_minutes: u32,
        city_id: CityId,
        country: CountryCode,
        scheduled_at: NaiveDateTime,
        timezone: Tz,
    ) -> DomainResult<Self> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(DomainError::invalid_duration(
                duration_minutes,
                MIN_DURATION_MINUTES,
                MAX_DURATION_MINUTES,
            ));
        }
        Ok(Self {
            service_type,
            service_level,
            duration_minutes,
            city_id,
            country,
            scheduled_at,
            timezone,
        })
    }

    /// Returns the requested service type.
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the requested response-time tier.
    #[must_use]
    pub const fn service_level(&self) -> ServiceLevel {
        self.service_level
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the duration as a decimal number of hours.
    ///
    /// Fractional hours are permitted (e.g. 150 minutes is 2.5 hours).
    #[must_use]
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.duration_minutes) / Decimal::from(60)
    }

    /// Returns the site city.
    #[must_use]
    pub const fn city_id(&self) -> &CityId {
        &self.city_id
    }

    /// Returns the site country.
    #[must_use]
    pub const fn country(&self) -> &CountryCode {
        &self.country
    }

    /// Returns the scheduled local wall-clock time.
    #[must_use]
    pub const fn scheduled_at(&self) -> NaiveDateTime {
        self.scheduled_at
    }

    /// Returns the site timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn build(duration: u32) -> DomainResult<JobRequest> {
        JobRequest::new(
            ServiceType::EndUserCompute,
            ServiceLevel::SameBusinessDay,
            duration,
            CityId::new("nyc"),
            CountryCode::new("US").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            chrono_tz::America::New_York,
        )
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        assert!(build(120).is_ok());
        assert!(build(960).is_ok());
    }

    #[test]
    fn duration_out_of_bounds_rejected() {
        assert!(matches!(
            build(119),
            Err(DomainError::InvalidDuration { minutes: 119, .. })
        ));
        assert!(matches!(
            build(961),
            Err(DomainError::InvalidDuration { minutes: 961, .. })
        ));
    }

    #[test]
    fn duration_hours_allows_fractions() {
        let request = build(150).unwrap();
        assert_eq!(request.duration_hours(), Decimal::new(25, 1));
    }

    #[test]
    fn four_hours_is_four() {
        let request = build(240).unwrap();
        assert_eq!(request.duration_hours(), Decimal::from(4));
    }
}

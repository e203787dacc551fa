//! # Business-Hours Classification
//!
//! Classifies a scheduled timestamp as business-hours or out-of-hours.
//!
//! Business hours are Monday to Friday, 08:00 inclusive to 18:00 exclusive,
//! in the site's local timezone. Any time on Saturday or Sunday, or outside
//! that window on a weekday, is out-of-hours and attracts the OOH premium.
//!
//! Classification always uses the site's IANA timezone. Two correct
//! timezone representations of the same local wall-clock time therefore
//! classify identically.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::entities::JobRequest;
use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;

/// First hour of the business day (inclusive).
pub const BUSINESS_DAY_START_HOUR: u32 = 8;

/// First hour after the business day (exclusive bound).
pub const BUSINESS_DAY_END_HOUR: u32 = 18;

/// Classifies a local wall-clock time in the given timezone.
///
/// Returns `true` when the time is out-of-hours. Ambiguous local times
/// (the repeated hour of a DST fold) resolve to the earliest mapping;
/// both mappings share the wall clock, so the classification is the same
/// either way.
///
/// # Errors
///
/// Returns `DomainError::NonexistentLocalTime` when the wall-clock time
/// falls in a DST gap and does not exist in the zone.
pub fn is_out_of_hours(local: NaiveDateTime, tz: Tz) -> DomainResult<bool> {
    let resolved = tz
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| DomainError::NonexistentLocalTime(local.to_string()))?;

    let local_time = resolved.naive_local();
    let weekend = matches!(local_time.weekday(), Weekday::Sat | Weekday::Sun);
    if weekend {
        return Ok(true);
    }

    let start = NaiveTime::from_hms_opt(BUSINESS_DAY_START_HOUR, 0, 0)
        .ok_or_else(|| DomainError::NonexistentLocalTime(local.to_string()))?;
    let within = local_time.time() >= start && local_time.hour() < BUSINESS_DAY_END_HOUR;
    Ok(!within)
}

/// Classifies a job request's scheduled time in its site timezone.
///
/// # Errors
///
/// Returns `DomainError::NonexistentLocalTime` for DST-gap times.
pub fn is_out_of_hours_for(request: &JobRequest) -> DomainResult<bool> {
    is_out_of_hours(request.scheduled_at(), request.timezone())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monday-anchored week calendar.
//!
//! Registration quotas are measured over calendar weeks that run from
//! Monday 00:00:00.000 to Sunday 23:59:59.999 in the directory's declared
//! timezone.
//!
//! ## Invariants
//!
//! - Weeks always start on Monday, independent of any locale's first day of week
//! - A Sunday belongs to the week that started six days earlier
//! - Bounds are inclusive on both ends with millisecond resolution
//! - Bounds are returned as UTC instants for the records repository

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Inclusive bounds of one Monday-start week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    /// Local calendar date of the Monday that opens the week.
    pub monday: NaiveDate,
    /// Monday 00:00:00.000 local, as a UTC instant.
    pub start: DateTime<Utc>,
    /// Sunday 23:59:59.999 local, as a UTC instant.
    pub end: DateTime<Utc>,
}

impl WeekBounds {
    /// Returns whether the instant falls inside the week (both ends inclusive).
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the Monday on or before `date`.
///
/// Days are counted from Monday (Monday = 0 … Sunday = 6), so a Sunday
/// normalizes to the Monday six days earlier rather than the following day.
///
/// # Errors
///
/// Returns an error if the subtraction leaves the representable date range.
pub fn monday_on_or_before(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    let days_from_monday: u64 = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(days_from_monday))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("normalizing {date} to its Monday"),
        })
}

/// Computes the bounds of the week `weeks_ago` weeks before the week
/// containing `reference`.
///
/// Week arithmetic happens on local calendar dates, so consecutive weeks
/// are always seven calendar days apart even when a DST change falls
/// between them.
///
/// # Errors
///
/// Returns an error if:
/// - Date arithmetic overflows
/// - A bound does not exist as a local time in `tz`
pub fn week_bounds(
    reference: DateTime<Utc>,
    weeks_ago: u32,
    tz: Tz,
) -> Result<WeekBounds, DomainError> {
    let local_date: NaiveDate = reference.with_timezone(&tz).date_naive();
    let current_monday: NaiveDate = monday_on_or_before(local_date)?;

    let monday: NaiveDate = current_monday
        .checked_sub_days(Days::new(u64::from(weeks_ago) * 7))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("stepping back {weeks_ago} weeks from {current_monday}"),
        })?;
    let sunday: NaiveDate =
        monday
            .checked_add_days(Days::new(6))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("finding the Sunday after {monday}"),
            })?;

    let start_local: NaiveDateTime = monday.and_hms_opt(0, 0, 0).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("building midnight on {monday}"),
        }
    })?;
    let end_local: NaiveDateTime = sunday.and_hms_milli_opt(23, 59, 59, 999).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("building end of day on {sunday}"),
        }
    })?;

    Ok(WeekBounds {
        monday,
        start: resolve_local(tz, start_local)?,
        end: resolve_local(tz, end_local)?,
    })
}

/// Converts a local wall-clock time to UTC.
///
/// Ambiguous times (clocks set back) resolve to the earlier instant.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, DomainError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(DomainError::UnresolvableLocalTime {
            local_time: local.to_string(),
            timezone: tz.name().to_string(),
        }),
    }
}

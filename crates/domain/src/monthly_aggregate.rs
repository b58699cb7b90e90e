// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rolling multi-week aggregate used for monthly-style progress reporting.
//!
//! The aggregate covers the most recent `window_size` weekly periods
//! (current week included) rather than a calendar month.
//!
//! ## Rounding
//!
//! Percentages round half away from zero (31.25 → 31, 31.5 → 32) and the
//! displayed value is clamped to 100. The raw ratio stays available so
//! callers can report by how much a target was exceeded.

use crate::error::DomainError;
use crate::week_period::WeekPeriod;
use serde::Serialize;

/// Default number of weeks in the rolling aggregate.
pub const DEFAULT_AGGREGATE_WINDOW: usize = 4;

/// Registration totals over the most recent weekly periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    window_size: usize,
    registered_sum: u64,
    target_sum: u64,
    progress_percent: u8,
    completed: bool,
}

impl MonthlyAggregate {
    /// Returns the number of weeks covered.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the total registrations across the window.
    #[must_use]
    pub const fn registered_sum(&self) -> u64 {
        self.registered_sum
    }

    /// Returns the sum of the weekly targets across the window.
    #[must_use]
    pub const fn target_sum(&self) -> u64 {
        self.target_sum
    }

    /// Returns progress as a percentage clamped to `[0, 100]`.
    #[must_use]
    pub const fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// Returns whether the registered total reached the target total.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the unclamped ratio of registrations to target.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn raw_ratio(&self) -> f64 {
        self.registered_sum as f64 / self.target_sum as f64
    }

    /// Returns the unclamped percentage, rounded like `progress_percent`.
    #[must_use]
    pub fn raw_percent(&self) -> u64 {
        rounded_percent(self.registered_sum, self.target_sum)
    }

    /// Returns how many registrations exceed the target total (0 if not exceeded).
    #[must_use]
    pub const fn exceeded_by(&self) -> u64 {
        self.registered_sum.saturating_sub(self.target_sum)
    }
}

/// Computes the rolling aggregate over `periods[0..window_size]`.
///
/// Targets are summed period by period, so a target that changed inside
/// the window is reflected exactly.
///
/// # Arguments
///
/// * `periods` - Weekly periods ordered most recent first
/// * `window_size` - Number of periods to aggregate (normally `DEFAULT_AGGREGATE_WINDOW`)
///
/// # Errors
///
/// Returns an error if:
/// - `window_size` is zero
/// - Fewer than `window_size` periods are supplied
pub fn compute_monthly_aggregate(
    periods: &[WeekPeriod],
    window_size: usize,
) -> Result<MonthlyAggregate, DomainError> {
    if window_size == 0 {
        return Err(DomainError::InvalidArgument {
            argument: "window_size",
            reason: String::from("must be at least 1"),
        });
    }
    if periods.len() < window_size {
        return Err(DomainError::InsufficientData {
            required: window_size,
            available: periods.len(),
        });
    }

    let window: &[WeekPeriod] = &periods[..window_size];
    let registered_sum: u64 = window.iter().map(WeekPeriod::registered_count).sum();
    let target_sum: u64 = window.iter().map(|p| u64::from(p.target())).sum();

    Ok(MonthlyAggregate {
        window_size,
        registered_sum,
        target_sum,
        progress_percent: clamped_percent(registered_sum, target_sum),
        completed: registered_sum >= target_sum,
    })
}

/// Rounds `numerator / denominator * 100` half away from zero.
///
/// Integer arithmetic keeps 31.25 and 31.5 exact. A zero denominator yields 0.
fn rounded_percent(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let scaled: u128 = u128::from(numerator) * 200 + u128::from(denominator);
    let percent: u128 = scaled / (u128::from(denominator) * 2);
    u64::try_from(percent).unwrap_or(u64::MAX)
}

/// Rounded percentage clamped to 100.
pub(crate) fn clamped_percent(numerator: u64, denominator: u64) -> u8 {
    let percent: u64 = rounded_percent(numerator, denominator).min(100);
    u8::try_from(percent).unwrap_or(100)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod monthly_aggregate;
mod types;
mod validation;
mod week;
mod week_period;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use monthly_aggregate::{DEFAULT_AGGREGATE_WINDOW, MonthlyAggregate, compute_monthly_aggregate};
pub use types::{Agent, AgentId, AgentStatus, DEFAULT_WEEKLY_TARGET, WeeklyTarget};
pub use validation::{
    MAX_WEEKS_BACK, validate_business_name, validate_target, validate_weeks_back,
};
pub use week::{WeekBounds, monday_on_or_before, parse_timezone, week_bounds};
pub use week_period::{WeekPeriod, period_label};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::WeeklyTarget;
use crate::week::WeekBounds;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Registration results for one Monday-start week.
///
/// `target_met` is fixed at construction from the count and target and
/// cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekPeriod {
    index: u32,
    label: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    registered_count: u64,
    target: u32,
    target_met: bool,
}

impl WeekPeriod {
    /// Creates a period from its bounds and the number of registrations counted in them.
    ///
    /// # Arguments
    ///
    /// * `index` - 0 for the current week, 1 for the week before, and so on
    /// * `bounds` - The week's inclusive bounds
    /// * `registered_count` - Registrations attributed to the agent within the bounds
    /// * `target` - The weekly target the agent is measured against
    #[must_use]
    pub fn new(index: u32, bounds: &WeekBounds, registered_count: u64, target: WeeklyTarget) -> Self {
        Self {
            index,
            label: period_label(index),
            start: bounds.start,
            end: bounds.end,
            registered_count,
            target: target.value(),
            target_met: registered_count >= u64::from(target.value()),
        }
    }

    /// Returns the period index (0 = current week).
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the inclusive start instant (Monday 00:00:00.000 local).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the inclusive end instant (Sunday 23:59:59.999 local).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the number of registrations counted in this week.
    #[must_use]
    pub const fn registered_count(&self) -> u64 {
        self.registered_count
    }

    /// Returns the weekly target for this week.
    #[must_use]
    pub const fn target(&self) -> u32 {
        self.target
    }

    /// Returns whether the registered count reached the target.
    #[must_use]
    pub const fn target_met(&self) -> bool {
        self.target_met
    }

    /// Returns how many more registrations are needed to meet the target.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        u64::from(self.target).saturating_sub(self.registered_count)
    }

    /// Returns progress toward the target as a percentage clamped to `[0, 100]`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        crate::monthly_aggregate::clamped_percent(self.registered_count, u64::from(self.target))
    }

    /// Returns the unclamped ratio of registrations to target.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn raw_ratio(&self) -> f64 {
        self.registered_count as f64 / f64::from(self.target)
    }

    /// Returns whether the instant falls inside this week (both ends inclusive).
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Returns the display label for a period index.
#[must_use]
pub fn period_label(index: u32) -> String {
    match index {
        0 => String::from("This week"),
        1 => String::from("Last week"),
        n => format!("{n} weeks ago"),
    }
}

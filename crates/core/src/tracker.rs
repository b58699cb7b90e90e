// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly quota tracking.
//!
//! ## Invariants
//!
//! - Period 0 is the week containing the reference instant
//! - Periods tile backwards in whole calendar weeks without gaps or overlap
//! - The count fetcher is invoked exactly once per period
//! - All fetches run concurrently and are joined before any result is built
//! - Any fetch failure or deadline expiry fails the whole computation

use crate::error::{FetchError, QuotaError};
use crate::repository::RecordsRepository;
use aba_directory_domain::{
    AgentId, WeekBounds, WeekPeriod, WeeklyTarget, validate_target, validate_weeks_back,
    week_bounds,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of weekly periods shown in an agent's history by default.
pub const DEFAULT_HISTORY_WEEKS: u32 = 8;

/// Computes weekly registration periods against a target.
///
/// The tracker holds only configuration; it keeps no state between calls,
/// so every computation reads counts fresh from the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaTracker {
    /// Timezone in which weeks start at Monday midnight.
    timezone: Tz,
    /// Overall deadline for the joined period fetches.
    fetch_timeout: Option<Duration>,
}

impl Default for QuotaTracker {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl QuotaTracker {
    /// Creates a tracker for the given timezone with no fetch deadline.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            fetch_timeout: None,
        }
    }

    /// Returns a copy of this tracker that fails computations whose fetches
    /// take longer than `timeout` in total.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Returns the timezone weeks are anchored in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the configured fetch deadline, if any.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    /// Computes `weeks_back` weekly periods ending with the week that contains `reference`.
    ///
    /// # Arguments
    ///
    /// * `reference` - The instant whose week is period 0
    /// * `weeks_back` - Number of periods to produce (the history view uses 8)
    /// * `target` - Weekly target applied to every period
    /// * `count_fetcher` - Returns the number of qualifying records in an inclusive range
    ///
    /// # Returns
    ///
    /// Periods ordered most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `weeks_back` is negative or `target` is not positive (before any fetch is issued)
    /// - A week boundary cannot be computed in the configured timezone
    /// - Any fetch fails
    /// - The fetches do not complete within the configured deadline
    pub async fn compute_week_periods<F, Fut, E>(
        &self,
        reference: DateTime<Utc>,
        weeks_back: i64,
        target: i64,
        count_fetcher: F,
    ) -> Result<Vec<WeekPeriod>, QuotaError>
    where
        F: Fn(DateTime<Utc>, DateTime<Utc>) -> Fut,
        Fut: Future<Output = Result<u64, E>>,
        E: Into<FetchError>,
    {
        let weeks: u32 = validate_weeks_back(weeks_back).map_err(QuotaError::InvalidArgument)?;
        let target: WeeklyTarget = validate_target(target).map_err(QuotaError::InvalidArgument)?;

        let bounds: Vec<WeekBounds> = (0..weeks)
            .map(|weeks_ago| week_bounds(reference, weeks_ago, self.timezone))
            .collect::<Result<_, _>>()?;

        let fetches = (0_u32..).zip(bounds.iter()).map(|(index, week)| {
            let pending = count_fetcher(week.start, week.end);
            async move {
                let count: u64 = pending.await.map_err(|e| QuotaError::RepositoryFetch {
                    period_index: index,
                    start: week.start,
                    end: week.end,
                    source: e.into(),
                })?;
                debug!(
                    period_index = index,
                    start = %week.start,
                    end = %week.end,
                    count,
                    "Counted registrations for period"
                );
                Ok::<u64, QuotaError>(count)
            }
        });

        let joined = try_join_all(fetches);
        let counts: Vec<u64> = match self.fetch_timeout {
            Some(timeout) => tokio::time::timeout(timeout, joined)
                .await
                .map_err(|_| {
                    warn!(?timeout, "Registration counts exceeded deadline");
                    QuotaError::DeadlineExceeded { timeout }
                })??,
            None => joined.await?,
        };

        Ok((0_u32..)
            .zip(bounds.iter().zip(counts))
            .map(|(index, (week, count))| WeekPeriod::new(index, week, count, target))
            .collect())
    }

    /// Computes weekly periods for an agent using a records repository as the count source.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as `compute_week_periods`.
    pub async fn compute_for_agent<R: RecordsRepository>(
        &self,
        repository: &R,
        agent_id: &AgentId,
        reference: DateTime<Utc>,
        weeks_back: i64,
        target: i64,
    ) -> Result<Vec<WeekPeriod>, QuotaError> {
        info!(
            agent_id = %agent_id,
            %reference,
            weeks_back,
            target,
            "Computing weekly periods"
        );
        self.compute_week_periods(reference, weeks_back, target, move |start, end| {
            repository.count_records_in_range(agent_id, start, end)
        })
        .await
    }
}

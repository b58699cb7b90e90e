// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aba_directory_domain::DomainError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Error produced by a count fetcher, boxed so the tracker stays generic
/// over the repository implementation.
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while computing quota progress.
///
/// Every variant aborts the whole computation; no partial period list or
/// substituted count is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// A calculation input was malformed. Retrying without changing the input will fail again.
    #[error("{0}")]
    InvalidArgument(DomainError),
    /// An aggregate was requested over more periods than were computed.
    #[error(
        "Insufficient data: aggregate needs {required} weekly periods but only {available} were computed"
    )]
    InsufficientData {
        /// The number of periods the aggregate window needs.
        required: usize,
        /// The number of periods available.
        available: usize,
    },
    /// The records repository failed to count registrations for a period.
    #[error("Failed to count registrations for period {period_index} ({start} to {end}): {source}")]
    RepositoryFetch {
        /// Index of the period whose count failed (0 = current week).
        period_index: u32,
        /// Inclusive start of the period.
        start: DateTime<Utc>,
        /// Inclusive end of the period.
        end: DateTime<Utc>,
        /// The underlying repository error.
        #[source]
        source: FetchError,
    },
    /// The registration counts did not all complete before the deadline.
    #[error("Registration counts did not complete within {timeout:?}")]
    DeadlineExceeded {
        /// The configured deadline.
        timeout: Duration,
    },
    /// A week calendar calculation failed.
    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl From<DomainError> for QuotaError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidArgument { .. } | DomainError::InvalidWeeklyTarget { .. } => {
                Self::InvalidArgument(err)
            }
            DomainError::InsufficientData {
                required,
                available,
            } => Self::InsufficientData {
                required,
                available,
            },
            other => Self::Domain(other),
        }
    }
}

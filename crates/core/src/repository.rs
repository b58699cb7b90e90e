// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The records repository seam.
//!
//! The tracker never talks to a database directly. It asks a
//! `RecordsRepository` for one range count per weekly period; the
//! repository performs a pure count and owns nothing about week
//! boundaries.

use aba_directory_domain::AgentId;
use chrono::{DateTime, Utc};
use std::future::Future;

/// Source of business registration counts.
pub trait RecordsRepository: Send + Sync {
    /// The error returned when a count cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Counts records attributed to `agent_id` whose creation timestamp lies
    /// in `[start, end]`, both ends inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried.
    fn count_records_in_range(
        &self,
        agent_id: &AgentId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PersistenceError;

/// A stored business registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessRecord {
    pub business_id: i64,
    pub agent_id: String,
    pub business_name: String,
    pub market: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Converts an instant to the epoch milliseconds stored in `created_at_ms` columns.
pub(crate) fn to_epoch_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Converts stored epoch milliseconds back into an instant.
pub(crate) fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        PersistenceError::CorruptRecord(format!("timestamp {millis} ms is out of range"))
    })
}

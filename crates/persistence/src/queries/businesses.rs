// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business registration queries.

use aba_directory_domain::AgentId;
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{BusinessRecord, from_epoch_millis, to_epoch_millis};
use crate::diesel_schema::businesses;
use crate::error::PersistenceError;

/// Diesel Queryable struct for business rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = businesses)]
struct BusinessRow {
    business_id: i64,
    agent_id: String,
    business_name: String,
    market: Option<String>,
    created_at_ms: i64,
}

/// Counts businesses registered by an agent within `[start, end]`.
///
/// Both ends are inclusive at millisecond precision.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_businesses_in_range(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<u64, PersistenceError> {
    let count: i64 = businesses::table
        .filter(businesses::agent_id.eq(agent_id.value()))
        .filter(businesses::created_at_ms.between(to_epoch_millis(start), to_epoch_millis(end)))
        .count()
        .get_result(conn)?;

    debug!(agent_id = %agent_id, %start, %end, count, "Counted businesses in range");

    u64::try_from(count)
        .map_err(|_| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

/// Lists an agent's registrations, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored timestamp is invalid.
pub fn list_businesses_for_agent(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
) -> Result<Vec<BusinessRecord>, PersistenceError> {
    let rows: Vec<BusinessRow> = businesses::table
        .filter(businesses::agent_id.eq(agent_id.value()))
        .order((businesses::created_at_ms.desc(), businesses::business_id.desc()))
        .select(BusinessRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Ok(BusinessRecord {
                business_id: row.business_id,
                agent_id: row.agent_id,
                business_name: row.business_name,
                market: row.market,
                created_at: from_epoch_millis(row.created_at_ms)?,
            })
        })
        .collect()
}

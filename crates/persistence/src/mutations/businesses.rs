// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business registration mutations.

use aba_directory_domain::AgentId;
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::to_epoch_millis;
use crate::diesel_schema::businesses;
use crate::error::PersistenceError;

/// Records a business registration attributed to an agent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `agent_id` - The registering agent
/// * `business_name` - The validated business name
/// * `market` - Optional market the business trades in
/// * `created_at` - The registration instant counted against weekly targets
///
/// # Returns
///
/// The new business ID.
///
/// # Errors
///
/// Returns `PersistenceError::AgentNotFound` if the agent does not exist,
/// or a database error if the insert fails.
pub fn insert_business(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
    business_name: &str,
    market: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<i64, PersistenceError> {
    let result: Result<usize, DieselError> = diesel::insert_into(businesses::table)
        .values((
            businesses::agent_id.eq(agent_id.value()),
            businesses::business_name.eq(business_name),
            businesses::market.eq(market),
            businesses::created_at_ms.eq(to_epoch_millis(created_at)),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
            return Err(PersistenceError::AgentNotFound(
                agent_id.value().to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    let business_id: i64 = conn.get_last_insert_rowid()?;

    info!(business_id, agent_id = %agent_id, %created_at, "Business registered");
    Ok(business_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent mutations.

use aba_directory_domain::{Agent, AgentId, AgentStatus, WeeklyTarget};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::data_models::to_epoch_millis;
use crate::diesel_schema::agents;
use crate::error::PersistenceError;

/// Inserts a new agent.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `agent` - The agent to insert
/// * `created_at` - When the agent was created
///
/// # Errors
///
/// Returns `PersistenceError::AgentAlreadyExists` if the identifier is taken,
/// or a database error if the insert fails.
pub fn insert_agent(
    conn: &mut SqliteConnection,
    agent: &Agent,
    created_at: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    let result: Result<usize, DieselError> = diesel::insert_into(agents::table)
        .values((
            agents::agent_id.eq(agent.agent_id.value()),
            agents::name.eq(&agent.name),
            agents::weekly_target.eq(agent.weekly_target.map(|t| i64::from(t.value()))),
            agents::status.eq(agent.status.as_str()),
            agents::created_at_ms.eq(to_epoch_millis(created_at)),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(agent_id = %agent.agent_id, status = %agent.status, "Agent created");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
            PersistenceError::AgentAlreadyExists(agent.agent_id.value().to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Sets or clears an agent's own weekly target.
///
/// `None` makes the configured default apply to the agent again.
///
/// # Errors
///
/// Returns `PersistenceError::AgentNotFound` if no such agent exists.
pub fn update_weekly_target(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
    weekly_target: Option<WeeklyTarget>,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(agents::table.filter(agents::agent_id.eq(agent_id.value())))
        .set(agents::weekly_target.eq(weekly_target.map(|t| i64::from(t.value()))))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AgentNotFound(agent_id.value().to_string()));
    }

    info!(
        agent_id = %agent_id,
        weekly_target = weekly_target.map(|t| t.value()),
        "Agent weekly target updated"
    );
    Ok(())
}

/// Stores an agent's status.
///
/// The caller is responsible for validating the transition.
///
/// # Errors
///
/// Returns `PersistenceError::AgentNotFound` if no such agent exists.
pub fn update_agent_status(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
    status: AgentStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(agents::table.filter(agents::agent_id.eq(agent_id.value())))
        .set(agents::status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AgentNotFound(agent_id.value().to_string()));
    }

    info!(agent_id = %agent_id, %status, "Agent status updated");
    Ok(())
}

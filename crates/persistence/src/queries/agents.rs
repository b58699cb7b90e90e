// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent queries.

use aba_directory_domain::{Agent, AgentId, AgentStatus, WeeklyTarget};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::agents;
use crate::error::PersistenceError;

/// Diesel Queryable struct for agent rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = agents)]
struct AgentRow {
    agent_id: String,
    name: String,
    weekly_target: Option<i64>,
    status: String,
}

impl AgentRow {
    fn into_agent(self) -> Result<Agent, PersistenceError> {
        let agent_id: AgentId = AgentId::new(&self.agent_id)
            .map_err(|e| PersistenceError::CorruptRecord(format!("agent id: {e}")))?;
        let weekly_target: Option<WeeklyTarget> = self
            .weekly_target
            .map(WeeklyTarget::new)
            .transpose()
            .map_err(|e| {
                PersistenceError::CorruptRecord(format!("agent '{agent_id}' weekly target: {e}"))
            })?;
        let status: AgentStatus = self.status.parse().map_err(|e| {
            PersistenceError::CorruptRecord(format!("agent '{agent_id}' status: {e}"))
        })?;

        Ok(Agent {
            agent_id,
            name: self.name,
            weekly_target,
            status,
        })
    }
}

/// Retrieves an agent by identifier.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is invalid.
/// Returns `Ok(None)` if the agent is not found.
pub fn get_agent(
    conn: &mut SqliteConnection,
    agent_id: &AgentId,
) -> Result<Option<Agent>, PersistenceError> {
    debug!(agent_id = %agent_id, "Looking up agent");

    let row: Option<AgentRow> = agents::table
        .filter(agents::agent_id.eq(agent_id.value()))
        .select(AgentRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AgentRow::into_agent).transpose()
}

/// Lists all agents ordered by identifier.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_agents(conn: &mut SqliteConnection) -> Result<Vec<Agent>, PersistenceError> {
    agents::table
        .order(agents::agent_id.asc())
        .select(AgentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AgentRow::into_agent)
        .collect()
}

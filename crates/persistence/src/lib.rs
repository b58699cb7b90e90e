// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Aba Directory.
//!
//! Agents and the businesses they register are stored in `SQLite` through
//! Diesel. The schema is created by embedded migrations when a database is
//! opened, and foreign key enforcement is verified before the adapter is
//! handed out.
//!
//! Registration instants are stored as epoch milliseconds so that weekly
//! range counts compare integers, inclusive at both ends.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own named shared
//! in-memory database, so tests never observe each other's rows.

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

use aba_directory_domain::{Agent, AgentId, AgentStatus, WeeklyTarget};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod repository;

#[cfg(test)]
mod tests;

pub use data_models::BusinessRecord;
pub use error::PersistenceError;
pub use repository::SharedPersistence;

use backend::PersistenceBackend;

/// Persistence adapter for agents and business registrations.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_aba_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Stores a new agent.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgentAlreadyExists` if the identifier is taken.
    pub fn create_agent(
        &mut self,
        agent: &Agent,
        created_at: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        mutations::insert_agent(&mut self.conn, agent, created_at)
    }

    /// Retrieves an agent, or `None` if no such agent exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_agent(&mut self, agent_id: &AgentId) -> Result<Option<Agent>, PersistenceError> {
        queries::get_agent(&mut self.conn, agent_id)
    }

    /// Lists all agents ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_agents(&mut self) -> Result<Vec<Agent>, PersistenceError> {
        queries::list_agents(&mut self.conn)
    }

    /// Sets or clears an agent's own weekly target.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgentNotFound` if no such agent exists.
    pub fn set_weekly_target(
        &mut self,
        agent_id: &AgentId,
        weekly_target: Option<WeeklyTarget>,
    ) -> Result<(), PersistenceError> {
        mutations::update_weekly_target(&mut self.conn, agent_id, weekly_target)
    }

    /// Stores an agent's status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgentNotFound` if no such agent exists.
    pub fn set_agent_status(
        &mut self,
        agent_id: &AgentId,
        status: AgentStatus,
    ) -> Result<(), PersistenceError> {
        mutations::update_agent_status(&mut self.conn, agent_id, status)
    }

    // ========================================================================
    // Businesses
    // ========================================================================

    /// Records a business registration and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgentNotFound` if the agent does not exist.
    pub fn register_business(
        &mut self,
        agent_id: &AgentId,
        business_name: &str,
        market: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_business(&mut self.conn, agent_id, business_name, market, created_at)
    }

    /// Counts an agent's registrations within `[start, end]`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_businesses_in_range(
        &mut self,
        agent_id: &AgentId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, PersistenceError> {
        queries::count_businesses_in_range(&mut self.conn, agent_id, start, end)
    }

    /// Lists an agent's registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_businesses(
        &mut self,
        agent_id: &AgentId,
    ) -> Result<Vec<BusinessRecord>, PersistenceError> {
        queries::list_businesses_for_agent(&mut self.conn, agent_id)
    }
}

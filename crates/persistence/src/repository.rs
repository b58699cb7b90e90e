// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared handle used as the quota tracker's records repository.

use std::sync::Arc;

use aba_directory::RecordsRepository;
use aba_directory_domain::AgentId;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};

use crate::Persistence;
use crate::error::PersistenceError;

/// A cloneable, lock-protected handle to a [`Persistence`] adapter.
///
/// Every clone refers to the same connection. Concurrent period counts
/// serialize on the lock.
#[derive(Clone)]
pub struct SharedPersistence {
    inner: Arc<Mutex<Persistence>>,
}

impl SharedPersistence {
    /// Wraps a persistence adapter for shared use.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            inner: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Locks the adapter for exclusive use.
    pub async fn lock(&self) -> MutexGuard<'_, Persistence> {
        self.inner.lock().await
    }
}

impl RecordsRepository for SharedPersistence {
    type Error = PersistenceError;

    /// Counts registrations on the blocking thread pool.
    ///
    /// The query owns the lock guard, so a caller's deadline can expire
    /// while `SQLite` is still working. The abandoned query finishes in the
    /// background and then releases the lock.
    async fn count_records_in_range(
        &self,
        agent_id: &AgentId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, Self::Error> {
        let mut persistence: OwnedMutexGuard<Persistence> =
            Arc::clone(&self.inner).lock_owned().await;
        let agent_id: AgentId = agent_id.clone();
        tokio::task::spawn_blocking(move || {
            persistence.count_businesses_in_range(&agent_id, start, end)
        })
        .await
        .map_err(|e| PersistenceError::QueryFailed(format!("Count task failed: {e}")))?
    }
}

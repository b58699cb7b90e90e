// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::RecordsRepository;
use aba_directory_domain::{Agent, AgentId, AgentStatus, WeeklyTarget};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Error returned by the stub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubError(pub String);

impl std::fmt::Display for StubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stub repository error: {}", self.0)
    }
}

impl std::error::Error for StubError {}

/// In-memory records repository counting registrations by timestamp.
#[derive(Debug, Default)]
pub struct StubRepository {
    records: Vec<(AgentId, DateTime<Utc>)>,
    /// Ranges starting at this instant fail instead of counting.
    failing_start: Option<DateTime<Utc>>,
    calls: AtomicUsize,
}

impl StubRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registrations(mut self, agent_id: &str, at: &[DateTime<Utc>]) -> Self {
        let agent_id: AgentId = AgentId::new(agent_id).unwrap();
        self.records
            .extend(at.iter().map(|instant| (agent_id.clone(), *instant)));
        self
    }

    pub fn failing_for_start(mut self, start: DateTime<Utc>) -> Self {
        self.failing_start = Some(start);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordsRepository for StubRepository {
    type Error = StubError;

    async fn count_records_in_range(
        &self,
        agent_id: &AgentId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, StubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_start == Some(start) {
            return Err(StubError(String::from("connection reset")));
        }
        let count: usize = self
            .records
            .iter()
            .filter(|(id, at)| id == agent_id && start <= *at && *at <= end)
            .count();
        Ok(u64::try_from(count).unwrap())
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Wednesday 2024-06-12 10:00 UTC.
pub fn wednesday_reference() -> DateTime<Utc> {
    utc(2024, 6, 12, 10, 0, 0)
}

pub fn create_test_agent(agent_id: &str, weekly_target: Option<i64>) -> Agent {
    let mut agent: Agent = Agent::new(
        AgentId::new(agent_id).unwrap(),
        "Chiamaka Eze",
        weekly_target.map(|t| WeeklyTarget::new(t).unwrap()),
    )
    .unwrap();
    agent.status = AgentStatus::Active;
    agent
}

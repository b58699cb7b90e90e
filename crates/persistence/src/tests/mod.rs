// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use aba_directory_domain::{Agent, AgentId, AgentStatus, WeeklyTarget};
use chrono::{DateTime, TimeZone, Utc};

use crate::Persistence;

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test instant")
}

pub fn create_test_agent(agent_id: &str, weekly_target: Option<i64>) -> Agent {
    Agent::new(
        AgentId::new(agent_id).unwrap(),
        "Tunde Bakare",
        weekly_target.map(|t| WeeklyTarget::new(t).unwrap()),
    )
    .unwrap()
}

/// Creates an in-memory store holding one active agent.
pub fn persistence_with_active_agent(agent_id: &str) -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let agent: Agent = create_test_agent(agent_id, None);
    persistence
        .create_agent(&agent, utc(2024, 1, 2, 9, 0, 0))
        .unwrap();
    persistence
        .set_agent_status(&agent.agent_id, AgentStatus::Active)
        .unwrap();
    persistence
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use aba_directory_domain::WeeklyTarget;
use aba_directory_persistence::Persistence;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    CreateAgentRequest, RegisterBusinessRequest, UpdateAgentStatusRequest, create_agent,
    register_business, update_agent_status,
};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test instant")
}

/// Wednesday 2024-06-12 10:00 UTC; its week starts Monday 2024-06-10.
pub fn wednesday_reference() -> DateTime<Utc> {
    utc(2024, 6, 12, 10, 0, 0)
}

pub fn default_target() -> WeeklyTarget {
    WeeklyTarget::default()
}

pub fn create_agent_request(agent_id: &str, weekly_target: Option<i64>) -> CreateAgentRequest {
    CreateAgentRequest {
        agent_id: agent_id.to_string(),
        name: String::from("Ngozi Okafor"),
        weekly_target,
    }
}

/// Creates an agent and activates it.
pub fn create_active_agent(
    persistence: &mut Persistence,
    agent_id: &str,
    weekly_target: Option<i64>,
) {
    create_agent(
        persistence,
        &create_agent_request(agent_id, weekly_target),
        default_target(),
        utc(2024, 1, 2, 9, 0, 0),
    )
    .unwrap();
    update_agent_status(
        persistence,
        &UpdateAgentStatusRequest {
            agent_id: agent_id.to_string(),
            status: String::from("active"),
        },
        default_target(),
    )
    .unwrap();
}

/// Registers `count` businesses for an agent, one hour apart from `first`.
pub fn register_many(
    persistence: &mut Persistence,
    agent_id: &str,
    first: DateTime<Utc>,
    count: u32,
) {
    for i in 0..count {
        register_business(
            persistence,
            &RegisterBusinessRequest {
                agent_id: agent_id.to_string(),
                business_name: format!("Business {i}"),
                market: Some(String::from("Ariaria")),
            },
            first + chrono::Duration::hours(i64::from(i)),
        )
        .unwrap();
    }
}

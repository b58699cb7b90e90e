// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Aba Directory.
//!
//! Request structs come in, response DTOs go out, and every lower-level
//! error is translated explicitly into an [`ApiError`]. A failed
//! computation is always an error, never a zero-progress response.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_quota_error,
};
pub use handlers::{
    create_agent, get_agent_history, get_agent_progress, list_agents, register_business,
    update_agent_status, update_weekly_target,
};
pub use request_response::{
    AgentInfo, CreateAgentRequest, CreateAgentResponse, GetAgentHistoryRequest,
    GetAgentHistoryResponse, GetAgentProgressRequest, GetAgentProgressResponse,
    ListAgentsResponse, MonthlyAggregateInfo, RegisterBusinessRequest, RegisterBusinessResponse,
    UpdateAgentStatusRequest, UpdateAgentStatusResponse, UpdateWeeklyTargetRequest,
    UpdateWeeklyTargetResponse, WeekPeriodInfo,
};

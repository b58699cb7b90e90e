// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use aba_directory_domain::{MonthlyAggregate, WeekPeriod};
use chrono::{DateTime, Utc};

/// API request for an agent's dashboard progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAgentProgressRequest {
    /// The agent identifier.
    pub agent_id: String,
    /// The instant whose week is the current week.
    pub reference: DateTime<Utc>,
}

/// API request for an agent's weekly history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAgentHistoryRequest {
    /// The agent identifier.
    pub agent_id: String,
    /// Number of weekly periods to return. `None` uses the configured history length.
    pub weeks_back: Option<i64>,
    /// The instant whose week is period 0.
    pub reference: DateTime<Utc>,
}

/// API request to create a new agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAgentRequest {
    /// The agent identifier issued by the backend.
    pub agent_id: String,
    /// The agent's display name.
    pub name: String,
    /// The agent's own weekly target, if any.
    pub weekly_target: Option<i64>,
}

/// API request to set or clear an agent's weekly target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWeeklyTargetRequest {
    /// The agent identifier.
    pub agent_id: String,
    /// The new target. `None` reverts the agent to the configured default.
    pub weekly_target: Option<i64>,
}

/// API request to change an agent's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAgentStatusRequest {
    /// The agent identifier.
    pub agent_id: String,
    /// The requested status (`pending`, `active` or `suspended`).
    pub status: String,
}

/// API request to register a business on behalf of an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBusinessRequest {
    /// The registering agent.
    pub agent_id: String,
    /// The business name.
    pub business_name: String,
    /// Optional market the business trades in.
    pub market: Option<String>,
}

/// Agent information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgentInfo {
    /// The agent identifier.
    pub agent_id: String,
    /// The agent's display name.
    pub name: String,
    /// The agent's own weekly target, if one is set.
    pub weekly_target: Option<u32>,
    /// The target the agent is measured against.
    pub effective_weekly_target: u32,
    /// The agent's status.
    pub status: String,
}

/// API response for a successful agent creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAgentResponse {
    /// The created agent.
    pub agent: AgentInfo,
    /// A success message.
    pub message: String,
}

/// API response listing all agents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListAgentsResponse {
    /// All agents ordered by identifier.
    pub agents: Vec<AgentInfo>,
}

/// API response for a weekly target change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateWeeklyTargetResponse {
    /// The agent after the change.
    pub agent: AgentInfo,
    /// A success message.
    pub message: String,
}

/// API response for a status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateAgentStatusResponse {
    /// The agent after the change.
    pub agent: AgentInfo,
    /// The status before the change.
    pub previous_status: String,
    /// A success message.
    pub message: String,
}

/// API response for a business registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterBusinessResponse {
    /// The new business identifier.
    pub business_id: i64,
    /// The registering agent.
    pub agent_id: String,
    /// The stored business name.
    pub business_name: String,
    /// The registration instant.
    pub created_at: DateTime<Utc>,
    /// A success message.
    pub message: String,
}

/// One weekly period of an agent's history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeekPeriodInfo {
    /// 0 for the current week, increasing into the past.
    pub index: u32,
    /// Display label ("This week", "Last week", "3 weeks ago").
    pub label: String,
    /// Monday 00:00:00.000 local time, as UTC.
    pub start: DateTime<Utc>,
    /// Sunday 23:59:59.999 local time, as UTC.
    pub end: DateTime<Utc>,
    /// Businesses registered in the week.
    pub registered_count: u64,
    /// The weekly target.
    pub target: u32,
    /// Whether the count reached the target.
    pub target_met: bool,
    /// Registrations still needed to reach the target.
    pub remaining: u64,
    /// Progress toward the target, rounded and capped at 100.
    pub progress_percent: u8,
}

impl From<&WeekPeriod> for WeekPeriodInfo {
    fn from(period: &WeekPeriod) -> Self {
        Self {
            index: period.index(),
            label: period.label().to_string(),
            start: period.start(),
            end: period.end(),
            registered_count: period.registered_count(),
            target: period.target(),
            target_met: period.target_met(),
            remaining: period.remaining(),
            progress_percent: period.progress_percent(),
        }
    }
}

/// Rolling aggregate over the most recent weeks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyAggregateInfo {
    /// Number of weeks in the window.
    pub window_size: usize,
    /// Registrations across the window.
    pub registered_sum: u64,
    /// Sum of the window's weekly targets.
    pub target_sum: u64,
    /// Progress toward the summed target, rounded and capped at 100.
    pub progress_percent: u8,
    /// Progress toward the summed target, rounded but not capped.
    pub raw_percent: u64,
    /// Whether the summed target was reached.
    pub completed: bool,
    /// Registrations beyond the summed target.
    pub exceeded_by: u64,
}

impl From<&MonthlyAggregate> for MonthlyAggregateInfo {
    fn from(aggregate: &MonthlyAggregate) -> Self {
        Self {
            window_size: aggregate.window_size(),
            registered_sum: aggregate.registered_sum(),
            target_sum: aggregate.target_sum(),
            progress_percent: aggregate.progress_percent(),
            raw_percent: aggregate.raw_percent(),
            completed: aggregate.completed(),
            exceeded_by: aggregate.exceeded_by(),
        }
    }
}

/// API response for the agent dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetAgentProgressResponse {
    /// The agent identifier.
    pub agent_id: String,
    /// The target the agent was measured against.
    pub weekly_target: u32,
    /// The reference instant.
    pub reference: DateTime<Utc>,
    /// The week containing the reference instant.
    pub current_week: WeekPeriodInfo,
    /// The rolling aggregate.
    pub monthly: MonthlyAggregateInfo,
    /// Weeks in the computed history whose target was met.
    pub weeks_met: usize,
}

/// API response for the agent tasks view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetAgentHistoryResponse {
    /// The agent identifier.
    pub agent_id: String,
    /// The target the agent was measured against.
    pub weekly_target: u32,
    /// The reference instant.
    pub reference: DateTime<Utc>,
    /// Weekly periods, most recent first.
    pub periods: Vec<WeekPeriodInfo>,
}

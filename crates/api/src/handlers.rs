// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for agent administration, registration and progress.

use aba_directory::{AgentProgress, ProgressSettings, QuotaTracker};
use aba_directory_domain::{
    Agent, AgentId, AgentStatus, WeekPeriod, WeeklyTarget, validate_business_name,
};
use aba_directory_persistence::{Persistence, SharedPersistence};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_quota_error,
};
use crate::request_response::{
    AgentInfo, CreateAgentRequest, CreateAgentResponse, GetAgentHistoryRequest,
    GetAgentHistoryResponse, GetAgentProgressRequest, GetAgentProgressResponse,
    ListAgentsResponse, MonthlyAggregateInfo, RegisterBusinessRequest, RegisterBusinessResponse,
    UpdateAgentStatusRequest, UpdateAgentStatusResponse, UpdateWeeklyTargetRequest,
    UpdateWeeklyTargetResponse, WeekPeriodInfo,
};

fn agent_info(agent: &Agent, default_target: WeeklyTarget) -> AgentInfo {
    AgentInfo {
        agent_id: agent.agent_id.value().to_string(),
        name: agent.name.clone(),
        weekly_target: agent.weekly_target.map(|t| t.value()),
        effective_weekly_target: agent.effective_weekly_target(default_target).value(),
        status: agent.status.as_str().to_string(),
    }
}

fn parse_agent_id(agent_id: &str) -> Result<AgentId, ApiError> {
    AgentId::new(agent_id).map_err(translate_domain_error)
}

/// Loads an agent, failing with `ResourceNotFound` if it does not exist.
fn load_agent(persistence: &mut Persistence, agent_id: &AgentId) -> Result<Agent, ApiError> {
    persistence
        .get_agent(agent_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("Agent '{agent_id}' does not exist"),
        })
}

/// Reads the agent fresh from the store and releases the lock before returning.
async fn load_shared_agent(store: &SharedPersistence, agent_id: &AgentId) -> Result<Agent, ApiError> {
    let mut persistence = store.lock().await;
    load_agent(&mut persistence, agent_id)
}

/// Builds an agent's dashboard: the current week and the rolling aggregate.
///
/// The agent and its weekly target are read from the store on every call,
/// so an administrator's change is reflected on the next request.
///
/// # Arguments
///
/// * `store` - Shared persistence, used both for the agent and as the records repository
/// * `tracker` - The quota tracker
/// * `settings` - History length, aggregate window and default target
/// * `request` - The progress request
///
/// # Errors
///
/// Returns an error if:
/// - The agent identifier is invalid or unknown
/// - Counting registrations fails or times out
/// - The history is shorter than the aggregate window
pub async fn get_agent_progress(
    store: &SharedPersistence,
    tracker: &QuotaTracker,
    settings: &ProgressSettings,
    request: &GetAgentProgressRequest,
) -> Result<GetAgentProgressResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let agent: Agent = load_shared_agent(store, &agent_id).await?;

    let progress: AgentProgress = tracker
        .progress_for_agent(store, &agent, request.reference, settings)
        .await
        .map_err(translate_quota_error)?;

    let current_week: WeekPeriodInfo = progress
        .current_week()
        .map(WeekPeriodInfo::from)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Progress report contains no current week"),
        })?;

    info!(
        agent_id = %agent_id,
        registered = current_week.registered_count,
        target = current_week.target,
        monthly_completed = progress.aggregate.completed(),
        "Served agent progress"
    );

    Ok(GetAgentProgressResponse {
        agent_id: agent_id.value().to_string(),
        weekly_target: progress.weekly_target.value(),
        reference: progress.reference,
        current_week,
        monthly: MonthlyAggregateInfo::from(&progress.aggregate),
        weeks_met: progress.weeks_met(),
    })
}

/// Returns an agent's weekly periods, most recent first.
///
/// # Errors
///
/// Returns an error if:
/// - The agent identifier is invalid or unknown
/// - `weeks_back` is negative or exceeds `MAX_WEEKS_BACK`
/// - Counting registrations fails or times out
pub async fn get_agent_history(
    store: &SharedPersistence,
    tracker: &QuotaTracker,
    settings: &ProgressSettings,
    request: &GetAgentHistoryRequest,
) -> Result<GetAgentHistoryResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let agent: Agent = load_shared_agent(store, &agent_id).await?;
    let weekly_target: WeeklyTarget = agent.effective_weekly_target(settings.default_target);
    let weeks_back: i64 = request
        .weeks_back
        .unwrap_or_else(|| i64::from(settings.history_weeks));

    let periods: Vec<WeekPeriod> = tracker
        .compute_for_agent(
            store,
            &agent_id,
            request.reference,
            weeks_back,
            i64::from(weekly_target.value()),
        )
        .await
        .map_err(translate_quota_error)?;

    Ok(GetAgentHistoryResponse {
        agent_id: agent_id.value().to_string(),
        weekly_target: weekly_target.value(),
        reference: request.reference,
        periods: periods.iter().map(WeekPeriodInfo::from).collect(),
    })
}

/// Creates a new pending agent.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier, name or weekly target is invalid
/// - An agent with the same identifier exists
pub fn create_agent(
    persistence: &mut Persistence,
    request: &CreateAgentRequest,
    default_target: WeeklyTarget,
    created_at: DateTime<Utc>,
) -> Result<CreateAgentResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let weekly_target: Option<WeeklyTarget> = request
        .weekly_target
        .map(WeeklyTarget::new)
        .transpose()
        .map_err(translate_domain_error)?;
    let agent: Agent =
        Agent::new(agent_id, &request.name, weekly_target).map_err(translate_domain_error)?;

    persistence
        .create_agent(&agent, created_at)
        .map_err(translate_persistence_error)?;

    Ok(CreateAgentResponse {
        message: format!("Created agent '{}'", agent.agent_id),
        agent: agent_info(&agent, default_target),
    })
}

/// Lists all agents with the target each is measured against.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_agents(
    persistence: &mut Persistence,
    default_target: WeeklyTarget,
) -> Result<ListAgentsResponse, ApiError> {
    let agents: Vec<Agent> = persistence
        .list_agents()
        .map_err(translate_persistence_error)?;

    Ok(ListAgentsResponse {
        agents: agents
            .iter()
            .map(|agent| agent_info(agent, default_target))
            .collect(),
    })
}

/// Sets or clears an agent's weekly target.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier or target is invalid
/// - The agent does not exist
pub fn update_weekly_target(
    persistence: &mut Persistence,
    request: &UpdateWeeklyTargetRequest,
    default_target: WeeklyTarget,
) -> Result<UpdateWeeklyTargetResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let weekly_target: Option<WeeklyTarget> = request
        .weekly_target
        .map(WeeklyTarget::new)
        .transpose()
        .map_err(translate_domain_error)?;

    persistence
        .set_weekly_target(&agent_id, weekly_target)
        .map_err(translate_persistence_error)?;
    let agent: Agent = load_agent(persistence, &agent_id)?;

    let message: String = weekly_target.map_or_else(
        || format!("Agent '{agent_id}' now uses the default weekly target"),
        |t| format!("Agent '{agent_id}' weekly target set to {}", t.value()),
    );

    Ok(UpdateWeeklyTargetResponse {
        agent: agent_info(&agent, default_target),
        message,
    })
}

/// Changes an agent's status.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier or status is invalid
/// - The agent does not exist
/// - The transition is not permitted
pub fn update_agent_status(
    persistence: &mut Persistence,
    request: &UpdateAgentStatusRequest,
    default_target: WeeklyTarget,
) -> Result<UpdateAgentStatusResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let requested: AgentStatus = request
        .status
        .parse()
        .map_err(translate_domain_error)?;

    let mut agent: Agent = load_agent(persistence, &agent_id)?;
    let previous: AgentStatus = agent.status;
    agent.status = previous
        .transition_to(requested)
        .map_err(translate_domain_error)?;

    persistence
        .set_agent_status(&agent_id, agent.status)
        .map_err(translate_persistence_error)?;

    Ok(UpdateAgentStatusResponse {
        message: format!("Agent '{agent_id}' is now {}", agent.status),
        previous_status: previous.as_str().to_string(),
        agent: agent_info(&agent, default_target),
    })
}

/// Records a business registered by an active agent.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier or business name is invalid
/// - The agent does not exist or is not active
pub fn register_business(
    persistence: &mut Persistence,
    request: &RegisterBusinessRequest,
    created_at: DateTime<Utc>,
) -> Result<RegisterBusinessResponse, ApiError> {
    let agent_id: AgentId = parse_agent_id(&request.agent_id)?;
    let business_name: String =
        validate_business_name(&request.business_name).map_err(translate_domain_error)?;
    let market: Option<&str> = request
        .market
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let agent: Agent = load_agent(persistence, &agent_id)?;
    agent.ensure_active().map_err(translate_domain_error)?;

    let business_id: i64 = persistence
        .register_business(&agent_id, &business_name, market, created_at)
        .map_err(translate_persistence_error)?;

    Ok(RegisterBusinessResponse {
        business_id,
        agent_id: agent_id.value().to_string(),
        message: format!("Registered '{business_name}'"),
        business_name,
        created_at,
    })
}

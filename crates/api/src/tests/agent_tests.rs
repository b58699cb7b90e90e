// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aba_directory_persistence::Persistence;

use crate::tests::helpers::{create_agent_request, default_target, utc};
use crate::{
    ApiError, CreateAgentRequest, UpdateAgentStatusRequest, UpdateWeeklyTargetRequest,
    create_agent, list_agents, update_agent_status, update_weekly_target,
};

fn status_request(agent_id: &str, status: &str) -> UpdateAgentStatusRequest {
    UpdateAgentStatusRequest {
        agent_id: agent_id.to_string(),
        status: status.to_string(),
    }
}

#[test]
fn test_create_agent_is_pending_with_default_target() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response = create_agent(
        &mut persistence,
        &create_agent_request("agent-1", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    assert_eq!(response.agent.agent_id, "agent-1");
    assert_eq!(response.agent.status, "pending");
    assert_eq!(response.agent.weekly_target, None);
    assert_eq!(response.agent.effective_weekly_target, 40);
}

#[test]
fn test_create_agent_with_own_target() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let response = create_agent(
        &mut persistence,
        &create_agent_request("agent-1", Some(15)),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    assert_eq!(response.agent.weekly_target, Some(15));
    assert_eq!(response.agent.effective_weekly_target, 15);
}

#[test]
fn test_create_agent_rejects_non_positive_target() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = create_agent(
        &mut persistence,
        &create_agent_request("agent-1", Some(0)),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "weekly_target"
    ));
    assert!(persistence.list_agents().unwrap().is_empty());
}

#[test]
fn test_create_agent_rejects_blank_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let blank_id = create_agent(
        &mut persistence,
        &create_agent_request("   ", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    );
    let blank_name = create_agent(
        &mut persistence,
        &CreateAgentRequest {
            agent_id: String::from("agent-1"),
            name: String::from(" "),
            weekly_target: None,
        },
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    );

    assert!(matches!(
        blank_id,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "agent_id"
    ));
    assert!(matches!(
        blank_name,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_create_duplicate_agent_is_rule_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let request = create_agent_request("agent-1", None);
    create_agent(&mut persistence, &request, default_target(), utc(2024, 6, 1, 8, 0, 0)).unwrap();

    let result = create_agent(&mut persistence, &request, default_target(), utc(2024, 6, 1, 9, 0, 0));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_agent_id"
    ));
}

#[test]
fn test_list_agents_reports_effective_targets() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("b-agent", Some(12)),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("a-agent", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    let response = list_agents(&mut persistence, default_target()).unwrap();

    let summary: Vec<(&str, u32)> = response
        .agents
        .iter()
        .map(|a| (a.agent_id.as_str(), a.effective_weekly_target))
        .collect();
    assert_eq!(summary, vec![("a-agent", 40), ("b-agent", 12)]);
}

#[test]
fn test_update_weekly_target_sets_and_clears() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("agent-1", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    let set = update_weekly_target(
        &mut persistence,
        &UpdateWeeklyTargetRequest {
            agent_id: String::from("agent-1"),
            weekly_target: Some(30),
        },
        default_target(),
    )
    .unwrap();
    assert_eq!(set.agent.weekly_target, Some(30));
    assert_eq!(set.agent.effective_weekly_target, 30);

    let cleared = update_weekly_target(
        &mut persistence,
        &UpdateWeeklyTargetRequest {
            agent_id: String::from("agent-1"),
            weekly_target: None,
        },
        default_target(),
    )
    .unwrap();
    assert_eq!(cleared.agent.weekly_target, None);
    assert_eq!(cleared.agent.effective_weekly_target, 40);
}

#[test]
fn test_update_weekly_target_rejects_negative_value() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("agent-1", Some(20)),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    let result = update_weekly_target(
        &mut persistence,
        &UpdateWeeklyTargetRequest {
            agent_id: String::from("agent-1"),
            weekly_target: Some(-5),
        },
        default_target(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    let agents = list_agents(&mut persistence, default_target()).unwrap().agents;
    assert_eq!(agents[0].weekly_target, Some(20));
}

#[test]
fn test_update_weekly_target_for_unknown_agent() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = update_weekly_target(
        &mut persistence,
        &UpdateWeeklyTargetRequest {
            agent_id: String::from("ghost"),
            weekly_target: Some(10),
        },
        default_target(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_status_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("agent-1", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    let activated =
        update_agent_status(&mut persistence, &status_request("agent-1", "active"), default_target())
            .unwrap();
    assert_eq!(activated.previous_status, "pending");
    assert_eq!(activated.agent.status, "active");

    let suspended = update_agent_status(
        &mut persistence,
        &status_request("agent-1", "Suspended"),
        default_target(),
    )
    .unwrap();
    assert_eq!(suspended.previous_status, "active");
    assert_eq!(suspended.agent.status, "suspended");

    let reactivated =
        update_agent_status(&mut persistence, &status_request("agent-1", "active"), default_target())
            .unwrap();
    assert_eq!(reactivated.agent.status, "active");
}

#[test]
fn test_status_cannot_return_to_pending() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("agent-1", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();
    update_agent_status(&mut persistence, &status_request("agent-1", "active"), default_target())
        .unwrap();

    let result =
        update_agent_status(&mut persistence, &status_request("agent-1", "pending"), default_target());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "status_transition"
    ));
}

#[test]
fn test_unknown_status_is_invalid_input() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_agent(
        &mut persistence,
        &create_agent_request("agent-1", None),
        default_target(),
        utc(2024, 6, 1, 8, 0, 0),
    )
    .unwrap();

    let result =
        update_agent_status(&mut persistence, &status_request("agent-1", "retired"), default_target());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

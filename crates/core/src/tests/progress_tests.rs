// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{StubRepository, create_test_agent, utc, wednesday_reference};
use crate::{AgentProgress, ProgressSettings, QuotaError, QuotaTracker};
use aba_directory_domain::{Agent, WeeklyTarget};
use chrono::{DateTime, Duration, Utc};

/// Spreads `count` registrations across the week starting at `monday`.
fn registrations_in_week(monday: DateTime<Utc>, count: u32) -> Vec<DateTime<Utc>> {
    (0..count)
        .map(|i| monday + Duration::minutes(i64::from(i) * 90))
        .collect()
}

fn repository_with_weekly_counts(agent_id: &str, counts: &[u32]) -> StubRepository {
    let current_monday: DateTime<Utc> = utc(2024, 6, 10, 0, 0, 0);
    let mut repository: StubRepository = StubRepository::new();
    for (weeks_ago, count) in (0_i64..).zip(counts) {
        let monday: DateTime<Utc> = current_monday - Duration::weeks(weeks_ago);
        repository = repository.with_registrations(agent_id, &registrations_in_week(monday, *count));
    }
    repository
}

#[tokio::test]
async fn test_progress_below_monthly_target() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", None);
    let repository: StubRepository =
        repository_with_weekly_counts("agent-1", &[10, 15, 20, 5, 60, 60, 60, 60]);

    let progress: AgentProgress = tracker
        .progress_for_agent(
            &repository,
            &agent,
            wednesday_reference(),
            &ProgressSettings::default(),
        )
        .await
        .unwrap();

    assert_eq!(progress.periods.len(), 8);
    assert_eq!(progress.weekly_target.value(), 40);
    assert_eq!(progress.aggregate.registered_sum(), 50);
    assert_eq!(progress.aggregate.target_sum(), 160);
    assert_eq!(progress.aggregate.progress_percent(), 31);
    assert!(!progress.aggregate.completed());
    assert_eq!(progress.weeks_met(), 4);

    let current = progress.current_week().unwrap();
    assert_eq!(current.registered_count(), 10);
    assert_eq!(current.remaining(), 30);
}

#[tokio::test]
async fn test_progress_above_monthly_target() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", None);
    let repository: StubRepository = repository_with_weekly_counts("agent-1", &[45, 45, 45, 45]);

    let progress: AgentProgress = tracker
        .progress_for_agent(
            &repository,
            &agent,
            wednesday_reference(),
            &ProgressSettings::default(),
        )
        .await
        .unwrap();

    assert_eq!(progress.aggregate.registered_sum(), 180);
    assert_eq!(progress.aggregate.progress_percent(), 100);
    assert!(progress.aggregate.completed());
    assert_eq!(progress.aggregate.exceeded_by(), 20);
}

#[tokio::test]
async fn test_progress_uses_agent_target_over_default() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", Some(10));
    let repository: StubRepository = repository_with_weekly_counts("agent-1", &[10, 9]);

    let progress: AgentProgress = tracker
        .progress_for_agent(
            &repository,
            &agent,
            wednesday_reference(),
            &ProgressSettings::default(),
        )
        .await
        .unwrap();

    assert_eq!(progress.weekly_target.value(), 10);
    assert_eq!(progress.aggregate.target_sum(), 40);
    assert!(progress.periods[0].target_met());
    assert!(!progress.periods[1].target_met());
}

#[tokio::test]
async fn test_progress_uses_configured_default_target() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", None);
    let repository: StubRepository = StubRepository::new();
    let settings: ProgressSettings = ProgressSettings {
        default_target: WeeklyTarget::new(25).unwrap(),
        ..ProgressSettings::default()
    };

    let progress: AgentProgress = tracker
        .progress_for_agent(&repository, &agent, wednesday_reference(), &settings)
        .await
        .unwrap();

    assert_eq!(progress.weekly_target.value(), 25);
    assert_eq!(progress.aggregate.target_sum(), 100);
    assert_eq!(progress.aggregate.progress_percent(), 0);
}

#[tokio::test]
async fn test_progress_rejects_history_shorter_than_window() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", None);
    let repository: StubRepository = StubRepository::new();
    let settings: ProgressSettings = ProgressSettings {
        history_weeks: 3,
        ..ProgressSettings::default()
    };

    let result: Result<AgentProgress, QuotaError> = tracker
        .progress_for_agent(&repository, &agent, wednesday_reference(), &settings)
        .await;

    assert!(matches!(
        result,
        Err(QuotaError::InsufficientData {
            required: 4,
            available: 3
        })
    ));
    assert_eq!(repository.calls(), 0);
}

#[tokio::test]
async fn test_progress_propagates_repository_failure() {
    let tracker: QuotaTracker = QuotaTracker::default();
    let agent: Agent = create_test_agent("agent-1", None);
    let repository: StubRepository =
        StubRepository::new().failing_for_start(utc(2024, 6, 10, 0, 0, 0));

    let result: Result<AgentProgress, QuotaError> = tracker
        .progress_for_agent(
            &repository,
            &agent,
            wednesday_reference(),
            &ProgressSettings::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(QuotaError::RepositoryFetch {
            period_index: 0,
            ..
        })
    ));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agent progress reports for the dashboard.

use crate::error::QuotaError;
use crate::repository::RecordsRepository;
use crate::tracker::{DEFAULT_HISTORY_WEEKS, QuotaTracker};
use aba_directory_domain::{
    Agent, AgentId, DEFAULT_AGGREGATE_WINDOW, MonthlyAggregate, WeekPeriod, WeeklyTarget,
    compute_monthly_aggregate,
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Tunables for an agent progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSettings {
    /// Number of weekly periods to compute (current week included).
    pub history_weeks: u32,
    /// Number of most recent weeks in the rolling aggregate.
    pub aggregate_window: usize,
    /// Target applied to agents whose record carries none.
    pub default_target: WeeklyTarget,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            history_weeks: DEFAULT_HISTORY_WEEKS,
            aggregate_window: DEFAULT_AGGREGATE_WINDOW,
            default_target: WeeklyTarget::default(),
        }
    }
}

/// Weekly history and rolling aggregate for one agent at one reference instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProgress {
    /// The agent the report is for.
    pub agent_id: AgentId,
    /// The weekly target the agent was measured against.
    pub weekly_target: WeeklyTarget,
    /// The reference instant (period 0 contains it).
    pub reference: DateTime<Utc>,
    /// Weekly periods, most recent first.
    pub periods: Vec<WeekPeriod>,
    /// Rolling aggregate over the most recent periods.
    pub aggregate: MonthlyAggregate,
}

impl AgentProgress {
    /// Returns the period containing the reference instant.
    #[must_use]
    pub fn current_week(&self) -> Option<&WeekPeriod> {
        self.periods.first()
    }

    /// Returns the number of weeks in the history whose target was met.
    #[must_use]
    pub fn weeks_met(&self) -> usize {
        self.periods.iter().filter(|p| p.target_met()).count()
    }
}

impl QuotaTracker {
    /// Builds the full progress report for an agent.
    ///
    /// The agent is expected to have been read from the store for this
    /// request, so an administrator's target change is reflected immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The history is shorter than the aggregate window
    /// - Any period count fails or the deadline expires
    pub async fn progress_for_agent<R: RecordsRepository>(
        &self,
        repository: &R,
        agent: &Agent,
        reference: DateTime<Utc>,
        settings: &ProgressSettings,
    ) -> Result<AgentProgress, QuotaError> {
        let history_weeks: usize = usize::try_from(settings.history_weeks).unwrap_or(usize::MAX);
        if history_weeks < settings.aggregate_window {
            return Err(QuotaError::InsufficientData {
                required: settings.aggregate_window,
                available: history_weeks,
            });
        }

        let weekly_target: WeeklyTarget = agent.effective_weekly_target(settings.default_target);
        let periods: Vec<WeekPeriod> = self
            .compute_for_agent(
                repository,
                &agent.agent_id,
                reference,
                i64::from(settings.history_weeks),
                i64::from(weekly_target.value()),
            )
            .await?;
        let aggregate: MonthlyAggregate =
            compute_monthly_aggregate(&periods, settings.aggregate_window)?;

        info!(
            agent_id = %agent.agent_id,
            target = weekly_target.value(),
            registered_sum = aggregate.registered_sum(),
            target_sum = aggregate.target_sum(),
            completed = aggregate.completed(),
            "Computed agent progress"
        );

        Ok(AgentProgress {
            agent_id: agent.agent_id.clone(),
            weekly_target,
            reference,
            periods,
            aggregate,
        })
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weekly registration target applied when an agent record carries none.
///
/// This is the only place the default lives; deployments override it
/// through configuration rather than repeating the number at call sites.
pub const DEFAULT_WEEKLY_TARGET: u32 = 40;

/// Represents the lifecycle state of an agent account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Application received, not yet approved by an administrator.
    #[default]
    Pending,
    /// Approved and allowed to register businesses.
    Active,
    /// Temporarily barred from registering businesses.
    Suspended,
}

impl FromStr for AgentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            _ => Err(DomainError::InvalidAgentStatus(format!(
                "Unknown agent status: '{s}'. Must be 'pending', 'active' or 'suspended'"
            ))),
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AgentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Active
    /// - Pending → Suspended
    /// - Active → Suspended
    /// - Suspended → Active
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Active | Self::Suspended)
                | (Self::Active, Self::Suspended)
                | (Self::Suspended, Self::Active)
        )
    }

    /// Validates a transition, returning the target status when allowed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn transition_to(self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

/// Represents an agent identifier.
///
/// Identifiers are opaque strings issued by the hosted backend; they are
/// trimmed but otherwise preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId {
    value: String,
}

impl AgentId {
    /// Creates a new `AgentId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAgentId(String::from(
                "Agent id cannot be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Number of business registrations an agent is expected to produce per
/// Monday-start week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeeklyTarget {
    value: u32,
}

impl WeeklyTarget {
    /// Creates a new `WeeklyTarget`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeeklyTarget` if the value is not
    /// strictly positive or does not fit in a `u32`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u32::try_from(value) {
            Ok(v) if v > 0 => Ok(Self { value: v }),
            _ => Err(DomainError::InvalidWeeklyTarget { value }),
        }
    }

    /// Returns the target value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl Default for WeeklyTarget {
    fn default() -> Self {
        Self {
            value: DEFAULT_WEEKLY_TARGET,
        }
    }
}

/// Represents a field agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// The agent's identifier.
    pub agent_id: AgentId,
    /// The agent's display name.
    pub name: String,
    /// The agent's own weekly target. `None` means the configured default applies.
    pub weekly_target: Option<WeeklyTarget>,
    /// The agent's account status.
    pub status: AgentStatus,
}

impl Agent {
    /// Creates a new pending `Agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn new(
        agent_id: AgentId,
        name: &str,
        weekly_target: Option<WeeklyTarget>,
    ) -> Result<Self, DomainError> {
        let name: &str = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidAgentName(String::from(
                "Name cannot be empty",
            )));
        }
        Ok(Self {
            agent_id,
            name: name.to_string(),
            weekly_target,
            status: AgentStatus::Pending,
        })
    }

    /// Returns the weekly target to measure this agent against.
    #[must_use]
    pub fn effective_weekly_target(&self, default: WeeklyTarget) -> WeeklyTarget {
        self.weekly_target.unwrap_or(default)
    }

    /// Ensures the agent may register businesses.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AgentNotActive` unless the agent is active.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status == AgentStatus::Active {
            Ok(())
        } else {
            Err(DomainError::AgentNotActive {
                agent_id: self.agent_id.value().to_string(),
                status: self.status.as_str().to_string(),
            })
        }
    }
}

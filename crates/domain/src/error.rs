// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and quota calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A calculation input was malformed.
    InvalidArgument {
        /// The name of the offending argument.
        argument: &'static str,
        /// Description of the constraint that was violated.
        reason: String,
    },
    /// An aggregate was requested over more periods than were supplied.
    InsufficientData {
        /// The number of periods the aggregate window needs.
        required: usize,
        /// The number of periods actually supplied.
        available: usize,
    },
    /// Agent identifier is empty or invalid.
    InvalidAgentId(String),
    /// Agent display name is empty or invalid.
    InvalidAgentName(String),
    /// Weekly target is not a positive integer.
    InvalidWeeklyTarget {
        /// The rejected value.
        value: i64,
    },
    /// Agent status string is not recognized.
    InvalidAgentStatus(String),
    /// Agent status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The agent must be active to perform the operation.
    AgentNotActive {
        /// The agent identifier.
        agent_id: String,
        /// The agent's current status.
        status: String,
    },
    /// Business name is empty or invalid.
    InvalidBusinessName(String),
    /// Time zone name could not be parsed.
    InvalidTimezone(String),
    /// A local wall-clock time does not exist in the configured time zone.
    UnresolvableLocalTime {
        /// Description of the local time that could not be resolved.
        local_time: String,
        /// The time zone name.
        timezone: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{argument}': {reason}")
            }
            Self::InsufficientData {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: aggregate needs {required} weekly periods but only {available} were supplied"
                )
            }
            Self::InvalidAgentId(msg) => write!(f, "Invalid agent id: {msg}"),
            Self::InvalidAgentName(msg) => write!(f, "Invalid agent name: {msg}"),
            Self::InvalidWeeklyTarget { value } => {
                write!(
                    f,
                    "Invalid weekly target: {value}. Must be greater than 0"
                )
            }
            Self::InvalidAgentStatus(msg) => write!(f, "Invalid agent status: {msg}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Agent status cannot change from {from} to {to}")
            }
            Self::AgentNotActive { agent_id, status } => {
                write!(f, "Agent '{agent_id}' is {status}, not active")
            }
            Self::InvalidBusinessName(msg) => write!(f, "Invalid business name: {msg}"),
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::UnresolvableLocalTime {
                local_time,
                timezone,
            } => {
                write!(
                    f,
                    "Local time {local_time} does not exist in timezone {timezone}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use aba_directory::QuotaError;
use aba_directory_domain::DomainError;
use aba_directory_persistence::PersistenceError;
use tracing::{error, warn};

/// API-level errors.
///
/// These are distinct from domain, quota and persistence errors and
/// represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Fewer weekly periods were available than the aggregate needs.
    InsufficientData {
        /// A human-readable description of the shortfall.
        message: String,
    },
    /// The records store failed while counting registrations.
    Upstream {
        /// A description of the failure.
        message: String,
    },
    /// Counting registrations did not finish before the deadline.
    Timeout {
        /// A description of the deadline that expired.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InsufficientData { message } => write!(f, "{message}"),
            Self::Upstream { message } => write!(f, "Records store unavailable: {message}"),
            Self::Timeout { message } => write!(f, "Timed out: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidArgument { argument, reason } => ApiError::InvalidInput {
            field: argument.to_string(),
            message: reason,
        },
        DomainError::InsufficientData { .. } => ApiError::InsufficientData {
            message: err.to_string(),
        },
        DomainError::InvalidAgentId(msg) => ApiError::InvalidInput {
            field: String::from("agent_id"),
            message: msg,
        },
        DomainError::InvalidAgentName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidWeeklyTarget { value } => ApiError::InvalidInput {
            field: String::from("weekly_target"),
            message: format!("Invalid weekly target: {value}. Must be greater than 0"),
        },
        DomainError::InvalidAgentStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: msg,
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Agent status cannot change from {from} to {to}"),
        },
        DomainError::AgentNotActive { agent_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("active_agent"),
            message: format!("Agent '{agent_id}' is {status}; only active agents may register businesses"),
        },
        DomainError::InvalidBusinessName(msg) => ApiError::InvalidInput {
            field: String::from("business_name"),
            message: msg,
        },
        DomainError::InvalidTimezone(tz) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown time zone '{tz}'"),
        },
        DomainError::UnresolvableLocalTime { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("reference"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a quota computation error into an API error.
///
/// Repository failures and deadline expiry are logged here, at the point
/// where they stop being retried.
#[must_use]
pub fn translate_quota_error(err: QuotaError) -> ApiError {
    match err {
        QuotaError::InvalidArgument(domain_err) | QuotaError::Domain(domain_err) => {
            translate_domain_error(domain_err)
        }
        QuotaError::InsufficientData { .. } => ApiError::InsufficientData {
            message: err.to_string(),
        },
        QuotaError::RepositoryFetch { period_index, .. } => {
            error!(period_index, error = %err, "Registration count failed");
            ApiError::Upstream {
                message: err.to_string(),
            }
        }
        QuotaError::DeadlineExceeded { timeout } => {
            warn!(?timeout, "Registration counts timed out");
            ApiError::Timeout {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AgentNotFound(agent_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("Agent '{agent_id}' does not exist"),
        },
        PersistenceError::AgentAlreadyExists(agent_id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_agent_id"),
            message: format!("Agent '{agent_id}' already exists"),
        },
        _ => {
            error!(error = %err, "Persistence error");
            ApiError::Internal {
                message: format!("Persistence error: {err}"),
            }
        }
    }
}

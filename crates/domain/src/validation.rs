// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::WeeklyTarget;

/// Largest number of weekly periods a single computation may request (ten years).
pub const MAX_WEEKS_BACK: u32 = 520;

/// Validates the number of weekly periods requested.
///
/// # Arguments
///
/// * `weeks_back` - Number of periods to produce, current week included
///
/// # Returns
///
/// * `Ok(u32)` with the validated count
/// * `Err(DomainError::InvalidArgument)` if the count is negative or too large
///
/// # Errors
///
/// Returns an error if `weeks_back` is negative or exceeds `MAX_WEEKS_BACK`.
pub fn validate_weeks_back(weeks_back: i64) -> Result<u32, DomainError> {
    if weeks_back < 0 {
        return Err(DomainError::InvalidArgument {
            argument: "weeks_back",
            reason: format!("must not be negative, got {weeks_back}"),
        });
    }
    match u32::try_from(weeks_back) {
        Ok(weeks) if weeks <= MAX_WEEKS_BACK => Ok(weeks),
        _ => Err(DomainError::InvalidArgument {
            argument: "weeks_back",
            reason: format!("must not exceed {MAX_WEEKS_BACK}, got {weeks_back}"),
        }),
    }
}

/// Validates a raw weekly target value.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` if the target is not strictly positive.
pub fn validate_target(target: i64) -> Result<WeeklyTarget, DomainError> {
    WeeklyTarget::new(target).map_err(|_| DomainError::InvalidArgument {
        argument: "target",
        reason: format!("must be greater than 0, got {target}"),
    })
}

/// Validates a business name supplied at registration.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming.
pub fn validate_business_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidBusinessName(String::from(
            "Business name cannot be empty",
        )));
    }
    Ok(trimmed.to_string())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bloom::CoreError;
use bloom_domain::DomainError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A referenced service, staff member, or booking does not exist.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A requested service is missing from the catalog or inactive.
    #[error("Service '{service_id}' is unavailable: {message}")]
    ServiceUnavailable {
        /// The service identifier.
        service_id: String,
        /// Why the service cannot be booked.
        message: String,
    },
    /// The slot cannot be allocated.
    ///
    /// `kind` is one of `double_booked`, `outside_hours`,
    /// `staff_unavailable`, or `shift_in_use`.
    #[error("Slot conflict ({kind}): {message}")]
    SlotConflict {
        /// Machine-readable conflict kind.
        kind: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The requested status or payment edge is not allowed.
    #[error("Invalid transition: {message}")]
    InvalidTransition {
        /// A human-readable description of the rejected edge.
        message: String,
    },
    /// A well-formed request breaks a booking rule.
    #[error("Validation failed ({rule}): {message}")]
    ValidationError {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn validation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::ValidationError {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidIdentifier { kind, .. } => invalid_input(&format!("{kind}_id"), &err),
        DomainError::InvalidBookingId(_) => invalid_input("booking_id", &err),
        DomainError::InvalidName(_) => invalid_input("name", &err),
        DomainError::InvalidBookingStatus(_) => invalid_input("status", &err),
        DomainError::InvalidPaymentStatus(_) => invalid_input("payment_status", &err),
        DomainError::InvalidPaymentMethod(_) => invalid_input("payment_method", &err),
        DomainError::InvalidShiftKind(_) => invalid_input("shift", &err),
        DomainError::InvalidStaffRole(_) => invalid_input("role", &err),
        DomainError::InvalidStaffStatus(_) | DomainError::InvalidServiceStatus(_) => {
            invalid_input("status", &err)
        }
        DomainError::DateParseError { .. } => invalid_input("date", &err),
        DomainError::TimeParseError { .. } => invalid_input("time", &err),
        DomainError::EmptyServiceSelection => validation("non_empty_services", &err),
        DomainError::DuplicateService(_) => validation("unique_services", &err),
        DomainError::InvalidDuration { .. } => validation("positive_duration", &err),
        DomainError::InvalidInterval { .. } => validation("valid_interval", &err),
        DomainError::IntervalPastMidnight { .. } => validation("same_day_interval", &err),
        DomainError::InvalidDateRange { .. } => validation("ordered_date_range", &err),
        DomainError::DateRangeTooLong { .. } => validation("max_date_range", &err),
        DomainError::StaffAlreadyAssigned { .. } => validation("single_assignment", &err),
        DomainError::PriceOverflow => validation("price_range", &err),
        DomainError::DurationOverflow => validation("same_day_interval", &err),
        DomainError::InvalidStatusTransition { .. }
        | DomainError::InvalidPaymentTransition { .. }
        | DomainError::AssignmentClosed { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotFound { resource, id } => ApiError::NotFound {
            resource_type: capitalize(resource),
            message: format!("{resource} '{id}' does not exist"),
        },
        CoreError::ServiceUnavailable { service_id, reason } => ApiError::ServiceUnavailable {
            service_id: service_id.to_string(),
            message: String::from(reason.as_str()),
        },
        CoreError::SlotConflict(conflict) => ApiError::SlotConflict {
            kind: String::from(conflict.kind()),
            message: conflict.to_string(),
        },
        err @ CoreError::StaffUnavailable { .. } => ApiError::SlotConflict {
            kind: String::from("staff_unavailable"),
            message: err.to_string(),
        },
        err @ CoreError::ShiftInUse { .. } => ApiError::SlotConflict {
            kind: String::from("shift_in_use"),
            message: err.to_string(),
        },
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

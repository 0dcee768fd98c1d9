// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::ServiceId;
use std::collections::HashSet;
use time::macros::format_description;
use time::{Date, Time};

/// The longest date range a booking query may span, in days.
pub const MAX_QUERY_RANGE_DAYS: i64 = 31;

/// Validates the services named by a booking request.
///
/// The list must be non-empty and name each service at most once.
///
/// # Errors
///
/// Returns an error if the list is empty or contains a duplicate.
pub fn validate_service_selection(service_ids: &[ServiceId]) -> Result<(), DomainError> {
    if service_ids.is_empty() {
        return Err(DomainError::EmptyServiceSelection);
    }

    let mut seen: HashSet<&ServiceId> = HashSet::new();
    for id in service_ids {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateService(id.to_string()));
        }
    }

    Ok(())
}

/// Validates an inclusive date range used to query bookings.
///
/// # Errors
///
/// Returns an error if `from` is after `to` or the range covers more
/// than [`MAX_QUERY_RANGE_DAYS`] days, counting both ends.
pub fn validate_date_range(from: Date, to: Date) -> Result<(), DomainError> {
    if from > to {
        return Err(DomainError::InvalidDateRange { from, to });
    }

    let days: i64 = (to - from).whole_days() + 1;
    if days > MAX_QUERY_RANGE_DAYS {
        return Err(DomainError::DateRangeTooLong {
            days,
            max: MAX_QUERY_RANGE_DAYS,
        });
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an `HH:MM` wall-clock time.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid time.
pub fn parse_wall_clock(value: &str) -> Result<Time, DomainError> {
    Time::parse(value, format_description!("[hour]:[minute]")).map_err(|e| {
        DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Time};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is empty or contains whitespace.
    InvalidIdentifier {
        /// The kind of identifier (e.g. "service", "staff").
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A booking identifier could not be parsed.
    InvalidBookingId(String),
    /// A display name is empty.
    InvalidName(String),
    /// A booking request named no services.
    EmptyServiceSelection,
    /// The same service was named twice in one booking request.
    DuplicateService(String),
    /// A service duration must be positive.
    InvalidDuration {
        /// The service identifier.
        service_id: String,
        /// The rejected duration in minutes.
        minutes: u32,
    },
    /// An interval whose start is not strictly before its end.
    InvalidInterval {
        /// The interval start.
        start: Time,
        /// The interval end.
        end: Time,
    },
    /// An interval that would run past midnight.
    IntervalPastMidnight {
        /// The interval start.
        start: Time,
        /// The requested length in minutes.
        minutes: u32,
    },
    /// Booking status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Payment status transition is not permitted.
    InvalidPaymentTransition {
        /// The current payment status.
        from: String,
        /// The requested payment status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Unknown booking status string.
    InvalidBookingStatus(String),
    /// Unknown payment status string.
    InvalidPaymentStatus(String),
    /// Unknown payment method string.
    InvalidPaymentMethod(String),
    /// Unknown shift kind string.
    InvalidShiftKind(String),
    /// Unknown staff role string.
    InvalidStaffRole(String),
    /// Unknown staff status string.
    InvalidStaffStatus(String),
    /// Unknown service status string.
    InvalidServiceStatus(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a wall-clock time from string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A date range whose start is after its end.
    InvalidDateRange {
        /// The range start.
        from: Date,
        /// The range end.
        to: Date,
    },
    /// A date range longer than the query limit.
    DateRangeTooLong {
        /// The requested span in days.
        days: i64,
        /// The maximum allowed span in days.
        max: i64,
    },
    /// The booking already has a staff member.
    StaffAlreadyAssigned {
        /// The booking identifier.
        booking_id: String,
        /// The staff member currently assigned.
        staff_id: String,
    },
    /// Staff can only be assigned while the booking is pending or confirmed.
    AssignmentClosed {
        /// The booking identifier.
        booking_id: String,
        /// The booking's current status.
        status: String,
    },
    /// Summing service prices overflowed.
    PriceOverflow,
    /// Summing service durations overflowed.
    DurationOverflow,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::InvalidBookingId(value) => write!(f, "Invalid booking identifier: '{value}'"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::EmptyServiceSelection => {
                write!(f, "A booking must include at least one service")
            }
            Self::DuplicateService(id) => {
                write!(f, "Service '{id}' is listed more than once")
            }
            Self::InvalidDuration {
                service_id,
                minutes,
            } => {
                write!(
                    f,
                    "Invalid duration for service '{service_id}': {minutes} minutes. Must be greater than 0"
                )
            }
            Self::InvalidInterval { start, end } => {
                write!(
                    f,
                    "Invalid interval: start {start} must be before end {end}"
                )
            }
            Self::IntervalPastMidnight { start, minutes } => {
                write!(
                    f,
                    "Interval starting at {start} lasting {minutes} minutes runs past midnight"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(
                    f,
                    "Invalid status transition from '{from}' to '{to}': {reason}"
                )
            }
            Self::InvalidPaymentTransition { from, to, reason } => {
                write!(
                    f,
                    "Invalid payment transition from '{from}' to '{to}': {reason}"
                )
            }
            Self::InvalidBookingStatus(s) => write!(f, "Invalid booking status: '{s}'"),
            Self::InvalidPaymentStatus(s) => write!(f, "Invalid payment status: '{s}'"),
            Self::InvalidPaymentMethod(s) => write!(f, "Invalid payment method: '{s}'"),
            Self::InvalidShiftKind(s) => write!(f, "Invalid shift: '{s}'"),
            Self::InvalidStaffRole(s) => write!(f, "Invalid staff role: '{s}'"),
            Self::InvalidStaffStatus(s) => write!(f, "Invalid staff status: '{s}'"),
            Self::InvalidServiceStatus(s) => write!(f, "Invalid service status: '{s}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::InvalidDateRange { from, to } => {
                write!(f, "Invalid date range: {from} is after {to}")
            }
            Self::DateRangeTooLong { days, max } => {
                write!(
                    f,
                    "Date range of {days} days exceeds the maximum of {max} days"
                )
            }
            Self::StaffAlreadyAssigned {
                booking_id,
                staff_id,
            } => {
                write!(
                    f,
                    "Booking {booking_id} is already assigned to staff '{staff_id}'"
                )
            }
            Self::AssignmentClosed { booking_id, status } => {
                write!(
                    f,
                    "Cannot assign staff to booking {booking_id} in status '{status}'"
                )
            }
            Self::PriceOverflow => write!(f, "Total price exceeds the representable range"),
            Self::DurationOverflow => {
                write!(f, "Total duration exceeds the representable range")
            }
        }
    }
}

impl std::error::Error for DomainError {}

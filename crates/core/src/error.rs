// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::conflict::SlotConflict;
use bloom_domain::{BookingId, DomainError, ServiceId, ShiftKind, StaffId, StaffStatus};
use time::Date;

/// Why a referenced service cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceUnavailableReason {
    /// The id is not in the catalog.
    Missing,
    /// The service exists but is inactive.
    Inactive,
}

impl ServiceUnavailableReason {
    /// Returns the string representation of the reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "not in catalog",
            Self::Inactive => "inactive",
        }
    }
}

/// Errors that can occur in the scheduling core.
///
/// A rejected operation never leaves a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record ("service", "staff", "booking").
        resource: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
    /// A requested service is missing from the catalog or inactive.
    ServiceUnavailable {
        /// The service identifier.
        service_id: ServiceId,
        /// Why the service cannot be booked.
        reason: ServiceUnavailableReason,
    },
    /// The requested staff member is not taking bookings.
    StaffUnavailable {
        /// The staff identifier.
        staff_id: StaffId,
        /// The staff member's current status.
        status: StaffStatus,
    },
    /// The requested slot cannot be allocated.
    SlotConflict(SlotConflict),
    /// Closing the shift would strand an active booking outside working hours.
    ShiftInUse {
        /// The staff member.
        staff_id: StaffId,
        /// The date.
        date: Date,
        /// The shift being closed.
        shift: ShiftKind,
        /// The booking that depends on the shift.
        booking_id: BookingId,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotFound { resource, id } => write!(f, "{resource} '{id}' not found"),
            Self::ServiceUnavailable { service_id, reason } => {
                write!(
                    f,
                    "Service '{service_id}' is unavailable: {}",
                    reason.as_str()
                )
            }
            Self::StaffUnavailable { staff_id, status } => {
                write!(
                    f,
                    "Staff '{staff_id}' is not taking bookings (status: {})",
                    status.as_str()
                )
            }
            Self::SlotConflict(conflict) => write!(f, "Slot conflict: {conflict}"),
            Self::ShiftInUse {
                staff_id,
                date,
                shift,
                booking_id,
            } => {
                write!(
                    f,
                    "Cannot close {shift} shift for staff '{staff_id}' on {date}: booking {booking_id} depends on it"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<SlotConflict> for CoreError {
    fn from(conflict: SlotConflict) -> Self {
        Self::SlotConflict(conflict)
    }
}

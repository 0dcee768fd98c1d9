// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloom_domain::{BookingStatus, PaymentStatus, StaffId};

/// A command represents a change requested against one existing booking.
///
/// Commands are data only. They are interpreted by [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCommand {
    /// Move the booking through its lifecycle.
    TransitionStatus {
        /// The requested status.
        target: BookingStatus,
    },
    /// Move the payment through its lifecycle.
    TransitionPayment {
        /// The requested payment status.
        target: PaymentStatus,
    },
    /// Assign a staff member to an unassigned booking.
    AssignStaff {
        /// The staff member to assign.
        staff_id: StaffId,
    },
}

impl BookingCommand {
    /// The audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::TransitionStatus { .. } => "TransitionStatus",
            Self::TransitionPayment { .. } => "TransitionPayment",
            Self::AssignStaff { .. } => "AssignStaff",
        }
    }
}

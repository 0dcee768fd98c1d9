// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloom_audit::{AuditEvent, StateSnapshot};
use bloom_domain::{Booking, ShiftKind, StaffId};
use time::Date;

/// Converts a booking to a snapshot for audit purposes.
#[must_use]
pub fn booking_snapshot(booking: &Booking) -> StateSnapshot {
    StateSnapshot::new(booking.summary())
}

/// Converts one day's open shifts to a snapshot for audit purposes.
#[must_use]
pub fn schedule_snapshot(staff_id: &StaffId, date: Date, shifts: &[ShiftKind]) -> StateSnapshot {
    let open: Vec<&str> = shifts.iter().map(ShiftKind::as_str).collect();
    StateSnapshot::new(format!(
        "staff={staff_id},date={date},shifts=[{}]",
        open.join(",")
    ))
}

/// The result of a successful booking transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking after the transition.
    pub booking: Booking,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

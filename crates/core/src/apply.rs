// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::AllocationPlan;
use crate::command::BookingCommand;
use crate::error::CoreError;
use crate::state::{TransitionResult, booking_snapshot};
use bloom_audit::{Action, Actor, AuditEvent, AuditScope, Cause, StateSnapshot};
use bloom_domain::{Booking, BookingId, BookingStatus, DomainError, Payment, PaymentStatus};
use time::OffsetDateTime;

/// Turns a conflict-checked plan into a new booking and its audit event.
///
/// The booking starts `pending` with an `unpaid` payment.
///
/// # Arguments
///
/// * `id` - The identifier reserved for the booking
/// * `plan` - The resolved allocation
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The creation timestamp
#[must_use]
pub fn create_booking(
    id: BookingId,
    plan: AllocationPlan,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> TransitionResult {
    let booking: Booking = Booking {
        id,
        customer_id: plan.customer_id,
        staff_id: plan.staff_id,
        services: plan.services,
        date: plan.date,
        interval: plan.interval,
        status: BookingStatus::Pending,
        payment: Payment {
            amount: plan.amount,
            method: plan.payment_method,
            status: PaymentStatus::Unpaid,
        },
        notes: plan.notes,
        created_at: now,
    };

    let action: Action = Action::new(
        String::from("AllocateBooking"),
        Some(format!(
            "Allocated {} on {} for customer '{}'",
            booking.interval, booking.date, booking.customer_id
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::absent(),
        booking_snapshot(&booking),
        AuditScope::Booking(id),
        now,
    );

    TransitionResult {
        booking,
        audit_event,
    }
}

/// Applies a command to a booking, producing the new booking and an audit event.
///
/// This function is pure. Shift and double-booking checks for
/// `AssignStaff` are the caller's job, since they need the other
/// bookings of the day.
///
/// # Arguments
///
/// * `booking` - The current booking (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - When the change happens
///
/// # Errors
///
/// Returns an error if:
/// - The status or payment edge is not allowed
/// - Staff is already assigned, or the booking is past the point of assignment
pub fn apply(
    booking: &Booking,
    command: BookingCommand,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.action_name();
    let mut updated: Booking = booking.clone();

    let details: String = match command {
        BookingCommand::TransitionStatus { target } => {
            booking.status.validate_transition(target)?;
            updated.status = target;
            format!("{} -> {}", booking.status, target)
        }
        BookingCommand::TransitionPayment { target } => {
            booking
                .payment
                .status
                .validate_transition(target, booking.status)?;
            updated.payment.status = target;
            format!("{} -> {}", booking.payment.status, target)
        }
        BookingCommand::AssignStaff { staff_id } => {
            if let Some(existing) = &booking.staff_id {
                return Err(CoreError::DomainViolation(
                    DomainError::StaffAlreadyAssigned {
                        booking_id: booking.id.to_string(),
                        staff_id: existing.to_string(),
                    },
                ));
            }
            if !matches!(
                booking.status,
                BookingStatus::Pending | BookingStatus::Confirmed
            ) {
                return Err(CoreError::DomainViolation(DomainError::AssignmentClosed {
                    booking_id: booking.id.to_string(),
                    status: booking.status.to_string(),
                }));
            }
            let details: String = format!("unassigned -> {staff_id}");
            updated.staff_id = Some(staff_id);
            details
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from(action_name), Some(details)),
        booking_snapshot(booking),
        booking_snapshot(&updated),
        AuditScope::Booking(booking.id),
        now,
    );

    Ok(TransitionResult {
        booking: updated,
        audit_event,
    })
}

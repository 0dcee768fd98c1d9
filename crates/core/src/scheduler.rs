// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::{AllocationPlan, AllocationRequest, plan_allocation, resolve_staff};
use crate::apply::{apply, create_booking};
use crate::calendar::{DayKey, ShiftCalendar};
use crate::catalog::Catalog;
use crate::command::BookingCommand;
use crate::conflict::{SlotConflict, check_conflict};
use crate::error::CoreError;
use crate::ledger::{BookingCell, BookingLedger, lock};
use crate::query::BookingQuery;
use crate::state::{TransitionResult, schedule_snapshot};
use bloom_audit::{Action, Actor, AuditEvent, AuditScope, Cause};
use bloom_domain::{
    Booking, BookingId, BookingStatus, PaymentStatus, ShiftKind, StaffId, TimeInterval,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

/// The outcome of a shift change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftChange {
    /// The staff member.
    pub staff_id: StaffId,
    /// The date.
    pub date: Date,
    /// The open shifts after the change.
    pub open_shifts: Vec<ShiftKind>,
    /// The audit event, or `None` if the call changed nothing.
    pub audit_event: Option<AuditEvent>,
}

/// One staff member's shifts and active bookings on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// The staff member.
    pub staff_id: StaffId,
    /// The date.
    pub date: Date,
    /// Open shifts in chronological order.
    pub open_shifts: Vec<ShiftKind>,
    /// Active bookings ordered by start time.
    pub bookings: Vec<Booking>,
}

/// The scheduling core: catalog, shift calendar, and booking ledger.
///
/// `Scheduler` is `Sync` and is meant to be shared behind an `Arc`.
/// Operations on different `(staff, date)` keys run in parallel;
/// operations on the same key are serialized and never wait on anything
/// but that key's lock.
#[derive(Debug)]
pub struct Scheduler<C: Catalog> {
    catalog: C,
    calendar: ShiftCalendar,
    ledger: BookingLedger,
}

impl<C: Catalog> Scheduler<C> {
    /// Creates a scheduler with an empty calendar and ledger.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            calendar: ShiftCalendar::new(),
            ledger: BookingLedger::new(),
        }
    }

    /// Returns the catalog.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Opens or closes a shift for a staff member. Idempotent.
    ///
    /// A change is audited under the schedule scope. A call that changes
    /// nothing records no event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The staff member is unknown
    /// - Closing the shift would leave an active booking outside every open shift
    pub fn set_shift(
        &self,
        staff_id: &StaffId,
        date: Date,
        shift: ShiftKind,
        open: bool,
        actor: Actor,
        cause: Cause,
    ) -> Result<ShiftChange, CoreError> {
        self.catalog.get_staff(staff_id)?;

        let key: DayKey = DayKey::new(staff_id.clone(), date);
        let day = self.ledger.day(&key);
        let day_ids = lock(&day);

        let before: Vec<ShiftKind> = self.calendar.open_shifts(&key);

        if !open && before.contains(&shift) {
            let remaining: Vec<TimeInterval> = before
                .iter()
                .filter(|s| **s != shift)
                .map(ShiftKind::window)
                .collect();
            let stranded: Option<BookingId> = self
                .ledger
                .snapshots(&day_ids)
                .iter()
                .filter(|b| b.blocks(staff_id, date))
                .filter(|b| !remaining.iter().any(|w| w.contains(&b.interval)))
                .map(|b| b.id)
                .min();
            if let Some(booking_id) = stranded {
                warn!(
                    staff_id = %staff_id,
                    %date,
                    %shift,
                    booking_id = %booking_id,
                    "Refusing to close shift with active booking"
                );
                return Err(CoreError::ShiftInUse {
                    staff_id: staff_id.clone(),
                    date,
                    shift,
                    booking_id,
                });
            }
        }

        let changed: bool = self.calendar.set_shift(&key, shift, open);
        let after: Vec<ShiftKind> = self.calendar.open_shifts(&key);

        if !changed {
            debug!(staff_id = %staff_id, %date, %shift, open, "Shift already in requested state");
            return Ok(ShiftChange {
                staff_id: staff_id.clone(),
                date,
                open_shifts: after,
                audit_event: None,
            });
        }

        let verb: &str = if open { "Opened" } else { "Closed" };
        let event: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("SetShift"),
                Some(format!("{verb} {shift} shift")),
            ),
            schedule_snapshot(staff_id, date, &before),
            schedule_snapshot(staff_id, date, &after),
            AuditScope::Schedule {
                staff_id: staff_id.clone(),
                date,
            },
            OffsetDateTime::now_utc(),
        );
        // Recorded under the day lock so schedule events chain in change order.
        let recorded: AuditEvent = self.ledger.record(event);
        drop(day_ids);
        info!(staff_id = %staff_id, %date, %shift, open, "Shift updated");

        Ok(ShiftChange {
            staff_id: staff_id.clone(),
            date,
            open_shifts: after,
            audit_event: Some(recorded),
        })
    }

    /// True iff some open shift of `staff_id` on `date` fully contains `interval`.
    #[must_use]
    pub fn is_available(&self, staff_id: &StaffId, date: Date, interval: &TimeInterval) -> bool {
        self.calendar
            .is_available(&DayKey::new(staff_id.clone(), date), interval)
    }

    /// Checks a slot against the current calendar and bookings.
    ///
    /// The answer can be stale by the time the caller acts on it;
    /// [`Scheduler::allocate`] repeats the check under the day lock.
    ///
    /// # Errors
    ///
    /// Returns the conflict, if any.
    pub fn check_conflict(
        &self,
        staff_id: Option<&StaffId>,
        date: Date,
        interval: &TimeInterval,
    ) -> Result<(), SlotConflict> {
        let Some(staff_id) = staff_id else {
            return Ok(());
        };
        let key: DayKey = DayKey::new(staff_id.clone(), date);
        let day = self.ledger.day(&key);
        let day_ids = lock(&day);
        let existing: Vec<Booking> = self.ledger.snapshots(&day_ids);
        drop(day_ids);
        check_conflict(&self.calendar, &existing, Some(staff_id), date, interval)
    }

    /// Allocates a slot and creates a `pending`, `unpaid` booking.
    ///
    /// Either a fully valid booking is stored and audited, or nothing
    /// changes. Contention fails fast with `SlotConflict`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The service selection is invalid, or a service is missing or inactive
    /// - The staff member is unknown or not active
    /// - The slot is outside working hours or double-booked
    pub fn allocate(
        &self,
        request: &AllocationRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<Booking, CoreError> {
        let plan: AllocationPlan = plan_allocation(&self.catalog, request)?;

        let Some(staff_id) = plan.staff_id.clone() else {
            return Ok(self.store_new(plan, actor, cause));
        };

        let key: DayKey = DayKey::new(staff_id.clone(), plan.date);
        let day = self.ledger.day(&key);
        let mut day_ids = lock(&day);

        let existing: Vec<Booking> = self.ledger.snapshots(&day_ids);
        if let Err(conflict) = check_conflict(
            &self.calendar,
            &existing,
            Some(&staff_id),
            plan.date,
            &plan.interval,
        ) {
            warn!(
                staff_id = %staff_id,
                date = %plan.date,
                interval = %plan.interval,
                kind = conflict.kind(),
                "Allocation rejected"
            );
            return Err(conflict.into());
        }

        let booking: Booking = self.store_new(plan, actor, cause);
        day_ids.push(booking.id);
        Ok(booking)
    }

    fn store_new(&self, plan: AllocationPlan, actor: Actor, cause: Cause) -> Booking {
        let id: BookingId = self.ledger.next_id();
        let result: TransitionResult =
            create_booking(id, plan, actor, cause, OffsetDateTime::now_utc());
        self.ledger.insert(result.booking.clone());
        self.ledger.record(result.audit_event);
        info!(
            booking_id = %id,
            customer_id = %result.booking.customer_id,
            date = %result.booking.date,
            interval = %result.booking.interval,
            "Booking allocated"
        );
        result.booking
    }

    /// Assigns a staff member to an unassigned booking.
    ///
    /// Runs the same shift and double-booking checks as allocation, under
    /// the same day lock.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The booking or staff member is unknown, or the staff member is not active
    /// - The booking already has staff or is no longer pending or confirmed
    /// - The slot is outside the staff member's shifts or double-booked
    pub fn assign_staff(
        &self,
        booking_id: BookingId,
        staff_id: &StaffId,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        resolve_staff(&self.catalog, staff_id)?;
        let cell = self.booking_cell(booking_id)?;
        // Date is immutable, so the day key can be computed before locking.
        let date: Date = lock(&cell).date;

        let key: DayKey = DayKey::new(staff_id.clone(), date);
        let day = self.ledger.day(&key);
        let mut day_ids = lock(&day);
        let mut booking = lock(&cell);

        // Rejects already-assigned bookings, so the target is never in `day_ids`.
        let result: TransitionResult = apply(
            &booking,
            BookingCommand::AssignStaff {
                staff_id: staff_id.clone(),
            },
            actor,
            cause,
            OffsetDateTime::now_utc(),
        )?;

        let existing: Vec<Booking> = self.ledger.snapshots(&day_ids);
        if let Err(conflict) = check_conflict(
            &self.calendar,
            &existing,
            Some(staff_id),
            date,
            &booking.interval,
        ) {
            warn!(
                booking_id = %booking_id,
                staff_id = %staff_id,
                kind = conflict.kind(),
                "Staff assignment rejected"
            );
            return Err(conflict.into());
        }

        *booking = result.booking.clone();
        day_ids.push(booking_id);
        let audit_event: AuditEvent = self.ledger.record(result.audit_event);
        drop(booking);
        drop(day_ids);

        info!(booking_id = %booking_id, staff_id = %staff_id, "Staff assigned");
        Ok(TransitionResult {
            booking: result.booking,
            audit_event,
        })
    }

    /// Moves a booking to `target` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is unknown or the edge is not allowed.
    pub fn transition_status(
        &self,
        booking_id: BookingId,
        target: BookingStatus,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.transition(
            booking_id,
            BookingCommand::TransitionStatus { target },
            actor,
            cause,
        )
    }

    /// Moves a booking's payment to `target` status.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is unknown or the edge is not allowed.
    pub fn transition_payment(
        &self,
        booking_id: BookingId,
        target: PaymentStatus,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        self.transition(
            booking_id,
            BookingCommand::TransitionPayment { target },
            actor,
            cause,
        )
    }

    fn transition(
        &self,
        booking_id: BookingId,
        command: BookingCommand,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        let cell = self.booking_cell(booking_id)?;
        let mut booking = lock(&cell);

        let result: TransitionResult =
            match apply(&booking, command, actor, cause, OffsetDateTime::now_utc()) {
                Ok(result) => result,
                Err(err) => {
                    debug!(booking_id = %booking_id, error = %err, "Transition rejected");
                    return Err(err);
                }
            };

        *booking = result.booking.clone();
        let audit_event: AuditEvent = self.ledger.record(result.audit_event);
        drop(booking);

        info!(
            booking_id = %booking_id,
            action = %audit_event.action.name,
            "Booking updated"
        );
        Ok(TransitionResult {
            booking: result.booking,
            audit_event,
        })
    }

    /// Returns the open intervals of a staff member's day minus active bookings.
    ///
    /// Staff who are not active have no availability.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the staff member is unknown.
    pub fn availability(&self, staff_id: &StaffId, date: Date) -> Result<Vec<TimeInterval>, CoreError> {
        let member = self.catalog.get_staff(staff_id)?;
        if !member.is_bookable() {
            return Ok(Vec::new());
        }

        let schedule: DaySchedule = self.read_day(staff_id, date);
        let taken: Vec<TimeInterval> = schedule.bookings.iter().map(|b| b.interval).collect();
        Ok(schedule
            .open_shifts
            .iter()
            .flat_map(|shift| shift.window().subtract(&taken))
            .collect())
    }

    /// Returns a staff member's open shifts and active bookings on a date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the staff member is unknown.
    pub fn day_schedule(&self, staff_id: &StaffId, date: Date) -> Result<DaySchedule, CoreError> {
        self.catalog.get_staff(staff_id)?;
        Ok(self.read_day(staff_id, date))
    }

    fn read_day(&self, staff_id: &StaffId, date: Date) -> DaySchedule {
        let key: DayKey = DayKey::new(staff_id.clone(), date);
        let day = self.ledger.day(&key);
        let day_ids = lock(&day);
        let open_shifts: Vec<ShiftKind> = self.calendar.open_shifts(&key);
        let mut bookings: Vec<Booking> = self
            .ledger
            .snapshots(&day_ids)
            .into_iter()
            .filter(|b| b.blocks(staff_id, date))
            .collect();
        drop(day_ids);
        bookings.sort_by_key(|b| (b.interval.start(), b.id));

        DaySchedule {
            staff_id: staff_id.clone(),
            date,
            open_shifts,
            bookings,
        }
    }

    /// Returns a copy of one booking.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the booking is unknown.
    pub fn get_booking(&self, booking_id: BookingId) -> Result<Booking, CoreError> {
        self.ledger
            .snapshot(booking_id)
            .ok_or_else(|| booking_not_found(booking_id))
    }

    /// Lists bookings matching `query`, ordered by date, start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query's date range is invalid.
    pub fn list_bookings(&self, query: &BookingQuery) -> Result<Vec<Booking>, CoreError> {
        query.validate()?;
        let mut bookings: Vec<Booking> = self
            .ledger
            .all()
            .into_iter()
            .filter(|b| query.matches(b))
            .collect();
        bookings.sort_by_key(|b| (b.date, b.interval.start(), b.id));
        Ok(bookings)
    }

    /// Returns the audit events of one booking, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the booking is unknown.
    pub fn booking_history(&self, booking_id: BookingId) -> Result<Vec<AuditEvent>, CoreError> {
        self.booking_cell(booking_id)?;
        Ok(self.ledger.history(booking_id))
    }

    /// Returns every recorded audit event, oldest first.
    #[must_use]
    pub fn audit_log(&self) -> Vec<AuditEvent> {
        self.ledger.events()
    }

    fn booking_cell(&self, booking_id: BookingId) -> Result<BookingCell, CoreError> {
        self.ledger
            .get(booking_id)
            .ok_or_else(|| booking_not_found(booking_id))
    }
}

fn booking_not_found(booking_id: BookingId) -> CoreError {
    CoreError::NotFound {
        resource: "booking",
        id: booking_id.to_string(),
    }
}

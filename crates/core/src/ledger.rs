// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking ledger: the single shared mutable store of bookings.
//!
//! Locking discipline:
//!
//! - Each `(staff, date)` has a day lock guarding the ids of the bookings
//!   placed on that day. Allocation, staff assignment, and shift changes
//!   hold it for their whole check-then-write sequence.
//! - Each booking has its own lock. Status and payment transitions hold
//!   only that lock.
//! - Order is always day lock, then booking locks. A booking lock is
//!   never held while a day lock is requested.
//! - The audit log lock is a leaf and is taken last.

use bloom_audit::AuditEvent;
use bloom_domain::{Booking, BookingId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::calendar::DayKey;

/// Shared handle to one booking.
pub type BookingCell = Arc<Mutex<Booking>>;

/// Shared handle to the ids of the bookings placed on one day.
pub type DayCell = Arc<Mutex<Vec<BookingId>>>;

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Every write in this crate is a single assignment made after all
/// checks pass, so the protected value is never left half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bookings, per-day indexes, and the audit log.
#[derive(Debug)]
pub struct BookingLedger {
    bookings: DashMap<BookingId, BookingCell>,
    days: DashMap<DayKey, DayCell>,
    audit_log: Mutex<Vec<AuditEvent>>,
    next_booking: AtomicU64,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    /// Creates an empty ledger. The first booking id is `BK000001`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            days: DashMap::new(),
            audit_log: Mutex::new(Vec::new()),
            next_booking: AtomicU64::new(1),
        }
    }

    /// Reserves the next booking id.
    pub fn next_id(&self) -> BookingId {
        BookingId::new(self.next_booking.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the day cell for `key`, creating it if needed.
    pub fn day(&self, key: &DayKey) -> DayCell {
        self.days.entry(key.clone()).or_default().clone()
    }

    /// Stores a new booking.
    pub fn insert(&self, booking: Booking) {
        self.bookings
            .insert(booking.id, Arc::new(Mutex::new(booking)));
    }

    /// Returns the shared handle of a booking.
    #[must_use]
    pub fn get(&self, id: BookingId) -> Option<BookingCell> {
        self.bookings.get(&id).map(|cell| Arc::clone(cell.value()))
    }

    /// Returns a copy of a booking.
    #[must_use]
    pub fn snapshot(&self, id: BookingId) -> Option<Booking> {
        self.get(id).map(|cell| lock(&cell).clone())
    }

    /// Copies the given bookings, locking each one briefly.
    ///
    /// Unknown ids are skipped.
    #[must_use]
    pub fn snapshots(&self, ids: &[BookingId]) -> Vec<Booking> {
        ids.iter().filter_map(|id| self.snapshot(*id)).collect()
    }

    /// Copies every booking, in id order.
    #[must_use]
    pub fn all(&self) -> Vec<Booking> {
        let cells: Vec<BookingCell> = self
            .bookings
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let mut bookings: Vec<Booking> = cells.iter().map(|cell| lock(cell).clone()).collect();
        bookings.sort_by_key(|b| b.id);
        bookings
    }

    /// Appends an event to the audit log and returns it with its id.
    ///
    /// Event ids start at 1 and increase by one per event.
    pub fn record(&self, event: AuditEvent) -> AuditEvent {
        let mut log = lock(&self.audit_log);
        let event_id: u64 = log.last().and_then(|e| e.event_id).map_or(1, |id| id + 1);
        let recorded: AuditEvent = event.with_event_id(event_id);
        log.push(recorded.clone());
        recorded
    }

    /// Returns the events of one booking in the order they were recorded.
    #[must_use]
    pub fn history(&self, id: BookingId) -> Vec<AuditEvent> {
        lock(&self.audit_log)
            .iter()
            .filter(|event| event.concerns_booking(id))
            .cloned()
            .collect()
    }

    /// Returns every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        lock(&self.audit_log).clone()
    }
}

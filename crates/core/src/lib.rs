// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The booking-slot scheduling core.
//!
//! The [`Scheduler`] composes the catalog, the shift calendar, the
//! conflict checker, and the booking ledger. It guarantees that no two
//! active bookings of one staff member overlap, even when requests
//! arrive concurrently.

mod allocator;
mod apply;
mod calendar;
mod catalog;
mod command;
mod conflict;
mod error;
mod ledger;
mod query;
mod scheduler;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use allocator::{AllocationPlan, AllocationRequest, plan_allocation};
pub use apply::{apply, create_booking};
pub use calendar::{DayKey, ShiftCalendar};
pub use catalog::{Catalog, InMemoryCatalog};
pub use command::BookingCommand;
pub use conflict::{SlotConflict, check_conflict};
pub use error::{CoreError, ServiceUnavailableReason};
pub use ledger::BookingLedger;
pub use query::BookingQuery;
pub use scheduler::{DaySchedule, Scheduler, ShiftChange};
pub use state::{TransitionResult, booking_snapshot, schedule_snapshot};

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

mod booking;
mod booking_status;
mod error;
mod interval;
mod shift;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::{BookedService, Booking, Payment, total_price_and_duration};
pub use booking_status::{BookingStatus, PaymentMethod, PaymentStatus};
pub use error::DomainError;
pub use interval::{TimeInterval, format_wall_clock, minute_of_day};
pub use shift::ShiftKind;
pub use types::{
    BookingId, Category, CategoryId, CustomerId, Money, Service, ServiceId, ServiceStatus,
    StaffId, StaffMember, StaffRole, StaffStatus,
};
pub use validation::{
    MAX_QUERY_RANGE_DAYS, parse_date, parse_wall_clock, validate_date_range,
    validate_service_selection,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::{BookingStatus, PaymentMethod, PaymentStatus};
use crate::error::DomainError;
use crate::interval::TimeInterval;
use crate::types::{BookingId, CustomerId, Money, Service, ServiceId, StaffId};
use time::{Date, OffsetDateTime};

/// A service as it was when the booking was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedService {
    /// The catalog identifier.
    pub service_id: ServiceId,
    /// The service name at booking time.
    pub name: String,
    /// The duration at booking time.
    pub duration_minutes: u32,
    /// The price at booking time.
    pub price: Money,
}

impl From<&Service> for BookedService {
    fn from(service: &Service) -> Self {
        Self {
            service_id: service.id.clone(),
            name: service.name.clone(),
            duration_minutes: service.duration_minutes,
            price: service.price,
        }
    }
}

/// Payment details attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    /// Sum of the snapshotted service prices. Never recomputed.
    pub amount: Money,
    /// How the customer intends to pay.
    pub method: PaymentMethod,
    /// Where the payment is in its own lifecycle.
    pub status: PaymentStatus,
}

/// A booking of one or more services for a customer.
///
/// Bookings are never deleted; cancellation is a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// The booking identifier.
    pub id: BookingId,
    /// The customer the booking is for.
    pub customer_id: CustomerId,
    /// The assigned staff member, if any.
    pub staff_id: Option<StaffId>,
    /// The booked services in request order.
    pub services: Vec<BookedService>,
    /// The calendar date.
    pub date: Date,
    /// `[start, start + total duration)`.
    pub interval: TimeInterval,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Payment details.
    pub payment: Payment,
    /// Free-text notes from the customer.
    pub notes: Option<String>,
    /// When the booking was created.
    pub created_at: OffsetDateTime,
}

impl Booking {
    /// Returns the booked service identifiers in request order.
    #[must_use]
    pub fn service_ids(&self) -> Vec<ServiceId> {
        self.services.iter().map(|s| s.service_id.clone()).collect()
    }

    /// Returns true if the booking occupies calendar capacity.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if this is an active booking for `staff_id` on `date`.
    #[must_use]
    pub fn blocks(&self, staff_id: &StaffId, date: Date) -> bool {
        self.is_active() && self.date == date && self.staff_id.as_ref() == Some(staff_id)
    }

    /// A short description used in audit snapshots.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "booking={},status={},payment={},staff={}",
            self.id,
            self.status,
            self.payment.status,
            self.staff_id
                .as_ref()
                .map_or_else(|| String::from("unassigned"), ToString::to_string)
        )
    }
}

/// Sums the prices and durations of the given services.
///
/// # Errors
///
/// Returns `DomainError::PriceOverflow` if the total price overflows, or
/// `DomainError::DurationOverflow` if the total duration does.
pub fn total_price_and_duration(services: &[BookedService]) -> Result<(Money, u32), DomainError> {
    services
        .iter()
        .try_fold((Money::ZERO, 0_u32), |(price, minutes), service| {
            Ok((
                price.checked_add(service.price)?,
                minutes
                    .checked_add(service.duration_minutes)
                    .ok_or(DomainError::DurationOverflow)?,
            ))
        })
}

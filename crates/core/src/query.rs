// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloom_domain::{
    Booking, BookingStatus, CustomerId, DomainError, PaymentStatus, StaffId, validate_date_range,
};
use time::Date;

/// Filters for listing bookings. Every field left as `None` matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingQuery {
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
    /// Only bookings whose payment is in this status.
    pub payment_status: Option<PaymentStatus>,
    /// Only bookings assigned to this staff member.
    pub staff_id: Option<StaffId>,
    /// Only bookings for this customer.
    pub customer_id: Option<CustomerId>,
    /// Case-insensitive substring of the booking id or customer id.
    pub search: Option<String>,
    /// First date, inclusive.
    pub date_from: Option<Date>,
    /// Last date, inclusive.
    pub date_to: Option<Date>,
}

impl BookingQuery {
    /// Checks the date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `date_from` is after `date_to` or the range is
    /// longer than the allowed maximum.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            validate_date_range(from, to)?;
        }
        Ok(())
    }

    /// Returns true if `booking` passes every filter.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        if self.status.is_some_and(|s| s != booking.status) {
            return false;
        }
        if self
            .payment_status
            .is_some_and(|s| s != booking.payment.status)
        {
            return false;
        }
        if self
            .staff_id
            .as_ref()
            .is_some_and(|s| booking.staff_id.as_ref() != Some(s))
        {
            return false;
        }
        if self
            .customer_id
            .as_ref()
            .is_some_and(|c| c != &booking.customer_id)
        {
            return false;
        }
        if self.date_from.is_some_and(|from| booking.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| booking.date > to) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let needle: String = term.to_lowercase();
                booking.id.to_string().to_lowercase().contains(&needle)
                    || booking
                        .customer_id
                        .as_str()
                        .to_lowercase()
                        .contains(&needle)
            }
            _ => true,
        }
    }
}

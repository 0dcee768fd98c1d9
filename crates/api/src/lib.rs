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
    clippy::unwrap_used,
    clippy::expect_used
)]

//! API boundary for the Bloom booking platform.
//!
//! Callers pass an [`AuthenticatedActor`] and a [`Cause`](bloom_audit::Cause)
//! with every mutating request. Requests carry raw strings, responses are
//! serializable DTOs, and every failure is an [`ApiError`].

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    assign_staff, booking_history, create_booking, day_schedule, get_availability, get_booking,
    get_staff, list_bookings, list_services, set_shift, update_booking_payment,
    update_booking_status,
};
pub use request_response::{
    AssignStaffRequest, AuditEventInfo, AvailabilityResponse, BookedServiceInfo,
    BookingHistoryResponse, BookingInfo, CategoryInfo, CreateBookingRequest,
    DayScheduleResponse, IntervalInfo, ListBookingsRequest, ListBookingsResponse,
    ListServicesResponse, PaymentInfo, ServiceInfo, SetShiftRequest, SetShiftResponse,
    StaffDayRequest, StaffInfo, UpdateBookingStatusRequest, UpdatePaymentRequest,
};

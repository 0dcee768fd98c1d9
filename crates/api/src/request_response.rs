// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw strings; parsing happens at the API boundary so a
//! malformed field is reported as `InvalidInput` with the field name.
//! Dates are `YYYY-MM-DD` and wall-clock times are `HH:MM`.

use bloom::{DaySchedule, ShiftChange};
use bloom_audit::AuditEvent;
use bloom_domain::{
    BookedService, Booking, Category, Service, StaffMember, TimeInterval, format_wall_clock,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

/// API request to allocate a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookingRequest {
    /// The customer the booking is for.
    pub customer_id: String,
    /// The requested services, in order.
    pub service_ids: Vec<String>,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The requested staff member, if any.
    pub staff_id: Option<String>,
    /// `cash`, `bank_transfer`, `momo`, or `zalopay`. Defaults to `cash`.
    pub payment_method: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// API request to change a booking's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBookingStatusRequest {
    /// The booking identifier (`BK000001`).
    pub booking_id: String,
    /// The requested status.
    pub status: String,
}

/// API request to change a booking's payment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePaymentRequest {
    /// The booking identifier.
    pub booking_id: String,
    /// The requested payment status.
    pub payment_status: String,
}

/// API request to assign staff to an unassigned booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStaffRequest {
    /// The booking identifier.
    pub booking_id: String,
    /// The staff member to assign.
    pub staff_id: String,
}

/// API request to open or close a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetShiftRequest {
    /// The staff member.
    pub staff_id: String,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// `morning`, `afternoon`, or `evening`.
    pub shift: String,
    /// Whether the shift is open.
    pub open: bool,
}

/// API request naming one staff member on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDayRequest {
    /// The staff member.
    pub staff_id: String,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
}

/// API request to list bookings. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBookingsRequest {
    /// Booking status filter.
    pub status: Option<String>,
    /// Payment status filter.
    pub payment_status: Option<String>,
    /// Staff filter.
    pub staff_id: Option<String>,
    /// Customer filter.
    pub customer_id: Option<String>,
    /// Free-text search on booking id or customer id.
    pub search: Option<String>,
    /// First date, inclusive.
    pub date_from: Option<String>,
    /// Last date, inclusive.
    pub date_to: Option<String>,
}

/// A booked service in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedServiceInfo {
    /// The catalog identifier.
    pub service_id: String,
    /// The name at booking time.
    pub name: String,
    /// The duration at booking time.
    pub duration_minutes: u32,
    /// The price at booking time, in minor units.
    pub price: u64,
}

impl From<&BookedService> for BookedServiceInfo {
    fn from(service: &BookedService) -> Self {
        Self {
            service_id: service.service_id.to_string(),
            name: service.name.clone(),
            duration_minutes: service.duration_minutes,
            price: service.price.minor_units(),
        }
    }
}

/// Payment details in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Total amount in minor units.
    pub amount: u64,
    /// The payment method.
    pub method: String,
    /// The payment status.
    pub status: String,
}

/// A booking in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The booking identifier.
    pub booking_id: String,
    /// The customer.
    pub customer_id: String,
    /// The assigned staff member, if any.
    pub staff_id: Option<String>,
    /// The booked services in request order.
    pub services: Vec<BookedServiceInfo>,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The end time (`HH:MM`).
    pub end_time: String,
    /// The booking status.
    pub status: String,
    /// Payment details.
    pub payment: PaymentInfo,
    /// Customer notes.
    pub notes: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<&Booking> for BookingInfo {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.to_string(),
            customer_id: booking.customer_id.to_string(),
            staff_id: booking.staff_id.as_ref().map(ToString::to_string),
            services: booking.services.iter().map(BookedServiceInfo::from).collect(),
            date: booking.date.to_string(),
            start_time: format_wall_clock(booking.interval.start()),
            end_time: format_wall_clock(booking.interval.end()),
            status: booking.status.to_string(),
            payment: PaymentInfo {
                amount: booking.payment.amount.minor_units(),
                method: String::from(booking.payment.method.as_str()),
                status: booking.payment.status.to_string(),
            },
            notes: booking.notes.clone(),
            created_at: booking
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| booking.created_at.to_string()),
        }
    }
}

/// A half-open wall-clock interval in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalInfo {
    /// Start (`HH:MM`), inclusive.
    pub start: String,
    /// End (`HH:MM`), exclusive.
    pub end: String,
}

impl From<&TimeInterval> for IntervalInfo {
    fn from(interval: &TimeInterval) -> Self {
        Self {
            start: format_wall_clock(interval.start()),
            end: format_wall_clock(interval.end()),
        }
    }
}

/// API response listing free intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The staff member.
    pub staff_id: String,
    /// The date.
    pub date: String,
    /// Open intervals minus booked intervals, in order.
    pub intervals: Vec<IntervalInfo>,
}

/// API response for a shift change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetShiftResponse {
    /// The staff member.
    pub staff_id: String,
    /// The date.
    pub date: String,
    /// Open shifts after the change.
    pub open_shifts: Vec<String>,
    /// False if the shift was already in the requested state.
    pub changed: bool,
    /// The audit event id, if the call changed anything.
    pub event_id: Option<u64>,
}

impl From<&ShiftChange> for SetShiftResponse {
    fn from(change: &ShiftChange) -> Self {
        Self {
            staff_id: change.staff_id.to_string(),
            date: change.date.to_string(),
            open_shifts: change
                .open_shifts
                .iter()
                .map(|s| String::from(s.as_str()))
                .collect(),
            changed: change.audit_event.is_some(),
            event_id: change.audit_event.as_ref().and_then(|e| e.event_id),
        }
    }
}

/// API response for a staff member's day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayScheduleResponse {
    /// The staff member.
    pub staff_id: String,
    /// The date.
    pub date: String,
    /// Open shifts in order.
    pub open_shifts: Vec<String>,
    /// Active bookings ordered by start time.
    pub bookings: Vec<BookingInfo>,
}

impl From<&DaySchedule> for DayScheduleResponse {
    fn from(schedule: &DaySchedule) -> Self {
        Self {
            staff_id: schedule.staff_id.to_string(),
            date: schedule.date.to_string(),
            open_shifts: schedule
                .open_shifts
                .iter()
                .map(|s| String::from(s.as_str()))
                .collect(),
            bookings: schedule.bookings.iter().map(BookingInfo::from).collect(),
        }
    }
}

/// API response for a booking list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    /// Matching bookings ordered by date, start time, then id.
    pub bookings: Vec<BookingInfo>,
    /// Number of matching bookings.
    pub total: usize,
}

/// One audit event in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event id.
    pub event_id: Option<u64>,
    /// The actor id.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause id.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details, such as `pending -> confirmed`.
    pub details: Option<String>,
    /// The state before the change.
    pub before: String,
    /// The state after the change.
    pub after: String,
    /// When the change happened (RFC 3339).
    pub recorded_at: String,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            recorded_at: event
                .recorded_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| event.recorded_at.to_string()),
        }
    }
}

/// API response for a booking's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingHistoryResponse {
    /// The booking identifier.
    pub booking_id: String,
    /// Events oldest first.
    pub events: Vec<AuditEventInfo>,
}

/// A category in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// The category identifier.
    pub category_id: String,
    /// The display name.
    pub name: String,
}

impl From<&Category> for CategoryInfo {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.id.to_string(),
            name: category.name.clone(),
        }
    }
}

/// A service in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// The service identifier.
    pub service_id: String,
    /// The display name.
    pub name: String,
    /// The category.
    pub category_id: String,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Price in minor units.
    pub price: u64,
    /// `active` or `inactive`.
    pub status: String,
}

impl From<&Service> for ServiceInfo {
    fn from(service: &Service) -> Self {
        Self {
            service_id: service.id.to_string(),
            name: service.name.clone(),
            category_id: service.category.to_string(),
            duration_minutes: service.duration_minutes,
            price: service.price.minor_units(),
            status: String::from(service.status.as_str()),
        }
    }
}

/// API response for the service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServicesResponse {
    /// Every known category.
    pub categories: Vec<CategoryInfo>,
    /// Services, filtered by category when one was requested.
    pub services: Vec<ServiceInfo>,
}

/// A staff member in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    /// The staff identifier.
    pub staff_id: String,
    /// The display name.
    pub name: String,
    /// The role.
    pub role: String,
    /// Specialties.
    pub specialties: Vec<String>,
    /// The employment status.
    pub status: String,
}

impl From<&StaffMember> for StaffInfo {
    fn from(member: &StaffMember) -> Self {
        Self {
            staff_id: member.id.to_string(),
            name: member.name.clone(),
            role: String::from(member.role.as_str()),
            specialties: member.specialties.iter().cloned().collect(),
            status: String::from(member.status.as_str()),
        }
    }
}

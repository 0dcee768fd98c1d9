// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation authorizes the actor, parses its request, calls the
//! scheduler, and converts the outcome into a response DTO. Errors leave
//! through [`translate_core_error`] so core types never reach callers.

use bloom::{
    AllocationRequest, BookingQuery, Catalog, DaySchedule, Scheduler, ShiftChange,
    TransitionResult,
};
use bloom_audit::{AuditEvent, Cause};
use bloom_domain::{
    Booking, BookingId, BookingStatus, CategoryId, CustomerId, DomainError, PaymentMethod,
    PaymentStatus, Service, ServiceId, ShiftKind, StaffId, StaffMember, TimeInterval, parse_date,
    parse_wall_clock,
};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{ApiError, AuthError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AssignStaffRequest, AuditEventInfo, AvailabilityResponse, BookingHistoryResponse,
    BookingInfo, CategoryInfo, CreateBookingRequest, DayScheduleResponse, IntervalInfo,
    ListBookingsRequest, ListBookingsResponse, ListServicesResponse, ServiceInfo,
    SetShiftRequest, SetShiftResponse, StaffDayRequest, StaffInfo, UpdateBookingStatusRequest,
    UpdatePaymentRequest,
};

fn parse<T, F>(value: &str, parser: F) -> Result<T, ApiError>
where
    F: FnOnce(&str) -> Result<T, DomainError>,
{
    parser(value).map_err(translate_domain_error)
}

fn parse_optional<T, F>(value: Option<&str>, parser: F) -> Result<Option<T>, ApiError>
where
    F: FnOnce(&str) -> Result<T, DomainError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse(v, parser))
        .transpose()
}

fn reject_past_date(date: Date, today: Date) -> Result<(), ApiError> {
    if date < today {
        return Err(ApiError::ValidationError {
            rule: String::from("no_past_dates"),
            message: format!("Date {date} is in the past (today is {today})"),
        });
    }
    Ok(())
}

/// Loads a booking and runs `authorize` against its owner.
///
/// A missing booking is authorized as having no owner before `NotFound`
/// is returned, so only managers can tell missing ids from foreign ones.
fn load_authorized_booking<C, F>(
    scheduler: &Scheduler<C>,
    booking_id: BookingId,
    authorize: F,
) -> Result<Booking, ApiError>
where
    C: Catalog,
    F: FnOnce(Option<&CustomerId>) -> Result<(), AuthError>,
{
    match scheduler.get_booking(booking_id) {
        Ok(booking) => {
            authorize(Some(&booking.customer_id))?;
            Ok(booking)
        }
        Err(err) => {
            authorize(None)?;
            Err(translate_core_error(err))
        }
    }
}

/// Allocates a slot and creates a booking.
///
/// Any role may create bookings. A client always books for themselves;
/// the `customer_id` in the request is replaced by the client's id.
///
/// # Arguments
///
/// * `scheduler` - The shared scheduler
/// * `request` - The booking request
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
/// * `today` - The current date; bookings in the past are rejected
///
/// # Errors
///
/// Returns an error if:
/// - A field is malformed
/// - The date is in the past
/// - A service is missing or inactive
/// - The slot is outside working hours or double-booked
pub fn create_booking<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &CreateBookingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    today: Date,
) -> Result<BookingInfo, ApiError> {
    let customer_id: CustomerId = if authenticated_actor.role == Role::Client {
        parse(&authenticated_actor.id, CustomerId::parse)?
    } else {
        parse(&request.customer_id, CustomerId::parse)?
    };
    let service_ids: Vec<ServiceId> = request
        .service_ids
        .iter()
        .map(|id| parse(id, ServiceId::parse))
        .collect::<Result<_, _>>()?;
    let date: Date = parse(&request.date, parse_date)?;
    reject_past_date(date, today)?;

    let allocation: AllocationRequest = AllocationRequest {
        customer_id,
        service_ids,
        date,
        start_time: parse(&request.start_time, parse_wall_clock)?,
        staff_id: parse_optional(request.staff_id.as_deref(), StaffId::parse)?,
        payment_method: parse_optional(request.payment_method.as_deref(), str::parse::<PaymentMethod>)?
            .unwrap_or(PaymentMethod::Cash),
        notes: request.notes.clone(),
    };

    let booking: Booking = scheduler
        .allocate(&allocation, authenticated_actor.to_audit_actor(), cause)
        .map_err(translate_core_error)?;

    info!(
        booking_id = %booking.id,
        actor_id = %authenticated_actor.id,
        "Created booking"
    );
    Ok(BookingInfo::from(&booking))
}

/// Moves a booking through its lifecycle.
///
/// Admins and partners may request any edge. Clients may only cancel
/// their own bookings.
///
/// # Errors
///
/// Returns an error if:
/// - The booking id or status is malformed
/// - The booking does not exist
/// - The actor is not allowed to request this status
/// - The edge is not allowed from the current status
pub fn update_booking_status<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &UpdateBookingStatusRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingInfo, ApiError> {
    let booking_id: BookingId = parse(&request.booking_id, str::parse)?;
    let target: BookingStatus = parse(&request.status, str::parse)?;

    load_authorized_booking(scheduler, booking_id, |owner| {
        AuthorizationService::authorize_update_status(authenticated_actor, owner, target)
    })?;

    let result: TransitionResult = scheduler
        .transition_status(
            booking_id,
            target,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_core_error)?;

    info!(booking_id = %booking_id, status = %target, "Updated booking status");
    Ok(BookingInfo::from(&result.booking))
}

/// Moves a booking's payment through its lifecycle.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin or Partner
/// - The booking id or payment status is malformed
/// - The booking does not exist
/// - The payment edge is not allowed
pub fn update_booking_payment<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &UpdatePaymentRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_update_payment(authenticated_actor)?;
    let booking_id: BookingId = parse(&request.booking_id, str::parse)?;
    let target: PaymentStatus = parse(&request.payment_status, str::parse)?;

    let result: TransitionResult = scheduler
        .transition_payment(
            booking_id,
            target,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_core_error)?;

    info!(booking_id = %booking_id, payment_status = %target, "Updated payment status");
    Ok(BookingInfo::from(&result.booking))
}

/// Assigns a staff member to an unassigned booking.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin or Partner
/// - The booking or staff member does not exist
/// - The booking already has staff or is past the point of assignment
/// - The slot is outside the staff member's shifts or double-booked
pub fn assign_staff<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &AssignStaffRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingInfo, ApiError> {
    AuthorizationService::authorize_assign_staff(authenticated_actor)?;
    let booking_id: BookingId = parse(&request.booking_id, str::parse)?;
    let staff_id: StaffId = parse(&request.staff_id, StaffId::parse)?;

    let result: TransitionResult = scheduler
        .assign_staff(
            booking_id,
            &staff_id,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_core_error)?;

    info!(booking_id = %booking_id, staff_id = %staff_id, "Assigned staff");
    Ok(BookingInfo::from(&result.booking))
}

/// Opens or closes one shift for a staff member.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin or Partner
/// - A field is malformed or the date is in the past
/// - The staff member does not exist
/// - Closing the shift would strand an active booking
pub fn set_shift<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &SetShiftRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    today: Date,
) -> Result<SetShiftResponse, ApiError> {
    AuthorizationService::authorize_set_shift(authenticated_actor)?;
    let staff_id: StaffId = parse(&request.staff_id, StaffId::parse)?;
    let date: Date = parse(&request.date, parse_date)?;
    let shift: ShiftKind = parse(&request.shift, str::parse)?;
    reject_past_date(date, today)?;

    let change: ShiftChange = scheduler
        .set_shift(
            &staff_id,
            date,
            shift,
            request.open,
            authenticated_actor.to_audit_actor(),
            cause,
        )
        .map_err(translate_core_error)?;

    Ok(SetShiftResponse::from(&change))
}

/// Returns a staff member's free intervals on a date.
///
/// # Errors
///
/// Returns an error if a field is malformed or the staff member does not exist.
pub fn get_availability<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &StaffDayRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let staff_id: StaffId = parse(&request.staff_id, StaffId::parse)?;
    let date: Date = parse(&request.date, parse_date)?;

    let intervals: Vec<TimeInterval> = scheduler
        .availability(&staff_id, date)
        .map_err(translate_core_error)?;
    debug!(staff_id = %staff_id, %date, count = intervals.len(), "Computed availability");

    Ok(AvailabilityResponse {
        staff_id: staff_id.to_string(),
        date: date.to_string(),
        intervals: intervals.iter().map(IntervalInfo::from).collect(),
    })
}

/// Returns a staff member's open shifts and active bookings on a date.
///
/// # Errors
///
/// Returns an error if the actor is a client, a field is malformed, or
/// the staff member does not exist.
pub fn day_schedule<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &StaffDayRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DayScheduleResponse, ApiError> {
    AuthorizationService::authorize_view_schedule(authenticated_actor)?;
    let staff_id: StaffId = parse(&request.staff_id, StaffId::parse)?;
    let date: Date = parse(&request.date, parse_date)?;

    let schedule: DaySchedule = scheduler
        .day_schedule(&staff_id, date)
        .map_err(translate_core_error)?;
    Ok(DayScheduleResponse::from(&schedule))
}

/// Returns one booking.
///
/// # Errors
///
/// Returns an error if the id is malformed, the booking does not exist,
/// or a client asks for someone else's booking.
pub fn get_booking<C: Catalog>(
    scheduler: &Scheduler<C>,
    booking_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BookingInfo, ApiError> {
    let booking_id: BookingId = parse(booking_id, str::parse)?;
    let booking: Booking = load_authorized_booking(scheduler, booking_id, |owner| {
        AuthorizationService::authorize_view_booking(authenticated_actor, owner)
    })?;
    Ok(BookingInfo::from(&booking))
}

/// Lists bookings matching the request's filters.
///
/// Clients only ever see their own bookings.
///
/// # Errors
///
/// Returns an error if a filter is malformed or the date range is
/// reversed or longer than 31 days.
pub fn list_bookings<C: Catalog>(
    scheduler: &Scheduler<C>,
    request: &ListBookingsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListBookingsResponse, ApiError> {
    let customer_id: Option<CustomerId> = if authenticated_actor.role == Role::Client {
        Some(parse(&authenticated_actor.id, CustomerId::parse)?)
    } else {
        parse_optional(request.customer_id.as_deref(), CustomerId::parse)?
    };

    let query: BookingQuery = BookingQuery {
        status: parse_optional(request.status.as_deref(), str::parse)?,
        payment_status: parse_optional(request.payment_status.as_deref(), str::parse)?,
        staff_id: parse_optional(request.staff_id.as_deref(), StaffId::parse)?,
        customer_id,
        search: request.search.clone(),
        date_from: parse_optional(request.date_from.as_deref(), parse_date)?,
        date_to: parse_optional(request.date_to.as_deref(), parse_date)?,
    };

    let bookings: Vec<Booking> = scheduler
        .list_bookings(&query)
        .map_err(translate_core_error)?;

    Ok(ListBookingsResponse {
        total: bookings.len(),
        bookings: bookings.iter().map(BookingInfo::from).collect(),
    })
}

/// Returns the audit history of one booking, oldest first.
///
/// # Errors
///
/// Returns an error if the id is malformed, the booking does not exist,
/// or a client asks for someone else's booking.
pub fn booking_history<C: Catalog>(
    scheduler: &Scheduler<C>,
    booking_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<BookingHistoryResponse, ApiError> {
    let booking_id: BookingId = parse(booking_id, str::parse)?;
    let booking: Booking = load_authorized_booking(scheduler, booking_id, |owner| {
        AuthorizationService::authorize_view_booking(authenticated_actor, owner)
    })?;

    let events: Vec<AuditEvent> = scheduler
        .booking_history(booking_id)
        .map_err(translate_core_error)?;
    Ok(BookingHistoryResponse {
        booking_id: booking_id.to_string(),
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

/// Lists the catalog, optionally restricted to one category.
///
/// # Errors
///
/// Returns an error if the category id is malformed.
pub fn list_services<C: Catalog>(
    scheduler: &Scheduler<C>,
    category_id: Option<&str>,
) -> Result<ListServicesResponse, ApiError> {
    let catalog: &C = scheduler.catalog();
    let services: Vec<Service> = match parse_optional(category_id, CategoryId::parse)? {
        Some(category) => catalog.list_services_by_category(&category),
        None => catalog.list_services(),
    };

    Ok(ListServicesResponse {
        categories: catalog
            .list_categories()
            .iter()
            .map(CategoryInfo::from)
            .collect(),
        services: services.iter().map(ServiceInfo::from).collect(),
    })
}

/// Returns one staff member.
///
/// # Errors
///
/// Returns an error if the id is malformed or the staff member does not exist.
pub fn get_staff<C: Catalog>(
    scheduler: &Scheduler<C>,
    staff_id: &str,
) -> Result<StaffInfo, ApiError> {
    let staff_id: StaffId = parse(staff_id, StaffId::parse)?;
    let member: StaffMember = scheduler
        .catalog()
        .get_staff(&staff_id)
        .map_err(translate_core_error)?;
    Ok(StaffInfo::from(&member))
}

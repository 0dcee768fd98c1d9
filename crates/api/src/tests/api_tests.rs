// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{
    ApiError, AssignStaffRequest, CreateBookingRequest, ListBookingsRequest, StaffDayRequest,
    UpdateBookingStatusRequest, UpdatePaymentRequest, assign_staff, booking_history,
    create_booking, day_schedule, get_availability, get_booking, get_staff, list_bookings,
    list_services, set_shift, update_booking_payment, update_booking_status,
};

use super::helpers::{
    TEST_DATE, TODAY, booking_request, create_test_admin, create_test_booking, create_test_cause,
    create_test_scheduler, shift_request,
};

fn status_request(booking_id: &str, status: &str) -> UpdateBookingStatusRequest {
    UpdateBookingStatusRequest {
        booking_id: String::from(booking_id),
        status: String::from(status),
    }
}

fn staff_day(staff_id: &str) -> StaffDayRequest {
    StaffDayRequest {
        staff_id: String::from(staff_id),
        date: TEST_DATE.to_string(),
    }
}

#[test]
fn test_create_booking_returns_booking_info() {
    let scheduler = create_test_scheduler();

    let booking = create_test_booking(&scheduler);

    assert_eq!(booking.booking_id, "BK000001");
    assert_eq!(booking.customer_id, "CUS001");
    assert_eq!(booking.staff_id.as_deref(), Some("S1"));
    assert_eq!(booking.date, "2024-03-20");
    assert_eq!(booking.start_time, "09:00");
    assert_eq!(booking.end_time, "10:00");
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.payment.amount, 300_000);
    assert_eq!(booking.payment.method, "cash");
    assert_eq!(booking.payment.status, "unpaid");
    assert_eq!(booking.services.len(), 1);
    assert_eq!(booking.services[0].service_id, "SV60");
}

#[test]
fn test_create_booking_sums_multiple_services() {
    let scheduler = create_test_scheduler();
    let mut request: CreateBookingRequest = booking_request(&["SV30", "MK45"], "08:00", Some("S1"));
    request.payment_method = Some(String::from("momo"));
    request.notes = Some(String::from("  bridal trial  "));

    let booking = create_booking(
        &scheduler,
        &request,
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();

    assert_eq!(booking.end_time, "09:15");
    assert_eq!(booking.payment.amount, 400_000);
    assert_eq!(booking.payment.method, "momo");
    assert_eq!(booking.notes.as_deref(), Some("bridal trial"));
}

#[test]
fn test_create_booking_rejects_past_date() {
    let scheduler = create_test_scheduler();

    let result = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        date!(2024 - 03 - 21),
    );

    assert!(matches!(
        result,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "no_past_dates"
    ));
}

#[test]
fn test_create_booking_rejects_malformed_fields() {
    let scheduler = create_test_scheduler();

    let mut bad_date = booking_request(&["SV60"], "09:00", Some("S1"));
    bad_date.date = String::from("20/03/2024");
    let result = create_booking(
        &scheduler,
        &bad_date,
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));

    let bad_time = booking_request(&["SV60"], "9am", Some("S1"));
    let result = create_booking(
        &scheduler,
        &bad_time,
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "time"
    ));

    let mut bad_method = booking_request(&["SV60"], "09:00", Some("S1"));
    bad_method.payment_method = Some(String::from("cheque"));
    let result = create_booking(
        &scheduler,
        &bad_method,
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "payment_method"
    ));
}

#[test]
fn test_create_booking_rejects_empty_and_duplicate_selection() {
    let scheduler = create_test_scheduler();

    let result = create_booking(
        &scheduler,
        &booking_request(&[], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        result,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "non_empty_services"
    ));

    let result = create_booking(
        &scheduler,
        &booking_request(&["SV30", "SV30"], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        result,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "unique_services"
    ));
}

#[test]
fn test_create_booking_reports_unavailable_services() {
    let scheduler = create_test_scheduler();

    let missing = create_booking(
        &scheduler,
        &booking_request(&["NOPE"], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        missing,
        Err(ApiError::ServiceUnavailable { ref service_id, .. }) if service_id == "NOPE"
    ));

    let inactive = create_booking(
        &scheduler,
        &booking_request(&["OLD"], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        inactive,
        Err(ApiError::ServiceUnavailable { ref service_id, .. }) if service_id == "OLD"
    ));
}

#[test]
fn test_create_booking_reports_slot_conflicts() {
    let scheduler = create_test_scheduler();
    create_test_booking(&scheduler);

    let overlapping = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:30", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        overlapping,
        Err(ApiError::SlotConflict { ref kind, .. }) if kind == "double_booked"
    ));

    let late = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "11:30", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        late,
        Err(ApiError::SlotConflict { ref kind, .. }) if kind == "outside_hours"
    ));

    let on_leave = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:00", Some("S3")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        on_leave,
        Err(ApiError::SlotConflict { ref kind, .. }) if kind == "staff_unavailable"
    ));
}

#[test]
fn test_create_booking_back_to_back_is_allowed() {
    let scheduler = create_test_scheduler();
    create_test_booking(&scheduler);

    let next = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "10:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();

    assert_eq!(next.booking_id, "BK000002");
    assert_eq!(next.start_time, "10:00");
}

#[test]
fn test_create_booking_with_unknown_staff_is_not_found() {
    let scheduler = create_test_scheduler();

    let result = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:00", Some("S99")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );

    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource_type, .. }) if resource_type == "Staff"
    ));
}

#[test]
fn test_status_lifecycle_through_api() {
    let scheduler = create_test_scheduler();
    let booking = create_test_booking(&scheduler);

    let confirmed = update_booking_status(
        &scheduler,
        &status_request(&booking.booking_id, "confirmed"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(confirmed.status, "confirmed");

    let backwards = update_booking_status(
        &scheduler,
        &status_request(&booking.booking_id, "pending"),
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(matches!(backwards, Err(ApiError::InvalidTransition { .. })));

    let unknown = update_booking_status(
        &scheduler,
        &status_request(&booking.booking_id, "archived"),
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(matches!(
        unknown,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

#[test]
fn test_update_status_of_missing_booking_is_not_found() {
    let scheduler = create_test_scheduler();

    let result = update_booking_status(
        &scheduler,
        &status_request("BK000042", "confirmed"),
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource_type, .. }) if resource_type == "Booking"
    ));
}

#[test]
fn test_payment_refund_requires_finished_booking() {
    let scheduler = create_test_scheduler();
    let booking = create_test_booking(&scheduler);
    let pay = |status: &str| UpdatePaymentRequest {
        booking_id: booking.booking_id.clone(),
        payment_status: String::from(status),
    };

    let paid = update_booking_payment(
        &scheduler,
        &pay("paid"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(paid.payment.status, "paid");

    let early_refund = update_booking_payment(
        &scheduler,
        &pay("refunded"),
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(matches!(early_refund, Err(ApiError::InvalidTransition { .. })));

    update_booking_status(
        &scheduler,
        &status_request(&booking.booking_id, "cancelled"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let refunded = update_booking_payment(
        &scheduler,
        &pay("refunded"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(refunded.payment.status, "refunded");
}

#[test]
fn test_assign_staff_to_unassigned_booking() {
    let scheduler = create_test_scheduler();
    let booking = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:00", None),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();
    assert_eq!(booking.staff_id, None);
    let request = AssignStaffRequest {
        booking_id: booking.booking_id.clone(),
        staff_id: String::from("S1"),
    };

    let assigned = assign_staff(
        &scheduler,
        &request,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(assigned.staff_id.as_deref(), Some("S1"));

    let again = assign_staff(
        &scheduler,
        &request,
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(matches!(
        again,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "single_assignment"
    ));
}

#[test]
fn test_assign_staff_without_shift_is_outside_hours() {
    let scheduler = create_test_scheduler();
    let booking = create_booking(
        &scheduler,
        &booking_request(&["SV60"], "09:00", None),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();

    let result = assign_staff(
        &scheduler,
        &AssignStaffRequest {
            booking_id: booking.booking_id,
            staff_id: String::from("S2"),
        },
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::SlotConflict { ref kind, .. }) if kind == "outside_hours"
    ));
}

#[test]
fn test_set_shift_reports_changes() {
    let scheduler = create_test_scheduler();

    let opened = set_shift(
        &scheduler,
        &shift_request("S1", "afternoon", true),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();
    assert!(opened.changed);
    assert!(opened.event_id.is_some());
    assert_eq!(opened.open_shifts, vec!["morning", "afternoon"]);

    let repeated = set_shift(
        &scheduler,
        &shift_request("S1", "afternoon", true),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();
    assert!(!repeated.changed);
    assert_eq!(repeated.event_id, None);
}

#[test]
fn test_set_shift_rejects_bad_input() {
    let scheduler = create_test_scheduler();

    let past = set_shift(
        &scheduler,
        &shift_request("S1", "evening", true),
        &create_test_admin(),
        create_test_cause(),
        date!(2024 - 03 - 25),
    );
    assert!(matches!(
        past,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "no_past_dates"
    ));

    let bad_shift = set_shift(
        &scheduler,
        &shift_request("S1", "night", true),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(
        bad_shift,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "shift"
    ));

    let unknown_staff = set_shift(
        &scheduler,
        &shift_request("S99", "evening", true),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );
    assert!(matches!(unknown_staff, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_closing_shift_with_booking_is_rejected() {
    let scheduler = create_test_scheduler();
    create_test_booking(&scheduler);

    let result = set_shift(
        &scheduler,
        &shift_request("S1", "morning", false),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    );

    assert!(matches!(
        result,
        Err(ApiError::SlotConflict { ref kind, .. }) if kind == "shift_in_use"
    ));
}

#[test]
fn test_availability_subtracts_bookings() {
    let scheduler = create_test_scheduler();
    create_test_booking(&scheduler);

    let availability = get_availability(&scheduler, &staff_day("S1")).unwrap();

    assert_eq!(availability.staff_id, "S1");
    assert_eq!(availability.date, "2024-03-20");
    let spans: Vec<(&str, &str)> = availability
        .intervals
        .iter()
        .map(|i| (i.start.as_str(), i.end.as_str()))
        .collect();
    assert_eq!(spans, vec![("08:00", "09:00"), ("10:00", "12:00")]);
}

#[test]
fn test_availability_for_staff_on_leave_is_empty() {
    let scheduler = create_test_scheduler();

    let availability = get_availability(&scheduler, &staff_day("S3")).unwrap();

    assert!(availability.intervals.is_empty());
}

#[test]
fn test_day_schedule_lists_active_bookings() {
    let scheduler = create_test_scheduler();
    let booking = create_test_booking(&scheduler);

    let schedule = day_schedule(&scheduler, &staff_day("S1"), &create_test_admin()).unwrap();

    assert_eq!(schedule.open_shifts, vec!["morning"]);
    assert_eq!(schedule.bookings.len(), 1);
    assert_eq!(schedule.bookings[0].booking_id, booking.booking_id);
}

#[test]
fn test_get_booking_by_id() {
    let scheduler = create_test_scheduler();
    let booking = create_test_booking(&scheduler);

    let fetched = get_booking(&scheduler, &booking.booking_id, &create_test_admin()).unwrap();
    assert_eq!(fetched, booking);

    let malformed = get_booking(&scheduler, "booking-1", &create_test_admin());
    assert!(matches!(
        malformed,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "booking_id"
    ));
}

#[test]
fn test_list_bookings_filters() {
    let scheduler = create_test_scheduler();
    let first = create_test_booking(&scheduler);
    create_booking(
        &scheduler,
        &booking_request(&["SV30"], "10:30", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();
    update_booking_status(
        &scheduler,
        &status_request(&first.booking_id, "confirmed"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    let all = list_bookings(
        &scheduler,
        &ListBookingsRequest::default(),
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.bookings[0].start_time, "09:00");

    let confirmed = list_bookings(
        &scheduler,
        &ListBookingsRequest {
            status: Some(String::from("confirmed")),
            ..ListBookingsRequest::default()
        },
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(confirmed.total, 1);
    assert_eq!(confirmed.bookings[0].booking_id, first.booking_id);

    let searched = list_bookings(
        &scheduler,
        &ListBookingsRequest {
            search: Some(String::from("bk000002")),
            ..ListBookingsRequest::default()
        },
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(searched.total, 1);
}

#[test]
fn test_list_bookings_rejects_reversed_range() {
    let scheduler = create_test_scheduler();

    let result = list_bookings(
        &scheduler,
        &ListBookingsRequest {
            date_from: Some(String::from("2024-03-25")),
            date_to: Some(String::from("2024-03-20")),
            ..ListBookingsRequest::default()
        },
        &create_test_admin(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ValidationError { ref rule, .. }) if rule == "ordered_date_range"
    ));
}

#[test]
fn test_booking_history_in_order() {
    let scheduler = create_test_scheduler();
    let booking = create_test_booking(&scheduler);
    update_booking_status(
        &scheduler,
        &status_request(&booking.booking_id, "confirmed"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    let history = booking_history(&scheduler, &booking.booking_id, &create_test_admin()).unwrap();

    assert_eq!(history.booking_id, booking.booking_id);
    let actions: Vec<&str> = history.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["AllocateBooking", "TransitionStatus"]);
    assert_eq!(
        history.events[1].details.as_deref(),
        Some("pending -> confirmed")
    );
    assert_eq!(history.events[1].actor_id, "admin-123");
    assert_eq!(history.events[1].cause_id, "api-req-456");
}

#[test]
fn test_list_services_by_category() {
    let scheduler = create_test_scheduler();

    let everything = list_services(&scheduler, None).unwrap();
    assert_eq!(everything.categories.len(), 2);
    assert_eq!(everything.services.len(), 4);

    let makeup = list_services(&scheduler, Some("makeup")).unwrap();
    assert_eq!(makeup.services.len(), 1);
    assert_eq!(makeup.services[0].service_id, "MK45");
    assert_eq!(makeup.services[0].duration_minutes, 45);
}

#[test]
fn test_get_staff() {
    let scheduler = create_test_scheduler();

    let staff = get_staff(&scheduler, "S1").unwrap();
    assert_eq!(staff.name, "Linh");
    assert_eq!(staff.status, "active");
    assert_eq!(staff.specialties, vec!["hair"]);

    let missing = get_staff(&scheduler, "S99");
    assert!(matches!(
        missing,
        Err(ApiError::NotFound { ref resource_type, .. }) if resource_type == "Staff"
    ));
}

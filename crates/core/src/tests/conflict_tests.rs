// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DayKey, ShiftCalendar, SlotConflict, check_conflict};
use bloom_domain::{
    Booking, BookingId, BookingStatus, CustomerId, Money, Payment, PaymentMethod, PaymentStatus,
    ShiftKind, StaffId, TimeInterval,
};
use time::macros::{datetime, time};
use time::{Date, Time};

use super::helpers::TEST_DATE;

fn booking(id: u64, staff: &str, date: Date, start: Time, end: Time, status: BookingStatus) -> Booking {
    Booking {
        id: BookingId::new(id),
        customer_id: CustomerId::new("CUS001"),
        staff_id: Some(StaffId::new(staff)),
        services: Vec::new(),
        date,
        interval: TimeInterval::new(start, end).unwrap(),
        status,
        payment: Payment {
            amount: Money::ZERO,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Unpaid,
        },
        notes: None,
        created_at: datetime!(2024-03-01 0:00 UTC),
    }
}

fn morning_calendar() -> ShiftCalendar {
    let calendar = ShiftCalendar::new();
    calendar.set_shift(
        &DayKey::new(StaffId::new("S1"), TEST_DATE),
        ShiftKind::Morning,
        true,
    );
    calendar
}

#[test]
fn test_no_staff_means_no_check() {
    let calendar = ShiftCalendar::new();
    let interval = TimeInterval::new(time!(22:00), time!(23:00)).unwrap();

    assert!(check_conflict(&calendar, &Vec::<Booking>::new(), None, TEST_DATE, &interval).is_ok());
}

#[test]
fn test_lowest_overlapping_id_is_reported() {
    let calendar = morning_calendar();
    let existing = vec![
        booking(9, "S1", TEST_DATE, time!(10:00), time!(11:00), BookingStatus::Pending),
        booking(4, "S1", TEST_DATE, time!(9:30), time!(10:15), BookingStatus::Confirmed),
        booking(2, "S1", TEST_DATE, time!(8:00), time!(9:00), BookingStatus::InProgress),
    ];
    let requested = TimeInterval::new(time!(9:45), time!(10:30)).unwrap();

    let conflict = check_conflict(
        &calendar,
        &existing,
        Some(&StaffId::new("S1")),
        TEST_DATE,
        &requested,
    )
    .unwrap_err();

    assert_eq!(
        conflict,
        SlotConflict::DoubleBooked {
            existing: BookingId::new(4),
            interval: TimeInterval::new(time!(9:30), time!(10:15)).unwrap(),
        }
    );
    assert_eq!(conflict.kind(), "double_booked");
}

#[test]
fn test_inactive_and_unrelated_bookings_ignored() {
    let calendar = morning_calendar();
    let tomorrow = TEST_DATE.next_day().unwrap();
    let existing = vec![
        booking(1, "S1", TEST_DATE, time!(9:00), time!(10:00), BookingStatus::Cancelled),
        booking(2, "S1", TEST_DATE, time!(9:00), time!(10:00), BookingStatus::Completed),
        booking(3, "S2", TEST_DATE, time!(9:00), time!(10:00), BookingStatus::Pending),
        booking(4, "S1", tomorrow, time!(9:00), time!(10:00), BookingStatus::Pending),
    ];
    let requested = TimeInterval::new(time!(9:00), time!(10:00)).unwrap();

    assert!(
        check_conflict(
            &calendar,
            &existing,
            Some(&StaffId::new("S1")),
            TEST_DATE,
            &requested,
        )
        .is_ok()
    );
}

#[test]
fn test_back_to_back_is_not_overlap() {
    let calendar = morning_calendar();
    let existing = vec![booking(
        1,
        "S1",
        TEST_DATE,
        time!(9:00),
        time!(10:00),
        BookingStatus::Pending,
    )];

    for (start, end) in [(time!(8:00), time!(9:00)), (time!(10:00), time!(11:00))] {
        let requested = TimeInterval::new(start, end).unwrap();
        assert!(
            check_conflict(
                &calendar,
                &existing,
                Some(&StaffId::new("S1")),
                TEST_DATE,
                &requested,
            )
            .is_ok()
        );
    }
}

#[test]
fn test_outside_hours_checked_before_overlap() {
    let calendar = morning_calendar();
    let existing = vec![booking(
        1,
        "S1",
        TEST_DATE,
        time!(11:00),
        time!(12:00),
        BookingStatus::Pending,
    )];
    let requested = TimeInterval::new(time!(11:30), time!(12:30)).unwrap();

    let conflict = check_conflict(
        &calendar,
        &existing,
        Some(&StaffId::new("S1")),
        TEST_DATE,
        &requested,
    )
    .unwrap_err();

    assert_eq!(conflict, SlotConflict::OutsideWorkingHours { requested });
    assert_eq!(conflict.kind(), "outside_hours");
}

#[test]
fn test_no_shift_means_outside_hours() {
    let calendar = ShiftCalendar::new();
    let requested = TimeInterval::new(time!(9:00), time!(10:00)).unwrap();

    assert!(matches!(
        check_conflict(
            &calendar,
            &Vec::<Booking>::new(),
            Some(&StaffId::new("S1")),
            TEST_DATE,
            &requested,
        ),
        Err(SlotConflict::OutsideWorkingHours { .. })
    ));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bloom::{InMemoryCatalog, Scheduler};
use bloom_audit::Cause;
use bloom_domain::{
    Category, CategoryId, Money, Service, ServiceId, ServiceStatus, StaffId, StaffMember,
    StaffRole, StaffStatus,
};
use std::collections::BTreeSet;
use time::Date;
use time::macros::date;

use crate::{
    AuthenticatedActor, BookingInfo, CreateBookingRequest, Role, SetShiftRequest, create_booking,
    set_shift,
};

pub const TEST_DATE: Date = date!(2024 - 03 - 20);
pub const TODAY: Date = date!(2024 - 03 - 19);

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_partner() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("partner-7"), Role::Partner)
}

pub fn create_test_client() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("CUS001"), Role::Client)
}

pub fn create_other_client() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("CUS002"), Role::Client)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

fn service(id: &str, category: &str, minutes: u32, price: u64, status: ServiceStatus) -> Service {
    Service::new(
        ServiceId::new(id),
        &format!("Service {id}"),
        CategoryId::new(category),
        minutes,
        Money::new(price),
        status,
    )
    .unwrap()
}

fn staff(id: &str, name: &str, status: StaffStatus) -> StaffMember {
    StaffMember {
        id: StaffId::new(id),
        name: String::from(name),
        role: StaffRole::Stylist,
        specialties: BTreeSet::from([String::from("hair")]),
        status,
    }
}

/// A scheduler whose `S1` works the morning shift on [`TEST_DATE`].
///
/// `S3` is on leave. Services are `SV30`, `SV60` (hair), `MK45` (makeup)
/// and the inactive `OLD`.
pub fn create_test_scheduler() -> Scheduler<InMemoryCatalog> {
    let mut catalog: InMemoryCatalog = InMemoryCatalog::new();
    catalog.insert_category(Category {
        id: CategoryId::new("hair"),
        name: String::from("Hair"),
    });
    catalog.insert_category(Category {
        id: CategoryId::new("makeup"),
        name: String::from("Makeup"),
    });
    catalog.insert_service(service("SV30", "hair", 30, 150_000, ServiceStatus::Active));
    catalog.insert_service(service("SV60", "hair", 60, 300_000, ServiceStatus::Active));
    catalog.insert_service(service("MK45", "makeup", 45, 250_000, ServiceStatus::Active));
    catalog.insert_service(service("OLD", "hair", 30, 100_000, ServiceStatus::Inactive));
    catalog.insert_staff(staff("S1", "Linh", StaffStatus::Active));
    catalog.insert_staff(staff("S2", "Mai", StaffStatus::Active));
    catalog.insert_staff(staff("S3", "Hoa", StaffStatus::OnLeave));

    let scheduler: Scheduler<InMemoryCatalog> = Scheduler::new(catalog);
    set_shift(
        &scheduler,
        &shift_request("S1", "morning", true),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap();
    scheduler
}

pub fn shift_request(staff_id: &str, shift: &str, open: bool) -> SetShiftRequest {
    SetShiftRequest {
        staff_id: String::from(staff_id),
        date: TEST_DATE.to_string(),
        shift: String::from(shift),
        open,
    }
}

pub fn booking_request(
    services: &[&str],
    start_time: &str,
    staff_id: Option<&str>,
) -> CreateBookingRequest {
    CreateBookingRequest {
        customer_id: String::from("CUS001"),
        service_ids: services.iter().map(|s| String::from(*s)).collect(),
        date: TEST_DATE.to_string(),
        start_time: String::from(start_time),
        staff_id: staff_id.map(String::from),
        payment_method: None,
        notes: None,
    }
}

/// Books `SV60` at 09:00 with `S1` for `CUS001`.
pub fn create_test_booking(scheduler: &Scheduler<InMemoryCatalog>) -> BookingInfo {
    create_booking(
        scheduler,
        &booking_request(&["SV60"], "09:00", Some("S1")),
        &create_test_admin(),
        create_test_cause(),
        TODAY,
    )
    .unwrap()
}

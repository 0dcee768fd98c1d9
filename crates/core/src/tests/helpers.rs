// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AllocationRequest, InMemoryCatalog, Scheduler};
use bloom_audit::{Actor, Cause};
use bloom_domain::{
    Booking, Category, CategoryId, CustomerId, Money, PaymentMethod, Service, ServiceId,
    ServiceStatus, ShiftKind, StaffId, StaffMember, StaffRole, StaffStatus,
};
use std::collections::BTreeSet;
use time::macros::date;
use time::{Date, Time};

pub const TEST_DATE: Date = date!(2024 - 03 - 20);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
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

fn staff(id: &str, role: StaffRole, status: StaffStatus) -> StaffMember {
    StaffMember {
        id: StaffId::new(id),
        name: format!("Staff {id}"),
        role,
        specialties: BTreeSet::new(),
        status,
    }
}

/// Services:
/// - `SV30` 30 min, `SV60` 60 min, `SV90` 90 min, `SV120` 120 min (hair)
/// - `MK45` 45 min (makeup)
/// - `OLD` inactive
///
/// Staff: `S1`, `S2` active, `S3` on leave, `S4` inactive.
pub fn create_test_catalog() -> InMemoryCatalog {
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
    catalog.insert_service(service("SV90", "hair", 90, 450_000, ServiceStatus::Active));
    catalog.insert_service(service("SV120", "hair", 120, 600_000, ServiceStatus::Active));
    catalog.insert_service(service("MK45", "makeup", 45, 250_000, ServiceStatus::Active));
    catalog.insert_service(service("OLD", "hair", 30, 100_000, ServiceStatus::Inactive));
    catalog.insert_staff(staff("S1", StaffRole::Stylist, StaffStatus::Active));
    catalog.insert_staff(staff("S2", StaffRole::Makeup, StaffStatus::Active));
    catalog.insert_staff(staff("S3", StaffRole::Stylist, StaffStatus::OnLeave));
    catalog.insert_staff(staff("S4", StaffRole::Photographer, StaffStatus::Inactive));
    catalog
}

/// A scheduler where `S1` and `S2` work the morning shift on [`TEST_DATE`].
pub fn create_test_scheduler() -> Scheduler<InMemoryCatalog> {
    let scheduler: Scheduler<InMemoryCatalog> = Scheduler::new(create_test_catalog());
    for id in ["S1", "S2"] {
        scheduler
            .set_shift(
                &StaffId::new(id),
                TEST_DATE,
                ShiftKind::Morning,
                true,
                create_test_actor(),
                create_test_cause(),
            )
            .unwrap();
    }
    scheduler
}

pub fn request(services: &[&str], start: Time, staff_id: Option<&str>) -> AllocationRequest {
    AllocationRequest {
        customer_id: CustomerId::new("CUS001"),
        service_ids: services.iter().map(|s| ServiceId::new(s)).collect(),
        date: TEST_DATE,
        start_time: start,
        staff_id: staff_id.map(StaffId::new),
        payment_method: PaymentMethod::Cash,
        notes: None,
    }
}

pub fn allocate(
    scheduler: &Scheduler<InMemoryCatalog>,
    services: &[&str],
    start: Time,
    staff_id: Option<&str>,
) -> Booking {
    scheduler
        .allocate(
            &request(services, start, staff_id),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::Catalog;
use crate::error::{CoreError, ServiceUnavailableReason};
use bloom_domain::{
    BookedService, CustomerId, Money, PaymentMethod, Service, ServiceId, StaffId, StaffMember,
    TimeInterval, total_price_and_duration, validate_service_selection,
};
use time::{Date, Time};

/// A request to allocate a slot for a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// The customer the booking is for.
    pub customer_id: CustomerId,
    /// The requested services, in order.
    pub service_ids: Vec<ServiceId>,
    /// The calendar date.
    pub date: Date,
    /// The requested start time.
    pub start_time: Time,
    /// The requested staff member. `None` leaves the booking unassigned.
    pub staff_id: Option<StaffId>,
    /// How the customer intends to pay.
    pub payment_method: PaymentMethod,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Everything needed to create a booking, resolved against the catalog.
///
/// A plan is not yet a booking: it has no id and has not been checked
/// for conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    /// The customer the booking is for.
    pub customer_id: CustomerId,
    /// The requested staff member, verified to be active.
    pub staff_id: Option<StaffId>,
    /// The services as they are right now.
    pub services: Vec<BookedService>,
    /// The calendar date.
    pub date: Date,
    /// `[start, start + total duration)`.
    pub interval: TimeInterval,
    /// Sum of the service prices.
    pub amount: Money,
    /// How the customer intends to pay.
    pub payment_method: PaymentMethod,
    /// Notes with surrounding whitespace removed; blank notes become `None`.
    pub notes: Option<String>,
}

/// Resolves an allocation request against the catalog.
///
/// Reads only; nothing is reserved.
///
/// # Errors
///
/// Returns an error if:
/// - The service list is empty or repeats a service
/// - A service is missing from the catalog or inactive
/// - The requested staff member is unknown or not active
/// - The total duration runs past midnight
pub fn plan_allocation<C>(catalog: &C, request: &AllocationRequest) -> Result<AllocationPlan, CoreError>
where
    C: Catalog + ?Sized,
{
    validate_service_selection(&request.service_ids)?;

    let services: Vec<BookedService> = request
        .service_ids
        .iter()
        .map(|id| resolve_service(catalog, id).map(|service| BookedService::from(&service)))
        .collect::<Result<_, _>>()?;

    if let Some(staff_id) = &request.staff_id {
        resolve_staff(catalog, staff_id)?;
    }

    let (amount, minutes): (Money, u32) = total_price_and_duration(&services)?;
    let interval: TimeInterval = TimeInterval::starting_at(request.start_time, minutes)?;

    Ok(AllocationPlan {
        customer_id: request.customer_id.clone(),
        staff_id: request.staff_id.clone(),
        services,
        date: request.date,
        interval,
        amount,
        payment_method: request.payment_method,
        notes: request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from),
    })
}

fn resolve_service<C>(catalog: &C, id: &ServiceId) -> Result<Service, CoreError>
where
    C: Catalog + ?Sized,
{
    let service: Service = catalog
        .get_service(id)
        .map_err(|_| CoreError::ServiceUnavailable {
            service_id: id.clone(),
            reason: ServiceUnavailableReason::Missing,
        })?;
    if !service.is_bookable() {
        return Err(CoreError::ServiceUnavailable {
            service_id: id.clone(),
            reason: ServiceUnavailableReason::Inactive,
        });
    }
    Ok(service)
}

/// Looks up a staff member and checks they are taking bookings.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown id and
/// `CoreError::StaffUnavailable` if the member is not active.
pub(crate) fn resolve_staff<C>(catalog: &C, staff_id: &StaffId) -> Result<StaffMember, CoreError>
where
    C: Catalog + ?Sized,
{
    let member: StaffMember = catalog.get_staff(staff_id)?;
    if !member.is_bookable() {
        return Err(CoreError::StaffUnavailable {
            staff_id: staff_id.clone(),
            status: member.status,
        });
    }
    Ok(member)
}

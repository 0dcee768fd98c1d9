// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use bloom_audit::Actor;
use bloom_domain::{BookingStatus, CustomerId};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Platform operators.
    ///
    /// Admins may perform every action.
    Admin,
    /// Salon or studio partners managing their own staff.
    ///
    /// Partners may:
    /// - open and close shifts
    /// - assign staff to bookings
    /// - move bookings and payments through their lifecycles
    Partner,
    /// Customers.
    ///
    /// Clients may create bookings, view their own bookings, and cancel
    /// them. Their actor id is their customer id.
    Client,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Partner => "partner",
            Self::Client => "client",
        }
    }

    /// Returns true for roles that manage the schedule.
    #[must_use]
    pub const fn is_staff_manager(&self) -> bool {
        matches!(self, Self::Admin | Self::Partner)
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "partner" => Ok(Self::Partner),
            "client" => Ok(Self::Client),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: '{s}'. Must be 'admin', 'partner', or 'client'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(self.role.as_str()))
    }

    /// Returns true if this actor is the given customer.
    ///
    /// `None` stands for a booking that does not exist, which no client owns.
    #[must_use]
    pub fn is_customer(&self, customer_id: Option<&CustomerId>) -> bool {
        self.role == Role::Client && customer_id.is_some_and(|c| self.id == c.as_str())
    }
}

/// Stub authentication function.
///
/// Real authentication is out of scope. The caller's claimed identity
/// and role are accepted as long as they are well formed.
///
/// # Errors
///
/// Returns an error if the actor id is blank or the role is unknown.
pub fn authenticate_stub(actor_id: &str, role: &str) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    let role: Role = role.parse()?;
    Ok(AuthenticatedActor::new(actor_id.trim().to_string(), role))
}

fn require_manager(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
    if actor.role.is_staff_manager() {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: String::from(action),
            required_role: String::from("Admin or Partner"),
        })
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may open or close shifts.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Admin or Partner.
    pub fn authorize_set_shift(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_manager(actor, "set_shift")
    }

    /// Checks if an actor may assign staff to a booking.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Admin or Partner.
    pub fn authorize_assign_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_manager(actor, "assign_staff")
    }

    /// Checks if an actor may change a payment status.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Admin or Partner.
    pub fn authorize_update_payment(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_manager(actor, "update_payment")
    }

    /// Checks if an actor may view a staff member's day.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Admin or Partner.
    pub fn authorize_view_schedule(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_manager(actor, "view_schedule")
    }

    /// Checks if an actor may move a booking to `target`.
    ///
    /// Clients may only cancel, and only their own bookings. `owner` is
    /// `None` when the booking does not exist; clients are refused in
    /// that case too, so they cannot learn which ids exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a client requests anything other than
    /// cancelling one of their own bookings.
    pub fn authorize_update_status(
        actor: &AuthenticatedActor,
        owner: Option<&CustomerId>,
        target: BookingStatus,
    ) -> Result<(), AuthError> {
        if actor.role.is_staff_manager() {
            return Ok(());
        }
        if target == BookingStatus::Cancelled && actor.is_customer(owner) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: format!("update_status:{target}"),
            required_role: String::from("Admin or Partner"),
        })
    }

    /// Checks if an actor may read a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if a client asks for someone else's booking or
    /// for one that does not exist.
    pub fn authorize_view_booking(
        actor: &AuthenticatedActor,
        owner: Option<&CustomerId>,
    ) -> Result<(), AuthError> {
        if actor.role.is_staff_manager() || actor.is_customer(owner) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_booking"),
                required_role: String::from("Admin, Partner, or owning Client"),
            })
        }
    }
}

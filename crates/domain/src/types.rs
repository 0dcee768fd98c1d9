// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog reference types: identifiers, money, services, and staff.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Generates a string-backed identifier newtype.
///
/// `new` wraps the value as given; `parse` rejects empty values and
/// values containing whitespace.
macro_rules! string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier without validation.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self(value.to_string())
            }

            /// Parses and validates an identifier.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidIdentifier` if the value is empty
            /// or contains whitespace.
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                let trimmed: &str = value.trim();
                if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
                    return Err(DomainError::InvalidIdentifier {
                        kind: $kind,
                        value: value.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a service in the catalog.
    ServiceId, "service"
}

string_id! {
    /// Identifies a service category.
    CategoryId, "category"
}

string_id! {
    /// Identifies a staff member.
    StaffId, "staff"
}

string_id! {
    /// Identifies a customer. Customers live in an external directory.
    CustomerId, "customer"
}

/// Identifies a booking.
///
/// Booking ids are assigned sequentially by the ledger and render as
/// `BK000042`. Ordering follows the sequence number, which is what the
/// conflict checker uses as its tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId(u64);

impl BookingId {
    const PREFIX: &'static str = "BK";

    /// Creates a booking id from its sequence number.
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:06}", Self::PREFIX, self.0)
    }
}

impl FromStr for BookingId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| DomainError::InvalidBookingId(s.to_string()))
    }
}

impl Serialize for BookingId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookingId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An amount of money in the minor currency unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PriceOverflow` on overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(DomainError::PriceOverflow)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a service may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Offered and bookable.
    #[default]
    Active,
    /// Listed but not bookable.
    Inactive,
}

impl ServiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidServiceStatus(s.to_string())),
        }
    }
}

/// A service category (e.g. makeup, hair, photography).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category identifier.
    pub id: CategoryId,
    /// The display name.
    pub name: String,
}

/// A bookable service.
///
/// Price and duration are copied into each booking when it is created,
/// so later catalog edits never alter existing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The service identifier.
    pub id: ServiceId,
    /// The display name.
    pub name: String,
    /// The category this service belongs to.
    pub category: CategoryId,
    /// Duration in minutes. Always greater than zero.
    pub duration_minutes: u32,
    /// Price in the minor currency unit.
    pub price: Money,
    /// Whether the service may be booked.
    pub status: ServiceStatus,
}

impl Service {
    /// Creates a validated service.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the duration is zero.
    pub fn new(
        id: ServiceId,
        name: &str,
        category: CategoryId,
        duration_minutes: u32,
        price: Money,
        status: ServiceStatus,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "service name cannot be empty",
            )));
        }
        if duration_minutes == 0 {
            return Err(DomainError::InvalidDuration {
                service_id: id.to_string(),
                minutes: duration_minutes,
            });
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            category,
            duration_minutes,
            price,
            status,
        })
    }

    /// Returns true if the service can be booked.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.status == ServiceStatus::Active
    }
}

/// The kind of work a staff member does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Hair stylist.
    Stylist,
    /// Makeup artist.
    Makeup,
    /// Photographer.
    Photographer,
}

impl StaffRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stylist => "stylist",
            Self::Makeup => "makeup",
            Self::Photographer => "photographer",
        }
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stylist" => Ok(Self::Stylist),
            "makeup" => Ok(Self::Makeup),
            "photographer" => Ok(Self::Photographer),
            _ => Err(DomainError::InvalidStaffRole(s.to_string())),
        }
    }
}

/// Employment status of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    /// Working and bookable.
    #[default]
    Active,
    /// No longer working.
    Inactive,
    /// Temporarily away.
    OnLeave,
}

impl StaffStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on_leave",
        }
    }
}

impl FromStr for StaffStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "on_leave" => Ok(Self::OnLeave),
            _ => Err(DomainError::InvalidStaffStatus(s.to_string())),
        }
    }
}

/// A staff member who can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// The staff identifier.
    pub id: StaffId,
    /// The display name.
    pub name: String,
    /// The kind of work this staff member does.
    pub role: StaffRole,
    /// Service or category identifiers this staff member specializes in.
    #[serde(default)]
    pub specialties: BTreeSet<String>,
    /// Employment status.
    #[serde(default)]
    pub status: StaffStatus,
}

impl StaffMember {
    /// Returns true if the staff member can take bookings.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup data loaded from a JSON seed file.
//!
//! A seed holds the catalog (categories, services, staff) and the shifts
//! each staff member starts with:
//!
//! ```json
//! {
//!   "categories": [{ "id": "hair", "name": "Hair" }],
//!   "services": [{ "id": "SV60", "name": "Cut", "category": "hair",
//!                  "duration_minutes": 60, "price": 300000, "status": "active" }],
//!   "staff": [{ "id": "S1", "name": "Linh", "role": "stylist", "status": "active" }],
//!   "shifts": [{ "staff_id": "S1", "date": "2030-01-15", "shifts": ["morning"] }]
//! }
//! ```

use bloom::{CoreError, InMemoryCatalog, Scheduler};
use bloom_audit::{Actor, Cause};
use bloom_domain::{
    Category, CategoryId, DomainError, Service, ShiftKind, StaffId, StaffMember, parse_date,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use time::Date;
use tracing::info;

/// Errors raised while loading a seed.
#[derive(Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    Io(std::io::Error),
    /// The seed file is not valid JSON for a seed.
    Json(serde_json::Error),
    /// A seeded value breaks a domain rule.
    Domain(DomainError),
    /// A seeded shift could not be applied.
    Core(CoreError),
    /// A service names a category that is not in the seed.
    UnknownCategory {
        /// The service.
        service_id: String,
        /// The missing category.
        category_id: String,
    },
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read seed file: {err}"),
            Self::Json(err) => write!(f, "Failed to parse seed file: {err}"),
            Self::Domain(err) => write!(f, "Invalid seed data: {err}"),
            Self::Core(err) => write!(f, "Failed to apply seed: {err}"),
            Self::UnknownCategory {
                service_id,
                category_id,
            } => write!(
                f,
                "Service '{service_id}' references unknown category '{category_id}'"
            ),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<DomainError> for SeedError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<CoreError> for SeedError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

/// Shifts opened for one staff member on one date.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedShift {
    /// The staff member.
    pub staff_id: StaffId,
    /// The date (`YYYY-MM-DD`).
    pub date: String,
    /// The shifts to open.
    pub shifts: Vec<ShiftKind>,
}

/// The contents of a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    /// Service categories.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Services.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Staff members.
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    /// Initial shift assignments.
    #[serde(default)]
    pub shifts: Vec<SeedShift>,
}

impl Seed {
    /// Parses a seed from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid seed.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let text: String = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds a scheduler from this seed.
    ///
    /// Services are re-validated on load. Shifts are opened by the
    /// `system` actor.
    ///
    /// # Errors
    ///
    /// Returns an error if a service is invalid or names an unknown
    /// category, or if a shift names an unknown staff member.
    pub fn into_scheduler(self) -> Result<Scheduler<InMemoryCatalog>, SeedError> {
        let known: BTreeSet<CategoryId> = self.categories.iter().map(|c| c.id.clone()).collect();
        let mut catalog: InMemoryCatalog = InMemoryCatalog::new();

        for category in self.categories {
            catalog.insert_category(category);
        }
        for service in self.services {
            if !known.contains(&service.category) {
                return Err(SeedError::UnknownCategory {
                    service_id: service.id.to_string(),
                    category_id: service.category.to_string(),
                });
            }
            catalog.insert_service(Service::new(
                service.id,
                &service.name,
                service.category,
                service.duration_minutes,
                service.price,
                service.status,
            )?);
        }
        for member in self.staff {
            catalog.insert_staff(member);
        }

        let scheduler: Scheduler<InMemoryCatalog> = Scheduler::new(catalog);
        let mut opened: usize = 0;
        for entry in self.shifts {
            let date: Date = parse_date(&entry.date)?;
            for shift in entry.shifts {
                scheduler.set_shift(
                    &entry.staff_id,
                    date,
                    shift,
                    true,
                    Actor::new(String::from("system"), String::from("system")),
                    Cause::new(String::from("seed"), String::from("Initial shift assignment")),
                )?;
                opened += 1;
            }
        }

        info!(shifts = opened, "Loaded seed");
        Ok(scheduler)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only reference data consumed by the scheduler.

use crate::error::CoreError;
use bloom_domain::{Category, CategoryId, Service, ServiceId, StaffId, StaffMember};
use std::collections::BTreeMap;

/// Source of services, categories, and staff.
///
/// Lookups have no side effects. A missing id is reported as
/// `CoreError::NotFound`, never as a panic.
pub trait Catalog: Send + Sync {
    /// Looks up a service.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    fn get_service(&self, id: &ServiceId) -> Result<Service, CoreError>;

    /// Returns the services of one category, ordered by id.
    fn list_services_by_category(&self, category: &CategoryId) -> Vec<Service>;

    /// Returns every service, ordered by id.
    fn list_services(&self) -> Vec<Service>;

    /// Returns every category, ordered by id.
    fn list_categories(&self) -> Vec<Category>;

    /// Looks up a staff member.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    fn get_staff(&self, id: &StaffId) -> Result<StaffMember, CoreError>;
}

/// A catalog held in memory, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: BTreeMap<CategoryId, Category>,
    services: BTreeMap<ServiceId, Service>,
    staff: BTreeMap<StaffId, StaffMember>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a category.
    pub fn insert_category(&mut self, category: Category) -> Option<Category> {
        self.categories.insert(category.id.clone(), category)
    }

    /// Adds or replaces a service.
    pub fn insert_service(&mut self, service: Service) -> Option<Service> {
        self.services.insert(service.id.clone(), service)
    }

    /// Adds or replaces a staff member.
    pub fn insert_staff(&mut self, member: StaffMember) -> Option<StaffMember> {
        self.staff.insert(member.id.clone(), member)
    }
}

impl Catalog for InMemoryCatalog {
    fn get_service(&self, id: &ServiceId) -> Result<Service, CoreError> {
        self.services
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                resource: "service",
                id: id.to_string(),
            })
    }

    fn list_services_by_category(&self, category: &CategoryId) -> Vec<Service> {
        self.services
            .values()
            .filter(|s| &s.category == category)
            .cloned()
            .collect()
    }

    fn list_services(&self) -> Vec<Service> {
        self.services.values().cloned().collect()
    }

    fn list_categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    fn get_staff(&self, id: &StaffId) -> Result<StaffMember, CoreError> {
        self.staff
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                resource: "staff",
                id: id.to_string(),
            })
    }
}

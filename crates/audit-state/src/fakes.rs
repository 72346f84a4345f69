//! In-memory fakes for repository traits (testing only)
//!
//! Provides `MemoryComponentRepository`, `MemoryCollectorItemRepository`
//! and `MemoryDashboardRepository` that satisfy the trait contracts without
//! any external dependencies. Seeding goes through `insert`; `remove`
//! simulates records deleted after a component snapshot was written.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{CollectorItem, Component, Dashboard, ObjectId};
use crate::storage_traits::*;

// ---------------------------------------------------------------------------
// MemoryComponentRepository
// ---------------------------------------------------------------------------

/// In-memory component store backed by a `HashMap<id, Component>`.
#[derive(Debug, Default)]
pub struct MemoryComponentRepository {
    components: Mutex<HashMap<ObjectId, Component>>,
}

impl MemoryComponentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a component.
    pub fn insert(&self, component: Component) {
        let mut components = self.components.lock().unwrap();
        components.insert(component.id.clone(), component);
    }

    pub fn remove(&self, id: &ObjectId) -> Option<Component> {
        self.components.lock().unwrap().remove(id)
    }
}

#[async_trait]
impl ComponentRepository for MemoryComponentRepository {
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<Component>> {
        let components = self.components.lock().unwrap();
        Ok(components.get(id).cloned())
    }
}

// ---------------------------------------------------------------------------
// MemoryCollectorItemRepository
// ---------------------------------------------------------------------------

/// In-memory collector item store backed by a `HashMap<id, CollectorItem>`.
#[derive(Debug, Default)]
pub struct MemoryCollectorItemRepository {
    items: Mutex<HashMap<ObjectId, CollectorItem>>,
}

impl MemoryCollectorItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the authoritative copy of an item.
    pub fn insert(&self, item: CollectorItem) {
        let mut items = self.items.lock().unwrap();
        items.insert(item.id.clone(), item);
    }

    pub fn remove(&self, id: &ObjectId) -> Option<CollectorItem> {
        self.items.lock().unwrap().remove(id)
    }
}

#[async_trait]
impl CollectorItemRepository for MemoryCollectorItemRepository {
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<CollectorItem>> {
        let items = self.items.lock().unwrap();
        Ok(items.get(id).cloned())
    }
}

// ---------------------------------------------------------------------------
// MemoryDashboardRepository
// ---------------------------------------------------------------------------

/// In-memory dashboard store.
///
/// Dashboards are kept in insertion order so "first stored match" is
/// deterministic.
#[derive(Debug, Default)]
pub struct MemoryDashboardRepository {
    dashboards: Mutex<Vec<Dashboard>>,
}

impl MemoryDashboardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dashboard, replacing any existing one with the same id in place.
    pub fn insert(&self, dashboard: Dashboard) {
        let mut dashboards = self.dashboards.lock().unwrap();
        match dashboards.iter_mut().find(|d| d.id == dashboard.id) {
            Some(existing) => *existing = dashboard,
            None => dashboards.push(dashboard),
        }
    }

    pub fn remove(&self, id: &ObjectId) -> Option<Dashboard> {
        let mut dashboards = self.dashboards.lock().unwrap();
        let pos = dashboards.iter().position(|d| &d.id == id)?;
        Some(dashboards.remove(pos))
    }
}

#[async_trait]
impl DashboardRepository for MemoryDashboardRepository {
    async fn find_by_business_names(
        &self,
        business_service: &str,
        business_application: &str,
    ) -> StorageResult<Option<Dashboard>> {
        let dashboards = self.dashboards.lock().unwrap();
        Ok(dashboards
            .iter()
            .find(|d| {
                d.configuration_item
                    .matches(business_service, business_application)
            })
            .cloned())
    }
}

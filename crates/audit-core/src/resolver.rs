//! Collector item resolution for dashboards.
//!
//! A dashboard's collector items are found through its first widget's
//! component. The component only holds stale copies of its items, so each
//! referenced id is looked up again in the collector item store and the
//! current record is used instead.
//!
//! Resolution is total: a missing widget, component or item, and even a
//! failing repository, all degrade to fewer (or no) items. Only concrete
//! evaluators raise errors.

use std::sync::Arc;

use audit_state::{
    CollectorItem, CollectorItemRepository, CollectorType, ComponentRepository, Dashboard,
    DashboardRepository, ObjectId,
};
use futures::stream::{self, StreamExt};

use crate::obs;
use crate::settings::AuditSettings;

/// Finds the current collector items feeding a dashboard.
#[derive(Clone)]
pub struct CollectorItemResolver {
    components: Arc<dyn ComponentRepository>,
    collector_items: Arc<dyn CollectorItemRepository>,
    dashboards: Arc<dyn DashboardRepository>,
    settings: AuditSettings,
}

impl CollectorItemResolver {
    pub fn new(
        components: Arc<dyn ComponentRepository>,
        collector_items: Arc<dyn CollectorItemRepository>,
        dashboards: Arc<dyn DashboardRepository>,
    ) -> Self {
        Self {
            components,
            collector_items,
            dashboards,
            settings: AuditSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AuditSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &AuditSettings {
        &self.settings
    }

    /// Every current collector item of `collector_type` on the dashboard's
    /// primary component, in the component's attachment order.
    pub async fn find_collector_items(
        &self,
        dashboard: &Dashboard,
        collector_type: CollectorType,
    ) -> Vec<CollectorItem> {
        let items = self.resolve(dashboard, collector_type).await;
        obs::emit_collector_items_resolved(&dashboard.id, collector_type, None, items.len());
        items
    }

    /// Like [`find_collector_items`](Self::find_collector_items), keeping only
    /// items whose current `testType` option equals `test_type` exactly.
    /// Items without the option never match.
    pub async fn find_collector_items_with_test_type(
        &self,
        dashboard: &Dashboard,
        collector_type: CollectorType,
        test_type: &str,
    ) -> Vec<CollectorItem> {
        let items: Vec<CollectorItem> = self
            .resolve(dashboard, collector_type)
            .await
            .into_iter()
            .filter(|item| item.test_type() == Some(test_type))
            .collect();
        obs::emit_collector_items_resolved(
            &dashboard.id,
            collector_type,
            Some(test_type),
            items.len(),
        );
        items
    }

    /// Dashboard owned by the given business service and component names,
    /// compared case-insensitively.
    pub async fn find_dashboard(
        &self,
        business_service: &str,
        business_component: &str,
    ) -> Option<Dashboard> {
        match self
            .dashboards
            .find_by_business_names(business_service, business_component)
            .await
        {
            Ok(found) => {
                obs::emit_dashboard_lookup(business_service, business_component, found.is_some());
                found
            }
            Err(e) => {
                let key = format!("{business_service}/{business_component}");
                obs::emit_lookup_error("dashboard", &key, &e);
                None
            }
        }
    }

    // -- private helpers -----------------------------------------------------

    async fn resolve(&self, dashboard: &Dashboard, collector_type: CollectorType) -> Vec<CollectorItem> {
        let Some(component_id) = dashboard.primary_component_id() else {
            return Vec::new();
        };

        let component = match self.components.find_by_id(component_id).await {
            Ok(Some(component)) => component,
            Ok(None) => {
                obs::emit_component_missing(&dashboard.id, component_id);
                return Vec::new();
            }
            Err(e) => {
                obs::emit_lookup_error("component", component_id, &e);
                return Vec::new();
            }
        };

        // Embedded copies are stale; only their ids are used.
        let ids = component.collector_item_ids(collector_type);
        self.fetch_current(ids).await
    }

    /// Look up each id in the item store, skipping ids that no longer
    /// resolve. Output follows input order regardless of completion order.
    async fn fetch_current(&self, ids: Vec<ObjectId>) -> Vec<CollectorItem> {
        let concurrency = self.settings.item_lookup_concurrency.max(1);

        stream::iter(ids)
            .map(|id| async move {
                match self.collector_items.find_by_id(&id).await {
                    Ok(Some(item)) => Some(item),
                    Ok(None) => {
                        obs::emit_dangling_item(&id);
                        None
                    }
                    Err(e) => {
                        obs::emit_lookup_error("collector_item", &id, &e);
                        None
                    }
                }
            })
            .buffered(concurrency)
            .filter_map(futures::future::ready)
            .collect()
            .await
    }
}

impl std::fmt::Debug for CollectorItemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorItemResolver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_state::fakes::{
        MemoryCollectorItemRepository, MemoryComponentRepository, MemoryDashboardRepository,
    };
    use audit_state::{Component, ConfigurationItem, Widget};

    fn resolver_with(
        components: MemoryComponentRepository,
        items: MemoryCollectorItemRepository,
    ) -> CollectorItemResolver {
        CollectorItemResolver::new(
            Arc::new(components),
            Arc::new(items),
            Arc::new(MemoryDashboardRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_resolves_current_items_of_requested_type() {
        let components = MemoryComponentRepository::new();
        let items = MemoryCollectorItemRepository::new();

        let build = CollectorItem::new(CollectorType::Build).with_id("b1");
        let test = CollectorItem::new(CollectorType::Test).with_id("t1");
        components.insert(
            Component::new("svc")
                .with_id("c1")
                .with_collector_item(build.clone())
                .with_collector_item(test.clone()),
        );
        items.insert(build.clone().with_option("jobName", "deploy"));
        items.insert(test);

        let dashboard = Dashboard::new("d", ConfigurationItem::new("svc", "app"))
            .with_widget(Widget::new("w", ObjectId::from("c1")));

        let resolver = resolver_with(components, items);
        let found = resolver
            .find_collector_items(&dashboard, CollectorType::Build)
            .await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ObjectId::from("b1"));
        // Authoritative copy, not the embedded one
        assert_eq!(found[0].option("jobName"), Some(&serde_json::json!("deploy")));
    }

    #[tokio::test]
    async fn test_debug_omits_repositories() {
        let resolver = resolver_with(
            MemoryComponentRepository::new(),
            MemoryCollectorItemRepository::new(),
        );
        let rendered = format!("{resolver:?}");
        assert!(rendered.contains("item_lookup_concurrency"));
    }
}

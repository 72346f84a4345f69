//! Row definitions for the audit SurrealDB tables
//!
//! Tables:
//! - collector_items: authoritative collector item state
//! - components: components with their embedded collector item snapshots
//! - dashboards: dashboards with ordered widgets and owning business names
//!
//! Rows use plain strings for ids and collector types and keep options as
//! JSON; conversion to the model happens at the repository boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::StorageError;
use crate::model::{
    CollectorItem, Component, ConfigurationItem, Dashboard, ObjectId, Options, Widget,
};
use crate::storage_traits::StorageResult;

fn options_to_value(options: &Options) -> Value {
    Value::Object(options.clone())
}

fn value_to_options(value: Value) -> StorageResult<Options> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Options::new()),
        other => Err(StorageError::Serialization(format!(
            "options must be an object, got {other}"
        ))),
    }
}

fn collector_item_from_parts(
    object_id: String,
    collector_type: &str,
    options: Value,
) -> StorageResult<CollectorItem> {
    Ok(CollectorItem {
        id: ObjectId::from(object_id),
        collector_type: collector_type.parse()?,
        options: value_to_options(options)?,
    })
}

/// Row in `collector_items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorItemRow {
    /// SurrealDB record ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<surrealdb::sql::Thing>,
    pub object_id: String,
    /// Storage name of the collector type, e.g. "TEST"
    pub collector_type: String,
    #[serde(default)]
    pub options: Value,
}

impl CollectorItemRow {
    pub fn from_model(item: &CollectorItem) -> Self {
        Self {
            id: None,
            object_id: item.id.as_str().to_string(),
            collector_type: item.collector_type.as_str().to_string(),
            options: options_to_value(&item.options),
        }
    }

    pub fn into_model(self) -> StorageResult<CollectorItem> {
        collector_item_from_parts(self.object_id, &self.collector_type, self.options)
    }
}

/// Collector item copy embedded in a component row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorItemSnapshot {
    pub object_id: String,
    pub collector_type: String,
    #[serde(default)]
    pub options: Value,
}

impl CollectorItemSnapshot {
    pub fn from_model(item: &CollectorItem) -> Self {
        Self {
            object_id: item.id.as_str().to_string(),
            collector_type: item.collector_type.as_str().to_string(),
            options: options_to_value(&item.options),
        }
    }

    pub fn into_model(self) -> StorageResult<CollectorItem> {
        collector_item_from_parts(self.object_id, &self.collector_type, self.options)
    }

    /// Lenient load used for component rows. Only the id and type of an
    /// embedded copy are load-bearing: malformed options are dropped, and a
    /// copy with an unknown type is skipped.
    fn into_embedded(self, component_id: &str) -> Option<CollectorItem> {
        let collector_type = match self.collector_type.parse() {
            Ok(collector_type) => collector_type,
            Err(err) => {
                warn!(
                    component_id,
                    collector_item_id = %self.object_id,
                    error = %err,
                    "skipping embedded collector item"
                );
                return None;
            }
        };
        let options = value_to_options(self.options).unwrap_or_else(|err| {
            warn!(
                component_id,
                collector_item_id = %self.object_id,
                error = %err,
                "dropping embedded collector item options"
            );
            Options::new()
        });
        Some(CollectorItem {
            id: ObjectId::from(self.object_id),
            collector_type,
            options,
        })
    }
}

/// Row in `components`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRow {
    /// SurrealDB record ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<surrealdb::sql::Thing>,
    pub object_id: String,
    pub name: String,
    /// Embedded snapshots in attachment order (grouped by type on load)
    #[serde(default)]
    pub collector_items: Vec<CollectorItemSnapshot>,
}

impl ComponentRow {
    pub fn from_model(component: &Component) -> Self {
        Self {
            id: None,
            object_id: component.id.as_str().to_string(),
            name: component.name.clone(),
            collector_items: component
                .collector_items
                .values()
                .flatten()
                .map(CollectorItemSnapshot::from_model)
                .collect(),
        }
    }

    pub fn into_model(self) -> StorageResult<Component> {
        let mut component = Component::new(self.name).with_id(self.object_id.clone());
        for item in self
            .collector_items
            .into_iter()
            .filter_map(|snapshot| snapshot.into_embedded(&self.object_id))
        {
            component.add_collector_item(item);
        }
        Ok(component)
    }
}

/// Widget entry embedded in a dashboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetRow {
    pub name: String,
    pub component_id: String,
    #[serde(default)]
    pub options: Value,
}

/// Row in `dashboards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRow {
    /// SurrealDB record ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<surrealdb::sql::Thing>,
    pub object_id: String,
    pub title: String,
    /// Ordered widgets
    #[serde(default)]
    pub widgets: Vec<WidgetRow>,
    pub business_service: String,
    pub business_application: String,
}

impl DashboardRow {
    pub fn from_model(dashboard: &Dashboard) -> Self {
        Self {
            id: None,
            object_id: dashboard.id.as_str().to_string(),
            title: dashboard.title.clone(),
            widgets: dashboard
                .widgets
                .iter()
                .map(|w| WidgetRow {
                    name: w.name.clone(),
                    component_id: w.component_id.as_str().to_string(),
                    options: options_to_value(&w.options),
                })
                .collect(),
            business_service: dashboard.configuration_item.business_service.clone(),
            business_application: dashboard.configuration_item.business_application.clone(),
        }
    }

    pub fn into_model(self) -> StorageResult<Dashboard> {
        let widgets = self
            .widgets
            .into_iter()
            .map(|w| {
                Ok(Widget {
                    name: w.name,
                    component_id: ObjectId::from(w.component_id),
                    options: value_to_options(w.options)?,
                })
            })
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(Dashboard {
            id: ObjectId::from(self.object_id),
            title: self.title,
            widgets,
            configuration_item: ConfigurationItem::new(
                self.business_service,
                self.business_application,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectorType, TEST_TYPE_OPTION};

    #[test]
    fn component_row_flattens_snapshots_and_regroups_on_load() {
        let component = Component::new("payments")
            .with_id("c1")
            .with_collector_item(CollectorItem::new(CollectorType::Test).with_id("t1"))
            .with_collector_item(CollectorItem::new(CollectorType::Build).with_id("b1"))
            .with_collector_item(
                CollectorItem::new(CollectorType::Test)
                    .with_id("t2")
                    .with_option(TEST_TYPE_OPTION, "unit"),
            );

        let row = ComponentRow::from_model(&component);
        assert_eq!(row.collector_items.len(), 3);

        let loaded = row.into_model().unwrap();
        assert_eq!(loaded, component);
    }

    #[test]
    fn unknown_collector_type_fails_conversion() {
        let row = CollectorItemRow {
            id: None,
            object_id: "x".to_string(),
            collector_type: "NOT_A_TYPE".to_string(),
            options: Value::Null,
        };
        assert!(matches!(
            row.into_model(),
            Err(StorageError::UnknownCollectorType { .. })
        ));
    }

    #[test]
    fn non_object_options_are_rejected() {
        let snapshot = CollectorItemSnapshot {
            object_id: "x".to_string(),
            collector_type: "TEST".to_string(),
            options: serde_json::json!(["unit"]),
        };
        assert!(matches!(
            snapshot.into_model(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn malformed_embedded_copies_do_not_fail_component_load() {
        let snapshot = |object_id: &str, collector_type: &str, options: Value| {
            CollectorItemSnapshot {
                object_id: object_id.to_string(),
                collector_type: collector_type.to_string(),
                options,
            }
        };
        let row = ComponentRow {
            id: None,
            object_id: "c1".to_string(),
            name: "payments".to_string(),
            collector_items: vec![
                snapshot("t1", "TEST", serde_json::json!({ "testType": "unit" })),
                snapshot("x1", "NOT_A_TYPE", Value::Null),
                snapshot("t2", "TEST", serde_json::json!("garbage")),
                snapshot("b1", "BUILD", Value::Null),
            ],
        };

        let component = row.into_model().unwrap();
        assert_eq!(
            component.collector_item_ids(CollectorType::Test),
            vec![ObjectId::from("t1"), ObjectId::from("t2")]
        );
        assert!(component.collector_items(CollectorType::Test)[1]
            .options
            .is_empty());
        assert_eq!(
            component.collector_item_ids(CollectorType::Build),
            vec![ObjectId::from("b1")]
        );
    }

    #[test]
    fn dashboard_row_keeps_widget_order() {
        let dashboard = Dashboard::new("Payments", ConfigurationItem::new("SvcA", "CompX"))
            .with_widget(Widget::new("build", ObjectId::from("c1")))
            .with_widget(Widget::new("repo", ObjectId::from("c2")));

        let loaded = DashboardRow::from_model(&dashboard).into_model().unwrap();
        assert_eq!(loaded.widgets[0].component_id, ObjectId::from("c1"));
        assert_eq!(loaded.widgets[1].component_id, ObjectId::from("c2"));
        assert_eq!(loaded.configuration_item.business_service, "SvcA");
    }
}

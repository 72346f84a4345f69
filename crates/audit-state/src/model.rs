//! Dashboard domain model
//!
//! Entities, leaves first:
//! - `ObjectId`: opaque identifier shared by every persisted entity
//! - `CollectorItem`: one configured instance of an external collector
//! - `Component`: a named grouping of collector item references
//! - `Widget`: dashboard view bound to one component
//! - `Dashboard`: aggregate root owning an ordered list of widgets
//!
//! The collector items embedded in a `Component` are a denormalized copy
//! written when the component was last saved. Only their ids are reliable;
//! current state must be re-read from the collector item store.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

/// Option key used to tell apart collector items of the same type on one component.
pub const TEST_TYPE_OPTION: &str = "testType";

/// Open key/value options attached to collector items and widgets.
pub type Options = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// ObjectId
// ---------------------------------------------------------------------------

/// Opaque entity identifier. Equality only; carries no ordering semantics
/// beyond what is needed to key maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Mint a new random identifier
    pub fn new() -> Self {
        ObjectId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        ObjectId(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CollectorType
// ---------------------------------------------------------------------------

/// Kind of external tool a collector item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectorType {
    Scm,
    Cmdb,
    Incident,
    Build,
    Artifact,
    Deployment,
    Feature,
    ScopeOwner,
    Scope,
    CodeQuality,
    Test,
    StaticSecurityScan,
    LibraryPolicy,
    ChatOps,
    Cloud,
    Product,
    AppPerformance,
    InfraPerformance,
    Score,
    Team,
    Application,
    Log,
    AutoDiscover,
}

impl CollectorType {
    pub const ALL: [CollectorType; 23] = [
        CollectorType::Scm,
        CollectorType::Cmdb,
        CollectorType::Incident,
        CollectorType::Build,
        CollectorType::Artifact,
        CollectorType::Deployment,
        CollectorType::Feature,
        CollectorType::ScopeOwner,
        CollectorType::Scope,
        CollectorType::CodeQuality,
        CollectorType::Test,
        CollectorType::StaticSecurityScan,
        CollectorType::LibraryPolicy,
        CollectorType::ChatOps,
        CollectorType::Cloud,
        CollectorType::Product,
        CollectorType::AppPerformance,
        CollectorType::InfraPerformance,
        CollectorType::Score,
        CollectorType::Team,
        CollectorType::Application,
        CollectorType::Log,
        CollectorType::AutoDiscover,
    ];

    /// Stable storage name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectorType::Scm => "SCM",
            CollectorType::Cmdb => "CMDB",
            CollectorType::Incident => "INCIDENT",
            CollectorType::Build => "BUILD",
            CollectorType::Artifact => "ARTIFACT",
            CollectorType::Deployment => "DEPLOYMENT",
            CollectorType::Feature => "FEATURE",
            CollectorType::ScopeOwner => "SCOPE_OWNER",
            CollectorType::Scope => "SCOPE",
            CollectorType::CodeQuality => "CODE_QUALITY",
            CollectorType::Test => "TEST",
            CollectorType::StaticSecurityScan => "STATIC_SECURITY_SCAN",
            CollectorType::LibraryPolicy => "LIBRARY_POLICY",
            CollectorType::ChatOps => "CHAT_OPS",
            CollectorType::Cloud => "CLOUD",
            CollectorType::Product => "PRODUCT",
            CollectorType::AppPerformance => "APP_PERFORMANCE",
            CollectorType::InfraPerformance => "INFRA_PERFORMANCE",
            CollectorType::Score => "SCORE",
            CollectorType::Team => "TEAM",
            CollectorType::Application => "APPLICATION",
            CollectorType::Log => "LOG",
            CollectorType::AutoDiscover => "AUTO_DISCOVER",
        }
    }
}

impl FromStr for CollectorType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectorType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StorageError::UnknownCollectorType {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for CollectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CollectorItem
// ---------------------------------------------------------------------------

/// Reference to one configured collector instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorItem {
    pub id: ObjectId,
    pub collector_type: CollectorType,
    /// Collector-defined options. Opaque here except for `testType`.
    #[serde(default)]
    pub options: Options,
}

impl CollectorItem {
    pub fn new(collector_type: CollectorType) -> Self {
        Self {
            id: ObjectId::new(),
            collector_type,
            options: Options::new(),
        }
    }

    /// Use a specific identifier instead of a freshly minted one.
    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// The `testType` discriminator, when present as a string.
    pub fn test_type(&self) -> Option<&str> {
        self.option(TEST_TYPE_OPTION).and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Named grouping of collector item references, keyed by collector type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ObjectId,
    pub name: String,
    /// Snapshot copies; may be stale.
    #[serde(default)]
    pub collector_items: BTreeMap<CollectorType, Vec<CollectorItem>>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            collector_items: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a collector item under its own type, keeping insertion order.
    pub fn add_collector_item(&mut self, item: CollectorItem) {
        self.collector_items
            .entry(item.collector_type)
            .or_default()
            .push(item);
    }

    /// Builder form of [`Component::add_collector_item`].
    pub fn with_collector_item(mut self, item: CollectorItem) -> Self {
        self.add_collector_item(item);
        self
    }

    /// Embedded items of one type (empty when none are attached).
    pub fn collector_items(&self, collector_type: CollectorType) -> &[CollectorItem] {
        self.collector_items
            .get(&collector_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the embedded items of one type, in attachment order.
    pub fn collector_item_ids(&self, collector_type: CollectorType) -> Vec<ObjectId> {
        self.collector_items(collector_type)
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Widget / Dashboard
// ---------------------------------------------------------------------------

/// Dashboard-attached view bound to exactly one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub component_id: ObjectId,
    #[serde(default)]
    pub options: Options,
}

impl Widget {
    pub fn new(name: impl Into<String>, component_id: ObjectId) -> Self {
        Self {
            name: name.into(),
            component_id,
            options: Options::new(),
        }
    }
}

/// Business service / application pair that owns a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigurationItem {
    pub business_service: String,
    pub business_application: String,
}

impl ConfigurationItem {
    pub fn new(
        business_service: impl Into<String>,
        business_application: impl Into<String>,
    ) -> Self {
        Self {
            business_service: business_service.into(),
            business_application: business_application.into(),
        }
    }

    /// Case-insensitive match on both names.
    pub fn matches(&self, business_service: &str, business_application: &str) -> bool {
        self.business_service.to_lowercase() == business_service.to_lowercase()
            && self.business_application.to_lowercase() == business_application.to_lowercase()
    }
}

/// Aggregate root presenting audits for one business service/component pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: ObjectId,
    pub title: String,
    /// Ordered; the first widget carries the primary component.
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub configuration_item: ConfigurationItem,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, configuration_item: ConfigurationItem) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.into(),
            widgets: Vec::new(),
            configuration_item,
        }
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Component of the first widget. Later widgets are never consulted.
    pub fn primary_component_id(&self) -> Option<&ObjectId> {
        self.widgets.first().map(|w| &w.component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_type_round_trips_through_storage_name() {
        for t in CollectorType::ALL {
            assert_eq!(t.as_str().parse::<CollectorType>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn collector_type_parse_is_case_insensitive() {
        assert_eq!(
            "code_quality".parse::<CollectorType>().unwrap(),
            CollectorType::CodeQuality
        );
        assert!(matches!(
            "sonar".parse::<CollectorType>(),
            Err(StorageError::UnknownCollectorType { .. })
        ));
    }

    #[test]
    fn test_type_requires_string_value() {
        let item = CollectorItem::new(CollectorType::Test).with_option(TEST_TYPE_OPTION, "unit");
        assert_eq!(item.test_type(), Some("unit"));

        let numeric = CollectorItem::new(CollectorType::Test).with_option(TEST_TYPE_OPTION, 7);
        assert_eq!(numeric.test_type(), None);

        assert_eq!(CollectorItem::new(CollectorType::Test).test_type(), None);
    }

    #[test]
    fn component_keeps_attachment_order_per_type() {
        let a = CollectorItem::new(CollectorType::Test).with_id("a");
        let b = CollectorItem::new(CollectorType::Build).with_id("b");
        let c = CollectorItem::new(CollectorType::Test).with_id("c");
        let component = Component::new("svc")
            .with_collector_item(a)
            .with_collector_item(b)
            .with_collector_item(c);

        assert_eq!(
            component.collector_item_ids(CollectorType::Test),
            vec![ObjectId::from("a"), ObjectId::from("c")]
        );
        assert!(component.collector_items(CollectorType::Scm).is_empty());
    }

    #[test]
    fn primary_component_is_first_widget() {
        let dashboard = Dashboard::new("d", ConfigurationItem::new("svc", "app"))
            .with_widget(Widget::new("first", ObjectId::from("c1")))
            .with_widget(Widget::new("second", ObjectId::from("c2")));
        assert_eq!(dashboard.primary_component_id(), Some(&ObjectId::from("c1")));

        let empty = Dashboard::new("e", ConfigurationItem::default());
        assert!(empty.primary_component_id().is_none());
    }

    #[test]
    fn configuration_item_matches_ignoring_case() {
        let ci = ConfigurationItem::new("SvcA", "CompX");
        assert!(ci.matches("svca", "COMPX"));
        assert!(!ci.matches("SvcA", "CompY"));
    }

    #[test]
    fn component_serde_keys_by_collector_type_name() {
        let component = Component::new("svc")
            .with_id("c1")
            .with_collector_item(CollectorItem::new(CollectorType::CodeQuality).with_id("i1"));
        let json = serde_json::to_value(&component).unwrap();
        assert!(json["collector_items"]["CODE_QUALITY"].is_array());

        let back: Component = serde_json::from_value(json).unwrap();
        assert_eq!(back, component);
    }
}

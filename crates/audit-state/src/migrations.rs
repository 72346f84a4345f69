//! SurrealDB schema migrations and initialization
//!
//! Defines the tables read by the audit repositories, with a unique index on
//! each entity's `object_id` so point lookups stay cheap.

use crate::Result;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

/// Initialize all audit tables in SurrealDB
///
/// Safe to call multiple times (idempotent).
pub async fn init_schema(db: &Surreal<Any>) -> Result<()> {
    info!("Initializing audit SurrealDB schema");

    init_collector_items_table(db).await?;
    init_components_table(db).await?;
    init_dashboards_table(db).await?;

    info!("Audit schema initialization complete");
    Ok(())
}

/// Initialize `collector_items` table
///
/// Schema:
/// ```text
/// TABLE collector_items {
///   object_id:       STRING (unique)
///   collector_type:  STRING (indexed)
///   options:         OBJECT
/// }
/// ```
async fn init_collector_items_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing collector_items table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS collector_items SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_collector_item_id ON TABLE collector_items COLUMNS object_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_collector_item_type ON TABLE collector_items COLUMNS collector_type;
    "#;

    db.query(sql).await?.check()?;
    Ok(())
}

/// Initialize `components` table
///
/// Schema:
/// ```text
/// TABLE components {
///   object_id:        STRING (unique)
///   name:             STRING
///   collector_items:  ARRAY<OBJECT> (stale snapshots)
/// }
/// ```
async fn init_components_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing components table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS components SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_component_id ON TABLE components COLUMNS object_id UNIQUE;
    "#;

    db.query(sql).await?.check()?;
    Ok(())
}

/// Initialize `dashboards` table
///
/// Schema:
/// ```text
/// TABLE dashboards {
///   object_id:             STRING (unique)
///   title:                 STRING
///   widgets:               ARRAY<OBJECT> (ordered)
///   business_service:      STRING
///   business_application:  STRING
/// }
/// ```
async fn init_dashboards_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing dashboards table");

    let sql = r#"
        DEFINE TABLE IF NOT EXISTS dashboards SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_dashboard_id ON TABLE dashboards COLUMNS object_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_dashboard_business ON TABLE dashboards COLUMNS business_service, business_application;
    "#;

    db.query(sql).await?.check()?;
    Ok(())
}

//! SurrealDB-backed repositories
//!
//! `SurrealAuditStore` implements all three repository traits over a single
//! connection, using the rows in `schema` and converting to the model at
//! the boundary.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::{Database, Root};
use surrealdb::Surreal;
use tracing::{debug, info, instrument};

use crate::config::StoreConfig;
use crate::error::{StateError, StorageError};
use crate::migrations;
use crate::model::{CollectorItem, Component, Dashboard, ObjectId};
use crate::schema::{CollectorItemRow, ComponentRow, DashboardRow};
use crate::storage_traits::{
    CollectorItemRepository, ComponentRepository, DashboardRepository, StorageResult,
};

const COLLECTOR_ITEMS: &str = "collector_items";
const COMPONENTS: &str = "components";
const DASHBOARDS: &str = "dashboards";

/// SurrealDB-backed implementation of the audit repositories.
#[derive(Clone)]
pub struct SurrealAuditStore {
    db: Surreal<Any>,
}

impl SurrealAuditStore {
    /// Create an in-memory instance for testing.
    ///
    /// Connects to `mem://`, selects `audit/main`, and runs `init_schema`.
    pub async fn in_memory() -> crate::Result<Self> {
        let store = Self::open(
            "mem://",
            StoreConfig::DEFAULT_NAMESPACE,
            StoreConfig::DEFAULT_DATABASE,
        )
        .await?;
        info!("SurrealAuditStore connected (in-memory)");
        Ok(store)
    }

    /// Connect to a remote instance with credentials.
    #[instrument(skip(config), fields(endpoint = %config.endpoint, namespace = %config.namespace, database = %config.database))]
    pub async fn connect(config: &StoreConfig) -> crate::Result<Self> {
        let db = surrealdb::engine::any::connect(&config.endpoint)
            .await
            .map_err(|e| {
                StateError::Connection(format!("Failed to connect to {}: {}", config.endpoint, e))
            })?;

        if config.is_root {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| StateError::Connection(format!("Root auth failed: {e}")))?;
        } else {
            db.signin(Database {
                namespace: &config.namespace,
                database: &config.database,
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| StateError::Connection(format!("DB auth failed: {e}")))?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| StateError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;
        info!("SurrealAuditStore connected (remote, root={})", config.is_root);
        Ok(Self { db })
    }

    /// Create from environment variables.
    ///
    /// Tries [`StoreConfig::from_env`] first, then `AUDIT_DB_URL`, and
    /// finally falls back to local persistence under `.audit/db`.
    pub async fn from_env() -> crate::Result<Self> {
        if let Ok(config) = StoreConfig::from_env() {
            return Self::connect(&config).await;
        }

        if let Ok(url) = std::env::var("AUDIT_DB_URL") {
            let store = Self::open(
                &url,
                StoreConfig::DEFAULT_NAMESPACE,
                StoreConfig::DEFAULT_DATABASE,
            )
            .await?;
            info!("SurrealAuditStore connected ({})", url);
            return Ok(store);
        }

        let path = ".audit/db";
        std::fs::create_dir_all(path).map_err(|e| {
            StateError::Connection(format!(
                "Failed to create database directory {}: {}",
                path, e
            ))
        })?;
        let url = format!("surrealkv://{}", path);
        info!(
            "No store config or AUDIT_DB_URL found, using local persistence: {}",
            url
        );
        Self::open(
            &url,
            StoreConfig::DEFAULT_NAMESPACE,
            StoreConfig::DEFAULT_DATABASE,
        )
        .await
    }

    async fn open(url: &str, namespace: &str, database: &str) -> crate::Result<Self> {
        let db = surrealdb::engine::any::connect(url)
            .await
            .map_err(|e| StateError::Connection(format!("Failed to connect to {}: {}", url, e)))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| StateError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;
        Ok(Self { db })
    }

    // -- writes ---------------------------------------------------------------

    /// Store the authoritative state of a collector item, replacing any
    /// previous row with the same id.
    pub async fn save_collector_item(&self, item: &CollectorItem) -> StorageResult<()> {
        debug!(id = %item.id, collector_type = %item.collector_type, "saving collector item");
        self.replace_row(COLLECTOR_ITEMS, &item.id, CollectorItemRow::from_model(item))
            .await
    }

    /// Store a component together with its embedded collector item snapshots.
    pub async fn save_component(&self, component: &Component) -> StorageResult<()> {
        debug!(id = %component.id, "saving component");
        self.replace_row(COMPONENTS, &component.id, ComponentRow::from_model(component))
            .await
    }

    pub async fn save_dashboard(&self, dashboard: &Dashboard) -> StorageResult<()> {
        debug!(id = %dashboard.id, "saving dashboard");
        self.replace_row(DASHBOARDS, &dashboard.id, DashboardRow::from_model(dashboard))
            .await
    }

    /// Remove a collector item row. No-op if absent.
    pub async fn delete_collector_item(&self, id: &ObjectId) -> StorageResult<()> {
        self.db
            .query("DELETE collector_items WHERE object_id = $oid")
            .bind(("oid", id.as_str().to_string()))
            .await?
            .check()?;
        Ok(())
    }

    // -- private helpers -----------------------------------------------------

    async fn replace_row<R>(&self, table: &'static str, id: &ObjectId, row: R) -> StorageResult<()>
    where
        R: Serialize + Send + 'static,
    {
        let sql = format!(
            "BEGIN TRANSACTION; \
             DELETE {table} WHERE object_id = $oid; \
             CREATE {table} CONTENT $row; \
             COMMIT TRANSACTION;"
        );
        self.db
            .query(sql)
            .bind(("oid", id.as_str().to_string()))
            .bind(("row", row))
            .await?
            .check()?;
        Ok(())
    }

    /// Fetch the single row with `object_id = id`, if any.
    async fn fetch_row<R>(&self, table: &'static str, id: &ObjectId) -> StorageResult<Option<R>>
    where
        R: DeserializeOwned,
    {
        let mut res = self
            .db
            .query(format!("SELECT * FROM {table} WHERE object_id = $oid"))
            .bind(("oid", id.as_str().to_string()))
            .await?;

        let mut rows: Vec<R> = res.take(0)?;
        if rows.len() > 1 {
            return Err(StorageError::Duplicate {
                kind: table,
                id: id.to_string(),
            });
        }
        Ok(rows.pop())
    }
}

#[async_trait]
impl ComponentRepository for SurrealAuditStore {
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<Component>> {
        self.fetch_row::<ComponentRow>(COMPONENTS, id)
            .await?
            .map(ComponentRow::into_model)
            .transpose()
    }
}

#[async_trait]
impl CollectorItemRepository for SurrealAuditStore {
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<CollectorItem>> {
        self.fetch_row::<CollectorItemRow>(COLLECTOR_ITEMS, id)
            .await?
            .map(CollectorItemRow::into_model)
            .transpose()
    }
}

#[async_trait]
impl DashboardRepository for SurrealAuditStore {
    async fn find_by_business_names(
        &self,
        business_service: &str,
        business_application: &str,
    ) -> StorageResult<Option<Dashboard>> {
        let mut res = self
            .db
            .query(
                "SELECT * FROM dashboards \
                 WHERE string::lowercase(business_service) = $svc \
                 AND string::lowercase(business_application) = $app \
                 LIMIT 1",
            )
            .bind(("svc", business_service.to_lowercase()))
            .bind(("app", business_application.to_lowercase()))
            .await?;

        let rows: Vec<DashboardRow> = res.take(0)?;
        rows.into_iter()
            .next()
            .map(DashboardRow::into_model)
            .transpose()
    }
}

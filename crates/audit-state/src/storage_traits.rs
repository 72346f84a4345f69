//! Repository trait definitions
//!
//! Read-side lookups the audit evaluators depend on:
//! - `ComponentRepository`: component by id
//! - `CollectorItemRepository`: authoritative collector item by id
//! - `DashboardRepository`: dashboard by owning business names
//!
//! All traits are async and backend-agnostic. Absence is `Ok(None)`, never
//! an error. In-memory fakes live in the `fakes` module.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::model::{CollectorItem, Component, Dashboard, ObjectId};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Component store.
#[async_trait]
pub trait ComponentRepository: Send + Sync {
    /// Point lookup by id.
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<Component>>;
}

/// Collector item store; the source of truth for item options.
#[async_trait]
pub trait CollectorItemRepository: Send + Sync {
    /// Point lookup by id. Must stay cheap: it is called once per
    /// referenced item during resolution.
    async fn find_by_id(&self, id: &ObjectId) -> StorageResult<Option<CollectorItem>>;
}

/// Dashboard store.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Find the dashboard owned by a business service / application pair.
    ///
    /// Both names compare case-insensitively. When several dashboards
    /// match, which one is returned is backend-defined (the in-memory fake
    /// returns the first inserted).
    async fn find_by_business_names(
        &self,
        business_service: &str,
        business_application: &str,
    ) -> StorageResult<Option<Dashboard>>;
}

//! Audit-State: dashboard model and storage for audit evaluation
//!
//! This crate provides the persistence layer the audit evaluators read from:
//! dashboards, their components, and the collector items those components
//! reference.
//!
//! ## Layer 0 - Data/Persistence
//!
//! Focus: read lookups by identifier or business names. Nothing here
//! interprets collector options beyond the `testType` discriminator.
//!
//! ## Key Components
//!
//! - `model`: `Dashboard`, `Widget`, `Component`, `CollectorItem`, `ObjectId`
//! - `storage_traits`: backend-agnostic repository traits
//! - `fakes`: in-memory repositories for tests
//! - `SurrealAuditStore`: SurrealDB implementation of every repository

mod config;
mod error;
pub mod fakes;
pub mod migrations;
pub mod model;
pub mod schema;
pub mod storage_traits;
pub mod surreal_repository;

pub use config::StoreConfig;
pub use error::{StateError, StorageError};
pub use model::{
    CollectorItem, CollectorType, Component, ConfigurationItem, Dashboard, ObjectId, Options,
    Widget, TEST_TYPE_OPTION,
};
pub use storage_traits::{
    CollectorItemRepository, ComponentRepository, DashboardRepository, StorageResult,
};
pub use surreal_repository::SurrealAuditStore;

/// Result type for connection and schema setup
pub type Result<T> = std::result::Result<T, StateError>;

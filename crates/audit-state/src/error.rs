//! Error types for audit-state

use thiserror::Error;

/// Errors raised while connecting to or preparing the backing database
#[derive(Error, Debug)]
pub enum StateError {
    /// Database connection error
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Database query error
    #[error("Database query failed: {0}")]
    Query(String),

    /// Missing or malformed store configuration
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl From<surrealdb::Error> for StateError {
    fn from(err: surrealdb::Error) -> Self {
        StateError::Query(err.to_string())
    }
}

/// Errors returned by repository lookups and saves.
///
/// "Not found" is never an error here; lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend failure (connection dropped, query rejected, ...)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored row could not be converted to or from the model
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A stored collector type name is not part of the known set
    #[error("unknown collector type: {value}")]
    UnknownCollectorType { value: String },

    /// More than one row claims the same identifier
    #[error("duplicate {kind} record: {id}")]
    Duplicate { kind: &'static str, id: String },
}

impl From<surrealdb::Error> for StorageError {
    fn from(err: surrealdb::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_collector_type_names_value() {
        let err = StorageError::UnknownCollectorType {
            value: "SONAR".to_string(),
        };
        assert!(err.to_string().contains("SONAR"));
    }

    #[test]
    fn duplicate_names_kind_and_id() {
        let err = StorageError::Duplicate {
            kind: "component",
            id: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("component"));
        assert!(msg.contains("abc"));
    }
}

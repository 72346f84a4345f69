//! Store connection configuration

use crate::error::StateError;

/// Connection settings for a remote SurrealDB instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// WebSocket endpoint URL (e.g., "wss://db.example.com")
    pub endpoint: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// Namespace (default: "audit")
    pub namespace: String,
    /// Database name (default: "main")
    pub database: String,
    /// Whether this is a root user (true) or database user (false)
    pub is_root: bool,
}

impl StoreConfig {
    pub const DEFAULT_NAMESPACE: &'static str = "audit";
    pub const DEFAULT_DATABASE: &'static str = "main";

    /// Create a configuration for a database user
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            database: Self::DEFAULT_DATABASE.to_string(),
            is_root: false,
        }
    }

    /// Set custom namespace
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// Set custom database
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }

    /// Set whether this is a root user
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - AUDIT_DB_ENDPOINT (required)
    /// - AUDIT_DB_USERNAME (required)
    /// - AUDIT_DB_PASSWORD (required)
    /// - AUDIT_DB_NAMESPACE (optional, default: "audit")
    /// - AUDIT_DB_DATABASE (optional, default: "main")
    /// - AUDIT_DB_ROOT (optional, default: "false")
    pub fn from_env() -> Result<Self, StateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| StateError::Config(format!("{key} not set")))
        };

        let endpoint = required("AUDIT_DB_ENDPOINT")?;
        let username = required("AUDIT_DB_USERNAME")?;
        let password = required("AUDIT_DB_PASSWORD")?;
        let namespace =
            lookup("AUDIT_DB_NAMESPACE").unwrap_or_else(|| Self::DEFAULT_NAMESPACE.to_string());
        let database =
            lookup("AUDIT_DB_DATABASE").unwrap_or_else(|| Self::DEFAULT_DATABASE.to_string());
        let is_root = lookup("AUDIT_DB_ROOT")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            endpoint,
            username,
            password,
            namespace,
            database,
            is_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_applies_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("AUDIT_DB_ENDPOINT", "ws://localhost:8000"),
            ("AUDIT_DB_USERNAME", "reader"),
            ("AUDIT_DB_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.namespace, "audit");
        assert_eq!(config.database, "main");
        assert!(!config.is_root);
    }

    #[test]
    fn from_lookup_requires_endpoint() {
        let err = StoreConfig::from_lookup(lookup_from(&[
            ("AUDIT_DB_USERNAME", "reader"),
            ("AUDIT_DB_PASSWORD", "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AUDIT_DB_ENDPOINT"));
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("AUDIT_DB_ENDPOINT", "ws://localhost:8000"),
            ("AUDIT_DB_USERNAME", "root"),
            ("AUDIT_DB_PASSWORD", "root"),
            ("AUDIT_DB_NAMESPACE", "hygiene"),
            ("AUDIT_DB_DATABASE", "prod"),
            ("AUDIT_DB_ROOT", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.namespace, "hygiene");
        assert_eq!(config.database, "prod");
        assert!(config.is_root);
    }

    #[test]
    fn builder_overrides() {
        let config = StoreConfig::new("ws://db", "u", "p")
            .with_namespace("ns")
            .with_database("db")
            .with_root(true);
        assert_eq!(config.namespace, "ns");
        assert_eq!(config.database, "db");
        assert!(config.is_root);
    }
}

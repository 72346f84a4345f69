//! Runtime settings for audit evaluation.

use std::str::FromStr;

use tracing::{warn, Level};

/// Settings shared by the resolver and evaluator hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSettings {
    /// Maximum collector item lookups in flight while resolving one request.
    pub item_lookup_concurrency: usize,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            item_lookup_concurrency: 8,
            log_json: false,
            log_level: "info".to_string(),
        }
    }
}

impl AuditSettings {
    /// Read settings from the environment.
    ///
    /// - AUDIT_ITEM_LOOKUP_CONCURRENCY (positive integer, default: 8)
    /// - AUDIT_LOG_FORMAT ("json" for JSON lines)
    /// - AUDIT_LOG (trace | debug | info | warn | error, default: info)
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AuditSettings::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup("AUDIT_ITEM_LOOKUP_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => settings.item_lookup_concurrency = n,
                _ => warn!(
                    value = %raw,
                    "ignoring invalid AUDIT_ITEM_LOOKUP_CONCURRENCY"
                ),
            }
        }

        if let Some(format) = lookup("AUDIT_LOG_FORMAT") {
            settings.log_json = format.eq_ignore_ascii_case("json");
        }

        if let Some(level) = lookup("AUDIT_LOG") {
            if Level::from_str(level.trim()).is_ok() {
                settings.log_level = level.trim().to_ascii_lowercase();
            } else {
                warn!(value = %level, "ignoring invalid AUDIT_LOG level");
            }
        }

        settings
    }

    pub fn with_item_lookup_concurrency(mut self, n: usize) -> Self {
        self.item_lookup_concurrency = n.max(1);
        self
    }

    /// Parsed log level, `INFO` if the stored string is not a level.
    pub fn tracing_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }
}

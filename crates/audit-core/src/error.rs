//! Error taxonomy for audit evaluation.
//!
//! Resolution never fails; these errors are raised only by concrete
//! evaluators.

use audit_state::{CollectorType, StorageError};

/// The inputs or resolved data cannot support a meaningful audit result.
///
/// Callers usually record the audit as skipped and carry on with the rest
/// of the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("no {collector_type} collector items configured")]
    NoCollectorItems { collector_type: CollectorType },

    #[error("no dashboard for business service {business_service:?} and component {business_component:?}")]
    DashboardNotFound {
        business_service: String,
        business_component: String,
    },

    #[error("missing audit data: {0}")]
    MissingData(String),

    #[error("invalid audit data: {0}")]
    InvalidData(String),

    #[error("invalid evaluation window: begin {begin} is after end {end}")]
    InvalidWindow { begin: i64, end: i64 },
}

/// A collector's backing system could not be reached or its data parsed.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("{source_name} unreachable: {reason}")]
    Unreachable { source_name: String, reason: String },

    #[error("failed to parse {source_name} response: {reason}")]
    Parse { source_name: String, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntegrationError {
    /// Transient failures worth retrying. Parse failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            IntegrationError::Unreachable { .. } | IntegrationError::Storage(_)
        )
    }
}

/// Failure of a single-item evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

impl EvaluationError {
    pub fn is_retryable(&self) -> bool {
        match self {
            EvaluationError::Audit(_) => false,
            EvaluationError::Integration(e) => e.is_retryable(),
        }
    }
}

/// Result type for single-item evaluation.
pub type Result<T> = std::result::Result<T, EvaluationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_collector_items_names_type() {
        let err = AuditError::NoCollectorItems {
            collector_type: CollectorType::CodeQuality,
        };
        assert!(err.to_string().contains("CODE_QUALITY"));
    }

    #[test]
    fn test_invalid_window_display() {
        let err = AuditError::InvalidWindow { begin: 20, end: 10 };
        let msg = err.to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_retryable_classification() {
        let unreachable: EvaluationError = IntegrationError::Unreachable {
            source_name: "jenkins".to_string(),
            reason: "connection refused".to_string(),
        }
        .into();
        assert!(unreachable.is_retryable());

        let parse: EvaluationError = IntegrationError::Parse {
            source_name: "sonar".to_string(),
            reason: "unexpected token".to_string(),
        }
        .into();
        assert!(!parse.is_retryable());

        let storage: EvaluationError =
            IntegrationError::from(StorageError::Backend("timeout".to_string())).into();
        assert!(storage.is_retryable());

        let audit: EvaluationError = AuditError::MissingData("no runs".to_string()).into();
        assert!(!audit.is_retryable());
    }

    #[test]
    fn test_evaluation_error_is_transparent() {
        let err: EvaluationError = AuditError::InvalidData("bad".to_string()).into();
        assert_eq!(err.to_string(), "invalid audit data: bad");
    }
}

//! Audit Core Library
//!
//! Shared machinery for dashboard audit evaluators: the [`Evaluator`]
//! contract, collector item resolution, and the error kinds evaluators
//! report.

pub mod error;
pub mod evaluator;
pub mod obs;
pub mod resolver;
pub mod settings;
pub mod telemetry;

pub use error::{AuditError, EvaluationError, IntegrationError};
pub use evaluator::{EvaluationData, EvaluationWindow, Evaluator};
pub use resolver::CollectorItemResolver;
pub use settings::AuditSettings;
pub use telemetry::{init_from_settings, init_tracing};

pub use audit_state::{
    CollectorItem, CollectorType, Component, ConfigurationItem, Dashboard, ObjectId, Widget,
    TEST_TYPE_OPTION,
};

//! Evaluator contract shared by every audit.
//!
//! A concrete evaluator picks its audit result type, computes results for a
//! whole dashboard or a single collector item over a time window, and gets
//! collector item discovery for free through its [`CollectorItemResolver`].
//! Selecting which evaluator runs for a request is left to the caller.

use async_trait::async_trait;
use audit_state::{CollectorItem, CollectorType, Dashboard};

use crate::error::{AuditError, EvaluationError};
use crate::resolver::CollectorItemResolver;

/// Open, untyped auxiliary data passed through to evaluators.
pub type EvaluationData = serde_json::Map<String, serde_json::Value>;

/// Audit evaluator producing results of type `Self::Audit`.
///
/// `begin_date` and `end_date` are inclusive epoch-millisecond bounds. They
/// are passed through untouched; evaluators that care about ordering can
/// check them with [`EvaluationWindow::new`].
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Result produced by this evaluator.
    type Audit: Send;

    /// Resolver backing the provided lookup helpers.
    fn resolver(&self) -> &CollectorItemResolver;

    /// Evaluate every relevant collector item of a dashboard.
    async fn evaluate_dashboard(
        &self,
        dashboard: &Dashboard,
        begin_date: i64,
        end_date: i64,
        data: &EvaluationData,
    ) -> Result<Vec<Self::Audit>, AuditError>;

    /// Evaluate one collector item directly, bypassing dashboard resolution.
    async fn evaluate_item(
        &self,
        collector_item: &CollectorItem,
        begin_date: i64,
        end_date: i64,
        data: &EvaluationData,
    ) -> Result<Self::Audit, EvaluationError>;

    /// See [`CollectorItemResolver::find_collector_items`].
    async fn find_collector_items(
        &self,
        dashboard: &Dashboard,
        collector_type: CollectorType,
    ) -> Vec<CollectorItem> {
        self.resolver()
            .find_collector_items(dashboard, collector_type)
            .await
    }

    /// See [`CollectorItemResolver::find_collector_items_with_test_type`].
    async fn find_collector_items_with_test_type(
        &self,
        dashboard: &Dashboard,
        collector_type: CollectorType,
        test_type: &str,
    ) -> Vec<CollectorItem> {
        self.resolver()
            .find_collector_items_with_test_type(dashboard, collector_type, test_type)
            .await
    }

    /// See [`CollectorItemResolver::find_dashboard`].
    async fn find_dashboard(
        &self,
        business_service: &str,
        business_component: &str,
    ) -> Option<Dashboard> {
        self.resolver()
            .find_dashboard(business_service, business_component)
            .await
    }
}

/// Validated, inclusive `[begin, end]` range in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationWindow {
    begin: i64,
    end: i64,
}

impl EvaluationWindow {
    pub fn new(begin: i64, end: i64) -> Result<Self, AuditError> {
        if begin > end {
            return Err(AuditError::InvalidWindow { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> i64 {
        self.begin
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        (self.begin..=self.end).contains(&timestamp)
    }

    /// Width of the window; `new` guarantees `end >= begin`.
    pub fn duration_ms(&self) -> u64 {
        self.end.abs_diff(self.begin)
    }
}

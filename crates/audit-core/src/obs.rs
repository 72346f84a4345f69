//! Structured observability hooks for collector item resolution and
//! evaluation.
//!
//! This module provides:
//! - An evaluation-scoped tracing span via the `EvaluationSpan` RAII guard
//! - Emission functions for resolver outcomes
//!
//! Resolution outcomes are emitted at `debug!`; lookup failures, which the
//! resolver swallows, at `warn!`.

use std::fmt::Display;

use audit_state::{CollectorType, ObjectId};
use tracing::{debug, warn};

/// RAII guard that enters a dashboard-scoped span for one evaluation.
///
/// # Example
///
/// ```no_run
/// # use audit_core::obs::EvaluationSpan;
/// # use audit_core::{ConfigurationItem, Dashboard};
/// let dashboard = Dashboard::new("Payments", ConfigurationItem::new("SvcA", "CompX"));
/// let _span = EvaluationSpan::enter(&dashboard.id, "test-results");
/// // resolver events below carry dashboard_id and evaluator
/// ```
pub struct EvaluationSpan {
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    pub fn enter(dashboard_id: &ObjectId, evaluator: &str) -> Self {
        let span = tracing::info_span!(
            "audit.evaluation",
            dashboard_id = %dashboard_id,
            evaluator = %evaluator,
        );
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: collector items resolved for a dashboard.
pub fn emit_collector_items_resolved(
    dashboard_id: &ObjectId,
    collector_type: CollectorType,
    test_type: Option<&str>,
    resolved: usize,
) {
    debug!(
        event = "resolver.items_resolved",
        dashboard_id = %dashboard_id,
        collector_type = %collector_type,
        test_type = test_type.unwrap_or(""),
        resolved = resolved,
    );
}

/// Emit event: the dashboard's primary component does not exist.
pub fn emit_component_missing(dashboard_id: &ObjectId, component_id: &ObjectId) {
    debug!(
        event = "resolver.component_missing",
        dashboard_id = %dashboard_id,
        component_id = %component_id,
    );
}

/// Emit event: a component references a collector item that no longer exists.
pub fn emit_dangling_item(item_id: &ObjectId) {
    debug!(event = "resolver.dangling_item", item_id = %item_id);
}

/// Emit event: dashboard lookup by business names.
pub fn emit_dashboard_lookup(business_service: &str, business_component: &str, found: bool) {
    debug!(
        event = "resolver.dashboard_lookup",
        business_service = %business_service,
        business_component = %business_component,
        found = found,
    );
}

/// Emit event: a repository lookup failed and was treated as absent.
pub fn emit_lookup_error(stage: &str, key: &dyn Display, error: &dyn Display) {
    warn!(event = "resolver.lookup_error", stage = %stage, key = %key, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_span_enter() {
        let _span = EvaluationSpan::enter(&ObjectId::from("d1"), "test-results");
        emit_dangling_item(&ObjectId::from("i1"));
    }
}

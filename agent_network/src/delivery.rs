//! Per-recipient delivery outcomes for fan-out operations.
//!
//! Fan-out is best effort: every capability call runs inside its own error
//! boundary, so an error or a panic in one recipient is recorded here and the
//! remaining recipients are still served.

use agent_model::{CapabilityError, Message};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{NetworkError, Result};

/// What happened when a single recipient was invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryStatus {
    /// The capability ran and returned successfully.
    Delivered,
    /// The recipient does not expose the invoked capability.
    Unsupported,
    /// The capability returned an error or panicked.
    Failed(NetworkError),
}

/// Outcome for one recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    pub recipient: String,
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }
}

/// Aggregate result of one fan-out call, in invocation order.
///
/// Message fan-outs carry the delivered [`Message`]; update fan-outs carry `()`.
#[derive(Debug, Clone)]
pub struct DeliveryReport<M = Message> {
    pub message: M,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl<M> DeliveryReport<M> {
    pub(crate) fn new(message: M) -> Self {
        Self {
            message,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, recipient: &str, status: DeliveryStatus) {
        self.outcomes.push(DeliveryOutcome {
            recipient: recipient.to_string(),
            status,
        });
    }

    /// Number of recipients whose capability ran successfully.
    pub fn delivered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Names of recipients that were invoked successfully, in order.
    pub fn delivered_to(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_delivered())
            .map(|o| o.recipient.as_str())
            .collect()
    }

    /// Errors from recipients whose capability failed.
    pub fn failures(&self) -> Vec<&NetworkError> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                DeliveryStatus::Failed(error) => Some(error),
                _ => None,
            })
            .collect()
    }

    /// Whether no recipient failed.
    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    /// Names of recipients whose capability failed, in order.
    pub fn failed_recipients(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DeliveryStatus::Failed(_)))
            .map(|o| o.recipient.as_str())
            .collect()
    }
}

/// Summary form of a report, suitable for logs and JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct DeliverySummary {
    pub delivered: usize,
    pub unsupported: usize,
    pub failed: Vec<String>,
}

impl<M> From<&DeliveryReport<M>> for DeliverySummary {
    fn from(report: &DeliveryReport<M>) -> Self {
        let unsupported = report
            .outcomes
            .iter()
            .filter(|o| o.status == DeliveryStatus::Unsupported)
            .count();
        Self {
            delivered: report.delivered_count(),
            unsupported,
            failed: report.failures().iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Run one capability call inside an error boundary.
pub(crate) fn invoke<F>(recipient: &str, call: F) -> DeliveryStatus
where
    F: FnOnce() -> std::result::Result<(), CapabilityError>,
{
    match invoke_with(recipient, call) {
        Ok(()) => DeliveryStatus::Delivered,
        Err(error) => DeliveryStatus::Failed(error),
    }
}

/// Run a capability call that produces a value inside an error boundary.
///
/// Returned errors and panics both become [`NetworkError::ReceiverInvocation`].
pub(crate) fn invoke_with<T, F>(recipient: &str, call: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, CapabilityError>,
{
    let reason = match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(error)) => error.to_string(),
        Err(panic) => panic_reason(panic.as_ref()),
    };

    let error = NetworkError::ReceiverInvocation {
        receiver: recipient.to_string(),
        reason,
    };
    tracing::warn!(%recipient, %error, "capability invocation failed");
    Err(error)
}

fn panic_reason(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        format!("panicked: {reason}")
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        format!("panicked: {reason}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_success() {
        assert_eq!(invoke("bob", || Ok(())), DeliveryStatus::Delivered);
    }

    #[test]
    fn test_invoke_error_is_wrapped() {
        let status = invoke("bob", || Err("inbox full".into()));
        assert_eq!(
            status,
            DeliveryStatus::Failed(NetworkError::ReceiverInvocation {
                receiver: "bob".to_string(),
                reason: "inbox full".to_string(),
            })
        );
    }

    #[test]
    fn test_invoke_panic_is_caught() {
        let status = invoke("bob", || panic!("boom"));
        match status {
            DeliveryStatus::Failed(NetworkError::ReceiverInvocation { receiver, reason }) => {
                assert_eq!(receiver, "bob");
                assert!(reason.contains("boom"));
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_with_returns_value_or_error() {
        assert_eq!(invoke_with("ticker", || Ok(7)), Ok(7));

        let result: Result<u32> = invoke_with("ticker", || panic!("tick overflow"));
        match result {
            Err(NetworkError::ReceiverInvocation { receiver, reason }) => {
                assert_eq!(receiver, "ticker");
                assert!(reason.contains("tick overflow"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = DeliveryReport::new(());
        report.record("a", DeliveryStatus::Delivered);
        report.record("b", DeliveryStatus::Unsupported);
        report.record(
            "c",
            DeliveryStatus::Failed(NetworkError::ReceiverInvocation {
                receiver: "c".to_string(),
                reason: "nope".to_string(),
            }),
        );

        assert_eq!(report.delivered_count(), 1);
        assert_eq!(report.delivered_to(), vec!["a"]);
        assert_eq!(report.failed_recipients(), vec!["c"]);
        assert_eq!(report.failures().len(), 1);
        assert!(!report.is_complete());

        let summary = DeliverySummary::from(&report);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.unsupported, 1);
        assert_eq!(summary.failed.len(), 1);
    }
}

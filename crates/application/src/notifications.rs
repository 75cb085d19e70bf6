//! User-facing notifications
//!
//! Notifications are a side channel for interactive display. Delivering one
//! never changes the value an operation returns.

use crate::ApplicationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How prominently a notification should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// A single evaluation degraded to an empty score set
    pub fn evaluation_failed() -> Self {
        Self::new(
            "Evaluation Failed",
            "There was an error during the evaluation process.",
            Severity::Destructive,
        )
    }

    /// A batch was aborted
    pub fn batch_evaluation_failed() -> Self {
        Self::new(
            "Batch Evaluation Failed",
            "There was an error during the batch evaluation process.",
            Severity::Destructive,
        )
    }

    /// An interactive evaluation finished
    pub fn evaluation_complete() -> Self {
        Self::new(
            "Evaluation Complete",
            "Sample evaluation has been processed successfully.",
            Severity::Info,
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Notifier trait for surfacing notifications to the user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> ApplicationResult<()>;
}

/// Notifier that writes notifications to the log
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) -> ApplicationResult<()> {
        match notification.severity {
            Severity::Destructive => warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            Severity::Info => info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
        Ok(())
    }
}

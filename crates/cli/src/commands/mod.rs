//! CLI commands

pub mod batch;
pub mod config;
pub mod evaluate;

use crate::interactive::{hidden_spinner, spinner};
use crate::notifier::CliNotifier;
use crate::output::{Formattable, OutputFormat};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use qa_eval_application::{EvaluationEngine, EvaluationEngineBuilder, Notification, Notifier};
use qa_eval_common::AppConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub engine: EvaluationEngine,
    pub notifier: Arc<dyn Notifier>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a command context with an engine built from the configuration
    pub fn new(config: AppConfig, format: OutputFormat) -> Result<Self> {
        // JSON output is parsed by other programs; keep informational toasts off stderr.
        let notifier: Arc<dyn Notifier> = if format.is_machine_readable() {
            Arc::new(CliNotifier::quiet())
        } else {
            Arc::new(CliNotifier::new())
        };
        Self::with_notifier(config, format, notifier)
    }

    /// Create a command context with a specific notifier
    pub fn with_notifier(
        config: AppConfig,
        format: OutputFormat,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let engine = EvaluationEngineBuilder::from_scoring_config(&config.scoring)
            .context("Failed to configure evaluation engine")?
            .notifier(notifier.clone())
            .build();
        debug!(
            scorer = engine.scorer_name(),
            latency = ?engine.config().simulated_latency,
            "Evaluation engine ready"
        );

        Ok(Self {
            config,
            engine,
            notifier,
            format,
        })
    }

    /// Progress spinner, hidden when output is machine-readable
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.format.is_machine_readable() {
            hidden_spinner()
        } else {
            spinner(message)
        }
    }

    /// Render a value in the selected output format
    pub fn render<T: Formattable>(&self, value: &T) -> Result<String> {
        value.format(self.format)
    }

    /// Deliver a notification, logging delivery failures
    pub async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(notification).await {
            warn!(error = %e, "Failed to deliver notification");
        }
    }
}

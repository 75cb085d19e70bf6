//! Terminal notifications

use async_trait::async_trait;
use colored::Colorize;
use qa_eval_application::{ApplicationError, ApplicationResult, Notification, Notifier, Severity};
use std::io::Write;

use crate::output::colors;

/// Notifier that prints notifications to stderr as one-line toasts
#[derive(Debug, Default, Clone, Copy)]
pub struct CliNotifier {
    quiet: bool,
}

impl CliNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that drops informational toasts and keeps failures
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    /// Render a notification as a single line
    pub fn render(notification: &Notification) -> String {
        let title = match notification.severity {
            Severity::Destructive => colors::error(&notification.title).bold(),
            Severity::Info => colors::success(&notification.title).bold(),
        };
        format!("{} {}", title, colors::dim(&notification.description))
    }

    /// Write a notification to `out`, honoring quiet mode
    pub fn write_to<W: Write>(&self, out: &mut W, notification: &Notification) -> ApplicationResult<()> {
        if self.quiet && !notification.is_destructive() {
            return Ok(());
        }
        writeln!(out, "{}", Self::render(notification))
            .map_err(|e| ApplicationError::Notification(e.to_string()))
    }
}

#[async_trait]
impl Notifier for CliNotifier {
    async fn notify(&self, notification: Notification) -> ApplicationResult<()> {
        self.write_to(&mut std::io::stderr().lock(), &notification)
    }
}

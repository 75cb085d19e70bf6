//! QA Evaluation CLI Library
//!
//! This library provides the core functionality for the `qa-eval`
//! command-line interface, including request file loading, terminal
//! notifications and output formatting.

pub mod commands;
pub mod input;
pub mod interactive;
pub mod notifier;
pub mod output;

pub use notifier::CliNotifier;
pub use output::{JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};

//! Common utilities shared by the QA evaluation crates.
//!
//! This crate provides:
//! - Configuration management
//! - Telemetry and structured logging

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, ScoringConfig, TelemetryConfig};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;

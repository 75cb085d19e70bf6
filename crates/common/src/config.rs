//! Configuration management for the application.
//!
//! Settings are loaded from configuration files and environment variables.
//!
//! ## Example Configuration
//!
//! ```toml
//! [scoring]
//! simulated_latency_ms = 1500
//! min_score = 0.7
//! max_score = 1.0
//! seed = 42
//!
//! [telemetry]
//! service_name = "qa-eval"
//! json_logging = false
//! log_level = "info"
//! ```

use anyhow::{Context, Result};
use qa_eval_domain::ScoreRange;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "QA_EVAL";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Simulated processing delay per evaluation, in milliseconds
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Lowest score the mock scorer draws
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Highest score the mock scorer draws
    #[serde(default = "default_max_score")]
    pub max_score: f64,

    /// RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_latency_ms() -> u64 {
    1500
}

fn default_min_score() -> f64 {
    0.7
}

fn default_max_score() -> f64 {
    1.0
}

fn default_service_name() -> String {
    "qa-eval".to_string()
}

fn default_json_logging() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            min_score: default_min_score(),
            max_score: default_max_score(),
            seed: None,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: default_json_logging(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from configuration files and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from QA_EVAL_ENV)
    /// 4. `path`, which must exist when given
    /// 5. Environment variables (prefixed with QA_EVAL_)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use qa_eval_common::config::AppConfig;
    ///
    /// let config = AppConfig::load_from(None).expect("Failed to load configuration");
    /// println!("Simulated latency: {:?}", config.scoring.simulated_latency());
    /// ```
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let env = std::env::var("QA_EVAL_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Example: QA_EVAL_SCORING__SIMULATED_LATENCY_MS=10
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scoring.simulated_latency_ms == 0 {
            anyhow::bail!("Simulated latency must be greater than 0");
        }

        self.scoring.score_range()?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}

impl ScoringConfig {
    /// Simulated latency as a Duration
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Range the mock scorer draws from
    pub fn score_range(&self) -> Result<ScoreRange> {
        ScoreRange::new(self.min_score, self.max_score).context("Invalid scoring range")
    }
}

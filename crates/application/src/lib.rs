//! Application layer for QA evaluation
//!
//! This crate orchestrates scoring of question/answer pairs.
//!
//! ## Modules
//!
//! - `scoring` - Scorer capability, mock scorer and the evaluation engine
//! - `notifications` - User-facing notification side channel

pub mod notifications;
pub mod scoring;

// Re-export commonly used types
pub use notifications::{Notification, Notifier, Severity, TracingNotifier};
pub use scoring::{
    aggregate, EvaluationEngine, EvaluationEngineBuilder, EvaluationEngineConfig,
    FeedbackCatalog, MockScorer, ScoreCard, Scorer, ScoringError, EVALUATION_FAILED_FEEDBACK,
};

use qa_eval_domain::DomainError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Domain rule violation
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A batch element faulted outside the per-call recovery
    #[error("Batch evaluation aborted at item {index}: {reason}")]
    BatchAborted { index: usize, reason: String },

    /// Notification could not be delivered
    #[error("Notification failed: {0}")]
    Notification(String),
}

impl ApplicationError {
    /// Get error code for structured output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::Domain(e) => e.error_code(),
            ApplicationError::BatchAborted { .. } => "BATCH_ABORTED",
            ApplicationError::Notification(_) => "NOTIFICATION_FAILED",
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

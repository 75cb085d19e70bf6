//! Error types for the QA evaluation domain.

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A score fell outside the unit interval
    #[error("Score out of range [0, 1]: {0}")]
    ScoreOutOfRange(f64),

    /// A score range with inverted or out-of-unit bounds
    #[error("Invalid score range: min {min} must be <= max {max}, both within [0, 1]")]
    InvalidScoreRange {
        /// Lower bound as supplied
        min: f64,
        /// Upper bound as supplied
        max: f64,
    },

    /// F1 present without non-zero recall and precision, or not their harmonic mean
    #[error("F1 score does not match recall and precision")]
    InconsistentF1Score,
}

impl DomainError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ScoreOutOfRange(_) => "SCORE_OUT_OF_RANGE",
            Self::InvalidScoreRange { .. } => "INVALID_SCORE_RANGE",
            Self::InconsistentF1Score => "INCONSISTENT_F1_SCORE",
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

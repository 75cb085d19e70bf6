//! QA Eval Domain Types
//!
//! This crate provides the core domain model for evaluating question/answer
//! pairs. It defines requests, per-dimension score sets, aggregate score
//! sets, the presentation rating policy and domain errors.
//!
//! ## Architecture
//!
//! - **scores**: Score dimensions, score sets, aggregates, ranges and ratings
//! - **evaluation**: Evaluation requests and results
//! - **samples**: The canonical demo request
//! - **errors**: Domain error types
//!
//! ## Usage
//!
//! ```rust
//! use qa_eval_domain::{ScoreDimension, ScoreRating, ScoreSet};
//!
//! let scores = ScoreSet::new()
//!     .with(ScoreDimension::Relevance, 0.91)
//!     .with(ScoreDimension::Fluency, 0.55);
//!
//! assert_eq!(scores.get(ScoreDimension::Relevance), Some(0.91));
//! assert_eq!(ScoreRating::for_score(0.55), ScoreRating::Poor);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod evaluation;
pub mod samples;
pub mod scores;

pub use errors::{DomainError, DomainResult};
pub use evaluation::{EvaluationRequest, EvaluationResult};
pub use scores::{
    harmonic_mean, round_score, AggregateScoreSet, ScoreDimension, ScoreRange, ScoreRating,
    ScoreSet,
};

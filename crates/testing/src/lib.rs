//! Testing utilities for QA evaluation
//!
//! This crate provides:
//! - Test fixtures for requests and results
//! - Builder patterns for test data construction
//! - Mock scorers and notifiers
//! - Property-based testing strategies
//!
//! # Examples
//!
//! ```
//! use qa_eval_testing::{builders::*, fixtures::*};
//! use qa_eval_domain::ScoreDimension;
//!
//! let request = create_test_request();
//! assert!(request.retrieved_context.is_none());
//!
//! let result = EvaluationResultBuilder::new()
//!     .score(ScoreDimension::Relevance, 0.9)
//!     .build();
//! assert_eq!(result.scores.relevance, Some(0.9));
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;

//! Scoring module - Scorers and the evaluation engine
//!
//! This module provides the scorer capability, the mock scorer, and the
//! engine that runs single and batch evaluations and aggregates results.

mod engine;
mod evaluators;

pub use engine::*;
pub use evaluators::*;

//! Scorer implementations.
//!
//! A [`Scorer`] turns an evaluation request into a score card. The engine
//! wraps whichever scorer it is given with latency simulation, logging and
//! failure recovery, so a real metric can replace [`MockScorer`] without
//! touching aggregation or presentation.

use async_trait::async_trait;
use parking_lot::Mutex;
use qa_eval_domain::{DomainError, EvaluationRequest, ScoreDimension, ScoreRange, ScoreSet};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Canned feedback messages
pub const DEFAULT_FEEDBACK: [&str; 4] = [
    "The answer addresses the main points of the question.",
    "Some details in the answer could be improved for better accuracy.",
    "The answer is comprehensive and well-structured.",
    "Consider adding more specific information from the retrieved context.",
];

/// Errors raised by a scoring strategy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// No feedback message could be selected
    #[error("Feedback catalog is empty")]
    EmptyFeedbackCatalog,

    /// The strategy produced scores that break a domain rule
    #[error("Invalid scores: {0}")]
    InvalidScores(#[from] DomainError),

    /// Any other strategy fault
    #[error("Scorer fault: {0}")]
    Internal(String),
}

/// Scores and feedback produced for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub scores: ScoreSet,
    pub feedback: Option<String>,
}

impl ScoreCard {
    pub fn new(scores: ScoreSet, feedback: impl Into<String>) -> Self {
        Self {
            scores,
            feedback: Some(feedback.into()),
        }
    }
}

/// Scorer trait for evaluating question/answer pairs.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score a request.
    async fn score(&self, request: &EvaluationRequest) -> Result<ScoreCard, ScoringError>;

    /// Get the scorer name.
    fn name(&self) -> &'static str;
}

/// Fixed set of feedback messages to pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCatalog {
    messages: Vec<String>,
}

impl FeedbackCatalog {
    /// Create a catalog; at least one message is required.
    pub fn new<I, S>(messages: I) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return Err(ScoringError::EmptyFeedbackCatalog);
        }
        Ok(Self { messages })
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// Pick a message uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.messages.choose(rng).map(String::as_str)
    }
}

impl Default for FeedbackCatalog {
    fn default() -> Self {
        Self {
            messages: DEFAULT_FEEDBACK.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Scorer that returns random scores within a range.
///
/// Every core dimension is drawn independently. Recall and precision are
/// drawn only when the request carries retrieved context, and F1 is derived
/// from them.
pub struct MockScorer {
    rng: Mutex<StdRng>,
    range: ScoreRange,
    catalog: FeedbackCatalog,
}

impl MockScorer {
    /// Create a mock scorer seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a reproducible mock scorer.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            range: ScoreRange::default(),
            catalog: FeedbackCatalog::default(),
        }
    }

    pub fn range(mut self, range: ScoreRange) -> Self {
        self.range = range;
        self
    }

    pub fn catalog(mut self, catalog: FeedbackCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    fn draw(&self, rng: &mut StdRng) -> f64 {
        qa_eval_domain::round_score(self.range.min() + rng.gen::<f64>() * self.range.span())
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scorer for MockScorer {
    #[instrument(skip(self, request), fields(has_context = request.has_retrieved_context()))]
    async fn score(&self, request: &EvaluationRequest) -> Result<ScoreCard, ScoringError> {
        let (scores, feedback) = {
            let mut rng = self.rng.lock();

            let mut scores = ScoreDimension::CORE
                .iter()
                .fold(ScoreSet::new(), |set, dim| set.with(*dim, self.draw(&mut rng)));

            if request.has_retrieved_context() {
                let recall = self.draw(&mut rng);
                let precision = self.draw(&mut rng);
                scores = scores.with_retrieval(recall, precision);
            }

            let feedback = self
                .catalog
                .pick(&mut *rng)
                .ok_or(ScoringError::EmptyFeedbackCatalog)?
                .to_string();

            (scores, feedback)
        };

        scores.validate()?;

        debug!(dimensions = scores.len(), "Mock scores generated");

        Ok(ScoreCard::new(scores, feedback))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EvaluationRequest {
        EvaluationRequest::new("What is Rust?", "A systems programming language.")
    }

    #[tokio::test]
    async fn test_core_dimensions_only_without_context() {
        let scorer = MockScorer::with_seed(1);
        let card = scorer.score(&request()).await.unwrap();

        for dim in ScoreDimension::CORE {
            let score = card.scores.get(dim).unwrap();
            assert!((0.7..=1.0).contains(&score), "{dim} = {score}");
        }
        assert!(!card.scores.has_retrieval_metrics());
    }

    #[tokio::test]
    async fn test_retrieval_dimensions_with_context() {
        let scorer = MockScorer::with_seed(2);
        let card = scorer
            .score(&request().with_retrieved_context(["passage"]))
            .await
            .unwrap();

        assert_eq!(card.scores.len(), 7);
        assert!(card.scores.f1_is_consistent());
    }

    #[tokio::test]
    async fn test_scores_have_two_decimals() {
        let scorer = MockScorer::with_seed(3);
        for _ in 0..50 {
            let card = scorer
                .score(&request().with_retrieved_context(Vec::<String>::new()))
                .await
                .unwrap();
            for (_, score) in card.scores.iter() {
                assert!(((score * 100.0).round() - score * 100.0).abs() < 1e-6);
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_scorers_are_reproducible() {
        let a = MockScorer::with_seed(42).score(&request()).await.unwrap();
        let b = MockScorer::with_seed(42).score(&request()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_feedback_comes_from_catalog() {
        let scorer = MockScorer::with_seed(5);
        let catalog = FeedbackCatalog::default();
        for _ in 0..20 {
            let card = scorer.score(&request()).await.unwrap();
            assert!(catalog.contains(card.feedback.as_deref().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_custom_range_and_catalog() {
        let scorer = MockScorer::with_seed(9)
            .range(ScoreRange::new(0.5, 0.5).unwrap())
            .catalog(FeedbackCatalog::new(["only"]).unwrap());
        let card = scorer.score(&request()).await.unwrap();

        assert!(card.scores.iter().all(|(_, s)| s == 0.5));
        assert_eq!(card.feedback.as_deref(), Some("only"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            FeedbackCatalog::new(Vec::<String>::new()),
            Err(ScoringError::EmptyFeedbackCatalog)
        );
    }

    #[test]
    fn test_default_catalog() {
        let catalog = FeedbackCatalog::default();
        assert!(catalog.contains("The answer is comprehensive and well-structured."));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(catalog.pick(&mut rng).is_some());
    }
}

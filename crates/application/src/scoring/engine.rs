//! Evaluation Engine - Single, batch and aggregate evaluation
//!
//! The engine runs a [`Scorer`] behind a simulated processing delay. Single
//! evaluations fail open: a scorer error or panic yields an empty score set
//! and a fixed feedback message. Batches fail closed: a fault that escapes
//! the per-call recovery, such as a panicking notifier, discards the whole
//! batch.

use crate::notifications::{Notification, Notifier, TracingNotifier};
use crate::scoring::evaluators::{MockScorer, ScoreCard, Scorer, ScoringError};
use crate::{ApplicationError, ApplicationResult};
use futures::future::try_join_all;
use futures::FutureExt;
use qa_eval_common::ScoringConfig;
use qa_eval_domain::{
    round_score, AggregateScoreSet, EvaluationRequest, EvaluationResult, ScoreDimension, ScoreRange,
    ScoreSet,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Feedback attached to a result whose scoring failed
pub const EVALUATION_FAILED_FEEDBACK: &str = "Evaluation failed due to an internal error.";

/// Evaluation engine configuration
#[derive(Debug, Clone)]
pub struct EvaluationEngineConfig {
    /// Delay before each evaluation produces a result
    pub simulated_latency: Duration,
}

impl Default for EvaluationEngineConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(1500),
        }
    }
}

/// The main evaluation engine
pub struct EvaluationEngine {
    config: EvaluationEngineConfig,
    scorer: Arc<dyn Scorer>,
    notifier: Arc<dyn Notifier>,
}

impl EvaluationEngine {
    /// Create an engine with the mock scorer and log-backed notifications
    pub fn new(config: EvaluationEngineConfig) -> Self {
        Self {
            config,
            scorer: Arc::new(MockScorer::new()),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn config(&self) -> &EvaluationEngineConfig {
        &self.config
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Evaluate a single question/answer pair.
    ///
    /// Never fails: scorer errors and scorer panics degrade to an empty
    /// score set.
    #[instrument(skip(self, request), fields(scorer = self.scorer.name()))]
    pub async fn evaluate(&self, request: EvaluationRequest) -> EvaluationResult {
        info!(request = ?request, "Evaluating QA pair");

        tokio::time::sleep(self.config.simulated_latency).await;

        match self.score(&request).await {
            Ok(card) => {
                debug!(
                    dimensions = card.scores.len(),
                    retrieval = card.scores.has_retrieval_metrics(),
                    "Evaluation complete"
                );
                EvaluationResult::from_request(request, card.scores, card.feedback)
            }
            Err(e) => {
                error!(error = %e, "Evaluation error");
                self.notify(Notification::evaluation_failed()).await;
                EvaluationResult::from_request(
                    request,
                    ScoreSet::new(),
                    Some(EVALUATION_FAILED_FEEDBACK.to_string()),
                )
            }
        }
    }

    /// Evaluate many pairs concurrently.
    ///
    /// Output order matches input order. If any evaluation faults outside
    /// the per-call recovery, the result is empty.
    #[instrument(skip(self, requests), fields(batch_size = requests.len()))]
    pub async fn evaluate_batch(&self, requests: Vec<EvaluationRequest>) -> Vec<EvaluationResult> {
        match self.try_evaluate_batch(requests).await {
            Ok(results) => {
                info!(results = results.len(), "Batch evaluation complete");
                results
            }
            Err(e) => {
                error!(error = %e, "Batch evaluation error");
                self.notify(Notification::batch_evaluation_failed()).await;
                Vec::new()
            }
        }
    }

    async fn score(&self, request: &EvaluationRequest) -> Result<ScoreCard, ScoringError> {
        AssertUnwindSafe(self.scorer.score(request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(ScoringError::Internal(format!(
                    "scorer panicked: {}",
                    panic_message(payload.as_ref())
                )))
            })
    }

    async fn try_evaluate_batch(
        &self,
        requests: Vec<EvaluationRequest>,
    ) -> ApplicationResult<Vec<EvaluationResult>> {
        let evaluations = requests.into_iter().enumerate().map(|(index, request)| {
            AssertUnwindSafe(self.evaluate(request))
                .catch_unwind()
                .map(move |outcome| {
                    outcome.map_err(|payload| ApplicationError::BatchAborted {
                        index,
                        reason: panic_message(payload.as_ref()),
                    })
                })
        });

        try_join_all(evaluations).await
    }

    /// Per-dimension means across results
    pub fn aggregate(&self, results: &[EvaluationResult]) -> AggregateScoreSet {
        aggregate(results)
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(notification).await {
            warn!(error = %e, "Failed to deliver notification");
        }
    }
}

/// Compute the mean of every dimension across the results that supplied it.
///
/// Dimensions no result supplied are left out; empty input gives an empty
/// aggregate.
pub fn aggregate(results: &[EvaluationResult]) -> AggregateScoreSet {
    ScoreDimension::ALL
        .iter()
        .filter_map(|&dimension| {
            let values: Vec<f64> = results
                .iter()
                .filter_map(|r| r.scores.get(dimension))
                .collect();

            if values.is_empty() {
                return None;
            }

            let mean = values.iter().sum::<f64>() / values.len() as f64;
            Some((dimension, round_score(mean)))
        })
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builder for EvaluationEngine
pub struct EvaluationEngineBuilder {
    config: EvaluationEngineConfig,
    scorer: Option<Arc<dyn Scorer>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl EvaluationEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EvaluationEngineConfig::default(),
            scorer: None,
            notifier: None,
        }
    }

    /// Start from a scoring configuration section.
    ///
    /// Sets the latency and a mock scorer with the configured range and seed.
    pub fn from_scoring_config(config: &ScoringConfig) -> ApplicationResult<Self> {
        let range = ScoreRange::new(config.min_score, config.max_score)?;

        let scorer = match config.seed {
            Some(seed) => MockScorer::with_seed(seed),
            None => MockScorer::new(),
        }
        .range(range);

        Ok(Self::new()
            .simulated_latency(config.simulated_latency())
            .scorer(Arc::new(scorer)))
    }

    pub fn config(mut self, config: EvaluationEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn simulated_latency(mut self, latency: Duration) -> Self {
        self.config.simulated_latency = latency;
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> EvaluationEngine {
        let mut engine = EvaluationEngine::new(self.config);

        if let Some(scorer) = self.scorer {
            engine.scorer = scorer;
        }
        if let Some(notifier) = self.notifier {
            engine.notifier = notifier;
        }

        engine
    }
}

impl Default for EvaluationEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Mock scorers and notifiers.

use async_trait::async_trait;
use parking_lot::RwLock;
use qa_eval_application::{
    ApplicationResult, MockScorer, Notification, Notifier, ScoreCard, Scorer, ScoringError,
};
use qa_eval_domain::EvaluationRequest;
use std::sync::Arc;

/// Notifier that records every notification it receives
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    pub fn count(&self) -> usize {
        self.notifications.read().len()
    }

    pub fn destructive_count(&self) -> usize {
        self.notifications
            .read()
            .iter()
            .filter(|n| n.is_destructive())
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> ApplicationResult<()> {
        self.notifications.write().push(notification);
        Ok(())
    }
}

/// Notifier that panics on one kind of notification.
///
/// Everything else is forwarded to the wrapped [`RecordingNotifier`].
#[derive(Clone)]
pub struct PanickingNotifier {
    trigger: Notification,
    recorder: RecordingNotifier,
}

impl PanickingNotifier {
    pub fn on(trigger: Notification, recorder: RecordingNotifier) -> Self {
        Self { trigger, recorder }
    }
}

#[async_trait]
impl Notifier for PanickingNotifier {
    async fn notify(&self, notification: Notification) -> ApplicationResult<()> {
        if notification == self.trigger {
            panic!("injected notifier panic for {:?}", notification.title);
        }
        self.recorder.notify(notification).await
    }
}

/// Scorer that always returns an error
pub struct FailingScorer {
    message: String,
}

impl FailingScorer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingScorer {
    fn default() -> Self {
        Self::new("simulated scorer fault")
    }
}

#[async_trait]
impl Scorer for FailingScorer {
    async fn score(&self, _request: &EvaluationRequest) -> Result<ScoreCard, ScoringError> {
        Err(ScoringError::Internal(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Scorer that panics for requests with a trigger question.
///
/// Other requests are delegated to a seeded [`MockScorer`].
pub struct PanickingScorer {
    trigger: Option<String>,
    inner: MockScorer,
}

impl PanickingScorer {
    /// Panic on every request
    pub fn always() -> Self {
        Self {
            trigger: None,
            inner: MockScorer::with_seed(0),
        }
    }

    /// Panic only when the question equals `question`
    pub fn on_question(question: impl Into<String>) -> Self {
        Self {
            trigger: Some(question.into()),
            inner: MockScorer::with_seed(0),
        }
    }

    fn triggers(&self, request: &EvaluationRequest) -> bool {
        self.trigger
            .as_deref()
            .map_or(true, |q| q == request.question)
    }
}

#[async_trait]
impl Scorer for PanickingScorer {
    async fn score(&self, request: &EvaluationRequest) -> Result<ScoreCard, ScoringError> {
        if self.triggers(request) {
            panic!("injected scorer panic for question {:?}", request.question);
        }
        self.inner.score(request).await
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// Scorer that returns the same card for every request
pub struct FixedScorer {
    card: ScoreCard,
}

impl FixedScorer {
    pub fn new(card: ScoreCard) -> Self {
        Self { card }
    }
}

#[async_trait]
impl Scorer for FixedScorer {
    async fn score(&self, _request: &EvaluationRequest) -> Result<ScoreCard, ScoringError> {
        Ok(self.card.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

//! Evaluation requests and results.

use crate::scores::ScoreSet;
use serde::{Deserialize, Serialize};

/// Input to a single scoring call.
///
/// `retrieved_context` being `Some` (even an empty list) is what switches the
/// retrieval metrics on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// The question that was asked
    pub question: String,
    /// The answer being evaluated
    pub answer: String,
    /// Reference answer, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<String>,
    /// Passages retrieved to produce the answer, in retrieval order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_context: Option<Vec<String>>,
}

impl EvaluationRequest {
    /// Create a request with just a question and answer
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ground_truth: None,
            retrieved_context: None,
        }
    }

    /// Attach a reference answer
    pub fn with_ground_truth(mut self, ground_truth: impl Into<String>) -> Self {
        self.ground_truth = Some(ground_truth.into());
        self
    }

    /// Attach retrieved context passages
    pub fn with_retrieved_context<I, S>(mut self, passages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retrieved_context = Some(passages.into_iter().map(Into::into).collect());
        self
    }

    /// Whether retrieved context was supplied
    pub fn has_retrieved_context(&self) -> bool {
        self.retrieved_context.is_some()
    }
}

/// Outcome of a single scoring call.
///
/// Echoes every request field alongside the scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// The question that was asked
    pub question: String,
    /// The answer that was evaluated
    pub answer: String,
    /// Reference answer, if supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<String>,
    /// Retrieved context, if supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_context: Option<Vec<String>>,
    /// Per-dimension scores
    pub scores: ScoreSet,
    /// Free-text feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl EvaluationResult {
    /// Build a result from the request it answers
    pub fn from_request(request: EvaluationRequest, scores: ScoreSet, feedback: Option<String>) -> Self {
        Self {
            question: request.question,
            answer: request.answer,
            ground_truth: request.ground_truth,
            retrieved_context: request.retrieved_context,
            scores,
            feedback,
        }
    }

    /// Whether the evaluation produced no scores at all
    pub fn is_degraded(&self) -> bool {
        self.scores.is_empty()
    }

    /// Recover the originating request
    pub fn request(&self) -> EvaluationRequest {
        EvaluationRequest {
            question: self.question.clone(),
            answer: self.answer.clone(),
            ground_truth: self.ground_truth.clone(),
            retrieved_context: self.retrieved_context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::ScoreDimension;

    #[test]
    fn test_request_builder() {
        let request = EvaluationRequest::new("q", "a")
            .with_ground_truth("gt")
            .with_retrieved_context(["p1", "p2"]);

        assert_eq!(request.ground_truth.as_deref(), Some("gt"));
        assert_eq!(
            request.retrieved_context,
            Some(vec!["p1".to_string(), "p2".to_string()])
        );
        assert!(request.has_retrieved_context());
    }

    #[test]
    fn test_empty_context_is_present() {
        let request = EvaluationRequest::new("q", "a").with_retrieved_context(Vec::<String>::new());
        assert!(request.has_retrieved_context());
    }

    #[test]
    fn test_request_json_shape() {
        let request: EvaluationRequest = serde_json::from_str(
            r#"{"question": "q", "answer": "a", "retrievedContext": ["c"]}"#,
        )
        .unwrap();
        assert_eq!(request.retrieved_context, Some(vec!["c".to_string()]));
        assert!(request.ground_truth.is_none());

        let json = serde_json::to_value(EvaluationRequest::new("q", "a")).unwrap();
        assert_eq!(json, serde_json::json!({"question": "q", "answer": "a"}));
    }

    #[test]
    fn test_result_echoes_request() {
        let request = EvaluationRequest::new("q", "a").with_ground_truth("gt");
        let scores = ScoreSet::new().with(ScoreDimension::Relevance, 0.9);
        let result = EvaluationResult::from_request(request.clone(), scores, Some("ok".into()));

        assert_eq!(result.request(), request);
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_degraded_result() {
        let result = EvaluationResult::from_request(EvaluationRequest::new("", ""), ScoreSet::new(), None);
        assert!(result.is_degraded());
    }
}

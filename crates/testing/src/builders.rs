//! Fluent builder pattern for constructing test data.

use qa_eval_domain::{EvaluationRequest, EvaluationResult, ScoreDimension, ScoreSet};

/// Builder for creating EvaluationResult test instances
#[derive(Clone)]
pub struct EvaluationResultBuilder {
    request: EvaluationRequest,
    scores: ScoreSet,
    feedback: Option<String>,
}

impl EvaluationResultBuilder {
    pub fn new() -> Self {
        Self {
            request: EvaluationRequest::new("Test question?", "Test answer."),
            scores: ScoreSet::new(),
            feedback: None,
        }
    }

    pub fn with_request(mut self, request: EvaluationRequest) -> Self {
        self.request = request;
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.request.question = question.into();
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.request.answer = answer.into();
        self
    }

    pub fn score(mut self, dimension: ScoreDimension, score: f64) -> Self {
        self.scores = self.scores.with(dimension, score);
        self
    }

    /// Set recall and precision, with F1 derived from them
    pub fn retrieval(mut self, recall: f64, precision: f64) -> Self {
        self.scores = self.scores.with_retrieval(recall, precision);
        if self.request.retrieved_context.is_none() {
            self.request.retrieved_context = Some(vec!["Test passage.".to_string()]);
        }
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    pub fn build(self) -> EvaluationResult {
        EvaluationResult::from_request(self.request, self.scores, self.feedback)
    }
}

impl Default for EvaluationResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_context_for_retrieval() {
        let result = EvaluationResultBuilder::new().retrieval(0.9, 0.8).build();
        assert!(result.retrieved_context.is_some());
        assert_eq!(result.scores.f1_score, Some(0.85));
    }
}

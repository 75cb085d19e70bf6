//! Test fixtures for generating requests and results with realistic data.

use fake::{
    faker::lorem::en::{Paragraph, Sentence},
    Fake,
};
use qa_eval_domain::{
    samples, EvaluationRequest, EvaluationResult, ScoreDimension, ScoreSet,
};

/// Create a test request with random question and answer, no context
pub fn create_test_request() -> EvaluationRequest {
    let question: String = Sentence(4..10).fake();
    let answer: String = Paragraph(1..3).fake();
    EvaluationRequest::new(question, answer)
}

/// Create a test request with `passages` random context passages
pub fn create_test_request_with_context(passages: usize) -> EvaluationRequest {
    let context: Vec<String> = (0..passages).map(|_| Sentence(6..12).fake()).collect();
    create_test_request().with_retrieved_context(context)
}

/// Create `count` requests, alternating with and without context
pub fn create_test_requests(count: usize) -> Vec<EvaluationRequest> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                create_test_request()
            } else {
                create_test_request_with_context(3)
            }
        })
        .collect()
}

/// The neural-network sample request, with context
pub fn create_sample_request() -> EvaluationRequest {
    samples::sample_request()
}

/// The neural-network sample request, without context
pub fn create_sample_request_without_context() -> EvaluationRequest {
    samples::sample_request_without_context()
}

/// Core scores all set to `score`
pub fn create_uniform_scores(score: f64) -> ScoreSet {
    ScoreDimension::CORE
        .iter()
        .fold(ScoreSet::new(), |set, dim| set.with(*dim, score))
}

/// A result for a random request with the given scores
pub fn create_test_result(scores: ScoreSet) -> EvaluationResult {
    EvaluationResult::from_request(
        create_test_request(),
        scores,
        Some("The answer addresses the main points of the question.".to_string()),
    )
}

//! Proptest strategies for domain types.

use proptest::prelude::*;
use qa_eval_domain::{EvaluationRequest, EvaluationResult, ScoreDimension, ScoreSet};

/// A score in `[0, 1]` with two decimals
pub fn arb_score() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|hundredths| f64::from(hundredths) / 100.0)
}

/// A score set where each dimension is independently present or absent
pub fn arb_score_set() -> impl Strategy<Value = ScoreSet> {
    proptest::collection::vec(proptest::option::of(arb_score()), ScoreDimension::ALL.len())
        .prop_map(|values| {
            ScoreDimension::ALL
                .iter()
                .zip(values)
                .fold(ScoreSet::new(), |set, (dim, value)| match value {
                    Some(v) => set.with(*dim, v),
                    None => set,
                })
        })
}

/// A request with short printable question and answer
pub fn arb_request() -> impl Strategy<Value = EvaluationRequest> {
    (
        "[ -~]{0,40}",
        "[ -~]{0,80}",
        proptest::option::of(proptest::collection::vec("[a-z ]{1,20}", 0..4)),
    )
        .prop_map(|(question, answer, context)| {
            let request = EvaluationRequest::new(question, answer);
            match context {
                Some(passages) => request.with_retrieved_context(passages),
                None => request,
            }
        })
}

/// A result with arbitrary scores
pub fn arb_result() -> impl Strategy<Value = EvaluationResult> {
    (arb_request(), arb_score_set())
        .prop_map(|(request, scores)| EvaluationResult::from_request(request, scores, None))
}

//! The canonical demo request.

use crate::evaluation::EvaluationRequest;

/// Demo question
pub const SAMPLE_QUESTION: &str = "How do neural networks learn from data?";

/// Demo answer
pub const SAMPLE_ANSWER: &str = "Neural networks learn from data through a process called \
backpropagation. This algorithm adjusts the weights of connections between neurons based on \
the error in the network's output. During training, the network makes predictions, calculates \
the error against known outputs, and then propagates this error backward through the network \
to update weights. This iterative process minimizes the error over time, allowing the network \
to recognize patterns and make accurate predictions on new data.";

/// Demo retrieved context passages
pub const SAMPLE_CONTEXT: [&str; 3] = [
    "Neural networks consist of layers of interconnected nodes, and learn by adjusting connection weights.",
    "Backpropagation is the primary algorithm used to train neural networks by calculating gradients.",
    "Training data is fed through the network in batches to optimize the learning process.",
];

/// The demo request, with retrieved context attached
pub fn sample_request() -> EvaluationRequest {
    sample_request_without_context().with_retrieved_context(SAMPLE_CONTEXT)
}

/// The demo request without retrieved context
pub fn sample_request_without_context() -> EvaluationRequest {
    EvaluationRequest::new(SAMPLE_QUESTION, SAMPLE_ANSWER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_request() {
        let request = sample_request();
        assert_eq!(request.question, SAMPLE_QUESTION);
        assert_eq!(request.retrieved_context.as_ref().map(Vec::len), Some(3));
        assert!(request.answer.starts_with("Neural networks learn from data"));
        assert!(request.answer.ends_with("new data."));
    }

    #[test]
    fn test_sample_without_context() {
        assert!(!sample_request_without_context().has_retrieved_context());
    }
}

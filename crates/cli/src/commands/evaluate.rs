//! Single evaluation commands

use anyhow::Result;
use qa_eval_application::Notification;
use qa_eval_domain::{samples, EvaluationRequest, EvaluationResult};

use crate::commands::CommandContext;
use crate::output::colors;

/// Build a request from command-line arguments.
///
/// Context passages are attached only when at least one was given.
pub fn build_request(
    question: String,
    answer: String,
    ground_truth: Option<String>,
    context: Vec<String>,
) -> EvaluationRequest {
    let mut request = EvaluationRequest::new(question, answer);
    if let Some(ground_truth) = ground_truth {
        request = request.with_ground_truth(ground_truth);
    }
    if !context.is_empty() {
        request = request.with_retrieved_context(context);
    }
    request
}

/// Evaluate one request behind a spinner.
///
/// A successful evaluation is followed by a completion notification; a
/// degraded one has already been reported by the engine.
pub async fn run(ctx: &CommandContext, request: EvaluationRequest) -> EvaluationResult {
    let sp = ctx.spinner("Evaluating...");
    let result = ctx.engine.evaluate(request).await;
    sp.finish_and_clear();

    if !result.is_degraded() {
        ctx.notify(Notification::evaluation_complete()).await;
    }
    result
}

/// Evaluate a question/answer pair given on the command line
pub async fn evaluate(ctx: &CommandContext, request: EvaluationRequest) -> Result<()> {
    let result = run(ctx, request).await;
    println!("{}", ctx.render(&result)?);
    Ok(())
}

/// Evaluate the built-in sample request
pub async fn sample(ctx: &CommandContext, with_context: bool) -> Result<()> {
    let request = if with_context {
        samples::sample_request()
    } else {
        samples::sample_request_without_context()
    };

    if !ctx.format.is_machine_readable() {
        println!("{}", colors::bold("Sample evaluation"));
    }
    evaluate(ctx, request).await
}

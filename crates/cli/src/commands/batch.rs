//! Batch evaluation commands

use anyhow::Result;
use qa_eval_domain::EvaluationRequest;
use std::path::Path;
use tracing::info;

use crate::commands::CommandContext;
use crate::input::load_requests;
use crate::output::{colors, BatchReport};

/// Evaluate a list of requests and aggregate the results.
///
/// An aborted batch yields an empty report; the engine has already
/// notified the user.
pub async fn run(ctx: &CommandContext, requests: Vec<EvaluationRequest>) -> BatchReport {
    let sp = ctx.spinner(&format!("Evaluating {} requests...", requests.len()));
    let results = ctx.engine.evaluate_batch(requests).await;
    sp.finish_and_clear();

    let aggregate = ctx.engine.aggregate(&results);
    BatchReport::new(results, aggregate)
}

/// Evaluate every request in a JSON or YAML file
pub async fn evaluate_file(ctx: &CommandContext, file: &Path) -> Result<()> {
    let requests = load_requests(file)?;
    info!(file = %file.display(), requests = requests.len(), "Loaded request file");

    if requests.is_empty() && !ctx.format.is_machine_readable() {
        println!("{}", colors::warning("No requests to evaluate"));
        return Ok(());
    }

    let report = run(ctx, requests).await;
    println!("{}", ctx.render(&report)?);
    Ok(())
}

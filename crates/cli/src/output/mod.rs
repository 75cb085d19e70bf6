//! Output formatting for CLI

use anyhow::Result;
use qa_eval_common::AppConfig;
use qa_eval_domain::{AggregateScoreSet, EvaluationResult};
use serde::Serialize;

mod formatters;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    /// Whether the output is meant for another program
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Trait for types that can be formatted for output
pub trait Formattable: Serialize {
    /// Format as table
    fn format_table(&self) -> Result<String>;

    /// Format as JSON
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    /// Format as plain text
    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }

    /// Format using the specified format
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

impl Formattable for EvaluationResult {
    fn format_table(&self) -> Result<String> {
        let mut out = TableFormatter::key_value(TableFormatter::request_rows(self))?;
        out.push('\n');

        if self.is_degraded() {
            out.push_str(&colors::dim("No scores").to_string());
        } else {
            out.push_str(&TableFormatter::scores(self.scores.iter())?);
        }

        if let Some(feedback) = &self.feedback {
            out.push('\n');
            out.push_str(&format!("{} {}", colors::bold("Feedback:"), feedback));
        }
        Ok(out)
    }
}

impl Formattable for AggregateScoreSet {
    fn format_table(&self) -> Result<String> {
        if self.is_empty() {
            return Ok(colors::dim("No scores to aggregate").to_string());
        }
        TableFormatter::scores(self.iter())
    }
}

/// Results of a batch run with their aggregate
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<EvaluationResult>,
    pub aggregate: AggregateScoreSet,
}

impl BatchReport {
    pub fn new(results: Vec<EvaluationResult>, aggregate: AggregateScoreSet) -> Self {
        Self { results, aggregate }
    }
}

impl Formattable for BatchReport {
    fn format_table(&self) -> Result<String> {
        let mut sections = Vec::with_capacity(self.results.len() + 1);

        for (index, result) in self.results.iter().enumerate() {
            sections.push(format!(
                "{}\n{}",
                colors::bold(&format!("Result {}", index + 1)),
                result.format_table()?
            ));
        }

        sections.push(format!(
            "{}\n{}",
            colors::bold("Aggregate"),
            self.aggregate.format_table()?
        ));

        Ok(sections.join("\n\n"))
    }
}

impl Formattable for AppConfig {
    fn format_table(&self) -> Result<String> {
        TableFormatter::key_value(vec![
            (
                "scoring.simulated_latency_ms",
                self.scoring.simulated_latency_ms.to_string(),
            ),
            ("scoring.min_score", self.scoring.min_score.to_string()),
            ("scoring.max_score", self.scoring.max_score.to_string()),
            (
                "scoring.seed",
                self.scoring
                    .seed
                    .map_or_else(|| "(random)".to_string(), |s| s.to_string()),
            ),
            ("telemetry.service_name", self.telemetry.service_name.clone()),
            ("telemetry.json_logging", self.telemetry.json_logging.to_string()),
            ("telemetry.log_level", self.telemetry.log_level.clone()),
        ])
    }
}

/// Color helpers
pub mod colors {
    use colored::*;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    pub fn bold(s: &str) -> ColoredString {
        s.bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_eval_domain::{EvaluationRequest, ScoreDimension, ScoreSet};

    fn scored_result() -> EvaluationResult {
        EvaluationResult::from_request(
            EvaluationRequest::new("What is Rust?", "A language."),
            ScoreSet::new()
                .with(ScoreDimension::Relevance, 0.91)
                .with(ScoreDimension::Fluency, 0.72),
            Some("Well written.".to_string()),
        )
    }

    #[test]
    fn test_only_json_is_machine_readable() {
        assert!(OutputFormat::Json.is_machine_readable());
        assert!(!OutputFormat::Table.is_machine_readable());
        assert!(!OutputFormat::Plain.is_machine_readable());
    }

    #[test]
    fn test_result_table_omits_absent_dimensions() {
        colored::control::set_override(false);
        let table = scored_result().format_table().unwrap();

        assert!(table.contains("Relevance"));
        assert!(table.contains("0.91"));
        assert!(table.contains("Fluency"));
        assert!(!table.contains("Recall"));
        assert!(!table.contains("Coherence"));
        assert!(table.contains("Feedback: Well written."));
    }

    #[test]
    fn test_degraded_result_table() {
        colored::control::set_override(false);
        let result = EvaluationResult::from_request(
            EvaluationRequest::new("q", "a"),
            ScoreSet::new(),
            Some("Evaluation failed due to an internal error.".to_string()),
        );

        let table = result.format_table().unwrap();

        assert!(table.contains("No scores"));
        assert!(table.contains("internal error"));
    }

    #[test]
    fn test_result_json_uses_camel_case() {
        let json = scored_result().format(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["scores"]["relevance"], 0.91);
        assert!(value.get("groundTruth").is_none());
    }

    #[test]
    fn test_batch_report_lists_results_then_aggregate() {
        colored::control::set_override(false);
        let results = vec![scored_result(), scored_result()];
        let aggregate = qa_eval_application::aggregate(&results);
        let report = BatchReport::new(results, aggregate);

        let table = report.format_table().unwrap();
        let first = table.find("Result 1").unwrap();
        let second = table.find("Result 2").unwrap();
        let summary = table.find("Aggregate").unwrap();

        assert!(first < second && second < summary);
    }

    #[test]
    fn test_empty_aggregate_table() {
        colored::control::set_override(false);
        let table = AggregateScoreSet::new().format_table().unwrap();
        assert_eq!(table, "No scores to aggregate");
    }
}

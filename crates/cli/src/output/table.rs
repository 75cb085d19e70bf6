//! Table formatting utilities

use anyhow::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};
use qa_eval_domain::{EvaluationResult, ScoreDimension, ScoreRating};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a key-value table
    pub fn key_value(items: Vec<(&str, String)>) -> Result<String> {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![key, &value]);
        }

        Ok(table.to_string())
    }

    /// Score table with one row per present dimension, colored by rating
    pub fn scores(scores: impl Iterator<Item = (ScoreDimension, f64)>) -> Result<String> {
        let mut table = Self::new();
        table.set_header(vec!["Dimension", "Score", "Rating"]);

        for (dimension, score) in scores {
            let rating = ScoreRating::for_score(score);
            table.add_row(vec![
                Cell::new(dimension.display_name()),
                rated_cell(format!("{score:.2}"), rating),
                rated_cell(rating.to_string(), rating),
            ]);
        }

        Ok(table.to_string())
    }

    /// Rows describing the request a result answers
    pub fn request_rows(result: &EvaluationResult) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Question", result.question.clone()),
            ("Answer", result.answer.clone()),
        ];
        if let Some(ground_truth) = &result.ground_truth {
            rows.push(("Ground truth", ground_truth.clone()));
        }
        if let Some(context) = &result.retrieved_context {
            rows.push(("Context passages", context.len().to_string()));
        }
        rows
    }
}

fn rated_cell(text: String, rating: ScoreRating) -> Cell {
    let cell = Cell::new(text);
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return cell;
    }
    match rating {
        ScoreRating::Good => cell.fg(Color::Green),
        ScoreRating::Neutral => cell.fg(Color::Yellow),
        ScoreRating::Poor => cell.fg(Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_eval_domain::{EvaluationRequest, ScoreSet};

    #[test]
    fn test_key_value_table() {
        let items = vec![("Question", "What is Rust?".to_string())];
        let table = TableFormatter::key_value(items).unwrap();
        assert!(table.contains("What is Rust?"));
    }

    #[test]
    fn test_scores_table_rates_each_row() {
        let scores = ScoreSet::new()
            .with(ScoreDimension::Relevance, 0.9)
            .with(ScoreDimension::Coherence, 0.7)
            .with(ScoreDimension::Fluency, 0.5);

        let table = TableFormatter::scores(scores.iter()).unwrap();

        assert!(table.contains("0.90"));
        assert!(table.contains("good"));
        assert!(table.contains("neutral"));
        assert!(table.contains("poor"));
    }

    #[test]
    fn test_request_rows_skip_missing_fields() {
        let bare = EvaluationResult::from_request(EvaluationRequest::new("q", "a"), ScoreSet::new(), None);
        assert_eq!(TableFormatter::request_rows(&bare).len(), 2);

        let full = EvaluationResult::from_request(
            EvaluationRequest::new("q", "a")
                .with_ground_truth("g")
                .with_retrieved_context(["p1", "p2", "p3"]),
            ScoreSet::new(),
            None,
        );
        let rows = TableFormatter::request_rows(&full);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], ("Context passages", "3".to_string()));
    }
}

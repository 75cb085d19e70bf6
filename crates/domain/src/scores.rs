//! Score dimensions, score sets and aggregates.

use crate::errors::{DomainError, DomainResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Round a score to two decimal places, half away from zero.
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Harmonic mean of two scores, `2ab / (a + b)`.
///
/// Returns `0.0` when both inputs are zero.
pub fn harmonic_mean(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum == 0.0 {
        return 0.0;
    }
    2.0 * a * b / sum
}

/// Quality dimensions a QA pair is scored on.
///
/// Variants are declared in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDimension {
    /// How well the answer addresses the question
    Relevance,
    /// Whether the answer states correct facts
    FactualAccuracy,
    /// Logical flow of the answer
    Coherence,
    /// Linguistic quality of the answer
    Fluency,
    /// Share of needed context that was retrieved
    Recall,
    /// Share of retrieved context that was relevant
    Precision,
    /// Harmonic mean of recall and precision
    F1Score,
}

impl ScoreDimension {
    /// All dimensions in canonical order
    pub const ALL: [ScoreDimension; 7] = [
        Self::Relevance,
        Self::FactualAccuracy,
        Self::Coherence,
        Self::Fluency,
        Self::Recall,
        Self::Precision,
        Self::F1Score,
    ];

    /// Dimensions scored for every request
    pub const CORE: [ScoreDimension; 4] = [
        Self::Relevance,
        Self::FactualAccuracy,
        Self::Coherence,
        Self::Fluency,
    ];

    /// Wire key of this dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::FactualAccuracy => "factualAccuracy",
            Self::Coherence => "coherence",
            Self::Fluency => "fluency",
            Self::Recall => "recall",
            Self::Precision => "precision",
            Self::F1Score => "f1Score",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::FactualAccuracy => "Factual Accuracy",
            Self::Coherence => "Coherence",
            Self::Fluency => "Fluency",
            Self::Recall => "Recall",
            Self::Precision => "Precision",
            Self::F1Score => "F1 Score",
        }
    }

    /// Whether this dimension only exists when retrieved context was supplied
    pub fn is_rag_metric(&self) -> bool {
        matches!(self, Self::Recall | Self::Precision | Self::F1Score)
    }
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-evaluation scores, one optional value per dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    /// Relevance score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    /// Factual accuracy score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factual_accuracy: Option<f64>,
    /// Coherence score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
    /// Fluency score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluency: Option<f64>,
    /// Retrieval recall score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    /// Retrieval precision score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    /// F1 of recall and precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f1_score: Option<f64>,
}

impl ScoreSet {
    /// Create an empty score set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the score for a dimension
    pub fn get(&self, dimension: ScoreDimension) -> Option<f64> {
        match dimension {
            ScoreDimension::Relevance => self.relevance,
            ScoreDimension::FactualAccuracy => self.factual_accuracy,
            ScoreDimension::Coherence => self.coherence,
            ScoreDimension::Fluency => self.fluency,
            ScoreDimension::Recall => self.recall,
            ScoreDimension::Precision => self.precision,
            ScoreDimension::F1Score => self.f1_score,
        }
    }

    fn slot(&mut self, dimension: ScoreDimension) -> &mut Option<f64> {
        match dimension {
            ScoreDimension::Relevance => &mut self.relevance,
            ScoreDimension::FactualAccuracy => &mut self.factual_accuracy,
            ScoreDimension::Coherence => &mut self.coherence,
            ScoreDimension::Fluency => &mut self.fluency,
            ScoreDimension::Recall => &mut self.recall,
            ScoreDimension::Precision => &mut self.precision,
            ScoreDimension::F1Score => &mut self.f1_score,
        }
    }

    /// Set the score for a dimension
    pub fn with(mut self, dimension: ScoreDimension, score: f64) -> Self {
        *self.slot(dimension) = Some(score);
        self
    }

    /// Set recall and precision, deriving the F1 score from them.
    ///
    /// F1 is left out when either input is zero.
    pub fn with_retrieval(self, recall: f64, precision: f64) -> Self {
        let scores = self
            .with(ScoreDimension::Recall, recall)
            .with(ScoreDimension::Precision, precision);

        if recall > 0.0 && precision > 0.0 {
            scores.with(
                ScoreDimension::F1Score,
                round_score(harmonic_mean(recall, precision)),
            )
        } else {
            scores
        }
    }

    /// Present scores in canonical dimension order
    pub fn iter(&self) -> impl Iterator<Item = (ScoreDimension, f64)> + '_ {
        ScoreDimension::ALL
            .iter()
            .filter_map(move |d| self.get(*d).map(|v| (*d, v)))
    }

    /// Number of dimensions with a score
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no dimension has a score
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any retrieval metric is present
    pub fn has_retrieval_metrics(&self) -> bool {
        self.iter().any(|(dimension, _)| dimension.is_rag_metric())
    }

    /// Check the F1 invariant.
    ///
    /// F1 may only be present alongside non-zero recall and precision, and
    /// must then equal their rounded harmonic mean.
    pub fn f1_is_consistent(&self) -> bool {
        match (self.recall, self.precision, self.f1_score) {
            (Some(r), Some(p), Some(f1)) => {
                r > 0.0 && p > 0.0 && (round_score(harmonic_mean(r, p)) - f1).abs() < 1e-9
            }
            (Some(r), Some(p), None) => r == 0.0 || p == 0.0,
            (_, _, None) => true,
            _ => false,
        }
    }

    /// Ensure every present score lies within `[0, 1]` and F1 agrees with
    /// recall and precision
    pub fn validate(&self) -> DomainResult<()> {
        if let Some((_, v)) = self.iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            return Err(DomainError::ScoreOutOfRange(v));
        }
        if !self.f1_is_consistent() {
            return Err(DomainError::InconsistentF1Score);
        }
        Ok(())
    }
}

/// Per-dimension mean scores across a collection of results.
///
/// Dimensions no input supplied are absent entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateScoreSet {
    means: IndexMap<ScoreDimension, f64>,
}

impl AggregateScoreSet {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mean for a dimension, keeping canonical order
    pub fn with(mut self, dimension: ScoreDimension, mean: f64) -> Self {
        self.means.insert(dimension, mean);
        self.means.sort_keys();
        self
    }

    /// Get the mean for a dimension
    pub fn get(&self, dimension: ScoreDimension) -> Option<f64> {
        self.means.get(&dimension).copied()
    }

    /// Whether the dimension has a mean
    pub fn contains(&self, dimension: ScoreDimension) -> bool {
        self.means.contains_key(&dimension)
    }

    /// Means in canonical dimension order
    pub fn iter(&self) -> impl Iterator<Item = (ScoreDimension, f64)> + '_ {
        self.means.iter().map(|(d, v)| (*d, *v))
    }

    /// Number of dimensions with a mean
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Whether no dimension has a mean
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

impl FromIterator<(ScoreDimension, f64)> for AggregateScoreSet {
    fn from_iter<I: IntoIterator<Item = (ScoreDimension, f64)>>(iter: I) -> Self {
        let mut means: IndexMap<ScoreDimension, f64> = iter.into_iter().collect();
        means.sort_keys();
        Self { means }
    }
}

impl<'de> Deserialize<'de> for AggregateScoreSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let means = IndexMap::<ScoreDimension, f64>::deserialize(deserializer)?;
        Ok(means.into_iter().collect())
    }
}

/// Inclusive range scores are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    min: f64,
    max: f64,
}

impl ScoreRange {
    /// Create a range, rejecting inverted bounds or bounds outside `[0, 1]`
    pub fn new(min: f64, max: f64) -> DomainResult<Self> {
        let in_unit = (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max);
        if !in_unit || min > max {
            return Err(DomainError::InvalidScoreRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0.7, max: 1.0 }
    }
}

/// Presentation rating of a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRating {
    /// Score at or above [`ScoreRating::GOOD_THRESHOLD`]
    Good,
    /// Score between the two thresholds
    Neutral,
    /// Score below [`ScoreRating::POOR_THRESHOLD`]
    Poor,
}

impl ScoreRating {
    /// Scores at or above this are good
    pub const GOOD_THRESHOLD: f64 = 0.8;
    /// Scores below this are poor
    pub const POOR_THRESHOLD: f64 = 0.6;

    /// Rate a score
    pub fn for_score(score: f64) -> Self {
        if score >= Self::GOOD_THRESHOLD {
            Self::Good
        } else if score < Self::POOR_THRESHOLD {
            Self::Poor
        } else {
            Self::Neutral
        }
    }

    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.854), 0.85);
        assert_eq!(round_score(0.855_000_1), 0.86);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.7), 0.7);
    }

    #[test]
    fn test_harmonic_mean() {
        assert!((harmonic_mean(0.8, 0.8) - 0.8).abs() < 1e-12);
        assert_eq!(harmonic_mean(0.0, 0.0), 0.0);
        assert!((harmonic_mean(1.0, 0.5) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_keys() {
        assert_eq!(ScoreDimension::FactualAccuracy.as_str(), "factualAccuracy");
        assert_eq!(ScoreDimension::F1Score.as_str(), "f1Score");
        assert_eq!(
            serde_json::to_string(&ScoreDimension::F1Score).unwrap(),
            "\"f1Score\""
        );
    }

    #[test]
    fn test_rag_dimensions() {
        let rag: Vec<_> = ScoreDimension::ALL
            .iter()
            .filter(|d| d.is_rag_metric())
            .collect();
        assert_eq!(rag.len(), 3);
        assert!(ScoreDimension::CORE.iter().all(|d| !d.is_rag_metric()));
    }

    #[test]
    fn test_score_set_with_retrieval() {
        let scores = ScoreSet::new().with_retrieval(0.9, 0.8);
        assert_eq!(scores.recall, Some(0.9));
        assert_eq!(scores.precision, Some(0.8));
        assert_eq!(scores.f1_score, Some(0.85));
        assert!(scores.f1_is_consistent());
    }

    #[test]
    fn test_f1_consistency() {
        let orphan = ScoreSet::new().with(ScoreDimension::F1Score, 0.8);
        assert!(!orphan.f1_is_consistent());

        let wrong = ScoreSet::new()
            .with(ScoreDimension::Recall, 0.8)
            .with(ScoreDimension::Precision, 0.8)
            .with(ScoreDimension::F1Score, 0.9);
        assert!(!wrong.f1_is_consistent());

        assert!(ScoreSet::new().f1_is_consistent());
    }

    #[test]
    fn test_zero_retrieval_score_omits_f1() {
        let scores = ScoreSet::new().with_retrieval(0.0, 0.0);
        assert_eq!(scores.recall, Some(0.0));
        assert_eq!(scores.precision, Some(0.0));
        assert_eq!(scores.f1_score, None);
        assert!(scores.f1_is_consistent());

        let one_sided = ScoreSet::new().with_retrieval(0.9, 0.0);
        assert_eq!(one_sided.f1_score, None);
        assert!(one_sided.f1_is_consistent());

        let missing = ScoreSet::new()
            .with(ScoreDimension::Recall, 0.9)
            .with(ScoreDimension::Precision, 0.8);
        assert!(!missing.f1_is_consistent());
    }

    #[test]
    fn test_aggregate_deserializes_into_canonical_order() {
        let aggregate: AggregateScoreSet =
            serde_json::from_str(r#"{"f1Score":0.8,"fluency":0.75,"relevance":0.9}"#).unwrap();

        let dims: Vec<_> = aggregate.iter().map(|(d, _)| d).collect();
        assert_eq!(
            dims,
            vec![ScoreDimension::Relevance, ScoreDimension::Fluency, ScoreDimension::F1Score]
        );
        assert_eq!(
            serde_json::to_string(&aggregate).unwrap(),
            r#"{"relevance":0.9,"fluency":0.75,"f1Score":0.8}"#
        );
    }

    #[test]
    fn test_score_set_serialization_omits_absent() {
        let scores = ScoreSet::new()
            .with(ScoreDimension::Relevance, 0.9)
            .with(ScoreDimension::FactualAccuracy, 0.8);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json, serde_json::json!({"relevance": 0.9, "factualAccuracy": 0.8}));

        let empty = serde_json::to_string(&ScoreSet::new()).unwrap();
        assert_eq!(empty, "{}");
    }

    #[test]
    fn test_score_set_iter_order() {
        let scores = ScoreSet::new()
            .with(ScoreDimension::Fluency, 0.75)
            .with(ScoreDimension::Relevance, 0.95);
        let dims: Vec<_> = scores.iter().map(|(d, _)| d).collect();
        assert_eq!(dims, vec![ScoreDimension::Relevance, ScoreDimension::Fluency]);
        assert_eq!(scores.len(), 2);
        assert!(!scores.has_retrieval_metrics());
    }

    #[test]
    fn test_score_set_validate() {
        assert!(ScoreSet::new().with(ScoreDimension::Coherence, 0.5).validate().is_ok());
        assert_eq!(
            ScoreSet::new().with(ScoreDimension::Coherence, 1.2).validate(),
            Err(DomainError::ScoreOutOfRange(1.2))
        );
        assert!(ScoreSet::new().with_retrieval(0.8, 0.9).validate().is_ok());
        assert_eq!(
            ScoreSet::new().with(ScoreDimension::F1Score, 0.85).validate(),
            Err(DomainError::InconsistentF1Score)
        );
    }

    #[test]
    fn test_aggregate_keeps_canonical_order() {
        let aggregate = AggregateScoreSet::new()
            .with(ScoreDimension::F1Score, 0.8)
            .with(ScoreDimension::Relevance, 0.9);
        let dims: Vec<_> = aggregate.iter().map(|(d, _)| d).collect();
        assert_eq!(dims, vec![ScoreDimension::Relevance, ScoreDimension::F1Score]);

        let json = serde_json::to_string(&aggregate).unwrap();
        assert_eq!(json, r#"{"relevance":0.9,"f1Score":0.8}"#);
    }

    #[test]
    fn test_score_range() {
        let range = ScoreRange::default();
        assert_eq!(range.min(), 0.7);
        assert!((range.span() - 0.3).abs() < 1e-12);

        assert!(ScoreRange::new(0.9, 0.1).is_err());
        assert!(ScoreRange::new(-0.1, 0.5).is_err());
        assert!(ScoreRange::new(0.5, 1.1).is_err());
        assert!(ScoreRange::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(ScoreRating::for_score(0.8), ScoreRating::Good);
        assert_eq!(ScoreRating::for_score(1.0), ScoreRating::Good);
        assert_eq!(ScoreRating::for_score(0.79), ScoreRating::Neutral);
        assert_eq!(ScoreRating::for_score(0.6), ScoreRating::Neutral);
        assert_eq!(ScoreRating::for_score(0.59), ScoreRating::Poor);
        assert_eq!(ScoreRating::Poor.to_string(), "poor");
    }
}

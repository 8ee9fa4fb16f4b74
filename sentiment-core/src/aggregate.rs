//! # Aggregator
//!
//! Reduces per-sentence scores into a document-level verdict: the overall
//! score is the mean sentence valence, the label comes from configurable
//! classification thresholds, and the breakdown reports the fraction of
//! sentences in each class.
//!
//! Invariants:
//! - for any non-empty input the three ratios sum to 1.0 (within
//!   floating-point tolerance);
//! - empty input produces score 0.0, label `Neutral`, all ratios 0.0 and
//!   `sentence_count == 0` — the explicit "no sentences" indicator, instead
//!   of ratios that silently fail to sum to 1;
//! - `sentence_scores` keeps document order (the UI points at the most
//!   positive/negative sentence by position).

use serde::{Deserialize, Serialize};

use crate::scorer::SentenceScore;

/// Document-level verdict classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Classification cut-offs, following the VADER convention of ±0.05.
///
/// Exposed as configuration rather than constants: a stricter caller can
/// widen the neutral band without touching the scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Scores strictly above this are Positive.
    pub positive: f64,
    /// Scores strictly below this are Negative.
    pub negative: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
        }
    }
}

impl ClassificationThresholds {
    /// Classifies a single valence against the cut-offs.
    pub fn classify(&self, valence: f64) -> SentimentLabel {
        if valence > self.positive {
            SentimentLabel::Positive
        } else if valence < self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Aggregated document statistics, before the orchestrator merges in
/// language metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBreakdown {
    pub overall_score: f64,
    pub label: SentimentLabel,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    /// 0 means "no sentences": the ratios above are all 0.0 and carry no
    /// distribution information.
    pub sentence_count: usize,
    /// Per-sentence scores in document order.
    pub sentence_scores: Vec<SentenceScore>,
}

/// Reduces sentence scores into a document verdict.
pub fn aggregate(
    scores: Vec<SentenceScore>,
    thresholds: &ClassificationThresholds,
) -> DocumentBreakdown {
    if scores.is_empty() {
        return DocumentBreakdown {
            overall_score: 0.0,
            label: SentimentLabel::Neutral,
            positive_ratio: 0.0,
            negative_ratio: 0.0,
            neutral_ratio: 0.0,
            sentence_count: 0,
            sentence_scores: scores,
        };
    }

    let count = scores.len();
    let overall_score = scores.iter().map(|s| s.valence).sum::<f64>() / count as f64;

    let mut positive = 0usize;
    let mut negative = 0usize;
    for score in &scores {
        match thresholds.classify(score.valence) {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => {}
        }
    }
    let neutral = count - positive - negative;

    DocumentBreakdown {
        overall_score,
        label: thresholds.classify(overall_score),
        positive_ratio: positive as f64 / count as f64,
        negative_ratio: negative as f64 / count as f64,
        neutral_ratio: neutral as f64 / count as f64,
        sentence_count: count,
        sentence_scores: scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str, valence: f64) -> SentenceScore {
        SentenceScore {
            text: text.to_string(),
            valence,
            matched_terms: vec![],
        }
    }

    #[test]
    fn test_empty_input_is_neutral_with_zero_ratios() {
        let breakdown = aggregate(vec![], &ClassificationThresholds::default());
        assert_eq!(breakdown.overall_score, 0.0);
        assert_eq!(breakdown.label, SentimentLabel::Neutral);
        assert_eq!(breakdown.sentence_count, 0);
        assert_eq!(breakdown.positive_ratio, 0.0);
        assert_eq!(breakdown.negative_ratio, 0.0);
        assert_eq!(breakdown.neutral_ratio, 0.0);
    }

    #[test]
    fn test_ratios_sum_to_one() {
        let scores = vec![
            score("a", 0.4),
            score("b", -0.3),
            score("c", 0.0),
            score("d", 0.2),
            score("e", -0.6),
            score("f", 0.01),
            score("g", 0.7),
        ];
        let breakdown = aggregate(scores, &ClassificationThresholds::default());
        let sum = breakdown.positive_ratio + breakdown.negative_ratio + breakdown.neutral_ratio;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_score_is_mean() {
        let scores = vec![score("a", 0.5), score("b", -0.1)];
        let breakdown = aggregate(scores, &ClassificationThresholds::default());
        assert!((breakdown.overall_score - 0.2).abs() < 1e-12);
        assert_eq!(breakdown.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_threshold_boundaries_are_neutral() {
        let thresholds = ClassificationThresholds::default();
        assert_eq!(thresholds.classify(0.05), SentimentLabel::Neutral);
        assert_eq!(thresholds.classify(-0.05), SentimentLabel::Neutral);
        assert_eq!(thresholds.classify(0.050001), SentimentLabel::Positive);
        assert_eq!(thresholds.classify(-0.050001), SentimentLabel::Negative);
    }

    #[test]
    fn test_custom_thresholds() {
        let wide = ClassificationThresholds {
            positive: 0.3,
            negative: -0.3,
        };
        assert_eq!(wide.classify(0.2), SentimentLabel::Neutral);
        assert_eq!(wide.classify(0.4), SentimentLabel::Positive);
    }

    #[test]
    fn test_sentence_order_preserved() {
        let scores = vec![score("first", 0.9), score("second", -0.9), score("third", 0.0)];
        let breakdown = aggregate(scores, &ClassificationThresholds::default());
        let order: Vec<&str> = breakdown
            .sentence_scores
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }
}

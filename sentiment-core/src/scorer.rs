//! # Lexicon Scorer
//!
//! Maps a single sentence to a valence score in [-1, 1] using the polarity
//! lexicon with local context adjustment. The procedure per matched term:
//!
//! 1. Look up the base valence of each token.
//! 2. If the immediately preceding token is an intensifier, scale the
//!    magnitude by its factor (boosters > 1, diminishers < 1).
//! 3. If a negation token appears within the look-back window (default 3
//!    tokens), flip the sign and damp the magnitude by the negation factor —
//!    "not good" is negative, but weaker than "bad".
//! 4. Sum the adjusted valences and squash through `x / sqrt(x² + α)` so the
//!    result saturates inside [-1, 1] regardless of sentence length.
//!
//! The scorer is a pure function: same sentence, same lexicon, same config →
//! identical score. An empty or unmatched sentence scores exactly 0.0.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::tokenizer::tokenize;

/// Tunable constants of the scorer.
///
/// Defaults follow the VADER heuristics rescaled to unit-range weights:
/// a 3-token negation window, a 0.74 damp on sign flips, and α = 15 in the
/// saturation denominator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// How many tokens before a matched term are scanned for a negation.
    pub negation_window: usize,
    /// Magnitude multiplier applied when a negation flips a term's sign.
    pub negation_damp: f64,
    /// α of the saturating normalization `x / sqrt(x² + α)`.
    pub saturation_alpha: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            negation_window: 3,
            negation_damp: 0.74,
            saturation_alpha: 15.0,
        }
    }
}

/// Score of a single sentence, in document order within the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceScore {
    /// The sentence text, verbatim as segmented from the document.
    pub text: String,
    /// Valence in [-1, 1]: negative = negative sentiment.
    pub valence: f64,
    /// Lexicon terms that contributed, with their context-adjusted weights,
    /// in sentence order. Unmatched tokens are not recorded.
    pub matched_terms: Vec<(String, f64)>,
}

/// Scores one sentence against the lexicon. Never fails; an empty sentence
/// yields valence 0.0 with no matched terms.
pub fn score_sentence(sentence: &str, lexicon: &Lexicon, config: &ScorerConfig) -> SentenceScore {
    let tokens = tokenize(sentence);
    let mut matched_terms = Vec::new();
    let mut sum = 0.0;

    for (i, token) in tokens.iter().enumerate() {
        let Some(base) = lexicon.valence(token) else {
            continue;
        };

        let mut weight = base;

        // Intensifier immediately preceding the term
        if i > 0 {
            if let Some(factor) = lexicon.intensity(&tokens[i - 1]) {
                weight *= factor;
            }
        }

        // Negation anywhere in the look-back window flips and damps
        let window_start = i.saturating_sub(config.negation_window);
        if tokens[window_start..i].iter().any(|t| lexicon.is_negation(t)) {
            weight = -weight * config.negation_damp;
        }

        weight = weight.clamp(-1.0, 1.0);
        sum += weight;
        matched_terms.push((token.clone(), weight));
    }

    SentenceScore {
        text: sentence.to_string(),
        valence: saturate(sum, config.saturation_alpha),
        matched_terms,
    }
}

/// Squashes an unbounded sum into (-1, 1): `x / sqrt(x² + α)`.
fn saturate(x: f64, alpha: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    (x / (x * x + alpha).sqrt()).clamp(-1.0, 1.0)
}

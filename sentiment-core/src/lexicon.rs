//! # Polarity Lexicon
//!
//! The lexicon is the knowledge base of the scorer: a mapping from word to
//! base valence in [-1, 1], plus the two closed word classes that modify
//! matched terms in context — negations and intensifiers/diminishers.
//!
//! The entries blend a general-purpose polarity list with vocabulary that
//! dominates business and financial news (earnings coverage, analyst notes,
//! press releases), since company coverage is the primary input domain.
//! Weights were hand-calibrated against the VADER convention (compound
//! scores classified at ±0.05) after rescaling to the [-1, 1] range.
//!
//! The lexicon is loaded once at startup and is immutable afterwards, so it
//! can be shared freely across concurrent pipeline invocations.

use std::collections::HashMap;

/// Polarity entries: word → base valence in [-1, 1].
///
/// Deliberately excludes domain nouns like "earnings", "quarter" or
/// "company" — those are topics, not sentiment carriers.
const POLARITY: &[(&str, f64)] = &[
    // ===== general positive =====
    ("good", 0.50), ("great", 0.75), ("excellent", 0.85), ("amazing", 0.80),
    ("wonderful", 0.75), ("fantastic", 0.80), ("superb", 0.80), ("outstanding", 0.85),
    ("brilliant", 0.80), ("love", 0.70), ("loved", 0.70), ("best", 0.80),
    ("better", 0.45), ("positive", 0.55), ("happy", 0.60), ("beautiful", 0.60),
    ("perfect", 0.80), ("awesome", 0.75), ("incredible", 0.75), ("impressive", 0.65),
    ("exceptional", 0.80), ("remarkable", 0.65), ("pleasant", 0.50), ("delightful", 0.65),
    ("satisfying", 0.55), ("satisfied", 0.50), ("favorable", 0.55), ("promising", 0.55),
    ("optimistic", 0.55), ("confident", 0.50), ("welcome", 0.40), ("praise", 0.55),
    ("praised", 0.55), ("win", 0.60), ("winner", 0.60), ("winning", 0.60),
    ("success", 0.70), ("successful", 0.70), ("succeed", 0.60), ("achievement", 0.60),
    // ===== business/financial positive =====
    ("growth", 0.55), ("grew", 0.45), ("growing", 0.45), ("profit", 0.60),
    ("profitable", 0.65), ("gain", 0.50), ("gains", 0.50), ("gained", 0.45),
    ("surge", 0.55), ("surged", 0.55), ("soar", 0.60), ("soared", 0.60),
    ("rally", 0.50), ("rallied", 0.50), ("record", 0.35), ("beat", 0.45),
    ("exceeded", 0.50), ("upgrade", 0.50), ("upgraded", 0.50), ("outperform", 0.55),
    ("outperformed", 0.55), ("strong", 0.50), ("strength", 0.45), ("robust", 0.50),
    ("resilient", 0.45), ("thriving", 0.65), ("flourishing", 0.65), ("prosperous", 0.60),
    ("innovative", 0.50), ("efficient", 0.45), ("reliable", 0.45), ("valuable", 0.45),
    ("beneficial", 0.50), ("advantageous", 0.50), ("recovery", 0.40), ("rebound", 0.40),
    ("expansion", 0.40), ("momentum", 0.35), ("breakthrough", 0.60), ("milestone", 0.40),
    ("dividend", 0.25), ("opportunity", 0.35), ("opportunities", 0.35),
    // ===== general negative =====
    ("bad", -0.65), ("terrible", -0.80), ("awful", -0.80), ("horrible", -0.80),
    ("poor", -0.55), ("worst", -0.85), ("worse", -0.55), ("hate", -0.70),
    ("hated", -0.70), ("dislike", -0.50), ("negative", -0.55), ("sad", -0.50),
    ("unhappy", -0.55), ("angry", -0.60), ("ugly", -0.55), ("useless", -0.65),
    ("worthless", -0.70), ("pathetic", -0.70), ("mediocre", -0.40), ("inferior", -0.50),
    ("disappointing", -0.70), ("disappointed", -0.65), ("disappointment", -0.65),
    ("failure", -0.75), ("failed", -0.65), ("fail", -0.65), ("failing", -0.65),
    ("problem", -0.45), ("problems", -0.45), ("trouble", -0.50), ("troubled", -0.55),
    ("crisis", -0.65), ("disaster", -0.80), ("disastrous", -0.80), ("chaos", -0.65),
    ("mistake", -0.50), ("mistakes", -0.50), ("wrong", -0.45), ("broken", -0.50),
    // ===== business/financial negative =====
    ("loss", -0.55), ("losses", -0.55), ("lost", -0.45), ("decline", -0.50),
    ("declined", -0.50), ("declining", -0.50), ("drop", -0.45), ("dropped", -0.45),
    ("plunge", -0.65), ("plunged", -0.65), ("slump", -0.55), ("slumped", -0.55),
    ("crash", -0.70), ("crashed", -0.70), ("tumble", -0.55), ("tumbled", -0.55),
    ("miss", -0.40), ("missed", -0.45), ("downgrade", -0.55), ("downgraded", -0.55),
    ("underperform", -0.55), ("underperformed", -0.55), ("weak", -0.50), ("weakness", -0.50),
    ("weakening", -0.50), ("layoff", -0.60), ("layoffs", -0.60), ("cuts", -0.35),
    ("debt", -0.35), ("deficit", -0.45), ("bankruptcy", -0.80), ("bankrupt", -0.80),
    ("insolvent", -0.75), ("default", -0.60), ("lawsuit", -0.55), ("sued", -0.55),
    ("fraud", -0.80), ("scandal", -0.70), ("fine", -0.30), ("fined", -0.50),
    ("penalty", -0.45), ("investigation", -0.40), ("probe", -0.40), ("recall", -0.50),
    ("warning", -0.40), ("warned", -0.40), ("concern", -0.40), ("concerns", -0.40),
    ("concerned", -0.40), ("worried", -0.50), ("worries", -0.45), ("fear", -0.55),
    ("fears", -0.55), ("risk", -0.35), ("risks", -0.35), ("risky", -0.40),
    ("uncertainty", -0.40), ("uncertain", -0.35), ("volatile", -0.35), ("volatility", -0.35),
    ("slowdown", -0.45), ("stagnant", -0.40), ("struggling", -0.55), ("struggle", -0.50),
    ("struggled", -0.50), ("challenges", -0.35), ("challenging", -0.35), ("headwinds", -0.40),
    ("pressure", -0.35), ("shortfall", -0.50), ("overpriced", -0.40), ("expensive", -0.25),
    ("unreliable", -0.50), ("unstable", -0.45), ("scam", -0.80), ("delays", -0.35),
    ("delayed", -0.35), ("shutdown", -0.50), ("closure", -0.45), ("resignation", -0.35),
];

/// Tokens that flip the sign of a matched term inside the look-back window.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "nobody",
    "cannot", "can't", "cant", "won't", "wont", "don't", "dont", "doesn't",
    "doesnt", "didn't", "didnt", "isn't", "isnt", "aren't", "arent",
    "wasn't", "wasnt", "weren't", "werent", "hasn't", "hasnt", "haven't",
    "havent", "hadn't", "hadnt", "couldn't", "couldnt", "shouldn't",
    "shouldnt", "wouldn't", "wouldnt", "hardly", "barely", "scarcely",
    "without", "lacks", "lacking", "lack",
];

/// Intensity modifiers: word → multiplicative factor applied to the
/// immediately following matched term. Boosters carry a factor > 1,
/// diminishers a factor < 1 (e.g. "slightly disappointing" is softer
/// than "disappointing").
const INTENSIFIERS: &[(&str, f64)] = &[
    // boosters
    ("very", 1.25), ("really", 1.20), ("extremely", 1.40), ("absolutely", 1.35),
    ("incredibly", 1.40), ("highly", 1.30), ("hugely", 1.35), ("exceptionally", 1.35),
    ("particularly", 1.15), ("remarkably", 1.30), ("significantly", 1.25),
    ("substantially", 1.25), ("strongly", 1.30), ("totally", 1.30), ("deeply", 1.30),
    ("sharply", 1.25), ("severely", 1.35), ("massively", 1.35), ("so", 1.15),
    // diminishers
    ("slightly", 0.70), ("somewhat", 0.75), ("marginally", 0.65), ("mildly", 0.75),
    ("moderately", 0.80), ("partly", 0.80), ("partially", 0.80), ("relatively", 0.85),
    ("fairly", 0.85), ("modestly", 0.75),
];

/// The immutable polarity lexicon shared by all pipeline invocations.
///
/// Construction validates the embedded tables: an out-of-range weight is a
/// build-time data bug, surfaced as an error by [`Lexicon::load`] so a
/// corrupt deployment fails loudly at startup instead of scoring garbage.
pub struct Lexicon {
    polarity: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Lexicon {
    /// Loads the embedded lexicon, validating weight ranges.
    pub fn load() -> Result<Self, String> {
        let mut polarity = HashMap::with_capacity(POLARITY.len());
        for &(word, weight) in POLARITY {
            if !(-1.0..=1.0).contains(&weight) {
                return Err(format!("lexicon entry '{word}' has weight {weight} outside [-1, 1]"));
            }
            polarity.insert(word, weight);
        }
        let mut intensifiers = HashMap::with_capacity(INTENSIFIERS.len());
        for &(word, factor) in INTENSIFIERS {
            if factor <= 0.0 {
                return Err(format!("intensifier '{word}' has non-positive factor {factor}"));
            }
            intensifiers.insert(word, factor);
        }
        Ok(Self {
            polarity,
            negations: NEGATIONS.to_vec(),
            intensifiers,
        })
    }

    /// Base valence for a lower-cased token, if the token is a sentiment carrier.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.polarity.get(token).copied()
    }

    /// True when the token negates a following sentiment term.
    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(&token)
    }

    /// Intensity factor for a booster/diminisher token, if it is one.
    pub fn intensity(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }

    /// Number of polarity entries (used for diagnostics).
    pub fn len(&self) -> usize {
        self.polarity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarity.is_empty()
    }
}

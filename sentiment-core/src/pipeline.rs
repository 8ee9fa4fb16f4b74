//! # Sentiment Pipeline — Orchestrator
//!
//! The pipeline connects every stage behind a single synchronous entry
//! point, [`SentimentPipeline::analyze`]:
//!
//! 1. **Resolve**: raw text is taken from the request, or fetched and
//!    extracted from a URL ([`crate::extract`]).
//! 2. **Normalize**: the document is brought into the canonical scoring
//!    language, with a recorded fallback on translation faults
//!    ([`crate::language`]).
//! 3. **Segment**: UAX-29 sentence boundaries ([`crate::tokenizer`]).
//! 4. **Score**: each sentence through the lexicon scorer, in parallel via
//!    rayon — scoring is pure, so order is restored by collection
//!    ([`crate::scorer`]).
//! 5. **Aggregate**: sentence scores reduce to the document verdict
//!    ([`crate::aggregate`]).
//!
//! Results are cached under a content fingerprint (SHA-256 of the canonical
//! request plus the scoring configuration) in a bounded LRU; concurrent
//! identical requests share one computation ([`crate::cache`]).
//!
//! ## Example
//!
//! ```rust
//! use sentiment_core::{AnalysisRequest, SentimentPipeline};
//!
//! let pipeline = SentimentPipeline::new().unwrap();
//! let request = AnalysisRequest::text("Not bad at all, great quarter!");
//! let result = pipeline.analyze(&request).unwrap();
//! println!("{:?} ({:.3})", result.label, result.overall_score);
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::aggregate::{aggregate, ClassificationThresholds, SentimentLabel};
use crate::cache::ResultCache;
use crate::error::AnalysisError;
use crate::extract::{extract, ExtractorConfig, HttpFetcher, PageFetcher};
use crate::language::{
    detect_language, normalize, ExtractedDocument, NoTranslation, NormalizerConfig, Translator,
};
use crate::lexicon::Lexicon;
use crate::scorer::{score_sentence, ScorerConfig, SentenceScore};
use crate::tokenizer::split_sentences;

/// What to analyze: pasted text, or a page to fetch. Exactly one of the two
/// by construction — the sum type replaces any runtime shape probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSource {
    Text(String),
    Url(String),
}

/// An immutable analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub source: RequestSource,
    /// Caller-asserted source language; overrides automatic detection.
    pub requested_language: Option<String>,
}

impl AnalysisRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            source: RequestSource::Text(text.into()),
            requested_language: None,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source: RequestSource::Url(url.into()),
            requested_language: None,
        }
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.requested_language = Some(code.into());
        self
    }
}

/// Language metadata merged into the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Language the document arrived in.
    pub original: String,
    /// True only when the translation collaborator ran successfully.
    pub was_translated: bool,
    /// True when translation was needed but skipped (see [`crate::language`]).
    pub fallback: bool,
}

/// The terminal, immutable result of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Mean sentence valence in [-1, 1].
    pub overall_score: f64,
    pub label: SentimentLabel,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
    /// 0 is the explicit "no sentences" indicator.
    pub sentence_count: usize,
    /// Per-sentence scores in document order.
    pub sentence_scores: Vec<SentenceScore>,
    pub language: LanguageInfo,
}

/// Every tunable of the pipeline in one place, dependency-injected at
/// construction. Defaults match the documented constants of each stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub scorer: ScorerConfig,
    pub thresholds: ClassificationThresholds,
    pub normalizer: NormalizerConfig,
    pub extractor: ExtractorConfig,
    /// Maximum number of cached results.
    pub cache_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            thresholds: ClassificationThresholds::default(),
            normalizer: NormalizerConfig::default(),
            extractor: ExtractorConfig::default(),
            cache_capacity: 256,
        }
    }
}

/// The sentiment analysis pipeline.
///
/// Stateless with respect to requests: the lexicon and collaborators are
/// read-only after construction, the result cache is internally
/// synchronized, and every method takes `&self` — one instance serves
/// concurrent callers without external locking.
pub struct SentimentPipeline {
    lexicon: Lexicon,
    config: PipelineConfig,
    fetcher: Arc<dyn PageFetcher>,
    translator: Arc<dyn Translator>,
    cache: ResultCache,
}

impl SentimentPipeline {
    /// Builds a pipeline with default configuration, the HTTP fetcher and
    /// no translation service (foreign text falls back to as-is scoring).
    pub fn new() -> Result<Self, AnalysisError> {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Result<Self, AnalysisError> {
        let fetcher = Arc::new(HttpFetcher::new(&config.extractor)?);
        Self::with_collaborators(config, fetcher, Arc::new(NoTranslation))
    }

    /// Full dependency injection: used by servers wiring in a real
    /// translation service, and by tests substituting the network.
    pub fn with_collaborators(
        config: PipelineConfig,
        fetcher: Arc<dyn PageFetcher>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self, AnalysisError> {
        let lexicon = Lexicon::load().map_err(AnalysisError::Internal)?;
        let cache = ResultCache::new(config.cache_capacity);
        Ok(Self {
            lexicon,
            config,
            fetcher,
            translator,
            cache,
        })
    }

    /// Analyzes a request, returning either a complete result or a typed
    /// error — never a partial result.
    ///
    /// `Fetch` and `Extraction` errors from the content extractor propagate
    /// verbatim; translation-layer failures are absorbed into the recorded
    /// fallback and never fail the request.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<Arc<AnalysisResult>, AnalysisError> {
        self.validate(request)?;
        let fingerprint = self.fingerprint(request);
        self.cache
            .get_or_compute(&fingerprint, || self.run(request))
    }

    fn validate(&self, request: &AnalysisRequest) -> Result<(), AnalysisError> {
        match &request.source {
            RequestSource::Text(text) if text.trim().is_empty() => Err(
                AnalysisError::InvalidRequest("text contains no analyzable characters".into()),
            ),
            RequestSource::Url(url) if url.trim().is_empty() => {
                Err(AnalysisError::InvalidRequest("empty URL".into()))
            }
            _ => Ok(()),
        }
    }

    /// One full uncached pipeline pass.
    fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let document = self.resolve_document(request)?;
        let normalized = normalize(&document, self.translator.as_ref(), &self.config.normalizer);

        let sentences = split_sentences(&normalized.canonical_text);
        debug!(sentences = sentences.len(), "scoring document");

        let scores: Vec<SentenceScore> = sentences
            .par_iter()
            .map(|sentence| score_sentence(sentence, &self.lexicon, &self.config.scorer))
            .collect();

        let breakdown = aggregate(scores, &self.config.thresholds);
        Ok(AnalysisResult {
            overall_score: breakdown.overall_score,
            label: breakdown.label,
            positive_ratio: breakdown.positive_ratio,
            negative_ratio: breakdown.negative_ratio,
            neutral_ratio: breakdown.neutral_ratio,
            sentence_count: breakdown.sentence_count,
            sentence_scores: breakdown.sentence_scores,
            language: LanguageInfo {
                original: normalized.original_language,
                was_translated: normalized.was_translated,
                fallback: normalized.fallback,
            },
        })
    }

    /// Resolves the request into an [`ExtractedDocument`]: a direct wrap
    /// for pasted text, a fetch + extraction pass for URLs. Language
    /// detection runs here unless the caller asserted a language.
    fn resolve_document(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ExtractedDocument, AnalysisError> {
        let (raw_text, source_url) = match &request.source {
            RequestSource::Text(text) => (text.clone(), None),
            RequestSource::Url(url) => {
                let text = extract(url, self.fetcher.as_ref(), &self.config.extractor)?;
                (text, Some(url.clone()))
            }
        };
        let detected_language = match &request.requested_language {
            Some(code) => code.clone(),
            None => detect_language(&raw_text, &self.config.normalizer),
        };
        Ok(ExtractedDocument {
            raw_text,
            detected_language,
            source_url,
        })
    }

    /// Deterministic content fingerprint: canonical input, language choice
    /// and every scoring constant that shapes the result. Two requests
    /// collide only when they are semantically identical under this key.
    fn fingerprint(&self, request: &AnalysisRequest) -> String {
        let mut hasher = Sha256::new();
        match &request.source {
            RequestSource::Text(text) => {
                hasher.update(b"text\0");
                hasher.update(text.trim().as_bytes());
            }
            RequestSource::Url(url) => {
                hasher.update(b"url\0");
                hasher.update(url.trim().as_bytes());
            }
        }
        hasher.update(b"\0");
        hasher.update(request.requested_language.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"\0");
        hasher.update(self.config.normalizer.target_language.as_bytes());
        for value in [
            self.config.thresholds.positive,
            self.config.thresholds.negative,
            self.config.scorer.negation_damp,
            self.config.scorer.saturation_alpha,
            self.config.scorer.negation_window as f64,
        ] {
            hasher.update(value.to_bits().to_le_bytes());
        }
        let digest = hasher.finalize();
        digest.iter().fold(String::with_capacity(64), |mut out, b| {
            use std::fmt::Write;
            let _ = write!(out, "{b:02x}");
            out
        })
    }

    /// Read-only view of the configuration (used by the web layer to echo
    /// effective thresholds).
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

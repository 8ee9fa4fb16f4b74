//! # sentiment-core — Company Sentiment Analysis Pipeline
//!
//! This crate implements a complete pipeline for analyzing the sentiment
//! expressed about a named company in free-form text or scraped web content.
//! It is designed to be modular and deterministic: every stage is a pure
//! transformation over explicit inputs, and the only shared mutable state is
//! a bounded result cache.
//!
//! ## Architecture
//!
//! Data flows through a linear pipeline, transformed step by step:
//!
//! 1. **Input**: an [`AnalysisRequest`] carrying pasted text or a URL.
//! 2. **Extraction** ([`extract`]): URLs are fetched (bounded timeout) and
//!    their dominant paragraph text recovered, boilerplate discarded.
//! 3. **Normalization** ([`language`]): the source language is detected and
//!    non-canonical text is translated; translation faults degrade
//!    gracefully into a recorded fallback.
//! 4. **Segmentation** ([`tokenizer`]): UAX-29 sentence and word boundaries.
//! 5. **Scoring** ([`scorer`]): each sentence against the polarity
//!    [`lexicon`], with negation and intensifier handling and a saturating
//!    normalization keeping valence in [-1, 1].
//! 6. **Aggregation** ([`aggregate`]): sentence scores reduce to a document
//!    verdict with class ratios.
//!
//! The [`pipeline`] module orchestrates the stages behind one synchronous
//! entry point and caches results by content fingerprint ([`cache`]).
//! [`topics`] and [`summary`] render the result into keywords, a Markdown
//! report and a spoken-summary text for downstream audio synthesis.
//!
//! ## Example
//!
//! ```rust
//! use sentiment_core::{AnalysisRequest, SentimentLabel, SentimentPipeline};
//!
//! let pipeline = SentimentPipeline::new().unwrap();
//!
//! let result = pipeline
//!     .analyze(&AnalysisRequest::text(
//!         "The company's earnings were disappointing.",
//!     ))
//!     .unwrap();
//!
//! assert_eq!(result.label, SentimentLabel::Negative);
//! for sentence in &result.sentence_scores {
//!     println!("{:+.3}  {}", sentence.valence, sentence.text);
//! }
//! ```
//!
//! ## Concurrency
//!
//! One [`SentimentPipeline`] instance serves concurrent callers: the lexicon
//! and collaborators are immutable after construction, every method takes
//! `&self`, and concurrent identical requests share a single computation
//! through the cache's in-flight tracking.

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod extract;
pub mod language;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod tokenizer;
pub mod topics;

pub use aggregate::{ClassificationThresholds, SentimentLabel};
pub use error::AnalysisError;
pub use extract::{ExtractorConfig, HttpFetcher, PageFetcher};
pub use language::{NoTranslation, NormalizerConfig, TranslationError, Translator};
pub use pipeline::{
    AnalysisRequest, AnalysisResult, LanguageInfo, PipelineConfig, RequestSource,
    SentimentPipeline,
};
pub use scorer::{ScorerConfig, SentenceScore};
pub use summary::{render_report, render_spoken_summary};
pub use topics::extract_topics;

//! # Language Normalizer
//!
//! The lexicon is defined in a single canonical language (English by
//! default), so every document is normalized before scoring: detect the
//! source language, and translate when it differs from the canonical one.
//!
//! Translation is an external collaborator behind the [`Translator`] trait.
//! The failure policy is deliberately soft: an inconclusive detection or a
//! failed translation call never aborts the request. The text is scored
//! as-is and the skip is recorded (`was_translated = false`,
//! `fallback = true`) so callers can tell "translated cleanly" from
//! "translation skipped" in the result metadata.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use whatlang::detect;

/// A document ready for normalization: raw text plus its detected language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Text as pasted by the caller or extracted from a page.
    pub raw_text: String,
    /// ISO 639-1 code of the detected (or caller-asserted) language;
    /// `"unknown"` when detection was inconclusive.
    pub detected_language: String,
    /// Where the text came from, when it was fetched from a page.
    pub source_url: Option<String>,
}

/// A document in the canonical scoring language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Text in the canonical language. Invariant: this is always the
    /// language the lexicon is defined in (modulo a recorded fallback).
    pub canonical_text: String,
    /// Language the document arrived in.
    pub original_language: String,
    /// True only when the translation collaborator ran successfully.
    pub was_translated: bool,
    /// True when translation was needed but skipped (inconclusive detection
    /// or a translation-service failure).
    pub fallback: bool,
}

/// Failure of the external translation service. Never surfaced to pipeline
/// callers; absorbed into the fallback policy above.
#[derive(Debug, Error)]
#[error("translation service failure: {0}")]
pub struct TranslationError(pub String);

/// External translation capability.
///
/// Implementations must be cheap to share: the pipeline holds one instance
/// behind an `Arc` and calls it from concurrent invocations.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;
}

/// Default collaborator when no translation service is configured: every
/// call fails, which the normalizer converts into the recorded fallback.
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, _text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        Err(TranslationError(format!(
            "no translation service configured ({source} -> {target})"
        )))
    }
}

/// Tunables of detection and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// The language the lexicon is defined in.
    pub target_language: String,
    /// Detections below this confidence are treated as inconclusive.
    pub min_confidence: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            min_confidence: 0.35,
        }
    }
}

/// Detects the language of `text`, returning an ISO 639-1 code or
/// `"unknown"` when detection is inconclusive.
pub fn detect_language(text: &str, config: &NormalizerConfig) -> String {
    let Some(info) = detect(text) else {
        return "unknown".to_string();
    };
    if info.confidence() < config.min_confidence {
        return "unknown".to_string();
    }
    lang_to_code(info.lang()).to_string()
}

/// Normalizes a document into the canonical scoring language.
///
/// Idempotent for canonical-language input: a second pass over an already
/// normalized document is a no-op with `was_translated = false`.
pub fn normalize(
    doc: &ExtractedDocument,
    translator: &dyn Translator,
    config: &NormalizerConfig,
) -> NormalizedDocument {
    if doc.detected_language == config.target_language {
        return NormalizedDocument {
            canonical_text: doc.raw_text.clone(),
            original_language: doc.detected_language.clone(),
            was_translated: false,
            fallback: false,
        };
    }

    if doc.detected_language == "unknown" {
        warn!("language detection inconclusive, scoring text as-is");
        return NormalizedDocument {
            canonical_text: doc.raw_text.clone(),
            original_language: doc.detected_language.clone(),
            was_translated: false,
            fallback: true,
        };
    }

    match translator.translate(&doc.raw_text, &doc.detected_language, &config.target_language) {
        Ok(translated) => NormalizedDocument {
            canonical_text: translated,
            original_language: doc.detected_language.clone(),
            was_translated: true,
            fallback: false,
        },
        Err(err) => {
            warn!(
                source = %doc.detected_language,
                error = %err,
                "translation failed, scoring untranslated text"
            );
            NormalizedDocument {
                canonical_text: doc.raw_text.clone(),
                original_language: doc.detected_language.clone(),
                was_translated: false,
                fallback: true,
            }
        }
    }
}

/// whatlang's ISO 639-3 enum mapped to the 639-1 codes callers expect.
fn lang_to_code(lang: whatlang::Lang) -> &'static str {
    use whatlang::Lang;
    match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Ben => "bn",
        Lang::Tur => "tr",
        Lang::Vie => "vi",
        Lang::Pol => "pl",
        Lang::Ukr => "uk",
        Lang::Swe => "sv",
        Lang::Ind => "id",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseTranslator;
    impl Translator for UppercaseTranslator {
        fn translate(&self, text: &str, _s: &str, _t: &str) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    struct FailingTranslator;
    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str, _s: &str, _t: &str) -> Result<String, TranslationError> {
            Err(TranslationError("service unavailable".into()))
        }
    }

    fn doc(text: &str, lang: &str) -> ExtractedDocument {
        ExtractedDocument {
            raw_text: text.to_string(),
            detected_language: lang.to_string(),
            source_url: None,
        }
    }

    #[test]
    fn test_detect_english() {
        let config = NormalizerConfig::default();
        let code = detect_language(
            "The quarterly earnings report exceeded analyst expectations by a wide margin.",
            &config,
        );
        assert_eq!(code, "en");
    }

    #[test]
    fn test_detect_inconclusive_on_noise() {
        let config = NormalizerConfig {
            min_confidence: 0.99,
            ..Default::default()
        };
        assert_eq!(detect_language("xq zv pk", &config), "unknown");
    }

    #[test]
    fn test_canonical_language_passes_through() {
        let config = NormalizerConfig::default();
        let normalized = normalize(&doc("Great quarter.", "en"), &NoTranslation, &config);
        assert!(!normalized.was_translated);
        assert!(!normalized.fallback);
        assert_eq!(normalized.canonical_text, "Great quarter.");
    }

    #[test]
    fn test_translation_invoked_for_foreign_text() {
        let config = NormalizerConfig::default();
        let normalized = normalize(&doc("un trimestre excelente", "es"), &UppercaseTranslator, &config);
        assert!(normalized.was_translated);
        assert!(!normalized.fallback);
        assert_eq!(normalized.canonical_text, "UN TRIMESTRE EXCELENTE");
        assert_eq!(normalized.original_language, "es");
    }

    #[test]
    fn test_translation_failure_falls_back() {
        let config = NormalizerConfig::default();
        let normalized = normalize(&doc("un trimestre excelente", "es"), &FailingTranslator, &config);
        assert!(!normalized.was_translated);
        assert!(normalized.fallback);
        assert_eq!(normalized.canonical_text, "un trimestre excelente");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let config = NormalizerConfig::default();
        let first = normalize(&doc("un trimestre excelente", "es"), &UppercaseTranslator, &config);
        // Second pass: the text is already canonical
        let second = normalize(
            &doc(&first.canonical_text, &config.target_language),
            &UppercaseTranslator,
            &config,
        );
        assert!(!second.was_translated);
        assert_eq!(second.canonical_text, first.canonical_text);
    }
}

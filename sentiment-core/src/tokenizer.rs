//! # Tokenization and Sentence Segmentation
//!
//! Two segmentation layers feed the scorer:
//!
//! 1. **Sentences**: the document is split on UAX-29 sentence boundaries
//!    (`unicode-segmentation`), which handles abbreviations, quotes and
//!    non-ASCII punctuation far better than splitting on `.`.
//! 2. **Words**: each sentence is split on UAX-29 word boundaries, lower-cased
//!    and stripped of free-standing punctuation. Word-internal apostrophes
//!    survive ("can't", "won't"), which the negation list relies on.
//!
//! Both functions are pure and allocation-light; the original sentence text
//! is preserved alongside its tokens so results can be displayed verbatim.

use unicode_segmentation::UnicodeSegmentation;

/// Splits a document into sentences, preserving document order.
///
/// Whitespace-only fragments are dropped; surrounding whitespace is trimmed
/// but the sentence text is otherwise untouched.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Tokenizes a sentence into lower-cased words.
///
/// Relies on UAX-29 word boundaries: punctuation and symbols are discarded,
/// contractions stay whole. The typographic apostrophe is folded to `'` so
/// "won’t" and "won't" tokenize identically.
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .unicode_words()
        .map(|w| w.to_lowercase().replace('\u{2019}', "'"))
        .collect()
}

//! # Topic Extraction
//!
//! Frequency-based keyword extraction used to enrich reports: stopwords and
//! short tokens are dropped, remaining unigrams are counted, and adjacent
//! pairs (bigrams) are counted with double weight so multi-word themes like
//! "supply chain" outrank their parts. Candidates that are substrings of an
//! already selected topic are skipped to avoid near-duplicates.
//!
//! This is deliberately simple — no TF-IDF corpus, no embeddings. It runs
//! on a single document and only has to produce a handful of display terms.

use std::collections::HashMap;

use crate::tokenizer::tokenize;

/// English stopwords plus news-domain words that would otherwise dominate
/// every company article.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "than", "that",
    "this", "these", "those", "it", "its", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "shall", "can",
    "not", "no", "nor", "so", "too", "very", "just", "about", "above",
    "after", "again", "against", "all", "also", "any", "because", "before",
    "below", "between", "both", "down", "during", "each", "few", "for",
    "from", "further", "here", "how", "in", "into", "more", "most", "of",
    "off", "on", "once", "only", "other", "our", "out", "over", "own",
    "same", "some", "such", "there", "their", "them", "they", "through",
    "under", "until", "up", "what", "when", "where", "which", "while",
    "who", "whom", "why", "with", "you", "your", "his", "her", "she", "he",
    "we", "us", "as", "at", "by", "to", "i", "me", "my",
    // news-domain noise
    "said", "says", "reported", "according", "company", "companies",
    "business", "year", "quarter", "percent",
];

/// Extracts up to `n` ranked topics from a document.
pub fn extract_topics(text: &str, n: usize) -> Vec<String> {
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(&w.as_str()))
        .filter(|w| w.chars().all(char::is_alphabetic))
        .collect();

    let mut freq: HashMap<String, usize> = HashMap::new();
    for word in &words {
        *freq.entry(word.clone()).or_insert(0) += 1;
    }
    // Bigrams over the filtered stream, weighted double
    for pair in words.windows(2) {
        let phrase = format!("{} {}", pair[0], pair[1]);
        *freq.entry(phrase).or_insert(0) += 2;
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    // Deterministic order: by count desc, then alphabetically
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut topics: Vec<String> = Vec::with_capacity(n);
    for (candidate, _) in ranked {
        let duplicate = topics
            .iter()
            .any(|t| t.contains(&candidate) || candidate.contains(t.as_str()));
        if !duplicate {
            topics.push(candidate);
            if topics.len() >= n {
                break;
            }
        }
    }
    topics
}

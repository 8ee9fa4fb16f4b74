//! # Error Taxonomy
//!
//! Every failure the pipeline can surface to a caller is one of four typed
//! variants. The distinction matters for callers: `InvalidRequest` and
//! `Extraction` are bad input (retrying is futile), `Fetch` is transient
//! (the caller may retry with backoff), and `Internal` indicates a
//! configuration or deployment problem.
//!
//! Translation-layer failures are deliberately absent here: they never abort
//! an analysis. The normalizer absorbs them into a recorded fallback (see
//! [`crate::language`]).

use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request itself is malformed: empty text, or a URL the pipeline
    /// cannot even attempt (e.g. unsupported scheme). Never retried.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Retrieving the page failed: network error, timeout, or non-2xx status.
    /// A single attempt is made per call; callers may retry with backoff.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The page was fetched but contains no analyzable text block above the
    /// minimum length threshold. Reported as "no analyzable content".
    #[error("no analyzable content: {0}")]
    Extraction(String),

    /// An unexpected internal fault (corrupt lexicon, poisoned state).
    /// Indicates a deployment problem rather than bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// True when retrying the identical request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AnalysisError::Fetch { .. })
    }
}

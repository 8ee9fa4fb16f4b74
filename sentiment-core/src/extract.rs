//! # Content Extractor
//!
//! Turns a URL into analyzable text. Fetching goes through the
//! [`PageFetcher`] trait so the network is injectable (tests use canned
//! pages); the default [`HttpFetcher`] is a blocking `reqwest` client with a
//! bounded timeout and a browser user agent, since many news sites refuse
//! the default one.
//!
//! Extraction uses a structural heuristic: the dominant textual content of a
//! page lives in `<p>` elements outside boilerplate containers (`nav`,
//! `header`, `footer`, `aside`, `figure`, forms). Script and style bodies
//! never appear because only paragraph text is collected. A page whose
//! surviving paragraph text stays under the minimum length threshold is "not
//! primarily textual" and reported as [`AnalysisError::Extraction`] — bad
//! input, not a crash.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;

/// Ancestor element names that mark a paragraph as boilerplate.
const BOILERPLATE_CONTAINERS: &[&str] = &["nav", "header", "footer", "aside", "form", "figure"];

/// Raw result of a page fetch: HTTP status plus body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// External HTTP fetch capability, bounded by a timeout.
pub trait PageFetcher: Send + Sync {
    /// Retrieves a page. Transport-level failures (DNS, connect, timeout)
    /// map to [`AnalysisError::Fetch`]; non-2xx statuses are returned in the
    /// page and rejected by the extractor.
    fn fetch(&self, url: &str) -> Result<FetchedPage, AnalysisError>;
}

/// Tunables of fetching and extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Upper bound on the whole fetch, in seconds.
    pub timeout_secs: u64,
    /// Minimum number of characters of paragraph text for a page to count
    /// as analyzable.
    pub min_text_len: usize,
    /// User agent sent with requests.
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            min_text_len: 120,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

/// Blocking `reqwest` fetcher. Constructed once and shared; the underlying
/// client pools connections and enforces the configured timeout per call.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &ExtractorConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AnalysisError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, AnalysisError> {
        let response = self.client.get(url).send().map_err(|e| AnalysisError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| AnalysisError::Fetch {
            url: url.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;
        Ok(FetchedPage { status, body })
    }
}

/// Fetches `url` and extracts its dominant textual content.
pub fn extract(
    url: &str,
    fetcher: &dyn PageFetcher,
    config: &ExtractorConfig,
) -> Result<String, AnalysisError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AnalysisError::InvalidRequest(format!(
            "unsupported URL scheme: {url}"
        )));
    }

    let page = fetcher.fetch(url)?;
    if !(200..300).contains(&page.status) {
        return Err(AnalysisError::Fetch {
            url: url.to_string(),
            reason: format!("status {}", page.status),
        });
    }

    let text = extract_content(&page.body, config)?;
    debug!(url, chars = text.len(), "extracted page content");
    Ok(text)
}

/// Extracts paragraph text from an HTML document, discarding boilerplate.
pub fn extract_content(html: &str, config: &ExtractorConfig) -> Result<String, AnalysisError> {
    let document = Html::parse_document(html);
    let paragraphs = Selector::parse("p")
        .map_err(|e| AnalysisError::Internal(format!("invalid selector: {e}")))?;

    let mut collected = String::new();
    for element in document.select(&paragraphs) {
        let in_boilerplate = element.ancestors().any(|node| {
            node.value()
                .as_element()
                .map(|el| BOILERPLATE_CONTAINERS.contains(&el.name()))
                .unwrap_or(false)
        });
        if in_boilerplate {
            continue;
        }
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        if !text.trim().is_empty() {
            if !collected.is_empty() {
                collected.push(' ');
            }
            collected.push_str(text.trim());
        }
    }

    let normalized = collapse_whitespace(&collected);
    if normalized.len() < config.min_text_len {
        return Err(AnalysisError::Extraction(format!(
            "page has only {} characters of paragraph text (minimum {})",
            normalized.len(),
            config.min_text_len
        )));
    }
    Ok(normalized)
}

fn collapse_whitespace(text: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    let re = WS.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"));
    re.replace_all(text.trim(), " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher {
        status: u16,
        body: &'static str,
    }

    impl PageFetcher for StaticFetcher {
        fn fetch(&self, _url: &str) -> Result<FetchedPage, AnalysisError> {
            Ok(FetchedPage {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    const ARTICLE: &str = r#"
        <html><head><title>News</title><script>var x = "ignore me";</script></head>
        <body>
          <nav><p>Home | Markets | Tech</p></nav>
          <article>
            <p>The company reported strong quarterly growth across all segments,
               beating analyst expectations for the third consecutive quarter.</p>
            <p>Margins improved as well, driven by cost discipline and a
               favorable product mix in the enterprise division.</p>
          </article>
          <footer><p>Copyright 2025. All rights reserved.</p></footer>
        </body></html>
    "#;

    fn config() -> ExtractorConfig {
        ExtractorConfig::default()
    }

    #[test]
    fn test_extracts_article_paragraphs() {
        let text = extract_content(ARTICLE, &config()).unwrap();
        assert!(text.contains("strong quarterly growth"));
        assert!(text.contains("Margins improved"));
    }

    #[test]
    fn test_discards_boilerplate() {
        let text = extract_content(ARTICLE, &config()).unwrap();
        assert!(!text.contains("Home | Markets"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("ignore me"));
    }

    #[test]
    fn test_no_paragraphs_is_extraction_error() {
        let html = "<html><body><div>Only divs here</div></body></html>";
        let err = extract_content(html, &config()).unwrap_err();
        assert!(matches!(err, AnalysisError::Extraction(_)));
    }

    #[test]
    fn test_short_page_is_extraction_error() {
        let html = "<html><body><p>Too short.</p></body></html>";
        let err = extract_content(html, &config()).unwrap_err();
        assert!(matches!(err, AnalysisError::Extraction(_)));
    }

    #[test]
    fn test_non_2xx_status_is_fetch_error() {
        let fetcher = StaticFetcher { status: 404, body: "" };
        let err = extract("https://example.com/gone", &fetcher, &config()).unwrap_err();
        match err {
            AnalysisError::Fetch { reason, .. } => assert!(reason.contains("404")),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_scheme_is_invalid_request() {
        let fetcher = StaticFetcher { status: 200, body: ARTICLE };
        let err = extract("ftp://example.com", &fetcher, &config()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRequest(_)));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let text = extract_content(ARTICLE, &config()).unwrap();
        assert!(!text.contains("\n"));
        assert!(!text.contains("  "));
    }
}

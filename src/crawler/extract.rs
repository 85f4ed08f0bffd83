//! Candidate link extraction from fetched content
//!
//! Kept behind a narrow trait so the parsing technology is swappable without
//! touching crawl logic: bytes plus a base URL in, raw candidate strings out.
//! Resolving candidates to absolute URLs is the caller's job.

use scraper::{Html, Selector};
use url::Url;

/// Extracts candidate href/src strings from fetched content
pub trait LinkExtractor: Send + Sync {
    /// Returns the raw candidate strings found in `body`
    ///
    /// Candidates may be absolute or relative; the caller resolves them
    /// against `base` before scope filtering.
    fn extract(&self, body: &[u8], base: &Url) -> Vec<String>;
}

/// HTML extractor covering anchors, stylesheet links, scripts, and images
pub struct HtmlLinkExtractor;

/// (selector, attribute) pairs scanned for candidates
const TARGETS: &[(&str, &str)] = &[
    ("a[href]", "href"),
    ("link[href]", "href"),
    ("script[src]", "src"),
    ("img[src]", "src"),
];

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, body: &[u8], _base: &Url) -> Vec<String> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut candidates = Vec::new();
        for (selector, attribute) in TARGETS {
            let Ok(selector) = Selector::parse(selector) else {
                continue;
            };

            for element in document.select(&selector) {
                if let Some(value) = element.value().attr(attribute) {
                    let value = value.trim();
                    if !value.is_empty() {
                        candidates.push(value.to_string());
                    }
                }
            }
        }

        candidates
    }
}

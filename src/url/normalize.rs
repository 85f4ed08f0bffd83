//! Seed cleaning and candidate link resolution
//!
//! Two jobs live here:
//! - turning whatever the operator typed into a well-formed absolute seed URL
//! - resolving raw href/src strings discovered on a page against the page's
//!   base URL

use crate::UrlError;
use url::Url;

/// Cleans an operator-supplied seed address into an absolute URL
///
/// # Cleaning Steps
///
/// 1. Replace any full-width colon (`：`) with a standard colon
/// 2. If the address lacks an `http://` or `https://` prefix, strip leading
///    slashes and prepend `https://`
/// 3. Parse; reject if still malformed or missing a host
///
/// # Arguments
///
/// * `raw` - The address as typed (may be bare, e.g. `example.com/docs`)
///
/// # Returns
///
/// * `Ok(Url)` - Cleaned absolute URL with an explicit scheme
/// * `Err(UrlError)` - Address cannot be turned into a crawlable URL
///
/// # Examples
///
/// ```
/// use sitemirror::url::clean_seed_url;
///
/// let url = clean_seed_url("example.com/docs").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn clean_seed_url(raw: &str) -> Result<Url, UrlError> {
    let cleaned = raw.trim().replace('：', ":");

    let cleaned = if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        cleaned
    } else {
        format!("https://{}", cleaned.trim_start_matches('/'))
    };

    let url = Url::parse(&cleaned).map_err(|e| UrlError::Parse(format!("{}: {}", cleaned, e)))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(cleaned));
    }

    Ok(url)
}

/// Resolves a raw candidate link against the page it was found on
///
/// Relative references (`../img/x.png`, `/about`, `page2`) are joined onto
/// the base URL; absolute references pass through. Anything that resolves to
/// a non-HTTP(S) scheme (`javascript:`, `mailto:`, `data:`, ...) is rejected
/// so it never reaches the frontier.
///
/// # Arguments
///
/// * `base` - The URL of the page the candidate was extracted from
/// * `raw` - The href/src string as it appeared in the markup
///
/// # Returns
///
/// * `Ok(Url)` - Absolute HTTP(S) URL
/// * `Err(UrlError)` - Candidate is empty, malformed, or non-HTTP(S)
pub fn resolve_candidate(base: &Url, raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::Parse("empty candidate".to_string()));
    }

    let resolved = base
        .join(raw)
        .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        other => Err(UrlError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_bare_address() {
        let url = clean_seed_url("example.test").unwrap();
        assert_eq!(url.as_str(), "https://example.test/");
    }

    #[test]
    fn test_clean_bare_address_with_path() {
        let url = clean_seed_url("example.test/blog/post").unwrap();
        assert_eq!(url.as_str(), "https://example.test/blog/post");
    }

    #[test]
    fn test_clean_preserves_http_scheme() {
        let url = clean_seed_url("http://example.test/").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_clean_preserves_https_scheme() {
        let url = clean_seed_url("https://example.test/").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_clean_full_width_colon() {
        let url = clean_seed_url("https：//example.test/").unwrap();
        assert_eq!(url.as_str(), "https://example.test/");
    }

    #[test]
    fn test_clean_strips_leading_slashes() {
        let url = clean_seed_url("//example.test/page").unwrap();
        assert_eq!(url.as_str(), "https://example.test/page");
    }

    #[test]
    fn test_clean_trims_whitespace() {
        let url = clean_seed_url("  example.test  ").unwrap();
        assert_eq!(url.as_str(), "https://example.test/");
    }

    #[test]
    fn test_clean_rejects_garbage() {
        assert!(clean_seed_url("ht tp: //").is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = Url::parse("https://example.test/a/b").unwrap();
        let resolved = resolve_candidate(&base, "../img/x.png").unwrap();
        assert_eq!(resolved.as_str(), "https://example.test/img/x.png");
    }

    #[test]
    fn test_resolve_root_relative() {
        let base = Url::parse("https://example.test/a/b").unwrap();
        let resolved = resolve_candidate(&base, "/about").unwrap();
        assert_eq!(resolved.as_str(), "https://example.test/about");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let base = Url::parse("https://example.test/").unwrap();
        let resolved = resolve_candidate(&base, "https://other.test/page").unwrap();
        assert_eq!(resolved.as_str(), "https://other.test/page");
    }

    #[test]
    fn test_resolve_rejects_javascript() {
        let base = Url::parse("https://example.test/").unwrap();
        assert!(resolve_candidate(&base, "javascript:void(0)").is_err());
    }

    #[test]
    fn test_resolve_rejects_mailto() {
        let base = Url::parse("https://example.test/").unwrap();
        assert!(resolve_candidate(&base, "mailto:a@example.test").is_err());
    }

    #[test]
    fn test_resolve_rejects_empty() {
        let base = Url::parse("https://example.test/").unwrap();
        assert!(resolve_candidate(&base, "   ").is_err());
    }
}

//! URL to filesystem path mapping
//!
//! Pure and deterministic: the same URL always maps to the same relative
//! path. Two distinct URLs may collide on one path (query strings are
//! ignored, invalid characters are dropped); the later write wins.

use std::path::PathBuf;
use url::Url;

/// Maps a URL onto a sanitized relative filesystem path
///
/// # Mapping Rules
///
/// 1. Take the URL's path component; if empty or `/`, substitute
///    `index.html`
/// 2. Strip the leading `/`
/// 3. If the final segment has no file extension, append `.html` so
///    directory-style URLs resolve to a concrete file
/// 4. Drop every character that is not alphanumeric, `-`, `_`, `.`, or `/`
///
/// The query string and fragment never participate in the mapping.
///
/// # Arguments
///
/// * `url` - The URL to map
///
/// # Returns
///
/// A relative path suitable for joining onto the output root
///
/// # Examples
///
/// ```
/// use sitemirror::store::map_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.test/blog/post").unwrap();
/// assert_eq!(map_url(&url).to_str(), Some("blog/post.html"));
/// ```
pub fn map_url(url: &Url) -> PathBuf {
    let mut name = url.path().trim_start_matches('/').to_string();

    if name.is_empty() {
        name = "index.html".to_string();
    }

    if !has_extension(&name) {
        name.push_str(".html");
    }

    let sanitized: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
        .collect();

    PathBuf::from(sanitized)
}

/// Returns true iff the final path segment carries a file extension
///
/// A leading dot alone does not count (`.config` has no extension), matching
/// the usual basename/splitext convention.
fn has_extension(name: &str) -> bool {
    let last_segment = name.rsplit('/').next().unwrap_or("");
    matches!(last_segment.rfind('.'), Some(pos) if pos > 0)
}

//! Domain scope predicate
//!
//! A crawl is confined to the domain of its seed URL. The scope is derived
//! once at startup and is read-only for the lifetime of the run.

use crate::UrlError;
use url::Url;

/// The domain boundary of one crawl run
///
/// A candidate URL is in scope iff its host contains the scope domain, so
/// `docs.example.test` is inside the scope `example.test`. URLs without a
/// host are always out of scope (fail closed, never fatal).
#[derive(Debug, Clone)]
pub struct Scope {
    domain: String,
}

impl Scope {
    /// Derives the scope from the seed URL
    ///
    /// # Arguments
    ///
    /// * `seed` - The cleaned seed URL
    ///
    /// # Returns
    ///
    /// * `Ok(Scope)` - Scope fixed to the seed's lowercase host
    /// * `Err(UrlError)` - Seed has no host
    pub fn from_seed(seed: &Url) -> Result<Self, UrlError> {
        let domain = seed
            .host_str()
            .ok_or_else(|| UrlError::MissingHost(seed.to_string()))?
            .to_lowercase();

        Ok(Self { domain })
    }

    /// Returns true iff the URL's host falls within this scope
    pub fn in_scope(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => host.to_lowercase().contains(&self.domain),
            None => false,
        }
    }

    /// The scope domain string
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_for(seed: &str) -> Scope {
        let url = Url::parse(seed).unwrap();
        Scope::from_seed(&url).unwrap()
    }

    #[test]
    fn test_same_host_in_scope() {
        let scope = scope_for("https://example.test/");
        let url = Url::parse("https://example.test/page").unwrap();
        assert!(scope.in_scope(&url));
    }

    #[test]
    fn test_subdomain_in_scope() {
        let scope = scope_for("https://example.test/");
        let url = Url::parse("https://docs.example.test/guide").unwrap();
        assert!(scope.in_scope(&url));
    }

    #[test]
    fn test_other_host_out_of_scope() {
        let scope = scope_for("https://example.test/");
        let url = Url::parse("https://elsewhere.test/page").unwrap();
        assert!(!scope.in_scope(&url));
    }

    #[test]
    fn test_case_insensitive_match() {
        let scope = scope_for("https://EXAMPLE.test/");
        let url = Url::parse("https://Example.Test/page").unwrap();
        assert!(scope.in_scope(&url));
    }

    #[test]
    fn test_hostless_url_out_of_scope() {
        let scope = scope_for("https://example.test/");
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(!scope.in_scope(&url));
    }

    #[test]
    fn test_scope_from_hostless_seed_fails() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(Scope::from_seed(&url).is_err());
    }

    #[test]
    fn test_domain_accessor() {
        let scope = scope_for("https://example.test/deep/path?q=1");
        assert_eq!(scope.domain(), "example.test");
    }
}

//! Crawl configuration
//!
//! All knobs for one crawl run: worker pool size, output location, fetch
//! timeout, retry budget, and the jitter window applied before each request.

use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a single crawl run
///
/// Defaults mirror a deliberately gentle profile: three workers, a 30 second
/// per-request timeout, three attempts per URL, and 1-3 seconds of random
/// jitter before each request so workers never hit the target in lockstep.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of concurrent crawl workers
    pub workers: usize,

    /// Root directory where mirrored resources are written
    pub output_root: PathBuf,

    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,

    /// Maximum fetch attempts per URL (including the first)
    pub max_attempts: u32,

    /// Base unit for retry backoff; actual delays are multiples of this
    pub backoff_unit: Duration,

    /// Lower bound of the pre-request jitter window
    pub jitter_min: Duration,

    /// Upper bound of the pre-request jitter window
    pub jitter_max: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            output_root: PathBuf::from("output"),
            request_timeout: Duration::from_secs(30),
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
            jitter_min: Duration::from_secs(1),
            jitter_max: Duration::from_secs(3),
        }
    }
}

impl CrawlConfig {
    /// Validates the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ConfigError)` - A field is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Validation(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.jitter_min > self.jitter_max {
            return Err(ConfigError::Validation(format!(
                "jitter window is inverted: {:?} > {:?}",
                self.jitter_min, self.jitter_max
            )));
        }

        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_root must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workers, 3);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = CrawlConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = CrawlConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_jitter_window_rejected() {
        let config = CrawlConfig {
            jitter_min: Duration::from_secs(5),
            jitter_max: Duration::from_secs(1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_output_root_rejected() {
        let config = CrawlConfig {
            output_root: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

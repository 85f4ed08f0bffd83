//! HTTP fetching with retry, backoff, and jitter
//!
//! The transport (one GET, one response) is a narrow injectable capability so
//! the retry behavior is testable without a network. On top of it sits an
//! explicit [`RetryPolicy`] decision table:
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 200 | Accept |
//! | HTTP 403 | Give up immediately (access denied is not transient) |
//! | Other status | Retry, backoff `2 x attempt` units |
//! | Connection reset/abort | Retry, backoff `5 x attempt` units |
//! | Other transport failure | Give up immediately |
//!
//! At most 3 attempts total by default. Every attempt is preceded by a
//! random jitter delay so workers hitting the same host never fire in
//! lockstep.

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Browser-profile User-Agent presented on every request
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Response from a single transport attempt
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body bytes
    pub body: Vec<u8>,
}

/// Transport-level failure for a single attempt
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection was reset or aborted mid-request; worth retrying
    #[error("connection reset: {0}")]
    ConnectionReset(String),

    /// Any other transport failure; treated as terminal
    #[error("transport failure: {0}")]
    Other(String),
}

/// One HTTP GET, with no retry semantics of its own
///
/// Implemented by the real reqwest-backed [`HttpTransport`] and by fakes in
/// tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

/// Builds the crawl's HTTP client
///
/// The header set mimics a common browser profile (User-Agent, Accept,
/// Accept-Language, Connection, Cache-Control; Accept-Encoding is supplied by
/// the gzip/brotli features so responses are transparently decompressed) to
/// get past trivial bot filtering. Redirects are followed and TLS certificate
/// verification is disabled: the crawl target may present unverifiable
/// certificates, and accepting them is a deliberate trust trade-off for a
/// mirroring tool, not an oversight.
///
/// # Arguments
///
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        reqwest::header::CONNECTION,
        HeaderValue::from_static("keep-alive"),
    );
    headers.insert(
        reqwest::header::CACHE_CONTROL,
        HeaderValue::from_static("max-age=0"),
    );
    headers.insert(
        reqwest::header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .redirect(Policy::limited(10))
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// The reqwest-backed transport used by real crawls
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Flattens an error and its source chain into one message, so reset
    /// indications buried in lower layers are visible for classification
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    fn classify(error: reqwest::Error) -> TransportError {
        let message = Self::describe(&error);
        let lower = message.to_lowercase();

        if lower.contains("reset") || lower.contains("abort") {
            TransportError::ConnectionReset(message)
        } else {
            TransportError::Other(message)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::classify)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Outcome of one attempt, as seen by the retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A response arrived with this status code
    Status(u16),

    /// The connection was reset or aborted
    ConnectionReset,

    /// Any other transport failure
    TransportFailure,
}

/// What to do after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The attempt succeeded; use the body
    Accept,

    /// Terminal failure; do not try again
    GiveUp,

    /// Wait this long, then try again
    Retry(Duration),
}

/// Explicit retry policy: attempt budget plus backoff formulas
///
/// The backoff unit is a parameter so tests can shrink real seconds down to
/// milliseconds without touching the decision logic.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts per URL, including the first
    pub max_attempts: u32,

    /// Base unit for backoff delays
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Decides what to do after attempt number `attempt` (1-based) produced
    /// `outcome`
    pub fn decide(&self, attempt: u32, outcome: &AttemptOutcome) -> RetryDecision {
        let last_attempt = attempt >= self.max_attempts;

        match outcome {
            AttemptOutcome::Status(200) => RetryDecision::Accept,
            AttemptOutcome::Status(403) => RetryDecision::GiveUp,
            AttemptOutcome::Status(_) if last_attempt => RetryDecision::GiveUp,
            AttemptOutcome::Status(_) => RetryDecision::Retry(self.backoff_unit * (2 * attempt)),
            AttemptOutcome::ConnectionReset if last_attempt => RetryDecision::GiveUp,
            AttemptOutcome::ConnectionReset => RetryDecision::Retry(self.backoff_unit * (5 * attempt)),
            AttemptOutcome::TransportFailure => RetryDecision::GiveUp,
        }
    }
}

/// Terminal fetch failure, reported to the worker once retries are exhausted
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("access denied (HTTP 403)")]
    Denied,

    #[error("HTTP {status} after {attempts} attempt(s)")]
    BadStatus { status: u16, attempts: u32 },

    #[error("connection kept resetting, gave up after {attempts} attempt(s)")]
    ResetExhausted { attempts: u32 },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Fetcher: transport + retry policy + per-attempt jitter
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    jitter_min: Duration,
    jitter_max: Duration,
}

impl Fetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        policy: RetryPolicy,
        jitter_min: Duration,
        jitter_max: Duration,
    ) -> Self {
        Self {
            transport,
            policy,
            jitter_min,
            jitter_max,
        }
    }

    /// Fetches one URL under the retry policy
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - Body bytes of a 200 response
    /// * `Err(FetchFailure)` - Terminal failure; the caller logs it and
    ///   treats the URL as having no content
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchFailure> {
        for attempt in 1..=self.policy.max_attempts {
            self.jitter_delay().await;

            let (outcome, body, detail) = match self.transport.get(url).await {
                Ok(response) => (
                    AttemptOutcome::Status(response.status),
                    Some(response.body),
                    None,
                ),
                Err(TransportError::ConnectionReset(message)) => {
                    (AttemptOutcome::ConnectionReset, None, Some(message))
                }
                Err(TransportError::Other(message)) => {
                    (AttemptOutcome::TransportFailure, None, Some(message))
                }
            };

            match self.policy.decide(attempt, &outcome) {
                RetryDecision::Accept => {
                    tracing::debug!(%url, attempt, "fetched");
                    return Ok(body.unwrap_or_default());
                }
                RetryDecision::GiveUp => {
                    return Err(Self::terminal_failure(outcome, detail, attempt));
                }
                RetryDecision::Retry(delay) => {
                    tracing::warn!(
                        %url,
                        attempt,
                        ?outcome,
                        "attempt failed, backing off {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        // The policy never returns Retry on the final attempt, so the loop
        // always exits through Accept or GiveUp above.
        Err(FetchFailure::Transport("retry budget exhausted".to_string()))
    }

    fn terminal_failure(
        outcome: AttemptOutcome,
        detail: Option<String>,
        attempts: u32,
    ) -> FetchFailure {
        match outcome {
            AttemptOutcome::Status(403) => FetchFailure::Denied,
            AttemptOutcome::Status(status) => FetchFailure::BadStatus { status, attempts },
            AttemptOutcome::ConnectionReset => FetchFailure::ResetExhausted { attempts },
            AttemptOutcome::TransportFailure => {
                FetchFailure::Transport(detail.unwrap_or_else(|| "unknown".to_string()))
            }
        }
    }

    /// Sleeps for a random duration inside the configured jitter window
    async fn jitter_delay(&self) {
        let delay = if self.jitter_max > self.jitter_min {
            let span = (self.jitter_max - self.jitter_min).as_millis() as u64;
            let extra = rand::thread_rng().gen_range(0..=span);
            self.jitter_min + Duration::from_millis(extra)
        } else {
            self.jitter_min
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

//! Blocking HTTP fetching with retry.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::error::{Result, SourceError};

/// Browser-like user agent; Goodreads serves a reduced page to unknown clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";
const PREFERRED_LANGUAGES: &str = "es-ES,es;q=0.9,en;q=0.8";

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request.
    pub retries: u32,
    /// Base delay; attempt `n` (from zero) waits `backoff · 2^n` after failing.
    pub backoff: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (zero based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `request` until it succeeds, fails permanently or attempts run out.
    pub fn run<T>(&self, url: &str, mut request: impl FnMut() -> Result<T>) -> Result<T> {
        let attempts = self.retries.max(1);
        let mut last_error = String::new();
        for attempt in 0..attempts {
            match request() {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() => {
                    last_error = error.to_string();
                    if attempt + 1 < attempts {
                        let delay = self.delay_for(attempt);
                        warn!(
                            url,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "request failed, retrying"
                        );
                        thread::sleep(delay);
                    }
                }
                Err(error) => return Err(error),
            }
        }
        Err(SourceError::RetriesExhausted {
            url: url.to_string(),
            attempts,
            last_error,
        })
    }
}

/// Anything that can return the body of a URL.
pub trait PageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String> {
        (**self).fetch_text(url)
    }
}

/// Blocking HTTP client wrapped in a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(PREFERRED_LANGUAGES));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(policy.timeout)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self { client, policy })
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let request_error = |source| SourceError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(request_error)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");
        self.policy.run(url, || self.fetch_once(url))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn instant_policy(retries: u32) -> RetryPolicy {
        RetryPolicy {
            retries,
            backoff: Duration::ZERO,
            timeout: Duration::from_secs(1),
        }
    }

    fn unavailable() -> SourceError {
        SourceError::Status {
            url: "https://example.test".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_exponential_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let result = instant_policy(3).run("https://example.test", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(unavailable())
            } else {
                Ok("body")
            }
        });
        assert_eq!(result.unwrap(), "body");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_gives_up_after_configured_attempts() {
        let calls = Cell::new(0);
        let result: Result<()> = instant_policy(2).run("https://example.test", || {
            calls.set(calls.get() + 1);
            Err(unavailable())
        });
        assert_eq!(calls.get(), 2);
        match result.unwrap_err() {
            SourceError::RetriesExhausted {
                attempts,
                last_error,
                ..
            } => {
                assert_eq!(attempts, 2);
                assert!(last_error.contains("503"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_permanent_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<()> = instant_policy(3).run("https://example.test", || {
            calls.set(calls.get() + 1);
            Err(SourceError::InvalidUrl {
                url: "::".to_string(),
                message: "relative URL without a base".to_string(),
            })
        });
        assert!(matches!(result, Err(SourceError::InvalidUrl { .. })));
        assert_eq!(calls.get(), 1);
    }
}

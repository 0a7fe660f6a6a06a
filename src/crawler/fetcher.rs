//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a browser-like user agent and timeouts
//! - GET requests that accept only HTTP 200
//! - Bounded, unconditional retries through [`retry`]

use crate::config::FetcherConfig;
use crate::crawler::retry::{retry, RetryOutcome};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Failure of a single request attempt
#[derive(Debug, Error)]
pub enum AttemptError {
    /// DNS failure, timeout, connection reset, or body read error
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

/// Failure of a fetch after all attempts
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("giving up on {url} after {attempts} attempts{}", last_error_suffix(.last_error))]
    RetryExhausted {
        url: String,
        attempts: u32,
        last_error: Option<AttemptError>,
    },
}

fn last_error_suffix(last_error: &Option<AttemptError>) -> String {
    match last_error {
        Some(e) => format!(" ({})", e),
        None => String::new(),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use marquee::config::FetcherConfig;
/// use marquee::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches documents with a bounded number of attempts per URL
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            client,
            max_attempts,
            retry_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches a URL and returns the response body
    ///
    /// Any non-200 status and any transport error is retried, up to
    /// `max_attempts` requests in total. A 404 is retried exactly like a 503.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of the first 200 response
    /// * `Err(FetchError::RetryExhausted)` - Every attempt failed
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let outcome = retry(self.max_attempts, self.retry_delay, |attempt| {
            tracing::trace!(url, attempt, "Requesting");
            self.attempt(url)
        })
        .await;

        match outcome {
            RetryOutcome::Success(body) => Ok(body),
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                tracing::warn!(url, attempts, "Retries exhausted");
                Err(FetchError::RetryExhausted {
                    url: url.to_string(),
                    attempts,
                    last_error,
                })
            }
        }
    }

    /// Performs a single GET request
    async fn attempt(&self, url: &str) -> Result<String, AttemptError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(AttemptError::Status(status));
        }

        Ok(response.text().await?)
    }
}

// src/crawl/fetcher.rs
// =============================================================================
// This module downloads pages.
//
// The crawler only talks to the PageFetcher trait, so tests can hand it an
// in-memory fake instead of a real HTTP client. HttpFetcher is the real
// implementation, built on reqwest.
//
// Every request has a hard timeout (10 seconds by default). Anything that
// goes wrong (timeout, DNS, refused connection, 404, 500, a body that can't
// be decoded) comes back as a FetchError value. Nothing panics.
//
// Rust concepts:
// - Traits: describe *what* a fetcher can do, not *how*
// - async-trait: lets a trait declare async methods
// - Send + Sync: the fetcher can be shared across tasks
// =============================================================================

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Something that can retrieve the raw markup of a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    // Builds a fetcher whose client enforces `timeout` on every request
    //
    // The client is created once and reused for every page (connection
    // pooling), just like a browser keeps connections open.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout.as_secs())
            } else {
                FetchError::Body(e.to_string())
            }
        })
    }
}

// Sorts a reqwest error into one of our FetchError kinds
fn categorize_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout.as_secs())
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}

// src/error.rs
// =============================================================================
// Typed errors for every stage of the pipeline.
//
// Three families:
// - FetchError:  one page could not be retrieved. The crawler recovers from
//                these locally by skipping the page.
// - CrawlError:  the crawl could not even start (bad base URL, bad config).
// - AnswerError: the answering step failed. main.rs renders these as
//                user-visible text instead of crashing.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display/Error impls for us
// - Enums with data: each variant carries the details of what went wrong
// =============================================================================

use thiserror::Error;

/// Why a single page fetch failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

/// Problems with the crawl inputs, detected before any request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrawlError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("base URL has no host: {0}")]
    MissingHost(String),

    #[error("unsupported URL scheme '{0}' (only http and https can be crawled)")]
    UnsupportedScheme(String),

    #[error("invalid crawl configuration: {0}")]
    InvalidConfig(String),
}

/// Failures of the answering collaborator.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The crawl produced no text, so there is nothing to ground an answer in.
    #[error("no content was found on the site to answer from")]
    NoContent,

    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("network error while contacting the model API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("model API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response from the model API: {0}")]
    UnexpectedResponse(String),
}

// Request URLs are stripped: they may carry credentials
impl From<reqwest::Error> for AnswerError {
    fn from(error: reqwest::Error) -> Self {
        AnswerError::Network(error.without_url())
    }
}

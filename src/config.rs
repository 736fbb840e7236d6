// src/config.rs
// =============================================================================
// Plain configuration values for the crawler and the answering step.
//
// These are filled in from CLI flags (which fall back to environment
// variables, see cli.rs). Nothing here reads global state: every crawl gets
// its own CrawlConfig value.
// =============================================================================

use crate::error::CrawlError;
use std::time::Duration;

pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_MAX_CORPUS_CHARS: usize = 12_000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1";

/// Settings for one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of depth levels to fetch. Level 0 is the base page itself.
    pub max_depth: usize,
    /// Character (not byte) budget for the final corpus.
    pub max_corpus_chars: usize,
    /// Hard timeout applied to every single request.
    pub fetch_timeout: Duration,
    /// How many pages of one depth level may be in flight at once.
    pub concurrency: usize,
    /// Pause after each successful fetch.
    pub request_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_corpus_chars: DEFAULT_MAX_CORPUS_CHARS,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            concurrency: 1,
            request_delay: Duration::ZERO,
        }
    }
}

impl CrawlConfig {
    /// Rejects values that would make the crawl meaningless.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.max_depth == 0 {
            return Err(CrawlError::InvalidConfig(
                "max depth must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "fetch timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the model API.
#[derive(Clone)]
pub struct AnswerConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL of the Generative Language API (overridable for tests).
    pub endpoint: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for AnswerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

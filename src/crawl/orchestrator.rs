// src/crawl/orchestrator.rs
// =============================================================================
// This module drives the crawl, one depth level at a time.
//
// How it works:
// 1. The frontier starts as just the (normalized) base URL
// 2. Every URL in the frontier is claimed in the visited set, then fetched
// 3. Each fetched page contributes its text to the corpus and its
//    same-domain links to the next frontier
// 4. The next frontier is everything discovered minus everything visited
// 5. Repeat until max_depth levels are done or the frontier is empty
// 6. Join the page texts and cut them to the character budget
//
// A page that fails to load is logged and skipped. It stays in the visited
// set, so it is never retried within the same crawl, and it never aborts the
// crawl. If every page fails the result is simply an empty corpus.
//
// Concurrency:
// - Pages within one level can be fetched concurrently (config.concurrency)
// - Only this function touches the visited set, and it claims a whole level
//   before any request goes out, so no page can be fetched twice
// - Results are consumed in frontier order (`buffered`, not
//   `buffer_unordered`), so the corpus is the same however many requests run
//   at once
// - All crawl state lives inside the future. Dropping it (e.g. a caller-side
//   timeout) throws everything away; nothing leaks into the next crawl
//
// Rust concepts:
// - Generics: Crawler<F> works with any PageFetcher
// - HashSet / BTreeSet: visited set / sorted frontier
// - Streams: `buffered(n)` runs up to n futures at once, in order
// =============================================================================

use super::corpus::{assemble, truncate_chars};
use super::fetcher::{HttpFetcher, PageFetcher};
use super::links::{extract_links, is_crawlable, normalize};
use super::text::extract_text;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};
use url::Url;

/// A page that was fetched and contributed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub url: String,
    pub depth: usize,
    /// Characters of extracted text, before corpus truncation.
    pub chars: usize,
}

/// A page that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    pub url: String,
    pub depth: usize,
    pub error: String,
}

/// Everything one crawl produced.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub base_url: String,
    /// The aggregated, truncated text. Empty if nothing could be fetched.
    pub corpus: String,
    pub truncated: bool,
    /// Deepest level that had anything to fetch (0 = base page only).
    pub depth_reached: usize,
    pub pages: Vec<PageSummary>,
    pub failures: Vec<FailedPage>,
}

impl CrawlResult {
    /// True when no usable text was collected.
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Number of URLs attempted, successful or not.
    pub fn visited_count(&self) -> usize {
        self.pages.len() + self.failures.len()
    }
}

/// Breadth-first, same-domain crawler.
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Crawls `base_url` and returns the aggregated text.
    ///
    /// Only bad inputs (unparseable base URL, non-http scheme, invalid
    /// config) are errors. Page failures are recorded in the result.
    pub async fn crawl(&self, base_url: &str) -> Result<CrawlResult, CrawlError> {
        self.config.validate()?;
        let base = parse_base_url(base_url)?;
        let domain = base
            .host_str()
            .ok_or_else(|| CrawlError::MissingHost(base_url.to_string()))?
            .to_string();

        let max_depth = self.config.max_depth;
        info!(base_url = %base, domain = %domain, max_depth, "starting crawl");

        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: BTreeSet<String> = BTreeSet::from([normalize(&base).to_string()]);

        let mut page_texts: Vec<String> = Vec::new();
        let mut pages = Vec::new();
        let mut failures = Vec::new();
        let mut depth_reached = 0;

        for depth in 0..max_depth {
            // Claim the whole level up front; after this, visited and the
            // (now empty) frontier are disjoint again
            let level: Vec<String> = std::mem::take(&mut frontier)
                .into_iter()
                .filter(|url| visited.insert(url.clone()))
                .collect();

            if level.is_empty() {
                break;
            }
            depth_reached = depth;
            debug!(depth, pages = level.len(), "crawling level");

            let outcomes: Vec<(String, Result<String, FetchError>)> =
                stream::iter(level.into_iter().map(|url| self.fetch_one(url, depth)))
                    .buffered(self.config.concurrency)
                    .collect()
                    .await;

            let mut next_frontier = BTreeSet::new();
            let is_last_level = depth + 1 >= max_depth;

            for (url, outcome) in outcomes {
                match outcome {
                    Ok(html) => {
                        let text = extract_text(&html);
                        debug!(url = %url, depth, chars = text.chars().count(), "page fetched");

                        pages.push(PageSummary {
                            url: url.clone(),
                            depth,
                            chars: text.chars().count(),
                        });
                        page_texts.push(text);

                        // Links found on the last level would never be fetched
                        if !is_last_level {
                            if let Ok(page_url) = Url::parse(&url) {
                                next_frontier.extend(extract_links(&page_url, &html, &domain));
                            }
                        }
                    }
                    Err(e) => {
                        warn!(url = %url, depth, error = %e, "skipping page that failed to load");
                        failures.push(FailedPage {
                            url,
                            depth,
                            error: e.to_string(),
                        });
                    }
                }
            }

            frontier = next_frontier
                .into_iter()
                .filter(|url| !visited.contains(url))
                .collect();
        }

        let mut corpus = assemble(&page_texts, usize::MAX);
        let truncated = truncate_chars(&mut corpus, self.config.max_corpus_chars);

        info!(
            pages = pages.len(),
            failures = failures.len(),
            corpus_chars = corpus.chars().count(),
            truncated,
            "crawl finished"
        );

        Ok(CrawlResult {
            base_url: base.to_string(),
            corpus,
            truncated,
            depth_reached,
            pages,
            failures,
        })
    }

    // Fetches one URL, pausing afterwards if a polite delay is configured
    async fn fetch_one(&self, url: String, depth: usize) -> (String, Result<String, FetchError>) {
        debug!(url = %url, depth, "fetching");
        let outcome = self.fetcher.fetch(&url).await;

        if outcome.is_ok() && !self.config.request_delay.is_zero() {
            tokio::time::sleep(self.config.request_delay).await;
        }

        (url, outcome)
    }
}

/// Crawls `base_url` over HTTP with default settings and the given depth.
pub async fn crawl_site(base_url: &str, max_depth: usize) -> Result<CrawlResult, CrawlError> {
    let config = CrawlConfig {
        max_depth,
        ..CrawlConfig::default()
    };
    let fetcher = HttpFetcher::new(config.fetch_timeout)
        .map_err(|e| CrawlError::InvalidConfig(e.to_string()))?;

    Crawler::new(fetcher, config).crawl(base_url).await
}

// Parses and checks the base URL before anything is fetched
fn parse_base_url(base_url: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(base_url.trim()).map_err(|e| CrawlError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if !is_crawlable(&url) {
        return Err(CrawlError::UnsupportedScheme(url.scheme().to_string()));
    }

    Ok(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why claim a whole level before fetching it?
//    - visited.insert() returns false if the URL was already there
//    - Filtering the frontier through it both dedupes and marks in one step
//    - Once claimed, no later level can schedule the same URL again
//
// 2. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffered yields results in the order the futures were created
//    - buffer_unordered yields them as they finish (faster, but random order)
//
// 3. What is std::mem::take?
//    - Moves the value out and leaves Default::default() (an empty set) behind
//    - Lets us consume the frontier without cloning it
//
// 4. Why does the crawl return Result if page failures aren't errors?
//    - The Err side is only for inputs we can't work with at all
//    - Everything that goes wrong mid-crawl ends up in CrawlResult::failures
// -----------------------------------------------------------------------------

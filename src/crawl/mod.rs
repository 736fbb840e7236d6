// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling and text aggregation.
//
// Submodules (leaf to root):
// - links:        same-domain link discovery and URL normalization
// - text:         HTML -> plain text
// - corpus:       joining page texts and truncating to a budget
// - fetcher:      downloading pages (PageFetcher trait + reqwest impl)
// - orchestrator: breadth-first traversal tying the rest together
//
// Features:
// - Breadth-first crawling starting from a URL
// - Same-domain restriction (never follows links to other hosts)
// - Configurable depth limit and character budget
// - Per-request timeout, failed pages skipped rather than fatal
// =============================================================================

mod corpus;
mod fetcher;
mod links;
mod orchestrator;
mod text;

pub use corpus::assemble;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use links::{extract_links, normalize_str};
pub use orchestrator::{crawl_site, CrawlResult, Crawler, FailedPage, PageSummary};
pub use text::extract_text;

// src/lib.rs
// =============================================================================
// site-oracle as a library: crawl one website into a bounded text corpus,
// then ask a language model questions about it.
//
// The CLI in main.rs is a thin wrapper around these modules; another
// application can call them directly:
//
//   let result = site_oracle::crawl::crawl_site("https://example.com/", 2).await?;
//   println!("{}", result.corpus);
// =============================================================================

pub mod answer;
pub mod config;
pub mod crawl;
pub mod error;

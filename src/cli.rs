// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl a site and print the collected text (or a JSON report)
// - ask:   crawl a site, then ask the model a question about it
//
// Most flags can also come from environment variables (or a .env file,
// loaded in main.rs), which is how the API key is normally provided.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use site_oracle::config::{
    CrawlConfig, DEFAULT_ENDPOINT, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MAX_CORPUS_CHARS, DEFAULT_MAX_DEPTH, DEFAULT_MODEL,
};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "site-oracle",
    version,
    about = "Answer questions about a website's content using an LLM",
    long_about = "site-oracle crawls a single website (staying on its domain), collects the text \
                  of every page it reaches, and asks a language model to answer your question \
                  using only that text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print the text that would be sent to the model
    ///
    /// Example: site-oracle crawl https://example.com --max-depth 2
    Crawl {
        /// Website URL to start from (e.g., https://example.com)
        website_url: String,

        /// Output a JSON crawl report instead of the plain text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Crawl a website and answer a question about it
    ///
    /// Example: site-oracle ask https://example.com "What services do you offer?"
    Ask {
        /// Website URL to start from (e.g., https://example.com)
        website_url: String,

        /// The question to answer
        question: String,

        #[command(flatten)]
        crawl: CrawlArgs,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model to ask
        #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// Base URL of the Generative Language API
        #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT, hide = true)]
        endpoint: String,
    },
}

/// Flags shared by every subcommand that crawls.
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// How many link levels to fetch (1 = just the starting page,
    /// 2 = starting page + the pages it links to, ...)
    #[arg(long, env = "SITE_ORACLE_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum number of characters of site text to keep
    #[arg(long, env = "SITE_ORACLE_MAX_CHARS", default_value_t = DEFAULT_MAX_CORPUS_CHARS)]
    pub max_chars: usize,

    /// Timeout for each page request, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pages of the same depth level to fetch at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Pause after each fetched page, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            max_corpus_chars: self.max_chars,
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency,
            request_delay: Duration::from_millis(self.delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["site-oracle", "crawl", "https://example.com"]).unwrap();
        match cli.command {
            Commands::Crawl { website_url, json, crawl } => {
                assert_eq!(website_url, "https://example.com");
                assert!(!json);
                assert_eq!(crawl.to_config(), CrawlConfig::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ask_with_flags() {
        let cli = Cli::try_parse_from([
            "site-oracle",
            "ask",
            "https://example.com",
            "What do you do?",
            "--max-depth",
            "3",
            "--max-chars",
            "4000",
            "--api-key",
            "k",
            "--model",
            "gemini-1.5-flash",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask {
                question,
                crawl,
                api_key,
                model,
                ..
            } => {
                assert_eq!(question, "What do you do?");
                assert_eq!(crawl.max_depth, 3);
                assert_eq!(crawl.to_config().max_corpus_chars, 4000);
                assert_eq!(api_key.as_deref(), Some("k"));
                assert_eq!(model, "gemini-1.5-flash");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_a_question() {
        assert!(Cli::try_parse_from(["site-oracle", "ask", "https://example.com"]).is_err());
    }
}

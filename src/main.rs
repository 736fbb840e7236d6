// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env (so GEMINI_API_KEY etc. can live in a file) and set up logging
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = nothing usable, 2 = error)
//
// Logs go to stderr (RUST_LOG controls how much), so stdout only ever holds
// the corpus, the JSON report, or the answer.
// =============================================================================

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use site_oracle::answer::{Answerer, GeminiAnswerer};
use site_oracle::config::AnswerConfig;
use site_oracle::crawl::{CrawlResult, Crawler, HttpFetcher};
use site_oracle::error::AnswerError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,site_oracle=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = success
//   Ok(1) = ran fine but produced nothing usable
//   Err   = bad input or unexpected failure (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            website_url,
            json,
            crawl,
        } => handle_crawl(&website_url, &crawl, json).await,
        Commands::Ask {
            website_url,
            question,
            crawl,
            api_key,
            model,
            endpoint,
        } => {
            let config = AnswerConfig {
                api_key,
                model,
                endpoint,
            };
            handle_ask(&website_url, &question, &crawl, config).await
        }
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(website_url: &str, args: &CrawlArgs, json: bool) -> Result<i32> {
    let result = crawl(website_url, args).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
        if !result.is_empty() {
            println!("{}", result.corpus);
        }
    }

    Ok(if result.is_empty() { 1 } else { 0 })
}

// Handles the 'ask' subcommand
async fn handle_ask(
    website_url: &str,
    question: &str,
    args: &CrawlArgs,
    config: AnswerConfig,
) -> Result<i32> {
    if question.trim().is_empty() {
        bail!("the question must not be empty");
    }

    // Fail on a missing key before spending time crawling
    if config.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        return Err(AnswerError::MissingApiKey.into());
    }

    let answerer = GeminiAnswerer::new(config).context("failed to set up the model client")?;
    let result = crawl(website_url, args).await?;
    print_summary(&result);

    eprintln!("⌛ Preparing an answer...");
    match answerer.answer(&result.corpus, question).await {
        Ok(answer) => {
            println!("{}", answer);
            Ok(0)
        }
        Err(AnswerError::NoContent) => {
            eprintln!("⚠️  Nothing could be read from {}, so there is nothing to answer from.", website_url);
            Ok(1)
        }
        Err(e) => {
            eprintln!("❌ Could not get an answer: {}", e);
            Ok(1)
        }
    }
}

async fn crawl(website_url: &str, args: &CrawlArgs) -> Result<CrawlResult> {
    let config = args.to_config();

    eprintln!("🔍 Crawling website: {}", website_url);
    eprintln!("📊 Max crawl depth: {}", config.max_depth);

    let fetcher = HttpFetcher::new(config.fetch_timeout).context("failed to set up the HTTP client")?;
    let result = Crawler::new(fetcher, config).crawl(website_url).await?;
    Ok(result)
}

// Progress information goes to stderr so stdout stays machine-readable
fn print_summary(result: &CrawlResult) {
    eprintln!(
        "📄 Read {} of {} page(s)",
        result.pages.len(),
        result.visited_count()
    );
    for failure in &result.failures {
        eprintln!("   ⚠️  {} ({})", failure.url, failure.error);
    }
    if result.truncated {
        eprintln!("✂️  Text was cut to the character limit");
    }
}

// src/answer/mod.rs
// =============================================================================
// This module turns crawled site text plus a question into an answer.
//
// Submodules:
// - prompt: composes the text we send to the model
// - gemini: the real implementation, calling Google's Gemini API
//
// The rest of the program only sees the Answerer trait, so a different model
// provider (or a test double) can be dropped in without touching main.rs.
// =============================================================================

mod gemini;
mod prompt;

use crate::error::AnswerError;
use async_trait::async_trait;

pub use gemini::GeminiAnswerer;

/// Answers a question using only the given corpus.
///
/// Implementations must return [`AnswerError::NoContent`] for an empty
/// corpus instead of asking the model to answer from nothing.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, corpus: &str, question: &str) -> Result<String, AnswerError>;
}

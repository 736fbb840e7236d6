// src/answer/prompt.rs
// =============================================================================
// Builds the prompt sent to the model: instructions, then the site text,
// then the user's question.
// =============================================================================

const INSTRUCTIONS: &str = "\
Using the web page content below as your reference, answer the question in plain, friendly language.
Bullet points are fine if they make the answer easier to follow.

- Avoid technical jargon; use everyday wording instead.
- Make the answer understandable to someone with no background knowledge.
- Only use information found in the web page content. If the content does not answer the question, say so.";

/// Composes the full prompt for one question.
pub fn build_prompt(corpus: &str, question: &str) -> String {
    format!(
        "{INSTRUCTIONS}\n\n[Web page content]\n{corpus}\n\n[Question]\n{question}\n",
        corpus = corpus.trim(),
        question = question.trim(),
    )
}

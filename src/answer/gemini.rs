// src/answer/gemini.rs
// =============================================================================
// Answers questions with Google's Gemini `generateContent` API.
//
// The response JSON is parsed into explicit structs instead of being poked at
// by index. If the API answers with a shape we don't expect, we return
// AnswerError::UnexpectedResponse rather than guessing.
//
// Request:  POST {endpoint}/models/{model}:generateContent, key in x-goog-api-key
//           {"contents":[{"parts":[{"text":"<prompt>"}]}]}
// Success:  {"candidates":[{"content":{"parts":[{"text":"..."}]},"finishReason":"STOP"}]}
// Failure:  {"error":{"code":400,"message":"...","status":"INVALID_ARGUMENT"}}
// =============================================================================

use super::prompt::build_prompt;
use super::Answerer;
use crate::config::AnswerConfig;
use crate::error::AnswerError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

// The key travels in a header so it never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

// Model calls can be slow for long prompts
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<u16>,
    message: String,
    status: Option<String>,
}

/// [`Answerer`] backed by the Gemini API.
pub struct GeminiAnswerer {
    client: Client,
    config: AnswerConfig,
}

impl GeminiAnswerer {
    pub fn new(config: AnswerConfig) -> Result<Self, AnswerError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Answerer for GeminiAnswerer {
    async fn answer(&self, corpus: &str, question: &str) -> Result<String, AnswerError> {
        if corpus.trim().is_empty() {
            return Err(AnswerError::NoContent);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnswerError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(corpus, question),
                }],
            }],
        };

        info!(model = %self.config.model, corpus_chars = corpus.chars().count(), "asking model");

        let response = self
            .client
            .post(self.endpoint_url())
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "model responded");

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AnswerError::UnexpectedResponse(format!("invalid JSON: {}", e)))?;

        extract_answer(parsed)
    }
}

// Builds an Api error, preferring the message from the API's error body
fn api_error(status: u16, body: &str) -> AnswerError {
    let message = serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|error| match error.status {
            Some(kind) => format!("{} ({})", error.message, kind),
            None => error.message,
        })
        .unwrap_or_else(|| body.trim().to_string());

    AnswerError::Api { status, message }
}

// Pulls the answer text out of a successful response
fn extract_answer(response: GenerateResponse) -> Result<String, AnswerError> {
    if let Some(error) = response.error {
        return Err(AnswerError::Api {
            status: error.code.unwrap_or(200),
            message: error.message,
        });
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!("prompt was blocked ({})", reason))
            .unwrap_or_else(|| "response contained no candidates".to_string());
        return Err(AnswerError::UnexpectedResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        let finish = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AnswerError::UnexpectedResponse(format!(
            "candidate had no text (finish reason: {})",
            finish
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn answerer(server: &MockServer) -> GeminiAnswerer {
        GeminiAnswerer::new(AnswerConfig {
            api_key: Some("test-key".to_string()),
            endpoint: server.uri(),
            ..AnswerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_answer_is_read_from_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-pro:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("What services do you offer?"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "They help with "}, {"text": "tax filing."}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = answerer(&server)
            .answer("We help with tax filing.", "What services do you offer?")
            .await
            .unwrap();
        assert_eq!(answer, "They help with tax filing.");
    }

    #[tokio::test]
    async fn test_empty_corpus_is_reported_without_calling_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = answerer(&server).answer("   ", "Anything?").await;
        assert!(matches!(result, Err(AnswerError::NoContent)));
    }

    #[tokio::test]
    async fn test_network_error_does_not_reveal_api_key() {
        // nothing listens on the discard port
        let answerer = GeminiAnswerer::new(AnswerConfig {
            api_key: Some("SUPERSECRET123".to_string()),
            endpoint: "http://127.0.0.1:9".to_string(),
            ..AnswerConfig::default()
        })
        .unwrap();

        let err = answerer.answer("content", "question").await.unwrap_err();
        assert!(matches!(err, AnswerError::Network(_)));
        assert!(!err.to_string().contains("SUPERSECRET123"));
        assert!(!format!("{:?}", err).contains("SUPERSECRET123"));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let answerer = GeminiAnswerer::new(AnswerConfig::default()).unwrap();
        let result = answerer.answer("content", "question").await;
        assert!(matches!(result, Err(AnswerError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        match answerer(&server).answer("content", "question").await {
            Err(AnswerError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid. (INVALID_ARGUMENT)");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        match answerer(&server).answer("content", "question").await {
            Err(AnswerError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_a_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let result = answerer(&server).answer("content", "question").await;
        assert!(matches!(result, Err(AnswerError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_blocked_prompt_is_explained() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        match extract_answer(response) {
            Err(AnswerError::UnexpectedResponse(reason)) => {
                assert_eq!(reason, "prompt was blocked (SAFETY)");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_candidate_without_text_is_rejected() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        assert!(matches!(
            extract_answer(response),
            Err(AnswerError::UnexpectedResponse(_))
        ));
    }
}

//! LLM Client: the single point of entry for all Gemini API calls in DreamWeave.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All enrichment calls MUST go through this module.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const MAX_OUTPUT_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Extracts the text of the first text part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all enrichment services.
/// Wraps the Gemini `generateContent` API with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, GEMINI_API_BASE.to_string())
    }

    /// Points the client at a different host (proxies, test servers).
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls the LLM in JSON mode and deserializes the text response.
    /// The prompt must still describe the expected JSON shape.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.send(prompt, system, Some("application/json")).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }

    /// Makes a raw call to Gemini, returning the full response object.
    /// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
    async fn send(
        &self,
        prompt: &str,
        system: &str,
        response_mime_type: Option<&str>,
    ) -> Result<LlmResponse, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request_body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type,
            },
        };

        let mut attempt = 1;
        loop {
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let error = match response {
                Err(e) => LlmError::Http(e),
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 || status.is_server_error() {
                        let body = response.text().await.unwrap_or_default();
                        warn!("LLM API returned {}: {}", status, body);
                        LlmError::Api {
                            status: status.as_u16(),
                            message: body,
                        }
                    } else if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        let message = serde_json::from_str::<GeminiError>(&body)
                            .map(|e| e.error.message)
                            .unwrap_or(body);
                        return Err(LlmError::Api {
                            status: status.as_u16(),
                            message,
                        });
                    } else {
                        let llm_response: LlmResponse = response.json().await?;

                        if let Some(usage) = &llm_response.usage_metadata {
                            debug!(
                                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                                usage.prompt_token_count, usage.candidates_token_count
                            );
                        }

                        return Ok(llm_response);
                    }
                }
            };

            if attempt >= MAX_ATTEMPTS {
                return Err(error);
            }

            // Exponential backoff: 1s, 2s
            let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed ({}), retrying after {}ms...",
                attempt,
                error,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::with_base_url("test-key".into(), "gemini-test".into(), server.uri()).unwrap()
    }

    fn text_response(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7}
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_call_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("hello")))
            .mount(&server)
            .await;

        let response = client_for(&server).send("hi", "be brief", None).await.unwrap();
        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[tokio::test]
    async fn test_call_json_requests_json_mode_and_parses() {
        #[derive(Deserialize)]
        struct Insight {
            title: String,
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response("```json\n{\"title\": \"Bright\"}\n```")),
            )
            .mount(&server)
            .await;

        let insight: Insight = client_for(&server).call_json("p", "s").await.unwrap();
        assert_eq!(insight.title, "Bright");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).send("p", "s", None).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("recovered")))
            .mount(&server)
            .await;

        let response = client_for(&server).send("p", "s", None).await.unwrap();
        assert_eq!(response.text(), Some("recovered"));
    }

    #[tokio::test]
    async fn test_persistent_server_error_returns_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("still overloaded"))
            .expect(3)
            .mount(&server)
            .await;

        let err = client_for(&server).send("p", "s", None).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "still overloaded");
            }
            other => panic!("expected the last API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let result: Result<serde_json::Value, _> = client_for(&server).call_json("p", "s").await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }
}

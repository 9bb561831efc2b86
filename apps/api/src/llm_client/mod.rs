/// LLM Client — the single point of entry for all hosted-model calls in ReportMaster.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Report generation talks to the model only through the `TextGenerator` trait.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in ReportMaster.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
/// Total attempts per call, including the first.
const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} attempts")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that can turn a prompt into model text.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>` so the flow can be driven
/// by a scripted generator in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    retry_base_delay: Duration,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            api_url: ANTHROPIC_API_URL.to_string(),
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    /// Points the client at a local stub with a short backoff.
    #[cfg(test)]
    fn with_api_url(api_url: String, retry_base_delay: Duration) -> Result<Self, LlmError> {
        let mut client = Self::new("test-key".to_string())?;
        client.api_url = api_url;
        client.retry_base_delay = retry_base_delay;
        Ok(client)
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff, up to
    /// `MAX_RETRIES` attempts in total. Other 4xx responses fail immediately.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 {
                warn!("LLM API rate limited the request (attempt {})", attempt + 1);
                last_error = Some(LlmError::RateLimited {
                    retries: attempt + 1,
                });
                continue;
            }

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Delay before retry number `attempt` (1-based): base, 2x base, 4x base, ...
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * (1 << (attempt - 1))
}

/// Parses model text as JSON, tolerating a surrounding Markdown code fence.
/// The prompt must instruct the model to return valid JSON.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
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
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone)]
    struct StubState {
        statuses: Arc<Vec<u16>>,
        hits: Arc<AtomicUsize>,
    }

    async fn messages_stub(State(stub): State<StubState>) -> (StatusCode, Json<Value>) {
        let n = stub.hits.fetch_add(1, Ordering::SeqCst);
        let code = stub.statuses[n.min(stub.statuses.len() - 1)];
        let status = StatusCode::from_u16(code).unwrap();
        let body = if status.is_success() {
            json!({
                "content": [{"type": "text", "text": "{\"ok\": true}"}],
                "usage": {"input_tokens": 5, "output_tokens": 3}
            })
        } else {
            json!({"error": {"type": "error", "message": format!("stub {code}")}})
        };
        (status, Json(body))
    }

    /// Serves `statuses` in order (the last one repeats) and counts requests.
    async fn stub_api(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/v1/messages", post(messages_stub))
            .with_state(StubState {
                statuses: Arc::new(statuses),
                hits: hits.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1/messages"), hits)
    }

    fn stub_client(url: String) -> LlmClient {
        LlmClient::with_api_url(url, Duration::from_millis(5)).unwrap()
    }

    #[test]
    fn test_backoff_doubles_per_retry() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_call_retries_overloaded_then_succeeds() {
        let (url, hits) = stub_api(vec![529, 200]).await;

        let text = stub_client(url).complete("prompt", "system").await.unwrap();
        assert_eq!(text, "{\"ok\": true}");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_call_gives_up_after_max_attempts() {
        let (url, hits) = stub_api(vec![500]).await;

        let err = stub_client(url).call("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_call_reports_rate_limit_after_max_attempts() {
        let (url, hits) = stub_api(vec![429]).await;

        let err = stub_client(url).call("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { retries } if retries == MAX_RETRIES));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_call_fails_fast_on_client_error() {
        let (url, hits) = stub_api(vec![401]).await;

        let err = stub_client(url).call("prompt", "system").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "stub 401");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
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

    #[test]
    fn test_parse_json_rejects_blank_text() {
        let result: Result<serde_json::Value, _> = parse_json("  \n ");
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_parse_json_reports_malformed_output() {
        let result: Result<serde_json::Value, _> = parse_json("Sure! Here is the report:");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let json = serde_json::json!({
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "{}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 2}
        });
        let response: LlmResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.text(), Some("{}"));
    }
}

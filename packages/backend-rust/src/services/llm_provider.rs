use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

use crate::config::{env_parse, env_string};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_MAX_RETRIES: usize = 2;
const BASE_BACKOFF_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_endpoint: String,
    pub timeout: Duration,
    pub max_retries: usize,
    /// Canned reply returned instead of calling the endpoint
    pub mock_response: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let api_endpoint = normalize_endpoint(
            env_string("LLM_API_ENDPOINT")
                .or_else(|| env_string("LLM_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
        );

        Self {
            api_key: env_string("LLM_API_KEY"),
            model: env_string("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_endpoint,
            timeout: Duration::from_millis(env_parse("LLM_TIMEOUT").unwrap_or(DEFAULT_TIMEOUT_MS)),
            max_retries: env_parse("LLM_MAX_RETRIES").unwrap_or(DEFAULT_MAX_RETRIES),
            mock_response: std::env::var("LLM_MOCK_RESPONSE").ok(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_retries: DEFAULT_MAX_RETRIES,
            mock_response: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub model: Option<String>,
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("text generation not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty response")]
    EmptyChoices,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Treated as an opaque text generator: one prompt in, one string out.
#[derive(Clone)]
pub struct LlmProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmProvider {
    pub fn from_env() -> Self {
        Self::new(LlmConfig::from_env())
    }

    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    pub fn mock(response: impl Into<String>) -> Self {
        Self::new(LlmConfig {
            mock_response: Some(response.into()),
            ..LlmConfig::default()
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock_response.is_some()
    }

    pub fn is_available(&self) -> bool {
        if self.is_mock() {
            return true;
        }
        self.config.api_key.as_deref().is_some_and(|v| !v.trim().is_empty())
            && !self.config.model.trim().is_empty()
            && !self.config.api_endpoint.trim().is_empty()
    }

    /// Send `prompt` as a single user message and return the first choice's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if let Some(canned) = &self.config.mock_response {
            return Ok(canned.clone());
        }

        let messages = [CompletionMessage {
            role: "user".into(),
            content: prompt.into(),
        }];
        let response = self.chat(&messages).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(LlmError::EmptyChoices)
    }

    pub async fn chat(&self, messages: &[CompletionMessage]) -> Result<CompletionResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(LlmError::NotConfigured("LLM_API_KEY"))?;

        let url = format!("{}/chat/completions", self.config.api_endpoint.trim_end_matches('/'));
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "stream": false
        });

        self.post_with_retry(&url, api_key, &payload).await
    }

    async fn post_with_retry(
        &self,
        url: &str,
        api_key: &str,
        payload: &serde_json::Value,
    ) -> Result<CompletionResponse, LlmError> {
        let max_retries = self.config.max_retries;
        let mut retry = 0usize;

        loop {
            let err = match self.client.post(url).bearer_auth(api_key).json(payload).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let bytes = resp.bytes().await?;
                        return serde_json::from_slice(&bytes).map_err(|e| {
                            tracing::error!(
                                error = %e,
                                body = %String::from_utf8_lossy(&bytes),
                                "failed to parse completion response"
                            );
                            LlmError::Json(e)
                        });
                    }
                    let body = resp.text().await.unwrap_or_default();
                    let err = LlmError::HttpStatus { status, body };
                    if !is_retryable(status) {
                        return Err(err);
                    }
                    err
                }
                Err(e) => LlmError::Request(e),
            };

            if retry >= max_retries {
                return Err(err);
            }
            let backoff = Duration::from_millis(BASE_BACKOFF_MS << retry.min(10));
            warn!(retry, error = %err, "text generation request failed, retrying");
            sleep(backoff).await;
            retry += 1;
        }
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.ends_with("/v1") || trimmed.contains("/v1/") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoint_appends_version() {
        assert_eq!(
            normalize_endpoint("https://llm.local/".to_string()),
            "https://llm.local/v1"
        );
        assert_eq!(
            normalize_endpoint(" https://api.openai.com/v1/ ".to_string()),
            "https://api.openai.com/v1"
        );
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(reqwest::StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(reqwest::StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(reqwest::StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_mock_returns_canned_text() {
        let provider = LlmProvider::mock("[]");
        assert!(provider.is_available());
        assert_eq!(provider.generate("anything").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        let provider = LlmProvider::new(LlmConfig::default());
        assert!(!provider.is_available());
        let err = provider.generate("cats").await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured("LLM_API_KEY")));
    }
}

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::RemoteSettings;

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not configured: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: StatusCode,
        error_body: String,
    },
    #[error("API returned no content")]
    EmptyResponse,
}

/// Thin client for an OpenAI-style `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: Client,
    url: String,
    api_key: String,
}

impl ChatCompletionClient {
    pub fn new(settings: &RemoteSettings) -> Result<Self, ApiConnectionError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiConnectionError::MissingApiKey("api_key".to_string()))?;

        let http = Client::builder().timeout(settings.request_timeout).build()?;

        Ok(Self {
            http,
            url: settings.chat_completions_url(),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<ChatCompletionResponse>().await?)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }

    /// Sends the request and decodes the first choice's content as JSON.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<T, ApiConnectionError> {
        let response = self.call_chat_completion(request).await?;
        let content = response
            .first_content()
            .ok_or(ApiConnectionError::EmptyResponse)?;
        debug!(content = %content, "raw chat completion content");

        let payload = extract_json_payload(content);
        if payload.is_empty() {
            return Err(ApiConnectionError::EmptyResponse);
        }
        Ok(serde_json::from_str(payload)?)
    }
}

/// Strips surrounding whitespace and markdown code fences (```json ... ```).
pub fn extract_json_payload(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(inner) = trimmed.strip_prefix("```") {
        if let Some(inner) = inner.strip_suffix("```") {
            let inner = inner.strip_prefix("json").unwrap_or(inner);
            return inner.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_extract_json_payload() {
        assert_eq!(extract_json_payload("  {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(extract_json_payload("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json_payload("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(extract_json_payload("```json```"), "");
        // An unterminated fence is left alone and fails later as bad JSON.
        assert_eq!(extract_json_payload("```json\n{"), "```json\n{");
    }

    #[test]
    fn test_client_requires_key() {
        let settings = RemoteSettings::default();
        let result = ChatCompletionClient::new(&settings);
        assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
    }

    #[test]
    fn test_client_url() {
        let settings = RemoteSettings {
            api_key: Some("sk-test".to_string()),
            api_base_url: "http://127.0.0.1:1/v1".to_string(),
            request_timeout: Duration::from_secs(1),
            ..RemoteSettings::default()
        };
        let client = ChatCompletionClient::new(&settings).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:1/v1/chat/completions");
    }

    #[test]
    fn test_error_display() {
        let err = ApiConnectionError::ApiError {
            status: StatusCode::BAD_GATEWAY,
            error_body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502 Bad Gateway: upstream down");
    }
}

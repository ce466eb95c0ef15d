// src/generation/anthropic.rs
//! Anthropic Messages API client.

use super::TextGenerator;
use crate::constants::{
    ANTHROPIC_MESSAGES_URL, ANTHROPIC_VERSION, ERROR_BODY_PREVIEW_LENGTH, GENERATION_MAX_TOKENS,
    GENERATION_MODEL,
};
use crate::error::AppError;
use crate::types::{GeneratedPost, GenerationApiKey, RenderedPrompt};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl MessagesRequest {
    /// A one-turn request carrying `prompt` as the user message.
    pub fn single_turn(prompt: &RenderedPrompt) -> Self {
        Self {
            model: GENERATION_MODEL.to_string(),
            max_tokens: GENERATION_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.as_str().to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentFragment>,
}

/// One fragment of a response. Only `text` fragments carry post text.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentFragment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first `text` fragment, or an empty string when there is none.
    pub fn first_text(&self) -> &str {
        self.content
            .iter()
            .find(|fragment| fragment.kind == "text")
            .and_then(|fragment| fragment.text.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    endpoint: String,
}

impl AnthropicClient {
    pub fn new(api_key: &GenerationApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            endpoint: ANTHROPIC_MESSAGES_URL.to_string(),
        })
    }

    fn create_headers(api_key: &GenerationApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(api_key.as_str()).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Anthropic API key format: {}", e))
            })?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &RenderedPrompt) -> Result<GeneratedPost, AppError> {
        let request = MessagesRequest::single_turn(prompt);
        log::debug!(
            "POST {} (model {}, max_tokens {})",
            self.endpoint,
            request.model,
            request.max_tokens
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(parse_error(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        let text = parsed.first_text();
        if text.is_empty() {
            log::warn!("Generation response contained no text fragment");
        }
        Ok(GeneratedPost::new(text))
    }
}

fn parse_error(status: reqwest::StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => AppError::GenerationService {
            status,
            kind: envelope.error.kind,
            message: envelope.error.message,
        },
        Err(_) => AppError::GenerationService {
            status,
            kind: "http_error".to_string(),
            message: body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_fixed_model_and_limit() {
        let prompt = RenderedPrompt::new("Bonjour".to_string());
        let value = serde_json::to_value(MessagesRequest::single_turn(&prompt)).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 2000,
                "messages": [{ "role": "user", "content": "Bonjour" }]
            })
        );
    }

    #[test]
    fn first_text_fragment_is_used() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "Premier" },
                { "type": "text", "text": "Second" }
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();

        assert_eq!(response.first_text(), "Premier");
    }

    #[test]
    fn missing_text_fragment_yields_empty_string() {
        let response: MessagesResponse =
            serde_json::from_value(json!({ "content": [{ "type": "tool_use", "id": "t" }] }))
                .unwrap();
        assert_eq!(response.first_text(), "");

        let response: MessagesResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.first_text(), "");
    }

    #[test]
    fn error_envelope_is_parsed() {
        let body = json!({
            "type": "error",
            "error": { "type": "overloaded_error", "message": "Overloaded" }
        })
        .to_string();

        match parse_error(reqwest::StatusCode::from_u16(529).unwrap(), &body) {
            AppError::GenerationService { kind, message, .. } => {
                assert_eq!(kind, "overloaded_error");
                assert_eq!(message, "Overloaded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn opaque_error_body_is_kept_short() {
        let body = "e".repeat(ERROR_BODY_PREVIEW_LENGTH * 2);
        match parse_error(reqwest::StatusCode::BAD_GATEWAY, &body) {
            AppError::GenerationService { kind, message, .. } => {
                assert_eq!(kind, "http_error");
                assert_eq!(message.len(), ERROR_BODY_PREVIEW_LENGTH);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

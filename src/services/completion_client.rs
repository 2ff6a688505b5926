use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, Result};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct CompletionClient {
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Issue a single chat-completion request. No retries: a timeout or an
    /// upstream failure surfaces immediately, and the two failure modes stay
    /// distinguishable — a structured error payload from the API maps to
    /// `UpstreamApi`, everything else to `UpstreamTransport`.
    pub async fn chat_completion(&self, body: &Value, timeout: Duration) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Internal(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_chat_url(&self.base_url);
        debug!(target: "tripflow::completions", url = %request_url, "Sending completion request");

        let response = client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::UpstreamTransport(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| ApiError::UpstreamTransport(format!("Failed to read response: {err}")))?;

        let response_json: Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(err) => {
                let preview: String = response_text.chars().take(200).collect();
                if status.is_success() {
                    return Err(ApiError::UpstreamTransport(format!(
                        "Failed to parse completion response: {err}"
                    )));
                }
                return Err(ApiError::UpstreamTransport(format!(
                    "HTTP {} error: {preview}",
                    status.as_u16()
                )));
            }
        };

        if let Some(error) = response_json.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(ApiError::UpstreamApi { message });
        }

        if !status.is_success() {
            let preview: String = response_text.chars().take(200).collect();
            return Err(ApiError::UpstreamTransport(format!(
                "HTTP {} error: {preview}",
                status.as_u16()
            )));
        }

        Ok(response_json)
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// Extract the first choice's message content from a completions payload.
/// Returns `None` when the choices array is missing or empty.
pub fn first_choice_text(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|content| content.trim().to_string())
}

/// Builder for a chat-completion request body.
#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    stream: bool,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
            "stream": self.stream,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}

//! Client for the OpenAI-style chat completions API

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways a single analysis attempt can fail. The caller degrades on every
/// variant; none of them ever reaches the request boundary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed analysis response: {0}")]
    Malformed(String),
}

/// Client for the chat completions endpoint of the analysis service
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response format constraint: the service must reply with a JSON object
#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ChatMessage,
}

impl ChatClient {
    /// Create a new client. `timeout` bounds every request so a hung
    /// service degrades the upload instead of hanging it.
    pub fn new(api_key: String, base_url: &str, model: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        }
    }

    /// Send a single user message constrained to a JSON-object reply and
    /// return the first choice's content. One attempt, no retries.
    pub async fn complete_json(&self, prompt: &str) -> Result<String, AnalysisError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, body });
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(format!("invalid response body: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::Malformed("no choices in response".to_string()))
    }
}

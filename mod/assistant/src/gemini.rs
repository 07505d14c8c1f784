use careerdost_core::ServiceError;
use tracing::warn;

use crate::model::ChatTurn;

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_OUTPUT_TOKENS: u32 = 500;

/// Reply used when no API key is configured, so a dev setup without
/// credentials still gets a working endpoint.
const MISSING_KEY_REPLY: &str =
    "I'm ready to help, but no Gemini API key is configured. \
     Set `assistant.gemini_api_key` in the server config to enable me.";

/// Gemini configuration, read from the server config file.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; None disables real calls.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-pro`.
    pub model: String,
    /// API root, overridable for tests.
    pub api_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-pro".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Send one chat turn with its history and return the reply text.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, ServiceError> {
        if message.trim().is_empty() {
            return Err(ServiceError::Validation("message is required".into()));
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("assistant called without a configured Gemini API key");
            return Ok(MISSING_KEY_REPLY.to_string());
        };

        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role,
                    "parts": [{"text": turn.text}],
                })
            })
            .collect();
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{"text": message}],
        }));

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_url, self.config.model, api_key
        );

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "contents": contents,
                "generationConfig": {"maxOutputTokens": MAX_OUTPUT_TOKENS},
            }))
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("gemini request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "gemini returned {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("gemini response parse failed: {}", e)))?;

        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ServiceError::Upstream("gemini response had no text candidate".into()))
    }
}

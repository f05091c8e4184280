//! Gemini REST client

use super::models::{ChatMessage, GenerateContentRequest, GenerateContentResponse};
use super::{RelayError, Result, EMPTY_REPLY_MESSAGE, UNREACHABLE_MESSAGE};
use crate::site_config::AssistantConfig;
use std::time::Duration;

/// Client for the generateContent endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    /// Create a client from the assistant configuration
    ///
    /// The API key is read from the environment variable named by
    /// `api_key_env`. A missing key is not an error here; requests made
    /// without one resolve to the unreachable message.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            log::warn!(
                "Environment variable {} is not set; the assistant will be unavailable",
                config.api_key_env
            );
        }

        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = request_timeout(config.timeout_secs) {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            system_instruction: Some(config.system_instruction.clone()),
        }
    }

    /// Create a client for a specific endpoint and key (for testing)
    #[cfg(test)]
    pub(crate) fn with_endpoint(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<&str>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.map(str::to_string),
            api_key_env: "API_KEY".to_string(),
            system_instruction: None,
        }
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the assistant to continue a transcript
    ///
    /// Always returns displayable text: failures are logged and replaced by
    /// [`UNREACHABLE_MESSAGE`], and an empty reply by [`EMPTY_REPLY_MESSAGE`].
    /// The transcript is sent as given, turn for turn.
    pub async fn ask(&self, transcript: &[ChatMessage]) -> String {
        match self.generate(transcript).await {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_MESSAGE.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::warn!("Assistant request failed: {}", e);
                UNREACHABLE_MESSAGE.to_string()
            }
        }
    }

    /// Send a generateContent request and return the reply text
    ///
    /// # Returns
    /// * `Ok(String)` - Text of the first candidate; empty if the model returned none
    /// * `Err(RelayError)` - Missing API key, transport failure, non-success status, or undecodable body
    pub async fn generate(&self, transcript: &[ChatMessage]) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| RelayError::MissingApiKey(self.api_key_env.clone()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let request = GenerateContentRequest::new(transcript, self.system_instruction.as_deref());

        log::debug!(
            "Sending {} turns to {} ({})",
            transcript.len(),
            self.model,
            url
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let body: GenerateContentResponse = response.json().await?;
            Ok(body.text())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(RelayError::ServerError(format!(
                "generateContent failed: {} - {}",
                status, body
            )))
        }
    }
}

/// Per-request timeout, or `None` when `timeout_secs` is 0
fn request_timeout(timeout_secs: u64) -> Option<Duration> {
    (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs))
}

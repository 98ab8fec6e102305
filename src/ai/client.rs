//! Chat-completion client for OpenAI-compatible endpoints

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::prompts::PromptRequest;
use crate::ai::provider::ProviderSettings;
use crate::core::config::Config;
use crate::error::{AigitError, Result};

/// Sampling temperature; these are prose artifacts, some variance is fine
const TEMPERATURE: f64 = 0.7;

/// Anything that can turn a prompt into completion text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Single-turn, stateless completion returning trimmed text
    async fn complete(&self, prompt: &PromptRequest) -> Result<String>;
}

/// Client for the configured text-generation endpoint
pub struct GenerationClient {
    client: Client,
    settings: ProviderSettings,
}

impl GenerationClient {
    /// Create a client for already resolved settings
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Create a client from configuration and environment
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ProviderSettings::from_config(config)?))
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn complete(&self, prompt: &PromptRequest) -> Result<String> {
        let url = self.endpoint();

        let request_body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt.text,
            }],
            max_tokens: prompt.max_tokens,
            temperature: TEMPERATURE,
        };

        debug!(
            "Requesting {} completion from {} ({}, max_tokens={})",
            prompt.kind, url, self.settings.model, prompt.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AigitError::Generation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AigitError::Generation(format!(
                "API error ({}): {}",
                status,
                error_text.trim()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AigitError::Generation(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AigitError::Generation("Empty response from API".to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat completion request/response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

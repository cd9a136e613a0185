//! Text improvement through a chat-completions model (Mistral)
//!
//! [`TextImprovementClient::improve`] reports every failure as a
//! [`ServiceError`]. [`TextImprovementClient::improve_or_fallback`] is what the
//! HTTP layer calls: it never fails, and on any error it formats the author's
//! text locally so nothing dictated is lost.

pub mod fallback;

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Credential, ServiceConfig};
use crate::document::SectionKey;
use crate::errors::{Service, ServiceError, ServiceResult};

pub use fallback::format_fallback;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completions request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Result returned to the author: the text, plus why it was not improved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovedText {
    pub resultado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

impl ImprovedText {
    /// Local formatting, explained by `error`
    #[must_use]
    pub fn fallback(section: SectionKey, text: &str, error: &ServiceError) -> Self {
        Self {
            resultado: format_fallback(section, text),
            mensaje: Some(error.user_message().to_string()),
        }
    }
}

/// HTTP client for the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct TextImprovementClient {
    client: Client,
    api_url: String,
    api_key: Credential,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl TextImprovementClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Credential,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build text improvement HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
            max_tokens: crate::utils::constants::DEFAULT_MAX_TOKENS,
            temperature: crate::utils::constants::DEFAULT_TEMPERATURE,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let mut client = Self::new(
            config.mistral_api_url(),
            config.mistral_api_key().clone(),
            config.mistral_model(),
            config.ai_timeout(),
        )?;
        client.max_tokens = config.max_tokens();
        client.temperature = config.temperature();
        Ok(client)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_configured()
    }

    /// Request body for polishing `text` as `section`
    #[must_use]
    pub fn chat_request(&self, section: SectionKey, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: section.improvement_prompt(text),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Ask the model to polish `text`. The first choice's content is
    /// returned, or `text` unchanged when the model sends none.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Configuration`] without a key (no request is sent)
    /// - [`ServiceError::UpstreamAuth`] / [`ServiceError::UpstreamQuota`] on 401 / 429
    /// - [`ServiceError::UpstreamGeneric`] on network failure, timeout, other
    ///   non-2xx status, or an unparsable body
    pub async fn improve(&self, section: SectionKey, text: &str) -> ServiceResult<String> {
        let api_key = self.api_key.expose().ok_or(ServiceError::Configuration {
            service: Service::TextImprovement,
        })?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&self.chat_request(section, text))
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(Service::TextImprovement, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(
                Service::TextImprovement,
                status.as_u16(),
                &body,
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(Service::TextImprovement, &e))?;

        let improved = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| text.to_string());

        Ok(improved)
    }

    /// [`improve`](Self::improve), degrading to [`format_fallback`] on any error
    pub async fn improve_or_fallback(&self, section: SectionKey, text: &str) -> ImprovedText {
        match self.improve(section, text).await {
            Ok(resultado) => ImprovedText {
                resultado,
                mensaje: None,
            },
            Err(error @ ServiceError::Configuration { .. }) => {
                tracing::info!(section = %section, "Text improvement key not configured, using fallback");
                ImprovedText::fallback(section, text, &error)
            }
            Err(error) => {
                tracing::warn!(section = %section, error = %error, "Text improvement failed, using fallback");
                ImprovedText::fallback(section, text, &error)
            }
        }
    }
}

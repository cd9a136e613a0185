//! Fluent setters for `ServiceConfigBuilder`

use super::builder::ServiceConfigBuilder;
use super::types::{Credential, DocumentBranding};
use crate::content_processor::Environment;
use crate::utils::constants::{BROWSERLESS_TOKEN_PLACEHOLDER, MISTRAL_API_KEY_PLACEHOLDER};

impl ServiceConfigBuilder {
    /// Address the HTTP server binds to, validated in `build()`
    #[must_use]
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Browserless token. The `.env` placeholder is treated as unset.
    #[must_use]
    pub fn browserless_token(mut self, token: impl AsRef<str>) -> Self {
        self.browserless_token = Credential::new(Some(token.as_ref()), BROWSERLESS_TOKEN_PLACEHOLDER);
        self
    }

    #[must_use]
    pub fn browserless_url(mut self, url: impl Into<String>) -> Self {
        self.browserless_url = url.into();
        self
    }

    #[must_use]
    pub fn pdf_timeout_secs(mut self, secs: u64) -> Self {
        self.pdf_timeout_secs = secs;
        self
    }

    /// Mistral API key. The `.env` placeholder is treated as unset.
    #[must_use]
    pub fn mistral_api_key(mut self, key: impl AsRef<str>) -> Self {
        self.mistral_api_key = Credential::new(Some(key.as_ref()), MISTRAL_API_KEY_PLACEHOLDER);
        self
    }

    #[must_use]
    pub fn mistral_api_url(mut self, url: impl Into<String>) -> Self {
        self.mistral_api_url = url.into();
        self
    }

    #[must_use]
    pub fn mistral_model(mut self, model: impl Into<String>) -> Self {
        self.mistral_model = model.into();
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn ai_timeout_secs(mut self, secs: u64) -> Self {
        self.ai_timeout_secs = secs;
        self
    }

    /// Sanitizer strategy for rich-text sections
    ///
    /// `Environment::Server` is the reduced, pattern-based cleanup. Only use it
    /// when every section is produced by this application's own editor.
    #[must_use]
    pub fn sanitizer(mut self, sanitizer: Environment) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    #[must_use]
    pub fn branding(mut self, branding: DocumentBranding) -> Self {
        self.branding = branding;
        self
    }
}

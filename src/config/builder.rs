//! Builder for `ServiceConfig`
//!
//! Every field has a default from `utils::constants`, so `build()` only
//! validates. `from_env` / `from_lookup` read the deployment's environment
//! variables on top of those defaults.

use anyhow::{anyhow, bail, Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;

use super::types::{Credential, DocumentBranding, ServiceConfig};
use crate::content_processor::Environment;
use crate::utils::constants::{
    BROWSERLESS_TOKEN_PLACEHOLDER, DEFAULT_AI_TIMEOUT_SECS, DEFAULT_BIND_ADDR,
    DEFAULT_BROWSERLESS_URL, DEFAULT_MAX_TOKENS, DEFAULT_MISTRAL_API_URL, DEFAULT_MISTRAL_MODEL,
    DEFAULT_PDF_TIMEOUT_SECS, DEFAULT_TEMPERATURE, MISTRAL_API_KEY_PLACEHOLDER,
};

/// Environment variable names read by [`ServiceConfigBuilder::from_env`]
pub mod env_vars {
    pub const BIND_ADDR: &str = "PROCDOC_BIND_ADDR";
    pub const BROWSERLESS_TOKEN: &str = "BROWSERLESS_TOKEN";
    pub const BROWSERLESS_URL: &str = "BROWSERLESS_URL";
    pub const PDF_RENDER_TIMEOUT_SECS: &str = "PDF_RENDER_TIMEOUT_SECS";
    pub const MISTRAL_API_KEY: &str = "MISTRAL_API_KEY";
    pub const MISTRAL_API_URL: &str = "MISTRAL_API_URL";
    pub const MISTRAL_MODEL: &str = "MISTRAL_MODEL";
    pub const AI_TIMEOUT_SECS: &str = "AI_TIMEOUT_SECS";
    pub const SANITIZER: &str = "PROCDOC_SANITIZER";
}

pub struct ServiceConfigBuilder {
    pub(crate) bind_addr: String,
    pub(crate) browserless_token: Credential,
    pub(crate) browserless_url: String,
    pub(crate) pdf_timeout_secs: u64,
    pub(crate) mistral_api_key: Credential,
    pub(crate) mistral_api_url: String,
    pub(crate) mistral_model: String,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
    pub(crate) ai_timeout_secs: u64,
    pub(crate) sanitizer: Environment,
    pub(crate) branding: DocumentBranding,
}

impl Default for ServiceConfigBuilder {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            browserless_token: Credential::unset(),
            browserless_url: DEFAULT_BROWSERLESS_URL.to_string(),
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
            mistral_api_key: Credential::unset(),
            mistral_api_url: DEFAULT_MISTRAL_API_URL.to_string(),
            mistral_model: DEFAULT_MISTRAL_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            ai_timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            sanitizer: Environment::default(),
            branding: DocumentBranding::default(),
        }
    }
}

impl ServiceConfig {
    /// Create a builder for configuring a `ServiceConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparsable, or if the
    /// resulting configuration fails validation.
    pub fn from_env() -> Result<Self> {
        ServiceConfigBuilder::from_env()?.build()
    }
}

impl ServiceConfigBuilder {
    /// Defaults overridden by the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or enum variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    /// in [`env_vars`]. Unset and blank values keep the default.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or enum variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::default();

        if let Some(addr) = get(env_vars::BIND_ADDR) {
            builder = builder.bind_addr(addr);
        }

        builder.browserless_token = Credential::new(
            lookup(env_vars::BROWSERLESS_TOKEN).as_deref(),
            BROWSERLESS_TOKEN_PLACEHOLDER,
        );
        if let Some(url) = get(env_vars::BROWSERLESS_URL) {
            builder = builder.browserless_url(url);
        }
        if let Some(secs) = get(env_vars::PDF_RENDER_TIMEOUT_SECS) {
            builder = builder.pdf_timeout_secs(parse_var(env_vars::PDF_RENDER_TIMEOUT_SECS, &secs)?);
        }

        builder.mistral_api_key = Credential::new(
            lookup(env_vars::MISTRAL_API_KEY).as_deref(),
            MISTRAL_API_KEY_PLACEHOLDER,
        );
        if let Some(url) = get(env_vars::MISTRAL_API_URL) {
            builder = builder.mistral_api_url(url);
        }
        if let Some(model) = get(env_vars::MISTRAL_MODEL) {
            builder = builder.mistral_model(model);
        }
        if let Some(secs) = get(env_vars::AI_TIMEOUT_SECS) {
            builder = builder.ai_timeout_secs(parse_var(env_vars::AI_TIMEOUT_SECS, &secs)?);
        }

        if let Some(sanitizer) = get(env_vars::SANITIZER) {
            let sanitizer = Environment::from_str(&sanitizer)
                .map_err(|e| anyhow!("Invalid {}: {e}", env_vars::SANITIZER))?;
            builder = builder.sanitizer(sanitizer);
        }

        Ok(builder)
    }

    /// Validate and produce the final configuration
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable bind address, a non-HTTP service
    /// URL, a zero timeout or token budget, an empty model name, or a
    /// temperature outside `0.0..=2.0`.
    pub fn build(self) -> Result<ServiceConfig> {
        let bind_addr: SocketAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_addr))?;

        validate_http_url("browserless_url", &self.browserless_url)?;
        validate_http_url("mistral_api_url", &self.mistral_api_url)?;

        if self.pdf_timeout_secs == 0 {
            bail!("pdf_timeout_secs must be greater than zero");
        }
        if self.ai_timeout_secs == 0 {
            bail!("ai_timeout_secs must be greater than zero");
        }
        if self.max_tokens == 0 {
            bail!("max_tokens must be greater than zero");
        }
        if self.mistral_model.trim().is_empty() {
            bail!("mistral_model must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            );
        }

        Ok(ServiceConfig {
            bind_addr,
            browserless_token: self.browserless_token,
            browserless_url: self.browserless_url.trim_end_matches('/').to_string(),
            pdf_timeout_secs: self.pdf_timeout_secs,
            mistral_api_key: self.mistral_api_key,
            mistral_api_url: self.mistral_api_url,
            mistral_model: self.mistral_model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            ai_timeout_secs: self.ai_timeout_secs,
            sanitizer: self.sanitizer,
            branding: self.branding,
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for {name}: '{value}'"))
}

fn validate_http_url(field: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{field} must be an http(s) URL, got '{url}'"))
    }
}

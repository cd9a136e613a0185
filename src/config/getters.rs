//! Getter methods for `ServiceConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `ServiceConfig` instance.

use std::net::SocketAddr;
use std::time::Duration;

use super::types::{Credential, DocumentBranding, ServiceConfig};
use crate::content_processor::Environment;

impl ServiceConfig {
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn browserless_token(&self) -> &Credential {
        &self.browserless_token
    }

    #[must_use]
    pub fn browserless_url(&self) -> &str {
        &self.browserless_url
    }

    #[must_use]
    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }

    #[must_use]
    pub fn mistral_api_key(&self) -> &Credential {
        &self.mistral_api_key
    }

    #[must_use]
    pub fn mistral_api_url(&self) -> &str {
        &self.mistral_api_url
    }

    #[must_use]
    pub fn mistral_model(&self) -> &str {
        &self.mistral_model
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    #[must_use]
    pub fn sanitizer(&self) -> Environment {
        self.sanitizer
    }

    #[must_use]
    pub fn branding(&self) -> &DocumentBranding {
        &self.branding
    }
}

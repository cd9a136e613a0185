//! Core configuration types for the procdoc service
//!
//! This module contains the main `ServiceConfig` struct, the redacting
//! `Credential` wrapper and the `DocumentBranding` printed on every PDF.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

use crate::content_processor::Environment;
use crate::utils::constants::{
    DEFAULT_DOCUMENT_CODE, DEFAULT_DOCUMENT_NOTICE, DEFAULT_DOCUMENT_TITLE, DEFAULT_LOGO_URL,
};

/// API token or key for a remote collaborator.
///
/// Blank values and the `.env` template placeholder are normalized away at
/// construction, so "configured" is a single `Option` check. The secret never
/// appears in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    /// Wrap a raw value, treating blank input and `placeholder` as unset
    #[must_use]
    pub fn new(value: Option<&str>, placeholder: &str) -> Self {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != placeholder)
            .map(str::to_string);
        Self(value)
    }

    #[must_use]
    pub fn unset() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// The secret, when configured
    #[must_use]
    pub fn expose(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Credential(<redacted>)"),
            None => f.write_str("Credential(<unset>)"),
        }
    }
}

/// Fixed texts and logo printed in the document header and trailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBranding {
    pub logo_url: String,
    /// Printed top right, e.g. `PA 009`
    pub document_code: String,
    pub title: String,
    /// Paragraph after the last section
    pub notice: String,
}

impl Default for DocumentBranding {
    fn default() -> Self {
        Self {
            logo_url: DEFAULT_LOGO_URL.to_string(),
            document_code: DEFAULT_DOCUMENT_CODE.to_string(),
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            notice: DEFAULT_DOCUMENT_NOTICE.to_string(),
        }
    }
}

/// Main configuration struct for the HTTP service and its remote clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub(crate) bind_addr: SocketAddr,

    /// Browserless token, sent as the `token` query parameter
    #[serde(skip)]
    pub(crate) browserless_token: Credential,
    /// Base URL; `/pdf` is appended by the client
    pub(crate) browserless_url: String,
    /// Timeout in seconds for one PDF render round-trip
    ///
    /// Default: 60 seconds
    pub(crate) pdf_timeout_secs: u64,

    /// Mistral API key, sent as a bearer token
    #[serde(skip)]
    pub(crate) mistral_api_key: Credential,
    /// Full chat-completions endpoint URL
    pub(crate) mistral_api_url: String,
    pub(crate) mistral_model: String,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
    /// Timeout in seconds for the text-improvement call. Past it the local
    /// fallback formatter answers instead.
    ///
    /// Default: 15 seconds
    pub(crate) ai_timeout_secs: u64,

    /// Sanitizer strategy for rich-text sections
    ///
    /// Default: `client` (allow-list)
    pub(crate) sanitizer: Environment,

    pub(crate) branding: DocumentBranding,
}

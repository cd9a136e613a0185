//! Client for the headless-browser PDF render service (Browserless `/pdf`)
//!
//! The token travels as the `token` query parameter. A missing or placeholder
//! token is reported as [`ServiceError::Configuration`] before any request is
//! built, so an unconfigured deployment never touches the network.

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Credential, DocumentBranding, ServiceConfig};
use crate::content_processor::ContentProcessor;
use crate::document::{render_document_html, render_footer_template, Approvals, ProcedureDocument};
use crate::errors::{Service, ServiceError, ServiceResult};

/// Page margins, CSS lengths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfMargins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for PdfMargins {
    fn default() -> Self {
        // Bottom margin leaves room for the approval footer
        Self {
            top: "20mm".to_string(),
            right: "15mm".to_string(),
            bottom: "40mm".to_string(),
            left: "15mm".to_string(),
        }
    }
}

/// Page options understood by the render service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub format: String,
    pub print_background: bool,
    pub margin: PdfMargins,
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
}

impl PdfOptions {
    /// A4, backgrounds on, empty header, the given footer on every page
    #[must_use]
    pub fn with_footer(footer_template: impl Into<String>) -> Self {
        Self {
            format: "A4".to_string(),
            print_background: true,
            margin: PdfMargins::default(),
            display_header_footer: true,
            header_template: "<span></span>".to_string(),
            footer_template: footer_template.into(),
        }
    }
}

/// Body of a render request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRequest {
    pub html: String,
    pub options: PdfOptions,
}

impl PdfRequest {
    /// Process every section and lay out the full procedure for printing
    #[must_use]
    pub fn for_procedure(
        document: &ProcedureDocument,
        approvals: &Approvals,
        processor: &ContentProcessor,
        branding: &DocumentBranding,
        date: NaiveDate,
    ) -> Self {
        let sections = document.process(processor);
        Self {
            html: render_document_html(&sections, branding),
            options: PdfOptions::with_footer(render_footer_template(approvals, date)),
        }
    }
}

/// HTTP client for the render service
#[derive(Debug, Clone)]
pub struct PdfRenderClient {
    client: Client,
    base_url: String,
    token: Credential,
}

impl PdfRenderClient {
    /// Build a client with its own connection pool and request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, token: Credential, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build PDF render HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        Self::new(
            config.browserless_url(),
            config.browserless_token().clone(),
            config.pdf_timeout(),
        )
    }

    /// `{base}/pdf`
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/pdf", self.base_url)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token.is_configured()
    }

    /// The token, or the configuration error callers must surface as-is
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when no usable token is set.
    pub fn ensure_configured(&self) -> ServiceResult<&str> {
        self.token.expose().ok_or(ServiceError::Configuration {
            service: Service::PdfRender,
        })
    }

    /// Render `request` to PDF bytes
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Configuration`] without a token (no request is sent)
    /// - [`ServiceError::UpstreamAuth`] on 401
    /// - [`ServiceError::UpstreamQuota`] on 429
    /// - [`ServiceError::UpstreamGeneric`] on network failure, timeout, or
    ///   any other non-2xx status
    pub async fn render(&self, request: &PdfRequest) -> ServiceResult<Vec<u8>> {
        let token = self.ensure_configured()?;
        let endpoint = self.endpoint();

        tracing::debug!(
            endpoint = %endpoint,
            html_bytes = request.html.len(),
            "Sending PDF render request"
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("token", token)])
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(Service::PdfRender, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "PDF render service rejected the request");
            return Err(ServiceError::from_status(
                Service::PdfRender,
                status.as_u16(),
                &body,
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::from_reqwest(Service::PdfRender, &e))?;

        tracing::info!(pdf_bytes = bytes.len(), "PDF rendered");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_wire_shape() -> serde_json::Result<()> {
        let value = serde_json::to_value(PdfOptions::with_footer("<div>pie</div>"))?;
        assert_eq!(
            value,
            serde_json::json!({
                "format": "A4",
                "printBackground": true,
                "margin": { "top": "20mm", "right": "15mm", "bottom": "40mm", "left": "15mm" },
                "displayHeaderFooter": true,
                "headerTemplate": "<span></span>",
                "footerTemplate": "<div>pie</div>"
            })
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() -> anyhow::Result<()> {
        let client = PdfRenderClient::new(
            "https://chrome.browserless.io/",
            Credential::unset(),
            Duration::from_secs(5),
        )?;
        assert_eq!(client.endpoint(), "https://chrome.browserless.io/pdf");
        Ok(())
    }

    #[test]
    fn test_placeholder_token_is_not_configured() -> anyhow::Result<()> {
        let token = Credential::new(
            Some(crate::utils::constants::BROWSERLESS_TOKEN_PLACEHOLDER),
            crate::utils::constants::BROWSERLESS_TOKEN_PLACEHOLDER,
        );
        let client = PdfRenderClient::new("http://localhost", token, Duration::from_secs(5))?;
        assert!(!client.is_configured());
        assert_eq!(
            client.ensure_configured(),
            Err(ServiceError::Configuration {
                service: Service::PdfRender
            })
        );
        Ok(())
    }

    #[test]
    fn test_request_for_procedure() {
        let mut document = ProcedureDocument::default();
        document.objeto = "Definir el proceso".to_string();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();

        let request = PdfRequest::for_procedure(
            &document,
            &Approvals::default(),
            &ContentProcessor::default(),
            &DocumentBranding::default(),
            date,
        );

        assert!(request.html.contains("<p>Definir el proceso</p>"));
        assert!(request.options.footer_template.contains("Fecha: 31/01/2025"));
        assert!(request.options.footer_template.contains(">000</td>"));
    }
}

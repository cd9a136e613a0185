//! Error types for the remote collaborators
//!
//! [`ServiceError`] covers the PDF render service and the text-improvement
//! service. Every variant carries a distinct Spanish message for the author
//! and a raw detail string, and maps to its own HTTP status.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for remote service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Which remote collaborator an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    PdfRender,
    TextImprovement,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::PdfRender => f.write_str("PDF render service"),
            Service::TextImprovement => f.write_str("text improvement service"),
        }
    }
}

/// Failures of a remote collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Credential missing or still the template placeholder. Raised before
    /// any network attempt.
    #[error("{service}: credential not configured")]
    Configuration { service: Service },

    /// Upstream answered 401
    #[error("{service}: credential rejected (401): {details}")]
    UpstreamAuth { service: Service, details: String },

    /// Upstream answered 429
    #[error("{service}: quota exceeded (429): {details}")]
    UpstreamQuota { service: Service, details: String },

    /// Network failure, timeout, or any other non-2xx answer
    #[error("{service}: upstream failure: {details}")]
    UpstreamGeneric {
        service: Service,
        status: Option<u16>,
        details: String,
    },
}

impl ServiceError {
    /// Classify a non-2xx upstream status
    #[must_use]
    pub fn from_status(service: Service, status: u16, body: &str) -> Self {
        let details = if body.trim().is_empty() {
            format!("upstream responded with status {status}")
        } else {
            format!("upstream responded with status {status}: {}", body.trim())
        };

        match status {
            401 => ServiceError::UpstreamAuth { service, details },
            429 => ServiceError::UpstreamQuota { service, details },
            _ => ServiceError::UpstreamGeneric {
                service,
                status: Some(status),
                details,
            },
        }
    }

    /// Classify a transport-level failure (connect, timeout, decode)
    #[must_use]
    pub fn from_reqwest(service: Service, error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::from_status(service, status.as_u16(), "");
        }

        let details = if error.is_timeout() {
            format!("request timed out: {error}")
        } else {
            error.to_string()
        };
        ServiceError::UpstreamGeneric {
            service,
            status: None,
            details,
        }
    }

    #[must_use]
    pub fn service(&self) -> Service {
        match self {
            ServiceError::Configuration { service }
            | ServiceError::UpstreamAuth { service, .. }
            | ServiceError::UpstreamQuota { service, .. }
            | ServiceError::UpstreamGeneric { service, .. } => *service,
        }
    }

    /// HTTP status surfaced to the caller
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Configuration { .. } => StatusCode::BAD_REQUEST,
            ServiceError::UpstreamAuth { .. } => StatusCode::UNAUTHORIZED,
            ServiceError::UpstreamQuota { .. } => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::UpstreamGeneric { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Human-readable message for the author
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match (self.service(), self) {
            (Service::PdfRender, ServiceError::Configuration { .. }) => {
                "Token de Browserless no configurado"
            }
            (Service::PdfRender, ServiceError::UpstreamAuth { .. }) => {
                "Token de Browserless inválido o expirado"
            }
            (Service::PdfRender, ServiceError::UpstreamQuota { .. }) => {
                "Límite de uso de Browserless excedido"
            }
            (Service::PdfRender, ServiceError::UpstreamGeneric { .. }) => "Error al generar el PDF",
            (Service::TextImprovement, ServiceError::Configuration { .. }) => {
                "Función de IA no disponible. Configure MISTRAL_API_KEY en .env.local para usar esta función."
            }
            (Service::TextImprovement, ServiceError::UpstreamAuth { .. }) => {
                "Clave de IA inválida o expirada. Se aplicó formato básico al texto."
            }
            (Service::TextImprovement, ServiceError::UpstreamQuota { .. }) => {
                "Límite de uso de IA excedido. Se aplicó formato básico al texto."
            }
            (Service::TextImprovement, ServiceError::UpstreamGeneric { .. }) => {
                "Error conectando con IA. Se aplicó formato básico al texto."
            }
        }
    }

    /// Raw detail string, with remediation hints for the PDF credential cases
    #[must_use]
    pub fn details(&self) -> String {
        match (self.service(), self) {
            (Service::PdfRender, ServiceError::Configuration { .. }) => {
                "Configure BROWSERLESS_TOKEN en .env.local para generar PDFs. Obtenga su token en https://browserless.io".to_string()
            }
            (Service::PdfRender, ServiceError::UpstreamAuth { details, .. }) => format!(
                "Verifique su token de Browserless en .env.local. Obtenga uno nuevo en https://browserless.io ({details})"
            ),
            (Service::PdfRender, ServiceError::UpstreamQuota { details, .. }) => format!(
                "Ha excedido el límite de su plan de Browserless. Verifique su cuenta o actualice su plan. ({details})"
            ),
            (Service::TextImprovement, ServiceError::Configuration { .. }) => {
                "MISTRAL_API_KEY not configured".to_string()
            }
            (
                _,
                ServiceError::UpstreamAuth { details, .. }
                | ServiceError::UpstreamQuota { details, .. }
                | ServiceError::UpstreamGeneric { details, .. },
            ) => details.clone(),
        }
    }
}

/// JSON error body: `{ "error": ..., "details": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl From<&ServiceError> for ErrorBody {
    fn from(error: &ServiceError) -> Self {
        Self {
            error: error.user_message().to_string(),
            details: error.details(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}

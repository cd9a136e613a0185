//! HTTP request handlers for API endpoints

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use super::types::{GeneratePdfRequest, HealthResponse, ImproveTextRequest};
use super::AppState;
use crate::errors::ServiceError;
use crate::pdf_render::PdfRequest;
use crate::text_improvement::ImprovedText;
use crate::utils::constants::DEFAULT_PDF_FILENAME;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Render the procedure to PDF
///
/// The render token is checked before anything else, so an unconfigured
/// deployment answers 400 without processing sections or calling out.
pub async fn generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Response, ServiceError> {
    if let Err(e) = state.pdf.ensure_configured() {
        warn!("PDF requested but the render token is not configured");
        return Err(e);
    }

    info!(
        completed_sections = request.documento.completed_count(),
        "PDF generation request"
    );

    let today = chrono::Local::now().date_naive();
    let pdf_request = PdfRequest::for_procedure(
        &request.documento,
        &request.aprobaciones,
        &state.processor,
        state.config.branding(),
        today,
    );

    let pdf = state.pdf.render(&pdf_request).await.inspect_err(|e| {
        warn!(error = %e, "PDF generation failed");
    })?;

    let disposition = format!("attachment; filename={DEFAULT_PDF_FILENAME}");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// Polish dictated text for one section, falling back to local formatting
pub async fn improve_text(
    State(state): State<AppState>,
    Json(request): Json<ImproveTextRequest>,
) -> Json<ImprovedText> {
    info!(
        section = %request.seccion,
        chars = request.texto.chars().count(),
        "Text improvement request"
    );

    Json(
        state
            .text_improvement
            .improve_or_fallback(request.seccion, &request.texto)
            .await,
    )
}

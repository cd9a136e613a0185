//! REST API server
//!
//! Routes:
//! - `GET /health`
//! - `POST /api/generar-pdf`: procedure + approvals in, PDF out
//! - `POST /api/mejorar-texto`: dictated text in, polished (or locally
//!   formatted) text out

mod handlers;
mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::content_processor::ContentProcessor;
use crate::pdf_render::PdfRenderClient;
use crate::text_improvement::TextImprovementClient;

pub use handlers::*;
pub use types::*;

/// Server state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub processor: ContentProcessor,
    pub pdf: PdfRenderClient,
    pub text_improvement: TextImprovementClient,
}

impl AppState {
    /// Build both remote clients from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_config(config: ServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            processor: ContentProcessor::new(config.sanitizer()),
            pdf: PdfRenderClient::from_config(&config)?,
            text_improvement: TextImprovementClient::from_config(&config)?,
            config: Arc::new(config),
        })
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generar-pdf", post(generate_pdf))
        .route("/api/mejorar-texto", post(improve_text))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already bound listener
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}

/// Bind `addr` and serve until the process is stopped
///
/// # Errors
///
/// Returns an error if binding fails or the server stops with an I/O error.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        pdf_configured = state.pdf.is_configured(),
        ai_configured = state.text_improvement.is_configured(),
        sanitizer = ?state.processor.environment(),
        "Starting procdoc server"
    );
    serve(listener, state).await
}

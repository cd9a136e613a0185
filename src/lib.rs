pub mod config;
pub mod content_processor;
pub mod document;
pub mod editor;
pub mod errors;
pub mod pdf_render;
pub mod server;
pub mod text_improvement;
pub mod utils;

pub use config::{Credential, DocumentBranding, ServiceConfig, ServiceConfigBuilder};
pub use content_processor::{
    annotate_for_print, classify, process_content, reconstruct_lists, sanitize,
    structure_plain_text, ContentKind, ContentProcessor, Environment,
};
pub use document::{Approvals, ProcedureDocument, ProcessedSections, SectionKey};
pub use editor::{apply_command, BlockFormat, EditorError, EditorMode, EditorState, FormatCommand};
pub use errors::{Service, ServiceError, ServiceResult};
pub use pdf_render::{PdfOptions, PdfRenderClient, PdfRequest};
pub use server::{build_router, serve, start_server, AppState};
pub use text_improvement::{format_fallback, ImprovedText, TextImprovementClient};

/// Build the server state from `config` and serve on its bind address
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built, the address cannot be
/// bound, or the server stops with an I/O error.
pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr().to_string();
    let state = AppState::from_config(config)?;
    start_server(&addr, state).await?;
    Ok(())
}

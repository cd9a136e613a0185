//! Test utilities and helper functions for the procdoc test suite

use anyhow::Result;
use mockito::{Matcher, Mock, ServerGuard};
use procdoc::{Approvals, ProcedureDocument, SectionKey, ServiceConfig};

/// Minimal bytes a PDF renderer would answer with
#[allow(dead_code)]
pub const FAKE_PDF: &[u8] = b"%PDF-1.4\n%fake\n%%EOF";

/// Starts a mock HTTP server for the remote collaborators
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Config pointing both remote clients at `server`
#[allow(dead_code)]
pub fn mock_config(server: &ServerGuard, token: &str, api_key: &str) -> Result<ServiceConfig> {
    ServiceConfig::builder()
        .bind_addr("127.0.0.1:0")
        .browserless_url(server.url())
        .browserless_token(token)
        .mistral_api_url(format!("{}/v1/chat/completions", server.url()))
        .mistral_api_key(api_key)
        .ai_timeout_secs(2)
        .pdf_timeout_secs(2)
        .build()
}

/// Creates a mock `/pdf` endpoint expecting `token`
#[allow(dead_code)]
pub async fn create_pdf_mock(server: &mut ServerGuard, token: &str, status: usize) -> Mock {
    let body: &[u8] = if status == 200 { FAKE_PDF } else { b"upstream error" };
    server
        .mock("POST", "/pdf")
        .match_query(Matcher::UrlEncoded("token".into(), token.into()))
        .with_status(status)
        .with_header("content-type", "application/pdf")
        .with_body(body)
        .create_async()
        .await
}

/// Creates a mock chat-completions endpoint answering with `content`
#[allow(dead_code)]
pub async fn create_chat_mock(server: &mut ServerGuard, api_key: &str, content: &str) -> Mock {
    let body = serde_json::json!({
        "id": "cmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    });
    server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", format!("Bearer {api_key}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Creates a chat-completions endpoint failing with `status`
#[allow(dead_code)]
pub async fn create_chat_error_mock(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(status)
        .with_body(r#"{"message":"error"}"#)
        .create_async()
        .await
}

/// A procedure mixing every kind of section content
#[allow(dead_code)]
pub fn sample_document() -> ProcedureDocument {
    let mut document = ProcedureDocument::default();
    document.set_section(
        SectionKey::Objeto,
        "Establecer el proceso de ingreso de contratistas a planta.",
    );
    document.set_section(
        SectionKey::Alcance,
        "<p>Aplica a <strong>todas</strong> las plantas.</p>",
    );
    document.set_section(
        SectionKey::Responsabilidades,
        "<div>1. Seguridad: valida la documentación</div><div>2. Portería: registra el ingreso</div>",
    );
    document.set_section(
        SectionKey::Descripcion,
        "1. Solicitar el permiso\na) Completar formulario\nb) Adjuntar seguro\n\nFin del procedimiento",
    );
    document
}

#[allow(dead_code)]
pub fn sample_approvals() -> Approvals {
    Approvals {
        preparado_por: "Ana Gómez".to_string(),
        revisado_por: "Luis Pérez".to_string(),
        aprobado_por: "Marta Ruiz".to_string(),
        revision: "001".to_string(),
    }
}

//! End-to-end tests of the HTTP API against mocked collaborators

mod common;

use mockito::{Matcher, ServerGuard};
use procdoc::server::HealthResponse;
use procdoc::{AppState, ImprovedText};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::{
    create_chat_mock, create_pdf_mock, mock_config, sample_approvals, sample_document,
    setup_mock_server, FAKE_PDF,
};

/// Serve the API on an ephemeral port and return its base URL
async fn spawn_api(upstream: &ServerGuard, token: &str, api_key: &str) -> anyhow::Result<String> {
    let state = AppState::from_config(mock_config(upstream, token, api_key)?)?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = procdoc::serve(listener, state).await;
    });

    Ok(format!("http://{addr}"))
}

fn pdf_body() -> Value {
    json!({
        "documento": sample_document(),
        "aprobaciones": sample_approvals(),
    })
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let upstream = setup_mock_server().await;
    let base = spawn_api(&upstream, "", "").await?;

    let response = reqwest::get(format!("{base}/health")).await?;
    assert_eq!(response.status(), 200);

    let health: HealthResponse = response.json().await?;
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn test_generate_pdf_without_token_is_bad_request() -> anyhow::Result<()> {
    let mut upstream = setup_mock_server().await;
    let never = upstream.mock("POST", Matcher::Any).expect(0).create_async().await;
    let base = spawn_api(&upstream, "your_browserless_token_here", "").await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generar-pdf"))
        .json(&pdf_body())
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Token de Browserless no configurado");
    assert!(body["details"].as_str().unwrap_or_default().contains("BROWSERLESS_TOKEN"));

    never.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_generate_pdf_returns_attachment() -> anyhow::Result<()> {
    let mut upstream = setup_mock_server().await;
    let mock = create_pdf_mock(&mut upstream, "tok-ok", 200).await;
    let base = spawn_api(&upstream, "tok-ok", "").await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generar-pdf"))
        .json(&pdf_body())
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=procedimiento.pdf")
    );
    assert_eq!(response.bytes().await?.as_ref(), FAKE_PDF);

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_generate_pdf_accepts_empty_body() -> anyhow::Result<()> {
    let mut upstream = setup_mock_server().await;
    let mock = upstream
        .mock("POST", "/pdf")
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("No completado".to_string()))
        .with_status(200)
        .with_body(FAKE_PDF)
        .create_async()
        .await;
    let base = spawn_api(&upstream, "tok-empty", "").await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generar-pdf"))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_generate_pdf_maps_upstream_failures() -> anyhow::Result<()> {
    for (status, expected, message) in [
        (401, 401, "Token de Browserless inválido o expirado"),
        (429, 429, "Límite de uso de Browserless excedido"),
        (500, 502, "Error al generar el PDF"),
    ] {
        let mut upstream = setup_mock_server().await;
        let _mock = create_pdf_mock(&mut upstream, "tok-fail", status).await;
        let base = spawn_api(&upstream, "tok-fail", "").await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/generar-pdf"))
            .json(&pdf_body())
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), expected);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], message);
    }
    Ok(())
}

#[tokio::test]
async fn test_improve_text_success_and_fallback() -> anyhow::Result<()> {
    let mut upstream = setup_mock_server().await;
    let _chat = create_chat_mock(&mut upstream, "key-ok", "Texto mejorado.").await;

    let configured = spawn_api(&upstream, "", "key-ok").await?;
    let unconfigured = spawn_api(&upstream, "", "").await?;
    let client = reqwest::Client::new();
    let body = json!({ "texto": "objeto: algo", "seccion": "objeto" });

    let improved: ImprovedText = client
        .post(format!("{configured}/api/mejorar-texto"))
        .json(&body)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(improved.resultado, "Texto mejorado.");
    assert_eq!(improved.mensaje, None);

    let response = client
        .post(format!("{unconfigured}/api/mejorar-texto"))
        .json(&body)
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let fallback: ImprovedText = response.json().await?;
    assert_eq!(fallback.resultado, "Objeto: algo.");
    assert!(fallback.mensaje.is_some());
    Ok(())
}

#[tokio::test]
async fn test_improve_text_rejects_unknown_section() -> anyhow::Result<()> {
    let upstream = setup_mock_server().await;
    let base = spawn_api(&upstream, "", "").await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/mejorar-texto"))
        .json(&json!({ "texto": "x", "seccion": "anexos" }))
        .send()
        .await?;

    assert!(response.status().is_client_error());
    Ok(())
}

// Procedure document HTTP server
//
// Serves PDF generation and text improvement for procedure documents.
// Configured through environment variables, see `config::env_vars`.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use procdoc::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; `log` records from the content pipeline are bridged in
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "procdoc=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env().context("Invalid procdoc configuration")?;

    if !config.browserless_token().is_configured() {
        tracing::warn!("BROWSERLESS_TOKEN not configured, PDF generation will answer 400");
    }
    if !config.mistral_api_key().is_configured() {
        tracing::warn!("MISTRAL_API_KEY not configured, text improvement will use local formatting");
    }

    procdoc::run(config).await
}

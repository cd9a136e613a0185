//! Shared configuration constants for procdoc
//!
//! This module contains default values and fixed markers used throughout
//! the codebase to ensure consistency and avoid magic strings.

/// Fragment emitted for a section the author never filled in
pub const NOT_COMPLETED_PLACEHOLDER: &str = "<p>No completado</p>";

/// What the rich-text editor produces when its surface is cleared
pub const EDITOR_EMPTY_PARAGRAPH: &str = "<p><br></p>";

/// Maximum HTML input size accepted by the sanitizer (10 MB)
///
/// A procedure section is a few kilobytes of dictated text. Anything near
/// this size is not editor output and goes through the strip-tags fallback.
pub const MAX_HTML_SIZE: usize = 10 * 1024 * 1024;

/// Default bind address for the HTTP server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

/// Value shipped in `.env` templates; treated exactly like a missing token
pub const BROWSERLESS_TOKEN_PLACEHOLDER: &str = "your_browserless_token_here";

/// Value shipped in `.env` templates; treated exactly like a missing key
pub const MISTRAL_API_KEY_PLACEHOLDER: &str = "your_mistral_api_key_here";

/// Browserless base URL, the `/pdf` path is appended by the client
pub const DEFAULT_BROWSERLESS_URL: &str = "https://chrome.browserless.io";

/// Upper bound for a PDF render round-trip
///
/// Headless Chrome renders a five-section procedure in 2-5 seconds.
/// Cold starts on shared Browserless plans can take much longer.
pub const DEFAULT_PDF_TIMEOUT_SECS: u64 = 60;

/// Mistral chat completions endpoint
pub const DEFAULT_MISTRAL_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// Model used to polish dictated text
pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-small-latest";

/// Completion budget per improvement request
pub const DEFAULT_MAX_TOKENS: u32 = 32_000;

/// Sampling temperature for improvement requests
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Timeout for the text-improvement call (seconds)
///
/// The author is waiting on the button, so the local fallback formatter
/// takes over after this.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

/// File name offered to the browser for the generated PDF
pub const DEFAULT_PDF_FILENAME: &str = "procedimiento.pdf";

/// Logo shown in the document header
pub const DEFAULT_LOGO_URL: &str =
    "https://imsa.com.ar/wp-content/uploads/2020/06/IMSA_Logo_rojo_02.png";

/// Document code printed in the header
pub const DEFAULT_DOCUMENT_CODE: &str = "PA 009";

/// Document title printed under the header
pub const DEFAULT_DOCUMENT_TITLE: &str = "IMSA PROCESOS - CAMBIAR TITULO";

/// Notice printed after the last section
pub const DEFAULT_DOCUMENT_NOTICE: &str =
    "Solicitar esta documentación con anticipación para evitar demoras en Portería.";

//! API request and response types

use serde::{Deserialize, Serialize};

use crate::document::{Approvals, ProcedureDocument, SectionKey};

/// Body of `POST /api/generar-pdf`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePdfRequest {
    /// Raw section contents
    #[serde(default)]
    pub documento: ProcedureDocument,
    /// Footer approval block
    #[serde(default)]
    pub aprobaciones: Approvals,
}

/// Body of `POST /api/mejorar-texto`
///
/// An unknown `seccion` is rejected during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveTextRequest {
    pub texto: String,
    pub seccion: SectionKey,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

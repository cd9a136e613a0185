//! Procedure document model
//!
//! A procedure has five fixed sections in a fixed order, plus the approval
//! block printed in the page footer.

pub mod template;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content_processor::{is_empty_content, ContentProcessor};

pub use template::{format_date, render_document_html, render_footer_template, PRINT_STYLESHEET};

/// One of the five sections of a procedure, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Objeto,
    Alcance,
    Abreviaturas,
    Responsabilidades,
    Descripcion,
}

impl SectionKey {
    /// All sections in document order
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Objeto,
        SectionKey::Alcance,
        SectionKey::Abreviaturas,
        SectionKey::Responsabilidades,
        SectionKey::Descripcion,
    ];

    /// Wire name, as used in JSON bodies
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Objeto => "objeto",
            SectionKey::Alcance => "alcance",
            SectionKey::Abreviaturas => "abreviaturas",
            SectionKey::Responsabilidades => "responsabilidades",
            SectionKey::Descripcion => "descripcion",
        }
    }

    /// Canonical label, also the prefix of fallback-formatted text
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Objeto => "Objeto",
            SectionKey::Alcance => "Alcance",
            SectionKey::Abreviaturas => "Abreviaturas y Definiciones",
            SectionKey::Responsabilidades => "Responsabilidades",
            SectionKey::Descripcion => "Descripción",
        }
    }

    /// Numbered upper-case title printed above the section
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            SectionKey::Objeto => "1. OBJETO",
            SectionKey::Alcance => "2. ALCANCE",
            SectionKey::Abreviaturas => "3. ABREVIATURAS Y DEFINICIONES",
            SectionKey::Responsabilidades => "4. RESPONSABILIDADES",
            SectionKey::Descripcion => "5. DESCRIPCIÓN",
        }
    }

    /// Instruction sent to the text-improvement model for this section
    #[must_use]
    pub fn improvement_prompt(self, text: &str) -> String {
        let tone = match self {
            SectionKey::Objeto => ", siendo claro y formal",
            SectionKey::Alcance => ", siendo conciso",
            SectionKey::Abreviaturas => "",
            SectionKey::Responsabilidades => ", siendo claro",
            SectionKey::Descripcion => ", siendo detallado",
        };
        format!(
            "Corrige y formatea este texto como la sección '{}' de un procedimiento ISO{tone}: \"{text}\"",
            self.label()
        )
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw content of the five sections, as sent by the editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureDocument {
    pub objeto: String,
    pub alcance: String,
    pub abreviaturas: String,
    pub responsabilidades: String,
    pub descripcion: String,
}

impl ProcedureDocument {
    #[must_use]
    pub fn section(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Objeto => &self.objeto,
            SectionKey::Alcance => &self.alcance,
            SectionKey::Abreviaturas => &self.abreviaturas,
            SectionKey::Responsabilidades => &self.responsabilidades,
            SectionKey::Descripcion => &self.descripcion,
        }
    }

    fn section_mut(&mut self, key: SectionKey) -> &mut String {
        match key {
            SectionKey::Objeto => &mut self.objeto,
            SectionKey::Alcance => &mut self.alcance,
            SectionKey::Abreviaturas => &mut self.abreviaturas,
            SectionKey::Responsabilidades => &mut self.responsabilidades,
            SectionKey::Descripcion => &mut self.descripcion,
        }
    }

    /// Replace a section's content (the "save draft into section" step)
    pub fn set_section(&mut self, key: SectionKey, content: impl Into<String>) {
        *self.section_mut(key) = content.into();
    }

    /// Sections in document order
    pub fn sections(&self) -> impl Iterator<Item = (SectionKey, &str)> + '_ {
        SectionKey::ALL.into_iter().map(|key| (key, self.section(key)))
    }

    /// Sections holding something other than whitespace or a cleared editor
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.sections()
            .filter(|(_, content)| !is_empty_content(content))
            .count()
    }

    /// `completed / 5 * 100`
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.completed_count() as f64 / SectionKey::ALL.len() as f64 * 100.0
    }

    /// Run every section through the content pipeline
    #[must_use]
    pub fn process(&self, processor: &ContentProcessor) -> ProcessedSections {
        ProcessedSections {
            fragments: SectionKey::ALL.map(|key| processor.process(self.section(key))),
        }
    }
}

/// Approval block printed in the page footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Approvals {
    pub preparado_por: String,
    pub revisado_por: String,
    pub aprobado_por: String,
    /// Revision number, printed as-is
    pub revision: String,
}

impl Default for Approvals {
    fn default() -> Self {
        Self {
            preparado_por: String::new(),
            revisado_por: String::new(),
            aprobado_por: String::new(),
            revision: "000".to_string(),
        }
    }
}

/// Print-ready HTML fragments, one per section, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSections {
    fragments: [String; 5],
}

impl ProcessedSections {
    #[must_use]
    pub fn get(&self, key: SectionKey) -> &str {
        // Discriminants follow document order
        &self.fragments[key as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> + '_ {
        SectionKey::ALL
            .into_iter()
            .zip(self.fragments.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::NOT_COMPLETED_PLACEHOLDER;

    #[test]
    fn test_section_key_wire_names() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&SectionKey::Descripcion)?, "\"descripcion\"");
        let key: SectionKey = serde_json::from_str("\"abreviaturas\"")?;
        assert_eq!(key, SectionKey::Abreviaturas);
        assert!(serde_json::from_str::<SectionKey>("\"anexos\"").is_err());
        Ok(())
    }

    #[test]
    fn test_prompts() {
        assert_eq!(
            SectionKey::Objeto.improvement_prompt("texto"),
            "Corrige y formatea este texto como la sección 'Objeto' de un procedimiento ISO, siendo claro y formal: \"texto\""
        );
        assert_eq!(
            SectionKey::Abreviaturas.improvement_prompt("x"),
            "Corrige y formatea este texto como la sección 'Abreviaturas y Definiciones' de un procedimiento ISO: \"x\""
        );
    }

    #[test]
    fn test_progress() {
        let mut document = ProcedureDocument::default();
        assert_eq!(document.completed_count(), 0);

        document.set_section(SectionKey::Objeto, "Definir el proceso");
        document.set_section(SectionKey::Alcance, "   ");
        document.set_section(SectionKey::Descripcion, "<p><br></p>");
        assert_eq!(document.completed_count(), 1);
        assert!((document.progress_percent() - 20.0).abs() < f64::EPSILON);

        document.set_section(SectionKey::Alcance, "Planta");
        assert!((document.progress_percent() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_document_deserializes_with_missing_keys() -> serde_json::Result<()> {
        let document: ProcedureDocument = serde_json::from_str(r#"{"objeto": "x"}"#)?;
        assert_eq!(document.section(SectionKey::Objeto), "x");
        assert_eq!(document.section(SectionKey::Descripcion), "");
        Ok(())
    }

    #[test]
    fn test_approvals_wire_shape() -> serde_json::Result<()> {
        let approvals: Approvals =
            serde_json::from_str(r#"{"preparadoPor": "Ana", "aprobadoPor": "Luis"}"#)?;
        assert_eq!(approvals.preparado_por, "Ana");
        assert_eq!(approvals.revisado_por, "");
        assert_eq!(approvals.aprobado_por, "Luis");
        assert_eq!(approvals.revision, "000");
        Ok(())
    }

    #[test]
    fn test_process_keeps_order() {
        let mut document = ProcedureDocument::default();
        document.set_section(SectionKey::Alcance, "Toda la planta");

        let processed = document.process(&ContentProcessor::default());
        assert_eq!(processed.get(SectionKey::Objeto), NOT_COMPLETED_PLACEHOLDER);
        assert_eq!(processed.get(SectionKey::Alcance), "<p>Toda la planta</p>");

        let keys: Vec<_> = processed.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, SectionKey::ALL);
    }
}

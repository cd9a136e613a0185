//! Deterministic local formatting used when the model cannot be reached.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::SectionKey;

static OBJETO_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^objeto:?").expect("OBJETO_PREFIX_RE: hardcoded regex is valid"));

static ALCANCE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^alcance:?").expect("ALCANCE_PREFIX_RE: hardcoded regex is valid"));

// Lazy `.*?` only consumes the word and a colon directly after it
static ABREVIATURAS_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^abreviaturas.*?:?").expect("ABREVIATURAS_PREFIX_RE: hardcoded regex is valid")
});

static RESPONSABILIDADES_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^responsabilidades:?")
        .expect("RESPONSABILIDADES_PREFIX_RE: hardcoded regex is valid")
});

static DESCRIPCION_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^descripción:?").expect("DESCRIPCION_PREFIX_RE: hardcoded regex is valid")
});

fn label_prefix(section: SectionKey) -> &'static Regex {
    match section {
        SectionKey::Objeto => &OBJETO_PREFIX_RE,
        SectionKey::Alcance => &ALCANCE_PREFIX_RE,
        SectionKey::Abreviaturas => &ABREVIATURAS_PREFIX_RE,
        SectionKey::Responsabilidades => &RESPONSABILIDADES_PREFIX_RE,
        SectionKey::Descripcion => &DESCRIPCION_PREFIX_RE,
    }
}

/// `"{Label}: {text without an existing label}."`
#[must_use]
pub fn format_fallback(section: SectionKey, text: &str) -> String {
    let trimmed = text.trim();
    let body = label_prefix(section).replace(trimmed, "");
    format!("{}: {}.", section.label(), body.trim())
}

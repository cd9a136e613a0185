//! Section content normalization pipeline
//!
//! Turns whatever a section holds (editor markup, dictated text, or nothing)
//! into one canonical, print-safe HTML fragment:
//! 1. Classify the content (empty, rich text, plain text)
//! 2. Plain text: structure lines into paragraphs and lists
//! 3. Rich text: sanitize, reconstruct lists from flat editor lines, then
//!    inject presentation classes for print
//!
//! The pipeline is synchronous and never fails outward. Empty sections render
//! as [`NOT_COMPLETED_PLACEHOLDER`]; internal errors degrade to a single
//! paragraph of tag-stripped text.
//!
//! # Usage
//!
//! ```rust
//! # use procdoc::content_processor::{process_content, ContentProcessor, Environment};
//! let html = process_content("<div>1. Uno</div><div>2. Dos</div>");
//! assert!(html.starts_with(r#"<ol class="pdf-ordered-list">"#));
//!
//! let processor = ContentProcessor::new(Environment::Server);
//! assert_eq!(processor.process("  "), "<p>No completado</p>");
//! ```

pub mod classifier;
pub mod errors;
pub mod list_reconstruction;
pub mod plain_text;
pub mod print_styles;
pub mod sanitizer;

pub use classifier::{classify, is_empty_content, ContentKind};
pub use errors::{ContentError, ContentResult};
pub use list_reconstruction::{reconstruct_lists, LineMarker, ListKind, ListReconstructor};
pub use plain_text::structure_plain_text;
pub use print_styles::annotate_for_print;
pub use sanitizer::{sanitize, strip_to_paragraph, try_sanitize, Environment};

use crate::utils::constants::NOT_COMPLETED_PLACEHOLDER;

/// Section content processor
///
/// Holds only the sanitizer strategy, so it is `Copy` and can be shared
/// freely between request handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentProcessor {
    environment: Environment,
}

impl ContentProcessor {
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Normalize one section's content. Never fails.
    #[must_use]
    pub fn process(&self, content: &str) -> String {
        match classify(content) {
            ContentKind::Empty => NOT_COMPLETED_PLACEHOLDER.to_string(),
            // Structurer output already carries its list classes
            ContentKind::PlainText => structure_plain_text(content),
            ContentKind::RichText => match self.try_process_rich_text(content) {
                Ok(html) => html,
                Err(e) => {
                    log::warn!("Rich text processing failed ({e}), using plain paragraph");
                    strip_to_paragraph(content)
                }
            },
        }
    }

    /// Rich-text path: sanitize, then reconstruct lists, then annotate once
    fn try_process_rich_text(&self, html: &str) -> ContentResult<String> {
        let clean = try_sanitize(html, self.environment)?;
        let structured = reconstruct_lists(&clean);
        let annotated = annotate_for_print(&structured);

        if annotated.trim().is_empty() {
            return Ok(NOT_COMPLETED_PLACEHOLDER.to_string());
        }

        log::debug!(
            "Processed rich text: {} bytes in, {} bytes out",
            html.len(),
            annotated.len()
        );
        Ok(annotated)
    }
}

/// Normalize section content with the default (allow-list) sanitizer.
#[must_use]
pub fn process_content(content: &str) -> String {
    ContentProcessor::default().process(content)
}

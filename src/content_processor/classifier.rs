//! Decides whether section content is editor markup or dictated plain text.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::constants::EDITOR_EMPTY_PARAGRAPH;

/// Opening tag of a block container, paragraph, list or heading
static MARKUP_SIGNAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:div|p|ol|ul|h[1-6])[\s/>]")
        .expect("MARKUP_SIGNAL_RE: hardcoded regex is valid")
});

/// Shape of a piece of section content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Nothing the author wrote; renders as the "not completed" placeholder
    Empty,
    /// Markup produced by the rich-text editor
    RichText,
    /// Text typed or dictated without markup
    PlainText,
}

/// Classify section content. Never fails; anything unrecognized is plain text.
#[must_use]
pub fn classify(content: &str) -> ContentKind {
    if is_empty_content(content) {
        return ContentKind::Empty;
    }

    if MARKUP_SIGNAL_RE.is_match(content) {
        ContentKind::RichText
    } else {
        ContentKind::PlainText
    }
}

/// Empty, whitespace-only, or the editor's cleared-surface marker
#[must_use]
pub fn is_empty_content(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty() || trimmed == EDITOR_EMPTY_PARAGRAPH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_variants() {
        assert_eq!(classify(""), ContentKind::Empty);
        assert_eq!(classify("   \n\t "), ContentKind::Empty);
        assert_eq!(classify("<p><br></p>"), ContentKind::Empty);
    }

    #[test]
    fn test_markup_signals() {
        assert_eq!(classify("<div>1. Uno</div>"), ContentKind::RichText);
        assert_eq!(classify(r#"<div class="x">texto</div>"#), ContentKind::RichText);
        assert_eq!(classify("<p>Hola</p>"), ContentKind::RichText);
        assert_eq!(classify("<ol><li>a</li></ol>"), ContentKind::RichText);
        assert_eq!(classify("<ul><li>a</li></ul>"), ContentKind::RichText);
        assert_eq!(classify("<h2>Titulo</h2>"), ContentKind::RichText);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify("1. Primero\n2. Segundo"), ContentKind::PlainText);
        assert_eq!(classify("a < b y c > d"), ContentKind::PlainText);
        assert_eq!(classify("<strong>solo negrita</strong>"), ContentKind::PlainText);
        // `<pre>` and `<hr>` are not block signals
        assert_eq!(classify("<pre>x</pre>"), ContentKind::PlainText);
        assert_eq!(classify("linea<hr>linea"), ContentKind::PlainText);
    }
}

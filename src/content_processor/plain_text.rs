//! Structuring of dictated or typed plain text into HTML.
//!
//! Blocks are separated by blank lines. Inside a block, contiguous lines that
//! carry a list marker become one `<ol>`; the rest become paragraphs.

use regex::Regex;
use std::sync::LazyLock;

use super::list_reconstruction::LineMarker;
use crate::utils::constants::NOT_COMPLETED_PLACEHOLDER;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("BLANK_LINE_RE: hardcoded regex is valid"));

static EMPTY_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\s*</p>").expect("EMPTY_PARAGRAPH_RE: hardcoded regex is valid"));

/// Convert plain text with line markers into HTML. Never fails.
#[must_use]
pub fn structure_plain_text(text: &str) -> String {
    if text.trim().is_empty() {
        return NOT_COMPLETED_PLACEHOLDER.to_string();
    }

    // Escape before matching: markers are unaffected, stray brackets are neutralized
    let escaped = html_escape::encode_text(&text.replace("\r\n", "\n")).into_owned();

    let blocks: Vec<String> = BLANK_LINE_RE
        .split(&escaped)
        .flat_map(structure_block)
        .collect();

    let html = blocks.join("\n");
    let html = EMPTY_PARAGRAPH_RE.replace_all(&html, "");
    let html = html.trim();

    if html.is_empty() {
        NOT_COMPLETED_PLACEHOLDER.to_string()
    } else {
        html.to_string()
    }
}

#[derive(Default)]
struct BlockBuilder {
    output: Vec<String>,
    paragraph: Vec<String>,
    items: Vec<String>,
    run_has_letters: bool,
}

impl BlockBuilder {
    fn push_line(&mut self, line: &str) {
        match LineMarker::parse(line) {
            Some(marker @ LineMarker::Lettered { .. }) => {
                self.close_paragraph();
                self.run_has_letters = true;
                self.items
                    .push(format!(r#"<li class="sublist-item">{}</li>"#, marker.text()));
            }
            Some(marker) => {
                self.close_paragraph();
                self.items.push(format!("<li>{}</li>", marker.text()));
            }
            None => {
                self.close_list();
                self.paragraph.push(line.to_string());
            }
        }
    }

    fn close_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            self.output.push(format!("<p>{}</p>", self.paragraph.join("\n")));
            self.paragraph.clear();
        }
    }

    fn close_list(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let class = if self.run_has_letters {
            "pdf-sublist"
        } else {
            "pdf-ordered-list"
        };
        self.output
            .push(format!(r#"<ol class="{class}">{}</ol>"#, self.items.concat()));
        self.items.clear();
        self.run_has_letters = false;
    }

    fn finish(mut self) -> Vec<String> {
        self.close_paragraph();
        self.close_list();
        self.output
    }
}

fn structure_block(block: &str) -> Vec<String> {
    let mut builder = BlockBuilder::default();
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .for_each(|line| builder.push_line(line));
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_placeholder() {
        assert_eq!(structure_plain_text(""), NOT_COMPLETED_PLACEHOLDER);
        assert_eq!(structure_plain_text(" \n\n "), NOT_COMPLETED_PLACEHOLDER);
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(
            structure_plain_text("Este procedimiento define el proceso."),
            "<p>Este procedimiento define el proceso.</p>"
        );
    }

    #[test]
    fn test_escapes_before_matching() {
        assert_eq!(
            structure_plain_text("1. a < b & c > d"),
            r#"<ol class="pdf-ordered-list"><li>a &lt; b &amp; c &gt; d</li></ol>"#
        );
    }

    #[test]
    fn test_typed_entities_stay_literal() {
        assert_eq!(
            structure_plain_text("usar &lt;b&gt; y \"comillas\""),
            "<p>usar &amp;lt;b&amp;gt; y \"comillas\"</p>"
        );
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        assert_eq!(
            structure_plain_text("Primero\n\n   \nSegundo"),
            "<p>Primero</p>\n<p>Segundo</p>"
        );
    }

    #[test]
    fn test_paragraph_then_list() {
        assert_eq!(
            structure_plain_text("Pasos:\n1. Abrir\n2. Cerrar\nFin"),
            concat!(
                "<p>Pasos:</p>\n",
                r#"<ol class="pdf-ordered-list"><li>Abrir</li><li>Cerrar</li></ol>"#,
                "\n<p>Fin</p>"
            )
        );
    }

    #[test]
    fn test_lettered_items_mark_the_run() {
        assert_eq!(
            structure_plain_text("1. Uno\na) sub"),
            r#"<ol class="pdf-sublist"><li>Uno</li><li class="sublist-item">sub</li></ol>"#
        );
    }

    #[test]
    fn test_bullets_wrap_in_ordered_list() {
        assert_eq!(
            structure_plain_text("- uno\n* dos"),
            r#"<ol class="pdf-ordered-list"><li>uno</li><li>dos</li></ol>"#
        );
    }

    #[test]
    fn test_indented_markers_and_crlf() {
        assert_eq!(
            structure_plain_text("  1. Uno\r\n  2. Dos\r\n"),
            r#"<ol class="pdf-ordered-list"><li>Uno</li><li>Dos</li></ol>"#
        );
    }
}

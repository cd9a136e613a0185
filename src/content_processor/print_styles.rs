//! Presentation-class injection for print layout.
//!
//! Pure string rewriting. Every opening tag of an annotated element gets its
//! presentation class, whether or not it already carries one, so running the
//! pass twice duplicates class tokens. Call it exactly once per fragment.
//! Lettered sublists (`pdf-sublist`) are the exception and are never touched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{tag → presentation class}` applied by [`annotate_for_print`]
pub static PRINT_CLASSES: &[(&str, &str)] = &[
    ("ol", "pdf-ordered-list"),
    ("ul", "pdf-unordered-list"),
    ("blockquote", "pdf-blockquote"),
    ("p", "pdf-paragraph"),
    ("h1", "pdf-heading-1"),
    ("h2", "pdf-heading-2"),
    ("h3", "pdf-heading-3"),
];

/// Opening tag of an annotated element with its attribute text
static OPENING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(ol|ul|blockquote|p|h[1-3])(\s[^>]*)?>")
        .expect("OPENING_TAG_RE: hardcoded regex is valid")
});

/// An existing `class` attribute (double or single quoted)
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("CLASS_ATTR_RE: hardcoded regex is valid")
});

/// Lettered sublists are already styled and keep their single class
const SUBLIST_CLASS: &str = "pdf-sublist";

/// Presentation class for `tag`, if it is annotated
#[must_use]
pub fn print_class_for(tag: &str) -> Option<&'static str> {
    PRINT_CLASSES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, class)| *class)
}

/// Add print classes to lists, quotes, paragraphs and headings 1-3. Not idempotent.
#[must_use]
pub fn annotate_for_print(html: &str) -> String {
    OPENING_TAG_RE
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[1];
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            let Some(class) = print_class_for(tag) else {
                return caps[0].to_string();
            };
            if has_class(attrs, SUBLIST_CLASS) {
                return caps[0].to_string();
            }
            format!("<{tag}{}>", inject_class(attrs, class))
        })
        .into_owned()
}

fn has_class(attrs: &str, class: &str) -> bool {
    CLASS_ATTR_RE.captures(attrs).is_some_and(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .is_some_and(|m| m.as_str().split_whitespace().any(|token| token == class))
    })
}

fn inject_class(attrs: &str, class: &str) -> String {
    if !CLASS_ATTR_RE.is_match(attrs) {
        return format!(r#"{attrs} class="{class}""#);
    }

    CLASS_ATTR_RE
        .replacen(attrs, 1, |caps: &Captures| {
            let existing = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str())
                .trim();
            if existing.is_empty() {
                format!(r#"class="{class}""#)
            } else {
                format!(r#"class="{existing} {class}""#)
            }
        })
        .into_owned()
}

//! Rich-text sanitization for editor output.
//!
//! Two strategies are available:
//! - [`Environment::Client`]: DOM-based allow-list. The fragment is parsed with
//!   `scraper` and re-serialized consulting [`ALLOWED_TAGS`]; disallowed
//!   wrappers are unwrapped so their text survives.
//! - [`Environment::Server`]: regex-based cleanup of scripts, styles, event
//!   handlers and `javascript:` URLs. This is a reduced-safety path. It is only
//!   acceptable for content produced by the same trusted application and must
//!   not be used on HTML arriving from an untrusted network boundary.
//!
//! [`sanitize`] never fails: any [`ContentError`] becomes a single paragraph
//! holding the tag-stripped text.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use super::errors::{ContentError, ContentResult};
use crate::utils::constants::MAX_HTML_SIZE;

/// Attributes kept on every allow-listed tag
const PRESENTATION_ATTRS: &[&str] = &["class", "style"];

/// Allow-list of `{tag → allowed attributes}` consulted by the DOM sanitizer.
pub static ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("p", PRESENTATION_ATTRS),
    ("br", PRESENTATION_ATTRS),
    ("strong", PRESENTATION_ATTRS),
    ("b", PRESENTATION_ATTRS),
    ("em", PRESENTATION_ATTRS),
    ("i", PRESENTATION_ATTRS),
    ("u", PRESENTATION_ATTRS),
    ("ol", PRESENTATION_ATTRS),
    ("ul", PRESENTATION_ATTRS),
    ("li", PRESENTATION_ATTRS),
    ("h1", PRESENTATION_ATTRS),
    ("h2", PRESENTATION_ATTRS),
    ("h3", PRESENTATION_ATTRS),
    ("blockquote", PRESENTATION_ATTRS),
    ("div", PRESENTATION_ATTRS),
    ("span", PRESENTATION_ATTRS),
];

/// Elements dropped together with everything inside them
const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "svg", "math",
    "head", "title", "textarea", "select",
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

// ============================================================================
// Regex Patterns for the pattern-based path
// ============================================================================

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script\s*>").expect("SCRIPT_RE: hardcoded regex is valid")
});

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*>.*?</style\s*>").expect("STYLE_RE: hardcoded regex is valid")
});

static EVENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on\w+\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("EVENT_RE: hardcoded regex is valid")
});

static JAVASCRIPT_SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)javascript\s*:").expect("JAVASCRIPT_SCHEME_RE: hardcoded regex is valid")
});

static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("ANY_TAG_RE: hardcoded regex is valid"));

/// Which sanitization strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Full allow-list sanitizer over a parsed DOM
    #[default]
    Client,
    /// Reduced pattern-based cleanup for trusted, self-produced content
    Server,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Environment::Client),
            "server" => Ok(Environment::Server),
            other => Err(format!("unknown sanitizer environment '{other}' (expected client|server)")),
        }
    }
}

/// Look up the attributes allowed on `tag`, `None` when the tag itself is not allowed
#[must_use]
pub fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    ALLOWED_TAGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, attrs)| *attrs)
}

/// Sanitize editor HTML. Never fails.
#[must_use]
pub fn sanitize(html: &str, environment: Environment) -> String {
    match try_sanitize(html, environment) {
        Ok(clean) => clean,
        Err(e) => {
            log::warn!("Sanitization failed ({e}), falling back to plain paragraph");
            strip_to_paragraph(html)
        }
    }
}

/// Sanitize editor HTML, reporting why the input was rejected.
pub fn try_sanitize(html: &str, environment: Environment) -> ContentResult<String> {
    if html.len() > MAX_HTML_SIZE {
        return Err(ContentError::TooLarge {
            size: html.len(),
            limit: MAX_HTML_SIZE,
        });
    }

    match environment {
        Environment::Client => sanitize_allow_list(html),
        Environment::Server => Ok(strip_dangerous_patterns(html)),
    }
}

/// Last-resort rendering: every tag removed, remaining text escaped into one paragraph.
#[must_use]
pub fn strip_to_paragraph(html: &str) -> String {
    let text = ANY_TAG_RE.replace_all(html, "");
    // Decode first so existing entities are not escaped twice
    let text = html_escape::decode_html_entities(&text);
    format!("<p>{}</p>", html_escape::encode_text(&text))
}

/// Pattern-based cleanup. Weaker than the allow-list; see the module docs.
#[must_use]
pub fn strip_dangerous_patterns(html: &str) -> String {
    let result = Cow::Borrowed(html);

    // Remove script and style blocks with their contents
    let result = SCRIPT_RE.replace_all(&result, "");
    let result = STYLE_RE.replace_all(&result, "");

    // Remove inline event handlers
    let result = EVENT_RE.replace_all(&result, "");

    // Neutralize javascript: URLs
    let result = JAVASCRIPT_SCHEME_RE.replace_all(&result, "");

    result.into_owned()
}

fn sanitize_allow_list(html: &str) -> ContentResult<String> {
    let document = Html::parse_fragment(html);

    // Fragment parsing wraps content in a synthetic root element
    let root = document.root_element();

    let mut output = String::with_capacity(html.len());
    serialize_allowed_children(&root, &mut output)?;

    log::debug!(
        "Allow-list sanitizer: {} bytes in, {} bytes out",
        html.len(),
        output.len()
    );
    Ok(output)
}

/// Serialize the children of `element`, keeping only allow-listed tags and attributes.
fn serialize_allowed_children(element: &ElementRef, output: &mut String) -> ContentResult<()> {
    for child in element.children() {
        use scraper::node::Node;

        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                output.push_str(&html_escape::encode_text(text));
            }
            Node::Element(_) => {
                let child_elem = ElementRef::wrap(child).ok_or_else(|| {
                    ContentError::Malformed("element node could not be wrapped".to_string())
                })?;
                let name = child_elem.value().name();

                if DROPPED_WITH_CONTENT.contains(&name) {
                    continue;
                }

                let Some(attrs) = allowed_attributes(name) else {
                    // Unwrap: keep the text, lose the wrapper
                    serialize_allowed_children(&child_elem, output)?;
                    continue;
                };

                output.push('<');
                output.push_str(name);
                for (attr_name, value) in child_elem.value().attrs() {
                    if !attrs.iter().any(|allowed| allowed.eq_ignore_ascii_case(attr_name)) {
                        continue;
                    }
                    output.push(' ');
                    output.push_str(attr_name);
                    output.push_str("=\"");
                    output.push_str(&html_escape::encode_double_quoted_attribute(value));
                    output.push('"');
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    continue;
                }

                serialize_allowed_children(&child_elem, output)?;

                output.push_str("</");
                output.push_str(name);
                output.push('>');
            }
            // Comments, doctypes and processing instructions are dropped
            _ => {}
        }
    }
    Ok(())
}

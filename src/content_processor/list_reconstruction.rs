//! Reconstruction of list markup from flat, line-per-`<div>` editor output.
//!
//! The editor emits one `<div>` per visual line and never nests anything, so
//! the only structure available is the marker at the start of each line and
//! whether a run restarts at its natural first element (`1.` / `a)`). The
//! grouping below is a heuristic, not a parse: markers that appear out of
//! order (`3.` before `1.`) produce a grouping that follows document order,
//! not numbering.
//!
//! Precedence per line: numbered, then lettered, then bulleted.
//!
//! Flush rules (the pending group is closed and emitted):
//! - on a `<br>` marker, which is also emitted,
//! - on a token that is not a `<div>` wrapper, which passes through untouched,
//! - on a line matching no marker, which becomes a paragraph,
//! - before a new group opens (`1.`, `a)`, or a change of marker kind),
//! - at end of input.

use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Patterns
// ============================================================================

/// `<p><br></p>` and variants, the editor's blank line
static EMPTY_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<p>\s*<br\s*/?>\s*</p>").expect("EMPTY_PARAGRAPH_RE: hardcoded regex is valid")
});

/// Token delimiters: a whole `<div>` line or a line break
static LINE_DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<div[^>]*>.*?</div>|<br\s*/?>")
        .expect("LINE_DELIMITER_RE: hardcoded regex is valid")
});

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<br\s*/?>$").expect("LINE_BREAK_RE: hardcoded regex is valid"));

static DIV_WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<div[^>]*>(.*?)</div>").expect("DIV_WRAPPER_RE: hardcoded regex is valid")
});

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("NUMBERED_RE: hardcoded regex is valid"));

static LETTERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z])\)\s+(.+)$").expect("LETTERED_RE: hardcoded regex is valid")
});

static BULLETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+(.+)$").expect("BULLETED_RE: hardcoded regex is valid"));

// ============================================================================
// Line classification
// ============================================================================

/// A line's list marker, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMarker<'a> {
    /// `3. text`
    Numbered { number: Option<u64>, text: &'a str },
    /// `b) text`
    Lettered { letter: char, text: &'a str },
    /// `- text`, `* text`, `• text`
    Bulleted { text: &'a str },
}

impl<'a> LineMarker<'a> {
    /// Match a trimmed line against the three marker patterns in precedence order
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        if let Some(caps) = NUMBERED_RE.captures(line) {
            let number = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
            let text = caps.get(2).map_or("", |m| m.as_str());
            return Some(LineMarker::Numbered { number, text });
        }

        if let Some(caps) = LETTERED_RE.captures(line) {
            let letter = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('a');
            let text = caps.get(2).map_or("", |m| m.as_str());
            return Some(LineMarker::Lettered { letter, text });
        }

        BULLETED_RE.captures(line).map(|caps| LineMarker::Bulleted {
            text: caps.get(1).map_or("", |m| m.as_str()),
        })
    }

    /// Item text without its marker
    #[must_use]
    pub fn text(&self) -> &'a str {
        match self {
            LineMarker::Numbered { text, .. }
            | LineMarker::Lettered { text, .. }
            | LineMarker::Bulleted { text } => text,
        }
    }

    /// Kind of list this marker belongs to
    #[must_use]
    pub fn list_kind(&self) -> ListKind {
        match self {
            LineMarker::Numbered { .. } => ListKind::Ordered,
            LineMarker::Lettered { .. } => ListKind::LetteredSub,
            LineMarker::Bulleted { .. } => ListKind::Unordered,
        }
    }

    /// `1.` and `a)` always open a fresh group
    fn restarts_sequence(&self) -> bool {
        match self {
            LineMarker::Numbered { number, .. } => *number == Some(1),
            LineMarker::Lettered { letter, .. } => letter.eq_ignore_ascii_case(&'a'),
            LineMarker::Bulleted { .. } => false,
        }
    }
}

/// Kind of an open list group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
    LetteredSub,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "<ol>",
            ListKind::Unordered => "<ul>",
            ListKind::LetteredSub => r#"<ol class="pdf-sublist">"#,
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Ordered | ListKind::LetteredSub => "</ol>",
            ListKind::Unordered => "</ul>",
        }
    }
}

// ============================================================================
// Reconstruction
// ============================================================================

/// Pending list group
#[derive(Debug)]
struct ListAccumulator {
    kind: ListKind,
    items: Vec<String>,
}

/// Streaming state machine behind [`reconstruct_lists`]
#[derive(Debug, Default)]
pub struct ListReconstructor {
    output: Vec<String>,
    open: Option<ListAccumulator>,
}

impl ListReconstructor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one trimmed, non-empty token
    pub fn push_token(&mut self, token: &str) {
        if LINE_BREAK_RE.is_match(token) {
            self.flush();
            self.output.push("<br>".to_string());
            return;
        }

        let Some(inner) = DIV_WRAPPER_RE
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
        else {
            self.flush();
            self.output.push(token.to_string());
            return;
        };

        match LineMarker::parse(inner) {
            Some(marker) => self.push_item(&marker),
            None => {
                self.flush();
                self.output.push(format!("<p>{inner}</p>"));
            }
        }
    }

    fn push_item(&mut self, marker: &LineMarker<'_>) {
        let kind = marker.list_kind();
        let continues_open_group = self
            .open
            .as_ref()
            .is_some_and(|group| group.kind == kind)
            && !marker.restarts_sequence();

        if !continues_open_group {
            self.flush();
            self.open = Some(ListAccumulator {
                kind,
                items: Vec::new(),
            });
        }

        if let Some(group) = self.open.as_mut() {
            group.items.push(format!("<li>{}</li>", marker.text()));
        }
    }

    /// Close the pending group, if any, and append it to the output
    pub fn flush(&mut self) {
        if let Some(group) = self.open.take() {
            self.output.push(group.kind.open_tag().to_string());
            self.output.extend(group.items);
            self.output.push(group.kind.close_tag().to_string());
        }
    }

    /// Flush and join the output blocks
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush();
        self.output.join("\n")
    }
}

/// Turn `<div>`/`<br>` delimited lines into `<ol>`/`<ul>` groups.
#[must_use]
pub fn reconstruct_lists(html: &str) -> String {
    let normalized = EMPTY_PARAGRAPH_RE.replace_all(html, "<br>");

    let mut reconstructor = ListReconstructor::new();
    for token in split_line_tokens(&normalized) {
        reconstructor.push_token(token);
    }
    reconstructor.finish()
}

/// Split on `<div>…</div>` and `<br>` keeping the delimiters as tokens.
/// Tokens come back trimmed; whitespace-only ones are dropped.
#[must_use]
pub fn split_line_tokens(html: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in LINE_DELIMITER_RE.find_iter(html) {
        tokens.push(&html[last..m.start()]);
        tokens.push(m.as_str());
        last = m.end();
    }
    tokens.push(&html[last..]);

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

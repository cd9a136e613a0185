//! Editor draft state and formatting commands
//!
//! The draft is an explicit [`EditorState`] (markup buffer, selection, mode)
//! owned by the caller. Formatting goes through [`apply_command`], a pure
//! function from `(buffer, selection, command)` to an [`Edit`]; the state only
//! commits edits. Selections are byte ranges that must fall on char
//! boundaries.

use std::ops::Range;
use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;
use thiserror::Error;

use crate::document::{ProcedureDocument, SectionKey};

static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("BR_RE: hardcoded regex is valid"));

static P_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>").expect("P_CLOSE_RE: hardcoded regex is valid"));

static P_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p>").expect("P_OPEN_RE: hardcoded regex is valid"));

static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("ANY_TAG_RE: hardcoded regex is valid"));

/// Inline formatting tags removed by [`FormatCommand::RemoveFormat`]
static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:strong|b|em|i|u|s|span)(?:\s[^>]*)?>")
        .expect("INLINE_TAG_RE: hardcoded regex is valid")
});

/// Any opening or closing block tag
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|h[1-6]|blockquote|div)(?:\s[^>]*)?>")
        .expect("BLOCK_TAG_RE: hardcoded regex is valid")
});

/// A selection wrapped in one block element
static SINGLE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^<(p|h[1-6]|blockquote|div)(?:\s[^>]*)?>(.*)</(p|h[1-6]|blockquote|div)>$")
        .expect("SINGLE_BLOCK_RE: hardcoded regex is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Selection {start}..{end} is outside the buffer or splits a character (buffer length {len})")]
    InvalidSelection { start: usize, end: usize, len: usize },

    #[error("Inline formatting needs a non-empty selection")]
    EmptySelection,

    #[error("Formatting is not available in plain-text mode")]
    PlainMode,

    #[error("Heading level {0} is not supported (expected 1-3)")]
    InvalidHeadingLevel(u8),
}

/// Which surface the draft is edited in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Rich,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFormat {
    Paragraph,
    /// Levels 1 to 3
    Heading(u8),
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    OrderedList,
    UnorderedList,
    Block(BlockFormat),
    RemoveFormat,
}

/// New buffer and selection produced by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub buffer: String,
    /// Covers the replaced markup
    pub selection: Range<usize>,
}

/// Check that `selection` lies within `buffer` on char boundaries
///
/// # Errors
///
/// Returns [`EditorError::InvalidSelection`] otherwise.
pub fn validate_selection(buffer: &str, selection: &Range<usize>) -> Result<(), EditorError> {
    let valid = selection.start <= selection.end
        && selection.end <= buffer.len()
        && buffer.is_char_boundary(selection.start)
        && buffer.is_char_boundary(selection.end);

    if valid {
        Ok(())
    } else {
        Err(EditorError::InvalidSelection {
            start: selection.start,
            end: selection.end,
            len: buffer.len(),
        })
    }
}

/// Apply `command` to the selected markup. `buffer` is not modified.
///
/// # Errors
///
/// - [`EditorError::InvalidSelection`] for an out-of-range or split selection
/// - [`EditorError::EmptySelection`] for bold, italic or underline on an empty selection
/// - [`EditorError::InvalidHeadingLevel`] for headings outside 1-3
pub fn apply_command(
    buffer: &str,
    selection: Range<usize>,
    command: FormatCommand,
) -> Result<Edit, EditorError> {
    validate_selection(buffer, &selection)?;
    let selected = &buffer[selection.clone()];

    let replacement = match command {
        FormatCommand::Bold => wrap_inline(selected, "strong")?,
        FormatCommand::Italic => wrap_inline(selected, "em")?,
        FormatCommand::Underline => wrap_inline(selected, "u")?,
        FormatCommand::OrderedList => wrap_list(selected, "ol"),
        FormatCommand::UnorderedList => wrap_list(selected, "ul"),
        FormatCommand::Block(block) => wrap_block(selected, block)?,
        FormatCommand::RemoveFormat => INLINE_TAG_RE.replace_all(selected, "").into_owned(),
    };

    let mut edited = String::with_capacity(buffer.len() + replacement.len());
    edited.push_str(&buffer[..selection.start]);
    edited.push_str(&replacement);
    edited.push_str(&buffer[selection.end..]);

    Ok(Edit {
        buffer: edited,
        selection: selection.start..selection.start + replacement.len(),
    })
}

fn wrap_inline(selected: &str, tag: &str) -> Result<String, EditorError> {
    if selected.is_empty() {
        return Err(EditorError::EmptySelection);
    }
    Ok(format!("<{tag}>{selected}</{tag}>"))
}

/// One `<li>` per selected line (newline or `<br>` separated)
fn wrap_list(selected: &str, tag: &str) -> String {
    let lines = BR_RE.replace_all(selected, "\n");
    let items: String = lines
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<li>{line}</li>"))
        .collect();

    if items.is_empty() {
        format!("<{tag}><li></li></{tag}>")
    } else {
        format!("<{tag}>{items}</{tag}>")
    }
}

/// Replace the selection's block wrapper, or wrap it when it has none
fn wrap_block(selected: &str, block: BlockFormat) -> Result<String, EditorError> {
    let tag = match block {
        BlockFormat::Paragraph => "p".to_string(),
        BlockFormat::Heading(level @ 1..=3) => format!("h{level}"),
        BlockFormat::Heading(level) => return Err(EditorError::InvalidHeadingLevel(level)),
        BlockFormat::Quote => "blockquote".to_string(),
    };

    let inner = SINGLE_BLOCK_RE
        .captures(selected)
        .filter(|caps| caps[1].eq_ignore_ascii_case(&caps[3]))
        .and_then(|caps| caps.get(2))
        // `<p>a</p><p>b</p>` is two blocks, not one wrapping `a</p><p>b`
        .filter(|inner| !BLOCK_TAG_RE.is_match(inner.as_str()))
        .map_or(selected, |m| m.as_str());

    Ok(format!("<{tag}>{inner}</{tag}>"))
}

/// Rich markup to editable plain text: `<br>` and `</p>` become newlines,
/// every other tag is dropped, and entities are decoded once.
#[must_use]
pub fn html_to_plain_text(html: &str) -> String {
    let text = BR_RE.replace_all(html, "\n");
    let text = P_CLOSE_RE.replace_all(&text, "\n");
    let text = P_OPEN_RE.replace_all(&text, "");
    let text = ANY_TAG_RE.replace_all(&text, "");

    // Non-breaking spaces are plain spaces in the text surface
    decode_html_entities(&text).replace('\u{a0}', " ")
}

/// Draft of the section currently being written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    selection: Range<usize>,
    mode: EditorMode,
}

impl EditorState {
    #[must_use]
    pub fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Draft holding `content`, cursor at the end
    #[must_use]
    pub fn with_content(content: impl Into<String>, mode: EditorMode) -> Self {
        let buffer = content.into();
        let end = buffer.len();
        Self {
            buffer,
            selection: end..end,
            mode,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    #[must_use]
    pub fn selected_text(&self) -> &str {
        &self.buffer[self.selection.clone()]
    }

    /// # Errors
    ///
    /// Returns [`EditorError::InvalidSelection`] if `selection` is out of range
    /// or splits a character.
    pub fn select(&mut self, selection: Range<usize>) -> Result<(), EditorError> {
        validate_selection(&self.buffer, &selection)?;
        self.selection = selection;
        Ok(())
    }

    /// Run `command` on the current selection and commit the result
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::PlainMode`] in plain mode, otherwise whatever
    /// [`apply_command`] reports. On error the state is unchanged.
    pub fn apply(&mut self, command: FormatCommand) -> Result<(), EditorError> {
        if self.mode == EditorMode::Plain {
            return Err(EditorError::PlainMode);
        }
        let edit = apply_command(&self.buffer, self.selection.clone(), command)?;
        self.buffer = edit.buffer;
        self.selection = edit.selection;
        Ok(())
    }

    /// Switch surfaces. Leaving rich mode converts markup to plain text;
    /// entering it keeps the text as typed.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            EditorMode::Rich => {
                if self.buffer.contains('<') {
                    self.buffer = html_to_plain_text(&self.buffer);
                }
                EditorMode::Plain
            }
            EditorMode::Plain => EditorMode::Rich,
        };
        self.collapse_to_end();
    }

    /// Dictation replaces the whole draft
    pub fn replace_with_transcript(&mut self, transcript: impl Into<String>) {
        self.buffer = transcript.into();
        self.collapse_to_end();
    }

    /// Move the draft into `key` of `document` and clear it. An empty draft
    /// is not saved; returns whether anything was stored.
    pub fn commit_to(&mut self, document: &mut ProcedureDocument, key: SectionKey) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        document.set_section(key, std::mem::take(&mut self.buffer));
        self.selection = 0..0;
        true
    }

    fn collapse_to_end(&mut self) {
        let end = self.buffer.len();
        self.selection = end..end;
    }
}

//! Editor change-event types.
//!
//! A [`ChangeEvent`] is the engine's primary input: one atomic text mutation
//! described as an ordered list of range replacements. It is produced by the
//! host editor per keystroke/edit operation and consumed exactly once; this
//! crate never owns the text buffer itself.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A line/column position in a document. Both coordinates are 0-based;
/// columns are byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open region of the document, as start/end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: Position,
    pub end: Position,
}

impl LineRange {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// An empty range describes a pure insertion point.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// One range replacement inside a change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    /// The replaced region, in pre-edit coordinates.
    pub range: LineRange,
    /// The replacement text (empty for a deletion).
    pub text: String,
}

impl TextChange {
    pub fn new(range: LineRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Number of line breaks in the replacement text.
    pub fn lines_added(&self) -> usize {
        self.text.matches('\n').count()
    }

    /// Whether applying this change introduces new lines.
    pub fn is_line_adding(&self) -> bool {
        self.lines_added() > 0
    }

    /// Whether the replaced range spans more than one line.
    pub fn is_line_deleting(&self) -> bool {
        self.range.end.line > self.range.start.line
    }

    /// Number of lines the replaced range spans beyond its first line.
    pub fn lines_deleted(&self) -> usize {
        self.range.end.line - self.range.start.line
    }

    /// A same-line edit whose replacement is pure indentation whitespace.
    ///
    /// Editors that trim auto-inserted whitespace emit these as synthetic
    /// companions to the "real" edit; the move-detection logic filters them
    /// out before counting sub-changes.
    pub fn is_whitespace_only(&self) -> bool {
        self.range.is_single_line() && is_indent_whitespace(&self.text)
    }
}

/// One atomic editor mutation: an ordered sequence of range replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub changes: Vec<TextChange>,
}

impl ChangeEvent {
    pub fn new(changes: Vec<TextChange>) -> Self {
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Whether `text` consists solely of indentation characters (`[\t ]*`).
pub(crate) fn is_indent_whitespace(text: &str) -> bool {
    static INDENT_ONLY: OnceLock<Regex> = OnceLock::new();
    INDENT_ONLY
        .get_or_init(|| Regex::new(r"^[\t ]*$").expect("indentation pattern is valid"))
        .is_match(text)
}

//! The view of the host editor the engine depends on.
//!
//! [`EditorView`] is the narrow interface the re-anchoring engine needs from
//! the (excluded) editor layer: line count, line text for previews and the
//! whitespace tie-break, and the active selections for move detection.
//! [`ScratchEditor`] is an in-memory implementation used by tests and by
//! hosts that want a reference document to replay events against.

use crate::change::{ChangeEvent, LineRange};

/// Read-only access to the document and editor state behind a change event.
pub trait EditorView {
    /// Current (post-edit) number of lines in the document.
    fn line_count(&self) -> usize;

    /// Current text of one line, without its trailing line break.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Active selections, one range per cursor.
    fn selections(&self) -> &[LineRange];
}

/// In-memory line buffer implementing [`EditorView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchEditor {
    lines: Vec<String>,
    selections: Vec<LineRange>,
}

impl ScratchEditor {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|line| line.to_string()).collect(),
            selections: Vec::new(),
        }
    }

    /// A document of `count` empty lines, for tests that only care about
    /// line arithmetic. Zero lines models a document that is not open.
    pub fn with_line_count(count: usize) -> Self {
        Self {
            lines: vec![String::new(); count],
            selections: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the active selections (move detection requires exactly one).
    pub fn select(&mut self, selection: LineRange) {
        self.selections = vec![selection];
    }

    pub fn select_many(&mut self, selections: Vec<LineRange>) {
        self.selections = selections;
    }

    /// Apply a change event to the buffer.
    ///
    /// Sub-changes carry pre-edit coordinates, so they are applied from the
    /// bottom of the document upward to keep earlier coordinates valid.
    pub fn apply(&mut self, event: &ChangeEvent) {
        let mut ordered: Vec<_> = event.changes.iter().collect();
        ordered.sort_by(|a, b| b.range.start.cmp(&a.range.start));
        for change in ordered {
            self.replace(change.range, &change.text);
        }
    }

    /// Replace one range with new text, splicing lines as needed.
    pub fn replace(&mut self, range: LineRange, text: &str) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let last = self.lines.len() - 1;
        let start_line = range.start.line.min(last);
        let end_line = range.end.line.min(last);
        let start_column = range.start.column.min(self.lines[start_line].len());
        let end_column = range.end.column.min(self.lines[end_line].len());

        let prefix = &self.lines[start_line][..start_column];
        let suffix = &self.lines[end_line][end_column..];
        let combined = format!("{prefix}{text}{suffix}");
        let replacement: Vec<String> = combined
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.lines.splice(start_line..=end_line, replacement);
    }
}

impl EditorView for ScratchEditor {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn selections(&self) -> &[LineRange] {
        &self.selections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::TextChange;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_text_counts_lines_like_an_editor() {
        let editor = ScratchEditor::from_text("a\nb\nc");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.line_text(1).as_deref(), Some("b"));
        assert_eq!(editor.line_text(3), None);
    }

    #[test]
    fn with_line_count_honors_zero() {
        let editor = ScratchEditor::with_line_count(0);
        assert_eq!(editor.line_count(), 0);
        assert_eq!(editor.line_text(0), None);
    }

    #[test]
    fn trailing_newline_produces_trailing_empty_line() {
        let editor = ScratchEditor::from_text("a\nb\n");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.line_text(2).as_deref(), Some(""));
    }

    #[test]
    fn replace_inserts_lines_at_point() {
        let mut editor = ScratchEditor::from_text("one\ntwo\nthree");
        editor.replace(LineRange::new(1, 0, 1, 0), "new\n");
        assert_eq!(editor.text(), "one\nnew\ntwo\nthree");
    }

    #[test]
    fn replace_deletes_whole_lines() {
        let mut editor = ScratchEditor::from_text("one\ntwo\nthree\nfour");
        editor.replace(LineRange::new(1, 0, 3, 0), "");
        assert_eq!(editor.text(), "one\nfour");
    }

    #[test]
    fn replace_mid_line_keeps_boundary_content() {
        let mut editor = ScratchEditor::from_text("hello world\nsecond\nthird line");
        // Replace from mid first line to mid third line with flat text.
        editor.replace(LineRange::new(0, 5, 2, 5), "***");
        assert_eq!(editor.text(), "hello*** line");
    }

    #[test]
    fn apply_handles_multiple_changes_bottom_up() {
        let mut editor = ScratchEditor::from_text("a\nb\nc\nd");
        let event = ChangeEvent::new(vec![
            TextChange::new(LineRange::new(0, 0, 0, 0), "top\n"),
            TextChange::new(LineRange::new(2, 0, 3, 0), ""),
        ]);
        editor.apply(&event);
        assert_eq!(editor.text(), "top\na\nb\nd");
    }
}

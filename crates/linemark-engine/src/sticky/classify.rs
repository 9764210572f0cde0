//! Event-shape classification: an ordered pattern-matching cascade over the
//! change list. First match wins; anything unmatched falls through to the
//! general scan.

use crate::change::{ChangeEvent, LineRange, TextChange};
use crate::editor::EditorView;
use crate::sticky::StickyOptions;

/// Tagged description of one change event, as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditShape {
    /// Zero content changes.
    Noop,
    /// A bare newline insertion plus the editor's synthetic auto-indent
    /// companion edit: collapses to a single-line insertion at `change`.
    InsertedBlankLine { change: TextChange },
    /// A whole block of lines relocated by one line.
    MoveBlock {
        direction: MoveDirection,
        selection: LineRange,
    },
    /// Everything else: per-change insertion/deletion arithmetic.
    Scan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveDirection {
    Up,
    Down,
}

pub(crate) fn classify(
    event: &ChangeEvent,
    editor: &dyn EditorView,
    options: &StickyOptions,
) -> EditShape {
    if event.is_empty() {
        return EditShape::Noop;
    }

    // Auto-indent artifact: the editor inserted a newline and immediately
    // issued a second, synthetic edit at the start of the new line. Only
    // recognized while the editor trims auto-whitespace, which is what
    // produces the pattern.
    if options.trim_auto_whitespace
        && let [first, second] = event.changes.as_slice()
        && is_bare_newline_insert(first)
        && is_synthetic_indent_edit(first, second)
    {
        return EditShape::InsertedBlankLine {
            change: first.clone(),
        };
    }

    // Move detection counts only "real" sub-changes: same-line edits whose
    // replacement is pure indentation whitespace are trimming side effects.
    let real: Vec<&TextChange> = event
        .changes
        .iter()
        .filter(|change| !change.is_whitespace_only())
        .collect();
    if let [first, second] = real.as_slice()
        && let [selection] = editor.selections()
    {
        // The sub-change with empty replacement text is the vacated slot:
        // vacated above the block means the block moved down, and vice
        // versa.
        if first.text.is_empty() {
            return EditShape::MoveBlock {
                direction: MoveDirection::Down,
                selection: *selection,
            };
        }
        if second.text.is_empty() {
            return EditShape::MoveBlock {
                direction: MoveDirection::Up,
                selection: *selection,
            };
        }
    }

    EditShape::Scan
}

fn is_bare_newline_insert(change: &TextChange) -> bool {
    change.range.is_empty() && (change.text == "\n" || change.text == "\r\n")
}

fn is_synthetic_indent_edit(first: &TextChange, second: &TextChange) -> bool {
    second.text.is_empty()
        && second.range.start.line == first.range.start.line + 1
        && second.range.start.column == 0
}

//! General per-change scan: insertion and deletion line arithmetic.
//!
//! Each sub-change contributes a removal pass (for bookmarks inside a
//! deleted block) and a single composed line shift. Bookmark indices are
//! resolved fresh per line, never cached, because earlier steps in the same
//! event may already have changed what sits on a given line.

use log::trace;
use relative_path::RelativePath;

use crate::change::{ChangeEvent, TextChange, is_indent_whitespace};
use crate::controller::Controller;
use crate::editor::EditorView;
use crate::ops;
use crate::sticky::StickyOptions;

pub(crate) fn run(
    event: &ChangeEvent,
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
    options: &StickyOptions,
) -> bool {
    let mut updated = false;
    for change in &event.changes {
        updated |= apply_change(change, path, editor, controller, options);
    }
    updated
}

/// Apply one sub-change's line arithmetic.
///
/// A change can be both line-adding and line-deleting (a multi-line paste
/// over a multi-line selection); the removal pass uses the pre-shift
/// coordinates and the two deltas compose into one shift.
pub(crate) fn apply_change(
    change: &TextChange,
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
    options: &StickyOptions,
) -> bool {
    let lines_added = change.lines_added();
    let lines_deleted = change.lines_deleted();
    if lines_added == 0 && lines_deleted == 0 {
        return false;
    }

    // Inserting at column 0 pushes the whole line downward, so the line's
    // own bookmark moves with it; mid-line edits leave it in place. A
    // whitespace-only line at the edit point counts as column 0 (the edit
    // column only reflects auto-indentation).
    let start = change.range.start;
    let at_column_zero = start.column == 0
        || editor
            .line_text(start.line)
            .is_some_and(|text| is_indent_whitespace(&text));

    let mut updated = false;
    if lines_deleted > 0 {
        updated |= collapse_deleted_block(change, at_column_zero, path, editor, controller, options);
    }

    let delta = lines_added as isize - lines_deleted as isize;
    if delta != 0 {
        updated |= shift_tail(path, editor, controller, start.line, at_column_zero, delta);
    }
    updated
}

/// Remove (or, under the keep policy, relocate) bookmarks sitting on lines
/// the deletion swallows whole.
///
/// The block is `[start_line, end_line)`; when the range starts mid-line
/// the start line keeps its prefix content, so its bookmark survives. The
/// end line always survives as the merge target.
fn collapse_deleted_block(
    change: &TextChange,
    at_column_zero: bool,
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
    options: &StickyOptions,
) -> bool {
    let start_line = change.range.start.line;
    let end_line = change.range.end.line;
    let first = if at_column_zero {
        start_line
    } else {
        start_line + 1
    };

    let mut updated = false;
    for line in first..end_line {
        let Some(file) = controller.file(path) else {
            break;
        };
        let Some(index) = ops::index_of_bookmark(file, line) else {
            continue;
        };
        let relocate = options.keep_bookmarks_on_line_delete
            && ops::index_of_bookmark(file, end_line).is_none();
        if relocate {
            trace!("relocating bookmark from deleted line {line} to {end_line}");
            let preview = editor.line_text(end_line);
            controller.update_bookmark(path, index, line, end_line, preview);
        } else {
            trace!("removing bookmark on deleted line {line}");
            controller.remove_bookmark(path, index, line);
        }
        updated = true;
    }
    updated
}

/// Shift every bookmark past `start_line` by `delta` lines, clamping at
/// zero.
///
/// Downward shifts process bookmarks bottom-up and upward shifts top-down,
/// so sequential single-line updates never collide with a neighbor that has
/// not moved yet. A shift can still land on a line excluded from the shift
/// set (a mid-line deletion start keeps its own bookmark); the incoming
/// bookmark is dropped then, one bookmark per line.
pub(crate) fn shift_tail(
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
    start_line: usize,
    include_start: bool,
    delta: isize,
) -> bool {
    let Some(file) = controller.file(path) else {
        return false;
    };
    let mut lines: Vec<usize> = file
        .lines()
        .filter(|&line| line > start_line || (include_start && line == start_line))
        .collect();
    lines.sort_unstable();
    if delta > 0 {
        lines.reverse();
    }

    let mut updated = false;
    for line in lines {
        let Some(file) = controller.file(path) else {
            break;
        };
        let Some(index) = ops::index_of_bookmark(file, line) else {
            continue;
        };
        let new_line = if delta >= 0 {
            line + delta as usize
        } else {
            line.saturating_sub(delta.unsigned_abs())
        };
        if new_line == line {
            continue;
        }
        if ops::index_of_bookmark(file, new_line).is_some() {
            trace!("dropping bookmark on line {line}: line {new_line} is already bookmarked");
            controller.remove_bookmark(path, index, line);
        } else {
            let preview = editor.line_text(new_line);
            controller.update_bookmark(path, index, line, new_line, preview);
        }
        updated = true;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::LineRange;
    use crate::change::Position;
    use crate::editor::ScratchEditor;
    use pretty_assertions::assert_eq;

    fn controller_with_lines(path: &str, lines: &[usize]) -> Controller {
        let mut controller = Controller::new();
        for &line in lines {
            controller.add_bookmark(path, Position::new(line, 0), None, None);
        }
        controller
    }

    fn lines(controller: &Controller, path: &str) -> Vec<usize> {
        controller
            .file(path)
            .map(|file| file.lines().collect())
            .unwrap_or_default()
    }

    #[test]
    fn insertion_at_column_zero_shifts_the_start_line_too() {
        let mut controller = controller_with_lines("a.rs", &[2, 5, 9]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nx\nx\nx\nx\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 0, 4, 0), "a\nb\nc\n");

        let updated = apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert!(updated);
        assert_eq!(lines(&controller, "a.rs"), vec![2, 8, 12]);
    }

    #[test]
    fn mid_line_insertion_leaves_own_line_in_place() {
        let mut controller = controller_with_lines("a.rs", &[4, 9]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nxyz\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 2, 4, 2), "tail\nrest");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![4, 10]);
    }

    #[test]
    fn whitespace_only_line_counts_as_column_zero() {
        let mut controller = controller_with_lines("a.rs", &[4, 9]);
        // Line 4 is pure indentation after the edit.
        let editor = ScratchEditor::from_text("x\nx\nx\nx\n    \nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 4, 4, 4), "\n");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![5, 10]);
    }

    #[test]
    fn deletion_removes_swallowed_bookmarks_and_shifts_the_rest() {
        let mut controller = controller_with_lines("a.rs", &[2, 5, 9]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 0, 7, 0), "");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![2, 6]);
    }

    #[test]
    fn deletion_starting_mid_line_spares_the_start_line() {
        let mut controller = controller_with_lines("a.rs", &[4, 5, 9]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nkeep\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 2, 7, 0), "");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        // Line 4 keeps its prefix content and its bookmark; line 5 was
        // swallowed; line 9 shifts up by three.
        assert_eq!(lines(&controller, "a.rs"), vec![4, 6]);
    }

    #[test]
    fn merging_deletion_never_doubles_up_on_the_start_line() {
        let mut controller = controller_with_lines("a.rs", &[4, 7]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nkept\nx\nx\nx");
        // Deletion starts mid-line 4 and runs to the start of line 7: both
        // boundary lines hold a bookmark, and the merge leaves one line.
        let change = TextChange::new(LineRange::new(4, 2, 7, 0), "");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        // Line 4 keeps its bookmark; line 7's shifts into line 4 and is
        // dropped rather than duplicated.
        assert_eq!(lines(&controller, "a.rs"), vec![4]);
    }

    #[test]
    fn selection_ending_at_line_length_keeps_the_end_line_bookmark() {
        let mut controller = controller_with_lines("a.rs", &[5, 8]);
        let editor = ScratchEditor::from_text("x\nx\nx\n\nx\nx\nx\nx\nx");
        // The selection runs to the exact end of line 5's pre-edit text:
        // the line's content is fully removed but the line itself survives
        // as the merge target, and its bookmark with it.
        let change = TextChange::new(LineRange::new(3, 0, 5, 4), "");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![3, 6]);
    }

    #[test]
    fn keep_policy_relocates_onto_the_end_line() {
        let mut controller = controller_with_lines("a.rs", &[5, 9]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 0, 7, 0), "");
        let options = StickyOptions {
            keep_bookmarks_on_line_delete: true,
            ..StickyOptions::default()
        };

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &options,
        );

        // The bookmark from line 5 collapses onto the deletion's end line
        // (7), which then shifts up with everything else to line 4.
        assert_eq!(lines(&controller, "a.rs"), vec![4, 6]);
    }

    #[test]
    fn keep_policy_drops_extras_when_end_line_is_taken() {
        let mut controller = controller_with_lines("a.rs", &[4, 5, 7]);
        let editor = ScratchEditor::from_text("x\nx\nx\nx\nx\nx\nx\nx");
        let change = TextChange::new(LineRange::new(4, 0, 7, 0), "");
        let options = StickyOptions {
            keep_bookmarks_on_line_delete: true,
            ..StickyOptions::default()
        };

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &options,
        );

        // Line 4 relocates onto 7; lines 5's bookmark finds 7 occupied and
        // is dropped; the survivor shifts up to 4.
        assert_eq!(lines(&controller, "a.rs"), vec![4]);
    }

    #[test]
    fn flat_paste_over_multi_line_selection_removes_covered_bookmarks() {
        let mut controller = controller_with_lines("a.rs", &[3, 4, 8]);
        let editor = ScratchEditor::from_text("x\nx\nx\npasted\nx\nx");
        // Replace lines 3..6 (selection ending mid-line) with flat text.
        let change = TextChange::new(LineRange::new(3, 0, 6, 2), "pasted");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![5]);
    }

    #[test]
    fn multi_line_paste_over_multi_line_selection_composes_deltas() {
        let mut controller = controller_with_lines("a.rs", &[2, 9]);
        let editor = ScratchEditor::from_text("x\nx\na\nb\nc\nd\nx\nx\nx\nx");
        // Three lines replaced by four: net shift of +1 for the tail.
        let change = TextChange::new(LineRange::new(4, 0, 7, 0), "a\nb\nc\nd\n");

        apply_change(
            &change,
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            &StickyOptions::default(),
        );

        assert_eq!(lines(&controller, "a.rs"), vec![2, 10]);
    }

    #[test]
    fn shift_clamps_at_line_zero() {
        let mut controller = controller_with_lines("a.rs", &[2]);
        let editor = ScratchEditor::from_text("x\nx\nx");

        // An upward shift larger than the bookmark's line lands on zero
        // instead of underflowing.
        shift_tail(
            RelativePath::new("a.rs"),
            &editor,
            &mut controller,
            0,
            true,
            -5,
        );

        assert_eq!(lines(&controller, "a.rs"), vec![0]);
    }
}

//! Line-move handling: a selected block swapped with its neighboring line.
//!
//! The selection carries the block's pre-move coordinates `[A, B]`. Moving
//! the block up displaces line `A - 1` to `B`; moving it down displaces
//! line `B + 1` to `A`. A bookmark on the displaced line travels with it,
//! and bookmarks inside the block shift one line toward the vacated slot.

use log::trace;
use relative_path::RelativePath;

use crate::change::LineRange;
use crate::controller::Controller;
use crate::editor::EditorView;
use crate::ops;
use crate::sticky::classify::MoveDirection;

pub(crate) fn apply(
    direction: MoveDirection,
    selection: LineRange,
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
) -> bool {
    let line_min = selection.start.line;
    let mut line_max = selection.end.line;
    // A selection ending at column 0 includes no content from its last
    // line; that line stays put.
    if line_max > line_min && selection.end.column == 0 {
        line_max -= 1;
    }

    // The top line cannot move further up.
    if direction == MoveDirection::Up && line_min == 0 {
        return false;
    }

    let (displaced_line, displaced_target) = match direction {
        MoveDirection::Up => (line_min - 1, line_max),
        MoveDirection::Down => (line_max + 1, line_min),
    };

    // Remove the displaced line's bookmark before the block shifts into its
    // slot; re-insert it after the block's bookmarks have vacated the
    // target line.
    let displaced = controller
        .file(path)
        .and_then(|file| ops::index_of_bookmark(file, displaced_line))
        .and_then(|index| controller.remove_bookmark(path, index, displaced_line));

    let mut updated = displaced.is_some();
    updated |= shift_block(direction, line_min, line_max, path, editor, controller);

    if let Some(mut bookmark) = displaced {
        trace!("displaced bookmark travels from line {displaced_line} to {displaced_target}");
        bookmark.line = displaced_target;
        bookmark.column = 1;
        let preview = editor.line_text(displaced_target);
        controller.insert_bookmark(path, bookmark, preview);
    }
    updated
}

/// Shift every bookmark inside `[line_min, line_max]` one line toward the
/// vacated slot.
///
/// Upward shifts walk the block top-down and downward shifts bottom-up, so
/// each bookmark moves into a line its neighbor has already left.
fn shift_block(
    direction: MoveDirection,
    line_min: usize,
    line_max: usize,
    path: &RelativePath,
    editor: &dyn EditorView,
    controller: &mut Controller,
) -> bool {
    let Some(file) = controller.file(path) else {
        return false;
    };
    let mut lines: Vec<usize> = file
        .lines()
        .filter(|&line| line >= line_min && line <= line_max)
        .collect();
    lines.sort_unstable();
    if direction == MoveDirection::Down {
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
        let new_line = match direction {
            MoveDirection::Up => line - 1,
            MoveDirection::Down => line + 1,
        };
        let preview = editor.line_text(new_line);
        controller.update_bookmark(path, index, line, new_line, preview);
        updated = true;
    }
    updated
}

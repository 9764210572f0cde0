/*!
 * Sticky re-anchoring: keeps bookmarks attached to their logical line as
 * the document is edited.
 *
 * One call to [`process`] handles one editor change event. The event is
 * first classified ([`classify`]) into a recognized shape, then dispatched
 * to the matching handler:
 *
 * - auto-indent newline artifacts collapse into a plain one-line insertion,
 * - line move-up/move-down swaps the displaced neighbor with the block,
 * - everything else runs per-change insertion/deletion arithmetic
 *   ([`scan`]).
 *
 * Shapes the classifier does not recognize fall through to the scan, and
 * events that touch no line boundaries leave bookmarks untouched. The
 * engine corrects or drops bookmarks but never invents them, with one
 * exception: a bookmark displaced by a line move or a kept-on-delete
 * relocation is re-inserted through the controller so subscribers see the
 * full correction.
 */

pub(crate) mod classify;
mod move_block;
mod scan;

use log::debug;
use relative_path::RelativePath;

use crate::change::ChangeEvent;
use crate::controller::Controller;
use crate::editor::EditorView;
use classify::EditShape;

/// Host policy knobs for re-anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickyOptions {
    /// Relocate a bookmark whose line is deleted onto the deletion's end
    /// line instead of dropping it, when that line is unoccupied.
    pub keep_bookmarks_on_line_delete: bool,
    /// The host editor trims auto-inserted indentation, which produces the
    /// two-part newline artifact the classifier collapses.
    pub trim_auto_whitespace: bool,
}

impl Default for StickyOptions {
    fn default() -> Self {
        Self {
            keep_bookmarks_on_line_delete: false,
            trim_auto_whitespace: true,
        }
    }
}

/// Re-anchor the bookmarks of `path` after one editor change event.
///
/// `prior_line_count` is the document's line count before the event was
/// applied; `editor` exposes the post-edit document. Returns whether any
/// bookmark changed.
pub fn process(
    event: &ChangeEvent,
    path: impl AsRef<RelativePath>,
    prior_line_count: usize,
    editor: &dyn EditorView,
    controller: &mut Controller,
    options: &StickyOptions,
) -> bool {
    let path = path.as_ref();
    if editor.line_count() == 0 {
        return false;
    }
    match controller.file(path) {
        Some(file) if !file.is_empty() => {}
        _ => return false,
    }
    // Same line count and no line-boundary changes: nothing can have
    // moved.
    if editor.line_count() == prior_line_count
        && event
            .changes
            .iter()
            .all(|change| !change.is_line_adding() && !change.is_line_deleting())
    {
        return false;
    }

    match classify::classify(event, editor, options) {
        EditShape::Noop => false,
        EditShape::InsertedBlankLine { change } => {
            debug!("auto-indent artifact at line {}", change.range.start.line);
            scan::apply_change(&change, path, editor, controller, options)
        }
        EditShape::MoveBlock {
            direction,
            selection,
        } => {
            debug!(
                "line move {direction:?} of block [{}, {}]",
                selection.start.line, selection.end.line
            );
            move_block::apply(direction, selection, path, editor, controller)
        }
        EditShape::Scan => scan::run(event, path, editor, controller, options),
    }
}

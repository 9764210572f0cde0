/*!
 * # linemark engine
 *
 * Core library for tracking user-placed bookmarks (line/column markers,
 * optionally labeled) attached to files in a live text editor, and keeping
 * those markers anchored to the correct logical line as the text is edited.
 *
 * ## Architecture Overview
 *
 * ### 1. Data Model
 * - [`model::Bookmark`] is a single marker: line, column, optional label and
 *   note. Identity within a file is positional (line equality); at most one
 *   bookmark per line per file at any committed state.
 * - [`model::BookmarkedFile`] groups the bookmarks for one document identity
 *   (workspace-relative path plus an optional editor URI).
 *
 * ### 2. Controller as Sole Mutation Point
 * - [`controller::Controller`] owns every `BookmarkedFile` for one workspace
 *   scope and exposes the CRUD primitives (add/remove/update/clear/toggle).
 * - Every mutating call fires a typed [`controller::BookmarkEvent`] through
 *   an explicit subscriber registry, so presentation layers can patch their
 *   view incrementally instead of re-rendering.
 *
 * ### 3. Sticky Re-anchoring
 * - [`sticky::process`] consumes one editor change event at a time and
 *   re-anchors every bookmark in the affected file: line insertion and
 *   deletion, indentation-only edits, line move-up/move-down, multi-line
 *   paste, and editor whitespace-trimming side effects.
 * - Classification is an ordered pattern-matching cascade over the change
 *   list; shapes it does not recognize are no-ops, never guesses.
 *
 * ### 4. Read/Search API
 * - [`ops`] holds the pure helpers: next-bookmark search with a tagged
 *   result type, exact-line index lookup, stable sorting, a
 *   numeric-prefix-aware label comparator, and the invalid-bookmark sweep.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use linemark_engine::{
 *     ChangeEvent, Controller, LineRange, Position, ScratchEditor, StickyOptions, TextChange,
 * };
 *
 * let mut controller = Controller::new();
 * controller.add_bookmark("src/main.rs", Position::new(5, 0), None, None);
 *
 * // The host editor inserts two lines at the top of the file.
 * let mut editor = ScratchEditor::from_text("fn main() {\n}\n");
 * let event = ChangeEvent::new(vec![TextChange::new(
 *     LineRange::new(0, 0, 0, 0),
 *     "// a\n// b\n",
 * )]);
 * let changed = linemark_engine::sticky::process(
 *     &event,
 *     "src/main.rs",
 *     2,
 *     &editor,
 *     &mut controller,
 *     &StickyOptions::default(),
 * );
 * assert!(changed);
 * assert_eq!(controller.file("src/main.rs").unwrap().bookmarks[0].line, 7);
 * # let _ = &mut editor;
 * ```
 *
 * The engine never mutates bookmark lists directly: all corrections flow
 * through controller primitives, which are also the notification point.
 */

pub mod change;
pub mod controller;
pub mod editor;
pub mod model;
pub mod ops;
pub mod sticky;

// Re-export key types for easier usage
pub use change::{ChangeEvent, LineRange, Position, TextChange};
pub use controller::{BookmarkEvent, Controller, Notifier, ToggleMode};
pub use editor::{EditorView, ScratchEditor};
pub use model::{Bookmark, BookmarkedFile};
pub use ops::{Direction, NavigationOptions, NextBookmark, SortOrder};
pub use sticky::StickyOptions;

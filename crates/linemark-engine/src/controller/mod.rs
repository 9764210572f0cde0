//! The owning aggregate of bookmark collections for one workspace scope.
//!
//! Every mutation flows through [`Controller`] methods, which are the sole
//! emission point for [`BookmarkEvent`]s. The re-anchoring engine never
//! touches `BookmarkedFile::bookmarks` directly: it calls these primitives
//! so that presentation layers observe each correction.

pub mod events;

pub use events::{BookmarkEvent, Notifier};

use relative_path::RelativePath;
use serde::{Deserialize, Serialize};

use crate::change::Position;
use crate::model::{Bookmark, BookmarkedFile};
use crate::ops;

/// How a multi-cursor toggle resolves a batch of positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleMode {
    /// The batch acts atomically: all on, all off, or relabel-all.
    #[default]
    AllLinesAtOnce,
    /// Each cursor line toggles on its own.
    EachLineIndependently,
}

/// Owns all [`BookmarkedFile`]s for one workspace scope.
///
/// Created at workspace open and populated by the host (from persisted
/// state, or lazily as documents are visited). `active_file` is a weak
/// reference by index into `files`.
#[derive(Debug, Default)]
pub struct Controller {
    files: Vec<BookmarkedFile>,
    active_file: Option<usize>,
    notifier: Notifier,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for every subsequent mutation.
    pub fn on_change(&mut self, subscriber: impl FnMut(&BookmarkEvent) + 'static) {
        self.notifier.subscribe(subscriber);
    }

    pub fn files(&self) -> &[BookmarkedFile] {
        &self.files
    }

    pub fn file(&self, path: impl AsRef<RelativePath>) -> Option<&BookmarkedFile> {
        let path = path.as_ref();
        self.files.iter().find(|file| file.path.as_str() == path.as_str())
    }

    /// Register a file collection if it does not exist yet.
    pub fn ensure_file(&mut self, path: impl AsRef<RelativePath>) {
        self.file_index_or_insert(path.as_ref());
    }

    pub fn set_active_file(&mut self, path: impl AsRef<RelativePath>) {
        let index = self.file_index_or_insert(path.as_ref());
        self.active_file = Some(index);
    }

    pub fn active_file(&self) -> Option<&BookmarkedFile> {
        self.active_file.and_then(|index| self.files.get(index))
    }

    /// Add a bookmark at `position`.
    ///
    /// Returns false without mutating when the line is already bookmarked
    /// (at most one bookmark per line per file).
    pub fn add_bookmark(
        &mut self,
        path: impl AsRef<RelativePath>,
        position: Position,
        label: Option<String>,
        preview: Option<String>,
    ) -> bool {
        let mut bookmark = Bookmark::new(position.line, position.column);
        bookmark.label = label;
        self.insert_bookmark(path.as_ref(), bookmark, preview)
    }

    /// Insert a fully-formed bookmark (used internally to preserve label
    /// and note when a bookmark is displaced and re-inserted).
    pub(crate) fn insert_bookmark(
        &mut self,
        path: &RelativePath,
        bookmark: Bookmark,
        preview: Option<String>,
    ) -> bool {
        let index = self.file_index_or_insert(path);
        if ops::index_of_bookmark(&self.files[index], bookmark.line).is_some() {
            return false;
        }
        let event = BookmarkEvent::Added {
            path: self.files[index].path.clone(),
            line: bookmark.line,
            column: bookmark.column,
            label: bookmark.label.clone(),
            preview,
        };
        self.files[index].bookmarks.push(bookmark);
        ops::sort_bookmarks(&mut self.files[index]);
        self.notifier.emit(&event);
        true
    }

    /// Remove the bookmark at `index`, which must currently sit on `line`.
    ///
    /// Passing a stale index is a contract violation, not a recoverable
    /// condition; callers resolve indices fresh via
    /// [`ops::index_of_bookmark`].
    pub fn remove_bookmark(
        &mut self,
        path: impl AsRef<RelativePath>,
        index: usize,
        line: usize,
    ) -> Option<Bookmark> {
        let file_index = self.file_index(path.as_ref())?;
        let file = &mut self.files[file_index];
        debug_assert_eq!(
            file.bookmarks.get(index).map(|bookmark| bookmark.line),
            Some(line),
            "remove_bookmark called with stale index"
        );
        if index >= file.bookmarks.len() {
            return None;
        }
        let removed = file.bookmarks.remove(index);
        let event = BookmarkEvent::Removed {
            path: file.path.clone(),
            index,
            line,
        };
        self.notifier.emit(&event);
        Some(removed)
    }

    /// Move the bookmark at `index` from `old_line` to `new_line`.
    pub fn update_bookmark(
        &mut self,
        path: impl AsRef<RelativePath>,
        index: usize,
        old_line: usize,
        new_line: usize,
        preview: Option<String>,
    ) {
        let Some(file_index) = self.file_index(path.as_ref()) else {
            return;
        };
        let file = &mut self.files[file_index];
        debug_assert_eq!(
            file.bookmarks.get(index).map(|bookmark| bookmark.line),
            Some(old_line),
            "update_bookmark called with stale index"
        );
        let Some(bookmark) = file.bookmarks.get_mut(index) else {
            return;
        };
        bookmark.line = new_line;
        let label = bookmark.label.clone();
        ops::sort_bookmarks(file);
        // Report the bookmark's position after the resort, not the stale
        // pre-sort index.
        let index = ops::index_of_bookmark(file, new_line).unwrap_or(index);
        let event = BookmarkEvent::Updated {
            path: self.files[file_index].path.clone(),
            index,
            old_line,
            new_line,
            label,
            preview,
        };
        self.notifier.emit(&event);
    }

    /// Remove every bookmark in one file. Returns whether anything changed.
    pub fn clear(&mut self, path: impl AsRef<RelativePath>) -> bool {
        let Some(file_index) = self.file_index(path.as_ref()) else {
            return false;
        };
        if self.files[file_index].is_empty() {
            return false;
        }
        self.files[file_index].bookmarks.clear();
        let event = BookmarkEvent::Cleared {
            path: self.files[file_index].path.clone(),
        };
        self.notifier.emit(&event);
        true
    }

    /// Remove every bookmark in every file. Returns whether anything
    /// changed.
    pub fn clear_all(&mut self) -> bool {
        let mut changed = false;
        for file in &mut self.files {
            if !file.is_empty() {
                file.bookmarks.clear();
                changed = true;
            }
        }
        if changed {
            self.notifier.emit(&BookmarkEvent::ClearedAll);
        }
        changed
    }

    /// Toggle bookmarks for a batch of cursor positions.
    ///
    /// `AllLinesAtOnce` treats the batch atomically: when every line is
    /// already bookmarked, a supplied label relabels them all, otherwise
    /// they are all removed; when any line is unbookmarked, the missing
    /// ones are added. `EachLineIndependently` toggles per line.
    pub fn toggle(
        &mut self,
        path: impl AsRef<RelativePath>,
        selections: &[Position],
        label: Option<&str>,
        mode: ToggleMode,
    ) -> bool {
        let path = path.as_ref();
        if selections.is_empty() {
            return false;
        }
        // Multiple cursors can share a line; act on each line once.
        let mut positions: Vec<Position> = Vec::new();
        for position in selections {
            if !positions.iter().any(|seen| seen.line == position.line) {
                positions.push(*position);
            }
        }
        self.ensure_file(path);

        match mode {
            ToggleMode::EachLineIndependently => {
                let mut changed = false;
                for position in &positions {
                    changed |= self.toggle_single(path, *position, label);
                }
                changed
            }
            ToggleMode::AllLinesAtOnce => {
                let file = self.file(path).expect("ensured above");
                let all_on = positions
                    .iter()
                    .all(|position| ops::index_of_bookmark(file, position.line).is_some());
                if !all_on {
                    let mut changed = false;
                    for position in &positions {
                        let file = self.file(path).expect("ensured above");
                        if ops::index_of_bookmark(file, position.line).is_none() {
                            changed |= self.add_bookmark(
                                path,
                                *position,
                                label.map(str::to_string),
                                None,
                            );
                        }
                    }
                    changed
                } else if let Some(label) = label {
                    for position in &positions {
                        self.relabel(path, position.line, label);
                    }
                    true
                } else {
                    for position in &positions {
                        let file = self.file(path).expect("ensured above");
                        if let Some(index) = ops::index_of_bookmark(file, position.line) {
                            self.remove_bookmark(path, index, position.line);
                        }
                    }
                    true
                }
            }
        }
    }

    fn toggle_single(&mut self, path: &RelativePath, position: Position, label: Option<&str>) -> bool {
        let file = self.file(path).expect("ensured by caller");
        match ops::index_of_bookmark(file, position.line) {
            Some(index) => self.remove_bookmark(path, index, position.line).is_some(),
            None => self.add_bookmark(path, position, label.map(str::to_string), None),
        }
    }

    fn relabel(&mut self, path: &RelativePath, line: usize, label: &str) {
        let Some(file_index) = self.file_index(path) else {
            return;
        };
        let file = &mut self.files[file_index];
        let Some(index) = ops::index_of_bookmark(file, line) else {
            return;
        };
        file.bookmarks[index].label = Some(label.to_string());
        let event = BookmarkEvent::Updated {
            path: file.path.clone(),
            index,
            old_line: line,
            new_line: line,
            label: Some(label.to_string()),
            preview: None,
        };
        self.notifier.emit(&event);
    }

    fn file_index(&self, path: &RelativePath) -> Option<usize> {
        self.files
            .iter()
            .position(|file| file.path.as_str() == path.as_str())
    }

    fn file_index_or_insert(&mut self, path: &RelativePath) -> usize {
        if let Some(index) = self.file_index(path) {
            return index;
        }
        self.files.push(BookmarkedFile::new(path));
        self.files.len() - 1
    }
}

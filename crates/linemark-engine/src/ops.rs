//! Pure helpers over a file's bookmark list: next-bookmark search, index
//! lookup, sorting, the label comparator, and the invalid-bookmark sweep.
//!
//! These are consumed by host navigation commands and by the re-anchoring
//! engine for its validity checks. None of them mutate through the
//! controller; callers that need notifications go through controller
//! primitives instead.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::change::Position;
use crate::model::{Bookmark, BookmarkedFile};

/// Direction of a next-bookmark search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Ordering used when resolving "next".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    ByLine,
    ByLabel,
}

/// Host-configurable navigation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Cycle past either end of the file instead of stopping.
    pub wrap_navigation: bool,
    pub sort_order: SortOrder,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            wrap_navigation: true,
            sort_order: SortOrder::ByLine,
        }
    }
}

/// Result of a next-bookmark search.
///
/// `NoBookmarksInFile` lets a navigate-through-all-files host hop to the
/// next file rather than wrapping; the directional variants report a
/// non-wrapping search running past the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextBookmark {
    Found(Position),
    NoBookmarksInFile,
    NoMoreAfter,
    NoMoreBefore,
}

/// Exact-line lookup into a file's bookmark list.
pub fn index_of_bookmark(file: &BookmarkedFile, line: usize) -> Option<usize> {
    file.bookmarks
        .iter()
        .position(|bookmark| bookmark.line == line)
}

/// Stable ascending-by-line resort, used after any order-disturbing
/// mutation.
pub fn sort_bookmarks(file: &mut BookmarkedFile) {
    file.bookmarks.sort_by_key(|bookmark| bookmark.line);
}

/// Remove and return bookmarks whose line falls outside the document.
///
/// This is the sweep callers run when a document shrinks underneath its
/// bookmarks outside of a change event (e.g. on re-open); the re-anchoring
/// engine itself never produces out-of-range lines.
pub fn prune_invalid(file: &mut BookmarkedFile, line_count: usize) -> Vec<Bookmark> {
    let mut removed = Vec::new();
    file.bookmarks.retain(|bookmark| {
        if bookmark.line < line_count {
            true
        } else {
            removed.push(bookmark.clone());
            false
        }
    });
    removed
}

/// Next bookmark from `current` in `direction`, honoring wrap and sort
/// order.
pub fn next_bookmark(
    file: &BookmarkedFile,
    current: Position,
    direction: Direction,
    options: NavigationOptions,
) -> NextBookmark {
    if file.is_empty() {
        return NextBookmark::NoBookmarksInFile;
    }
    match options.sort_order {
        SortOrder::ByLine => next_by_line(file, current, direction, options.wrap_navigation),
        SortOrder::ByLabel => next_by_label(file, current, direction, options.wrap_navigation),
    }
}

fn next_by_line(
    file: &BookmarkedFile,
    current: Position,
    direction: Direction,
    wrap: bool,
) -> NextBookmark {
    let candidate = match direction {
        Direction::Forward => file
            .bookmarks
            .iter()
            .filter(|bookmark| bookmark.line > current.line)
            .min_by_key(|bookmark| bookmark.line),
        Direction::Backward => file
            .bookmarks
            .iter()
            .filter(|bookmark| bookmark.line < current.line)
            .max_by_key(|bookmark| bookmark.line),
    };
    if let Some(bookmark) = candidate {
        return NextBookmark::Found(bookmark.position());
    }
    if wrap {
        let wrapped = match direction {
            Direction::Forward => file.bookmarks.iter().min_by_key(|bookmark| bookmark.line),
            Direction::Backward => file.bookmarks.iter().max_by_key(|bookmark| bookmark.line),
        };
        // Non-empty checked above.
        return wrapped
            .map(|bookmark| NextBookmark::Found(bookmark.position()))
            .unwrap_or(NextBookmark::NoBookmarksInFile);
    }
    match direction {
        Direction::Forward => NextBookmark::NoMoreAfter,
        Direction::Backward => NextBookmark::NoMoreBefore,
    }
}

fn next_by_label(
    file: &BookmarkedFile,
    current: Position,
    direction: Direction,
    wrap: bool,
) -> NextBookmark {
    let mut ordered: Vec<&Bookmark> = file.bookmarks.iter().collect();
    ordered.sort_by(|a, b| label_ordering(a, b));

    // Anchor the search at the bookmark on the current line, when there is
    // one; otherwise start from the relevant end of the label order.
    let at_cursor = ordered
        .iter()
        .position(|bookmark| bookmark.line == current.line);
    let next_index = match (at_cursor, direction) {
        (Some(index), Direction::Forward) => {
            if index + 1 < ordered.len() {
                Some(index + 1)
            } else if wrap {
                Some(0)
            } else {
                return NextBookmark::NoMoreAfter;
            }
        }
        (Some(index), Direction::Backward) => {
            if index > 0 {
                Some(index - 1)
            } else if wrap {
                Some(ordered.len() - 1)
            } else {
                return NextBookmark::NoMoreBefore;
            }
        }
        (None, Direction::Forward) => Some(0),
        (None, Direction::Backward) => Some(ordered.len() - 1),
    };
    next_index
        .map(|index| NextBookmark::Found(ordered[index].position()))
        .unwrap_or(NextBookmark::NoBookmarksInFile)
}

/// Label-aware ordering: leading-number labels sort numerically by that
/// prefix then alphabetically, plain labels follow alphabetically, and
/// unlabeled bookmarks sort last by line.
pub fn label_ordering(a: &Bookmark, b: &Bookmark) -> Ordering {
    label_sort_key(a).cmp(&label_sort_key(b))
}

fn label_sort_key(bookmark: &Bookmark) -> (u8, u64, String, usize) {
    match bookmark.label.as_deref() {
        Some(label) => match numeric_prefix(label) {
            Some(number) => (0, number, label.to_lowercase(), bookmark.line),
            None => (1, 0, label.to_lowercase(), bookmark.line),
        },
        None => (2, 0, String::new(), bookmark.line),
    }
}

fn numeric_prefix(label: &str) -> Option<u64> {
    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();
    let pattern = LEADING_NUMBER
        .get_or_init(|| Regex::new(r"^\s*(\d+)").expect("leading-number pattern is valid"));
    pattern
        .captures(label)
        .and_then(|captures| captures[1].parse::<u64>().ok())
}

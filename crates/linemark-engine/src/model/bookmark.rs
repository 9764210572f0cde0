use serde::{Deserialize, Serialize};

use crate::change::Position;

/// A single marker anchored to a line/column in a document.
///
/// Identity within a file is positional: two bookmarks are "the same" only
/// by current line equality, there is no stable ID. The serde derives exist
/// for external storage collaborators; no on-disk layout is defined here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Bookmark {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            label: None,
            note: None,
        }
    }

    pub fn labeled(line: usize, column: usize, label: impl Into<String>) -> Self {
        Self {
            line,
            column,
            label: Some(label.into()),
            note: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

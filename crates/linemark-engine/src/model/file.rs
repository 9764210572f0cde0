use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::model::Bookmark;

/// The set of bookmarks associated with one document identity.
///
/// `path` is the workspace-relative identity (untitled buffers use a
/// transient name chosen by the host). Bookmarks are conventionally kept
/// sorted ascending by line after each order-disturbing mutation, though
/// the re-anchoring engine tolerates unsorted input during its scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkedFile {
    pub path: RelativePathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl BookmarkedFile {
    pub fn new(path: impl AsRef<RelativePath>) -> Self {
        Self {
            path: path.as_ref().to_relative_path_buf(),
            uri: None,
            bookmarks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Current bookmark lines, in storage order.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.bookmarks.iter().map(|bookmark| bookmark.line)
    }
}

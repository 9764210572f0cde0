//! Bookmark data model: the marker itself and the per-file collection.

pub mod bookmark;
pub mod file;

pub use bookmark::Bookmark;
pub use file::BookmarkedFile;

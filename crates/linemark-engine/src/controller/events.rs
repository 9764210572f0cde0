//! Typed change notifications and the subscriber registry.
//!
//! Mutations only happen through [`crate::controller::Controller`]
//! primitives, and each primitive fires exactly one event here. The
//! registry is an explicit callback list rather than a host editor's
//! event-emitter type, so presentation layers subscribe the same way in
//! every host.

use relative_path::RelativePathBuf;

/// One controller mutation, with enough context for a presentation layer
/// to patch its view incrementally instead of re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Added {
        path: RelativePathBuf,
        line: usize,
        column: usize,
        label: Option<String>,
        preview: Option<String>,
    },
    Removed {
        path: RelativePathBuf,
        index: usize,
        line: usize,
    },
    Updated {
        path: RelativePathBuf,
        index: usize,
        old_line: usize,
        new_line: usize,
        label: Option<String>,
        preview: Option<String>,
    },
    Cleared {
        path: RelativePathBuf,
    },
    ClearedAll,
}

/// Callback registry for [`BookmarkEvent`]s.
///
/// Single-threaded by design: callbacks run synchronously inside the
/// mutating call, in subscription order.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Box<dyn FnMut(&BookmarkEvent)>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&BookmarkEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub(crate) fn emit(&mut self, event: &BookmarkEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

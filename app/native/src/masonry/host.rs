//! Listener registration with the host environment.
//!
//! The engine subscribes to container resizes, viewport resizes, scrolling and
//! one media query per breakpoint. Every registration goes through
//! [`Registrations`], which can undo all of them at teardown.

use std::collections::BTreeMap;

use serde::Serialize;

/// What a listener observes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "query", rename_all = "camelCase")]
pub enum ListenerKind {
    /// Size changes of the layout container.
    ContainerResize,
    /// Size changes of the viewport.
    ViewportResize,
    /// Scrolling of the scroll container.
    Scroll,
    /// Match changes of one media query.
    MediaQuery(String),
}

/// Handle of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListenerId(pub u64);

/// Host side of listener registration.
pub trait HostEvents {
    /// Starts delivering events of `kind` to the engine.
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    /// Stops delivering events for a listener.
    fn remove_listener(&mut self, id: ListenerId);
}

/// Listeners registered by one engine instance.
#[derive(Debug, Default)]
pub struct Registrations {
    active: Vec<(ListenerId, ListenerKind)>,
}

impl Registrations {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers a listener and remembers it.
    pub fn register(&mut self, host: &mut dyn HostEvents, kind: ListenerKind) -> ListenerId {
        let id = host.add_listener(kind.clone());
        tracing::trace!(listener = id.0, ?kind, "masonry: listener added");
        self.active.push((id, kind));
        id
    }

    /// Removes every remembered listener, newest first.
    ///
    /// # Returns
    ///
    /// Number of listeners removed.
    pub fn release_all(&mut self, host: &mut dyn HostEvents) -> usize {
        let count = self.active.len();
        while let Some((id, kind)) = self.active.pop() {
            host.remove_listener(id);
            tracing::trace!(listener = id.0, ?kind, "masonry: listener removed");
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize { self.active.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.active.is_empty() }
}

/// In-memory host that tracks which listeners are attached.
///
/// Used by the `simulate` command and by tests to check that teardown
/// leaves nothing behind.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_id: u64,
    attached: BTreeMap<ListenerId, ListenerKind>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Listeners currently attached, in registration order.
    #[must_use]
    pub fn attached(&self) -> Vec<ListenerKind> { self.attached.values().cloned().collect() }

    /// Number of listeners currently attached.
    #[must_use]
    pub fn attached_count(&self) -> usize { self.attached.len() }
}

impl HostEvents for RecordingHost {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.attached.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) { self.attached.remove(&id); }
}

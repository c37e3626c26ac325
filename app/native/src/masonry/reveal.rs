//! Once-only scroll reveal.
//!
//! An item is revealed the first time its top edge crosses the trigger line
//! (a fraction of the viewport height, measured from the top). Items that
//! cross together form a batch and are staggered in batch order. Scrolling
//! back and forth never reveals an item twice while it stays mounted.

use std::collections::HashSet;

use super::state::{ItemId, LayoutResult};

/// Tracks which items have been revealed.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<ItemId>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Marks an item revealed. Returns `false` if it already was.
    pub fn mark(&mut self, item: &ItemId) -> bool {
        if self.revealed.contains(item) {
            return false;
        }
        self.revealed.insert(item.clone())
    }

    /// Items of `layout` whose top is at or above the trigger line and that
    /// were not revealed yet, in layout order. They are marked revealed.
    ///
    /// `container_top` is the container's top edge in viewport coordinates.
    /// Items rejected by `is_rendered` are left for a later pass.
    pub fn crossing(
        &mut self,
        layout: &LayoutResult,
        container_top: f64,
        viewport_height: f64,
        trigger_ratio: f64,
        is_rendered: impl Fn(&ItemId) -> bool,
    ) -> Vec<ItemId> {
        let trigger_line = viewport_height * trigger_ratio;
        layout
            .slots
            .iter()
            .filter(|slot| container_top + slot.rect.y <= trigger_line && is_rendered(&slot.id))
            .filter_map(|slot| self.mark(&slot.id).then(|| slot.id.clone()))
            .collect()
    }

    #[must_use]
    pub fn is_revealed(&self, item: &ItemId) -> bool { self.revealed.contains(item) }

    /// Forgets an item, so it reveals again if it is mounted again.
    pub fn forget(&mut self, item: &ItemId) { self.revealed.remove(item); }

    pub fn clear(&mut self) { self.revealed.clear(); }

    #[must_use]
    pub fn len(&self) -> usize { self.revealed.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.revealed.is_empty() }
}

//! Live tween bookkeeping.
//!
//! Tracks which tweens are running on which node and which properties each one
//! still owns. This is what makes a new tween override, rather than stack on,
//! an older one, and what lets a node or the whole engine be released without
//! leaving tweens behind.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::masonry::effects::{Property, PropertySet, TweenHandle};
use crate::masonry::nodes::NodeId;

// ============================================================================
// Types
// ============================================================================

/// A live tween and the properties it still animates.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LiveTween {
    handle: TweenHandle,
    properties: PropertySet,
}

/// A kill the caller must forward to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kill {
    pub handle: TweenHandle,
    /// `None` kills the whole tween.
    pub properties: Option<PropertySet>,
}

/// Live tweens grouped by node.
#[derive(Debug, Default)]
pub struct TweenRegistry {
    by_node: HashMap<NodeId, SmallVec<[LiveTween; 4]>>,
}

impl TweenRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Takes `properties` of `node` away from every live tween.
    ///
    /// Returns the kills needed: tweens left with nothing to animate are
    /// killed whole and forgotten, the rest lose only the overlap.
    pub fn claim(&mut self, node: NodeId, properties: &[Property]) -> SmallVec<[Kill; 4]> {
        let mut kills = SmallVec::new();
        let Some(tweens) = self.by_node.get_mut(&node) else {
            return kills;
        };

        tweens.retain(|tween| {
            let overlap: PropertySet =
                tween.properties.iter().copied().filter(|p| properties.contains(p)).collect();
            if overlap.is_empty() {
                return true;
            }

            tween.properties.retain(|p| !properties.contains(p));
            if tween.properties.is_empty() {
                kills.push(Kill { handle: tween.handle, properties: None });
                false
            } else {
                kills.push(Kill { handle: tween.handle, properties: Some(overlap) });
                true
            }
        });

        if tweens.is_empty() {
            self.by_node.remove(&node);
        }
        kills
    }

    /// Records a tween that just started.
    pub fn register(&mut self, node: NodeId, handle: TweenHandle, properties: PropertySet) {
        if properties.is_empty() {
            return;
        }
        self.by_node.entry(node).or_default().push(LiveTween { handle, properties });
    }

    /// Forgets every tween on `node`, returning their handles.
    pub fn release_node(&mut self, node: NodeId) -> Vec<TweenHandle> {
        self.by_node
            .remove(&node)
            .map(|tweens| tweens.into_iter().map(|t| t.handle).collect())
            .unwrap_or_default()
    }

    /// Forgets every tween, returning their handles.
    pub fn drain_all(&mut self) -> Vec<TweenHandle> {
        let mut handles: Vec<TweenHandle> =
            self.by_node.drain().flat_map(|(_, tweens)| tweens).map(|t| t.handle).collect();
        handles.sort_unstable();
        handles
    }

    /// Number of live tweens on a node.
    #[must_use]
    pub fn live_on(&self, node: NodeId) -> usize { self.by_node.get(&node).map_or(0, SmallVec::len) }

    /// Number of live tweens overall.
    #[must_use]
    pub fn live_count(&self) -> usize { self.by_node.values().map(SmallVec::len).sum() }

    /// Whether no tween is live.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.by_node.is_empty() }
}

// ============================================================================
// Tests
// ============================================================================

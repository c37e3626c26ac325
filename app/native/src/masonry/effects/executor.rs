//! Effect executor for issuing tweens to the animation driver.
//!
//! The executor takes effects from the engine and:
//! 1. Resolves the target node (effects for unrendered items are dropped)
//! 2. Kills the overlapping properties of tweens already running on the node
//! 3. Starts the new tween and remembers which properties it owns
//!
//! Releasing a node or tearing down kills whatever is still registered.

use super::animation::TweenRegistry;
use super::{AnimationDriver, MasonryEffect, TweenHandle};
use crate::masonry::nodes::{ItemNodes, NodeRegistry};

// ============================================================================
// Effect Executor
// ============================================================================

/// Issues [`MasonryEffect`]s to an [`AnimationDriver`].
#[derive(Debug)]
pub struct EffectExecutor<D> {
    driver: D,
    tweens: TweenRegistry,
}

impl<D: AnimationDriver> EffectExecutor<D> {
    /// Creates an executor around a driver.
    #[must_use]
    pub fn new(driver: D) -> Self { Self { driver, tweens: TweenRegistry::new() } }

    /// Issues one effect.
    ///
    /// # Returns
    ///
    /// The new tween, or `None` when the item has no node for the effect's layer.
    pub fn execute(&mut self, nodes: &NodeRegistry, effect: &MasonryEffect) -> Option<TweenHandle> {
        let Some(node) = nodes.resolve(effect.item(), effect.layer()) else {
            tracing::trace!(item = %effect.item(), kind = effect.kind(), "masonry: no node, skipping");
            return None;
        };

        let properties = effect.to().properties();
        for kill in self.tweens.claim(node, &properties) {
            self.driver.kill(kill.handle, kill.properties.as_deref());
        }

        let handle = match effect.from() {
            Some(from) => self.driver.from_to(node, from, effect.to(), effect.timing()),
            None => self.driver.to(node, effect.to(), effect.timing()),
        };
        self.tweens.register(node, handle, properties);
        Some(handle)
    }

    /// Issues a batch of effects.
    ///
    /// # Returns
    ///
    /// Number of effects that reached the driver.
    pub fn execute_batch(&mut self, nodes: &NodeRegistry, effects: &[MasonryEffect]) -> usize {
        effects.iter().filter(|effect| self.execute(nodes, effect).is_some()).count()
    }

    /// Kills every tween on an item's nodes.
    ///
    /// # Returns
    ///
    /// Number of tweens killed.
    pub fn release(&mut self, nodes: &ItemNodes) -> usize {
        let mut killed = 0;
        for node in nodes.all() {
            for handle in self.tweens.release_node(node) {
                self.driver.kill(handle, None);
                killed += 1;
            }
        }
        killed
    }

    /// Kills every live tween.
    ///
    /// # Returns
    ///
    /// Number of tweens killed.
    pub fn kill_all(&mut self) -> usize {
        let handles = self.tweens.drain_all();
        for handle in &handles {
            self.driver.kill(*handle, None);
        }
        handles.len()
    }

    /// Number of tweens the executor still tracks.
    #[must_use]
    pub fn live_count(&self) -> usize { self.tweens.live_count() }

    /// The underlying driver.
    #[must_use]
    pub const fn driver(&self) -> &D { &self.driver }
}

// ============================================================================
// Tests
// ============================================================================

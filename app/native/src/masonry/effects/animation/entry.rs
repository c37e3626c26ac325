//! Entry directions for the initial mount.
//!
//! Items start off-screen (or at the container center) and fly into their
//! slot. With the `random` direction every item draws one of the four edges
//! once; the draw is remembered so re-renders do not change it.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EntryDirection;
use crate::constants::animation::OFFSCREEN_MARGIN;
use crate::masonry::state::{ItemId, Rect, Size};

/// Edges a `random` entry can draw from.
const EDGES: [EntryDirection; 4] = [
    EntryDirection::Top,
    EntryDirection::Bottom,
    EntryDirection::Left,
    EntryDirection::Right,
];

/// Start position of an entering slot.
///
/// `direction` must already be resolved; `random` is treated as `bottom`.
#[must_use]
pub fn entry_origin(direction: EntryDirection, slot: &Rect, viewport: Size, container: Size) -> (f64, f64) {
    match direction {
        EntryDirection::Top => (slot.x, -OFFSCREEN_MARGIN),
        EntryDirection::Left => (-OFFSCREEN_MARGIN, slot.y),
        EntryDirection::Right => (viewport.width + OFFSCREEN_MARGIN, slot.y),
        EntryDirection::Center => (
            container.width / 2.0 - slot.width / 2.0,
            container.height / 2.0 - slot.height / 2.0,
        ),
        EntryDirection::Bottom | EntryDirection::Random => (slot.x, viewport.height + OFFSCREEN_MARGIN),
    }
}

/// Resolves entry directions per item, drawing `random` once per item.
#[derive(Debug)]
pub struct EntryPlanner {
    direction: EntryDirection,
    rng: StdRng,
    drawn: HashMap<ItemId, EntryDirection>,
}

impl EntryPlanner {
    /// Creates a planner; `seed` makes `random` draws reproducible.
    #[must_use]
    pub fn new(direction: EntryDirection, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        Self { direction, rng, drawn: HashMap::new() }
    }

    /// Configured direction.
    #[must_use]
    pub const fn direction(&self) -> EntryDirection { self.direction }

    /// Concrete direction for an item.
    pub fn direction_for(&mut self, item: &ItemId) -> EntryDirection {
        if self.direction != EntryDirection::Random {
            return self.direction;
        }
        if let Some(direction) = self.drawn.get(item) {
            return *direction;
        }
        let direction = EDGES[self.rng.random_range(0..EDGES.len())];
        self.drawn.insert(item.clone(), direction);
        direction
    }

    /// Drops the draw of an item whose node went away.
    pub fn forget(&mut self, item: &ItemId) { self.drawn.remove(item); }

    /// Drops every draw.
    pub fn clear(&mut self) { self.drawn.clear(); }
}

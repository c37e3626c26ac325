//! Slot transitions between two layout passes.

use crate::masonry::state::{ItemId, LayoutResult, Rect};

/// Movement below this many pixels is not worth a tween.
pub const MOVE_EPSILON: f64 = 0.5;

// ============================================================================
// Types
// ============================================================================

/// An item moving from its previous slot to a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTransition {
    pub item: ItemId,
    /// Slot in the previous layout.
    pub from: Rect,
    /// Slot in the new layout.
    pub to: Rect,
}

impl SlotTransition {
    /// Creates a new slot transition.
    #[must_use]
    pub const fn new(item: ItemId, from: Rect, to: Rect) -> Self { Self { item, from, to } }

    /// Returns the maximum distance any edge needs to travel.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        let dx = (self.to.x - self.from.x).abs();
        let dy = (self.to.y - self.from.y).abs();
        let dw = (self.to.width - self.from.width).abs();
        let dh = (self.to.height - self.from.height).abs();
        dx.max(dy).max(dw).max(dh)
    }

    /// Whether the slot changes size, not just position.
    #[must_use]
    pub fn involves_resize(&self) -> bool {
        let dw = (self.to.width - self.from.width).abs();
        let dh = (self.to.height - self.from.height).abs();
        dw > MOVE_EPSILON || dh > MOVE_EPSILON
    }

    /// Whether the slot effectively stays put.
    #[must_use]
    pub fn is_noop(&self) -> bool { self.max_distance() < MOVE_EPSILON }
}

/// Pairs every slot of `next` with the same item's slot in `previous`.
///
/// Items new to `next` have no transition.
#[must_use]
pub fn diff_layouts(previous: &LayoutResult, next: &LayoutResult) -> Vec<SlotTransition> {
    next.slots
        .iter()
        .filter_map(|slot| {
            previous
                .slot(&slot.id)
                .map(|old| SlotTransition::new(slot.id.clone(), old.rect, slot.rect))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::masonry::state::LayoutSlot;

    fn slot(id: &str, rect: Rect) -> LayoutSlot { LayoutSlot { id: ItemId::from(id), column: 0, rect } }

    #[test]
    fn test_max_distance() {
        let t = SlotTransition::new(
            ItemId::from("a"),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(500.0, 10.0, 110.0, 120.0),
        );
        assert!((t.max_distance() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_involves_resize() {
        let position_only = SlotTransition::new(
            ItemId::from("a"),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 50.0, 100.0, 100.0),
        );
        assert!(!position_only.involves_resize());
        assert!(!position_only.is_noop());

        let with_resize = SlotTransition::new(
            ItemId::from("a"),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 200.0, 100.0),
        );
        assert!(with_resize.involves_resize());
    }

    #[test]
    fn test_diff_skips_new_items() {
        let previous = LayoutResult {
            slots: smallvec![slot("a", Rect::new(0.0, 0.0, 300.0, 300.0))],
            total_height: 300.0,
        };
        let next = LayoutResult {
            slots: smallvec![
                slot("a", Rect::new(0.0, 0.0, 200.0, 300.0)),
                slot("b", Rect::new(200.0, 0.0, 200.0, 100.0)),
            ],
            total_height: 300.0,
        };

        let transitions = diff_layouts(&previous, &next);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].item.as_str(), "a");
        assert!(transitions[0].involves_resize());
    }

    #[test]
    fn test_identical_layout_is_noop() {
        let layout = LayoutResult {
            slots: smallvec![slot("a", Rect::new(10.0, 20.0, 30.0, 40.0))],
            total_height: 60.0,
        };
        assert!(diff_layouts(&layout, &layout).iter().all(SlotTransition::is_noop));
    }
}

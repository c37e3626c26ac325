//! Masonry layout packing.
//!
//! This module turns an ordered item list into absolutely positioned slots
//! laid out in equal-width columns. Packing is greedy: every item goes to the
//! column that is currently shortest (leftmost on ties), so the result is a
//! pure function of item order, item heights, container width and column
//! count.
//!
//! After packing, the last item of every short column is stretched so all
//! columns end on the same baseline.
//!
//! # Example
//!
//! ```text
//! heights [600, 700, 800, 500, 400], scale 0.5, 3 columns, width 900
//!
//! +-----+-----+-----+   col0: item0 (0..300)  item3 (300..550)
//! |  0  |  1  |  2  |   col1: item1 (0..350)  item4 (350..550)
//! |     |     |     |   col2: item2 (0..400)  padded to 0..550
//! +-----+     |     |
//! |  3  +-----+     |
//! |     |  4  |     |
//! +-----+-----+-----+
//! ```

mod breakpoints;
mod columns;
mod filter;

use std::num::NonZeroUsize;

pub use breakpoints::{Breakpoint, Breakpoints, MediaQuery, breakpoint_to_columns};
pub use columns::ColumnState;
pub use filter::{ALL_CATEGORIES, categories, filter_by_category};
use smallvec::SmallVec;

use crate::constants::layout::{DEFAULT_FALLBACK_HEIGHT, DEFAULT_HEIGHT_SCALE};
use crate::masonry::state::{Item, LAYOUT_INLINE_CAP, LayoutResult, LayoutSlot, Rect};

// ============================================================================
// Layout Parameters
// ============================================================================

/// Tunables for a layout pass that do not change per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Factor applied to every declared item height.
    pub height_scale: f64,
    /// Container height reported while the container is still unmeasured.
    pub fallback_height: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            height_scale: DEFAULT_HEIGHT_SCALE,
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
        }
    }
}

// ============================================================================
// Main Layout Function
// ============================================================================

/// Packs `items` into `columns` equal-width columns.
///
/// # Arguments
///
/// * `items` - Items to place, in display order
/// * `container_width` - Measured container width; `0` means not measured yet
/// * `columns` - Active column count
/// * `params` - Height scale and unmeasured fallback height
///
/// # Returns
///
/// One slot per item plus the container height. An unmeasured container (or
/// an empty list) yields no slots and `params.fallback_height`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_layout(
    items: &[Item],
    container_width: f64,
    columns: NonZeroUsize,
    params: &LayoutParams,
) -> LayoutResult {
    if !container_width.is_finite() || container_width <= 0.0 || items.is_empty() {
        return LayoutResult::empty(params.fallback_height);
    }

    let column_count = columns.get();
    let column_width = container_width / column_count as f64;
    let mut state = ColumnState::new(column_count);
    let mut slots: SmallVec<[LayoutSlot; LAYOUT_INLINE_CAP]> = SmallVec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let column = state.shortest();
        let height = item.height * params.height_scale;
        let y = state.place(column, height, index);

        slots.push(LayoutSlot {
            id: item.id.clone(),
            column,
            rect: Rect::new(column_width * column as f64, y, column_width, height),
        });
    }

    for (index, extra) in state.bottom_padding() {
        slots[index].rect.height += extra;
    }

    LayoutResult {
        slots,
        total_height: state.max_height(),
    }
}

// ============================================================================
// Tests
// ============================================================================

//! State module for the masonry engine.
//!
//! This module contains the core data model: geometry (`Rect`, `Size`),
//! caller-supplied items, and the computed layout slots.

mod types;

pub use types::{
    Item, ItemId, LAYOUT_INLINE_CAP, LayoutResult, LayoutSlot, Rect, Size, validate_items,
};

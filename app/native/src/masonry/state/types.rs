//! Core state types for the masonry engine.
//!
//! These types form a simple ownership split:
//! - `Item` is owned by the caller and only read by the engine
//! - `LayoutSlot` / `LayoutResult` are computed and owned by the engine
//!
//! Relations:
//! - `LayoutSlot.id` → `Item.id`
//! - `LayoutSlot.column` → index into the column set of one layout pass

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{MasonryError, MasonryResult};

// ============================================================================
// Geometry Types
// ============================================================================

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 { self.y + self.height }
}

/// A width/height pair, as reported by size observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }

    /// Whether the size has been measured (non-zero width).
    #[must_use]
    pub fn is_measured(&self) -> bool { self.width > 0.0 }
}

// ============================================================================
// Items
// ============================================================================

/// Stable identity of an item across layout passes.
///
/// Input files may use either strings or numbers for ids; both are kept as
/// their string form so `1` and `"1"` name the same item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawItemId", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self { Self(id) }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self { Self(id.to_string()) }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self { id.0 }
}

/// Wire form of an item id: string or number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawItemId> for ItemId {
    fn from(raw: RawItemId) -> Self {
        match raw {
            RawItemId::Text(text) => Self(text),
            RawItemId::Integer(number) => Self(number.to_string()),
            RawItemId::Float(number) => Self(number.to_string()),
        }
    }
}

/// A caller-supplied grid item.
///
/// Only `id` and `height` matter to layout. The remaining fields are display
/// metadata carried through for renderers and for the default click action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique, stable identity.
    pub id: ItemId,
    /// Declared logical height, before the layout scale factor is applied.
    pub height: f64,
    /// Image shown in the tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Navigation target opened on click when no callback is installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
}

impl Item {
    /// Creates an item with only the layout-relevant fields set.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            img: None,
            url: None,
            title: None,
            category: None,
            date: None,
            read_time: None,
        }
    }

    /// Sets the navigation URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Validates an item list for one layout pass.
///
/// # Errors
///
/// Returns `MasonryError::InvalidItem` if two items share an id or an item's
/// height is negative or not finite.
pub fn validate_items(items: &[Item]) -> MasonryResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if !item.height.is_finite() || item.height < 0.0 {
            return Err(MasonryError::InvalidItem(format!(
                "item `{}` has invalid height {}",
                item.id, item.height
            )));
        }
        if !seen.insert(&item.id) {
            return Err(MasonryError::InvalidItem(format!("duplicate id `{}`", item.id)));
        }
    }

    Ok(())
}

// ============================================================================
// Layout Output
// ============================================================================

/// Inline capacity for layout results.
///
/// Most grids show fewer than 16 tiles, so this keeps the common case off the
/// heap during rapid resize recomputation.
pub const LAYOUT_INLINE_CAP: usize = 16;

/// The rectangle assigned to one item for one layout pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutSlot {
    pub id: ItemId,
    /// Column the item was packed into.
    pub column: usize,
    /// Position and size inside the container.
    pub rect: Rect,
}

/// All slots of one layout pass plus the container height they need.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// One slot per item, in item order.
    pub slots: SmallVec<[LayoutSlot; LAYOUT_INLINE_CAP]>,
    /// Height of the tallest column (or the fallback height when unmeasured).
    pub total_height: f64,
}

impl LayoutResult {
    /// An empty result with the given container height.
    #[must_use]
    pub fn empty(total_height: f64) -> Self {
        Self {
            slots: SmallVec::new(),
            total_height,
        }
    }

    /// Number of placed items.
    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Whether no item was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Looks up the slot of an item.
    #[must_use]
    pub fn slot(&self, id: &ItemId) -> Option<&LayoutSlot> {
        self.slots.iter().find(|slot| &slot.id == id)
    }

    /// Final bottom edge of each column, indexed by column.
    #[must_use]
    pub fn column_bottoms(&self, columns: usize) -> Vec<f64> {
        let mut bottoms = vec![0.0_f64; columns];
        for slot in &self.slots {
            if let Some(bottom) = bottoms.get_mut(slot.column) {
                *bottom = bottom.max(slot.rect.bottom());
            }
        }
        bottoms
    }
}

// ============================================================================
// Tests
// ============================================================================

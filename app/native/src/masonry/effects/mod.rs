//! Animation effects for the masonry engine.
//!
//! The engine never animates anything itself. Every state change is turned
//! into a list of [`MasonryEffect`]s, and the [`EffectExecutor`] resolves each
//! one to a view node and hands it to an [`AnimationDriver`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     MasonryEngine                                │
//! │  (items, container size, column count, hover/scroll input)      │
//! └─────────────────────────┬───────────────────────────────────────┘
//!                           │ Vec<MasonryEffect>
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Effect Executor                                │
//! │  - Resolves item ids to nodes (skips missing nodes)             │
//! │  - Kills overlapping properties of live tweens                  │
//! │  - Tracks live tweens per node for release and teardown         │
//! └─────────────────────────┬───────────────────────────────────────┘
//!                           │ from_to / to / kill
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   AnimationDriver                                │
//! │  (host tween library, or the RecordingDriver in tests/CLI)      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod animation;
mod driver;
mod executor;

use std::fmt;

pub use driver::{AnimationDriver, DriverCall, RecordingDriver, TweenHandle};
pub use executor::EffectExecutor;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::config::EasingType;
use crate::masonry::state::{ItemId, Rect};

// ============================================================================
// Properties
// ============================================================================

/// An animatable property of a view node.
///
/// Layout tweens own `x`, `y`, `width` and `height`; the initial mount owns
/// `opacity` and `blur`; hover owns `scale` and `overlayOpacity`; reveal owns
/// `revealOpacity` and `offsetY`. No two concerns share a property, so one
/// never kills another's tween. The rendered opacity is the product of
/// `opacity` and `revealOpacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    Opacity,
    /// Blur filter radius in pixels.
    Blur,
    Scale,
    /// Opacity multiplier driven by the scroll reveal.
    RevealOpacity,
    /// Vertical translate used by the scroll reveal.
    OffsetY,
    /// Opacity of the item's color overlay node.
    OverlayOpacity,
}

impl Property {
    /// Name as written in tween vars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Opacity => "opacity",
            Self::Blur => "blur",
            Self::Scale => "scale",
            Self::RevealOpacity => "revealOpacity",
            Self::OffsetY => "offsetY",
            Self::OverlayOpacity => "overlayOpacity",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Inline capacity for property lists; a tween touches at most six properties.
pub const PROPERTY_INLINE_CAP: usize = 6;

/// A property list without heap allocation for the common case.
pub type PropertySet = SmallVec<[Property; PROPERTY_INLINE_CAP]>;

// ============================================================================
// Tween Vars
// ============================================================================

/// Target values of a tween, in insertion order.
///
/// Setting a property twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweenVars {
    values: SmallVec<[(Property, f64); PROPERTY_INLINE_CAP]>,
}

impl TweenVars {
    /// Creates empty vars.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Vars placing a node on a rectangle.
    #[must_use]
    pub fn frame(rect: &Rect) -> Self {
        Self::new()
            .with(Property::X, rect.x)
            .with(Property::Y, rect.y)
            .with(Property::Width, rect.width)
            .with(Property::Height, rect.height)
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a property value.
    pub fn set(&mut self, property: Property, value: f64) {
        if let Some(entry) = self.values.iter_mut().find(|(p, _)| *p == property) {
            entry.1 = value;
        } else {
            self.values.push((property, value));
        }
    }

    /// Value of a property, if set.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        self.values.iter().find(|(p, _)| *p == property).map(|(_, v)| *v)
    }

    /// Properties set, in insertion order.
    #[must_use]
    pub fn properties(&self) -> PropertySet { self.values.iter().map(|(p, _)| *p).collect() }

    /// Iterates over `(property, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ { self.values.iter().copied() }

    /// Number of properties set.
    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    /// Whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl Serialize for TweenVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (property, value) in &self.values {
            map.serialize_entry(property.as_str(), value)?;
        }
        map.end()
    }
}

// ============================================================================
// Timing
// ============================================================================

/// When and how a tween plays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Duration in seconds.
    pub duration: f64,
    /// Start delay in seconds.
    pub delay: f64,
    pub easing: EasingType,
}

impl Timing {
    /// Timing without delay.
    #[must_use]
    pub const fn new(duration: f64, easing: EasingType) -> Self {
        Self { duration, delay: 0.0, easing }
    }

    /// Same timing with a start delay.
    #[must_use]
    pub const fn delayed(self, delay: f64) -> Self { Self { delay, ..self } }
}

// ============================================================================
// Effect Types
// ============================================================================

/// Which node of an item a tween targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    /// The positioned wrapper node.
    Item,
    /// The caller-rendered color overlay inside the wrapper.
    Overlay,
}

/// Tween commands the engine wants applied.
///
/// Effects name items, not nodes. Resolution happens in the executor so an
/// effect for an item whose node is not rendered yet can be dropped there.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum MasonryEffect {
    /// First appearance of an item: from an off-screen start to its slot.
    Enter {
        item: ItemId,
        from: TweenVars,
        to: TweenVars,
        timing: Timing,
    },

    /// A mounted item moving to a recomputed slot.
    Move {
        item: ItemId,
        to: TweenVars,
        timing: Timing,
    },

    /// Hover enter/leave feedback on the wrapper or the overlay.
    Hover {
        item: ItemId,
        layer: Layer,
        to: TweenVars,
        timing: Timing,
    },

    /// One-time scroll reveal.
    Reveal {
        item: ItemId,
        from: TweenVars,
        to: TweenVars,
        timing: Timing,
    },
}

impl MasonryEffect {
    /// The item this effect targets.
    #[must_use]
    pub const fn item(&self) -> &ItemId {
        match self {
            Self::Enter { item, .. }
            | Self::Move { item, .. }
            | Self::Hover { item, .. }
            | Self::Reveal { item, .. } => item,
        }
    }

    /// The node layer this effect targets.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Hover { layer, .. } => *layer,
            _ => Layer::Item,
        }
    }

    /// Explicit start values, for `from_to` tweens.
    #[must_use]
    pub const fn from(&self) -> Option<&TweenVars> {
        match self {
            Self::Enter { from, .. } | Self::Reveal { from, .. } => Some(from),
            Self::Move { .. } | Self::Hover { .. } => None,
        }
    }

    /// Target values.
    #[must_use]
    pub const fn to(&self) -> &TweenVars {
        match self {
            Self::Enter { to, .. }
            | Self::Move { to, .. }
            | Self::Hover { to, .. }
            | Self::Reveal { to, .. } => to,
        }
    }

    #[must_use]
    pub const fn timing(&self) -> &Timing {
        match self {
            Self::Enter { timing, .. }
            | Self::Move { timing, .. }
            | Self::Hover { timing, .. }
            | Self::Reveal { timing, .. } => timing,
        }
    }

    /// Short name for logs and tables.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Enter { .. } => "enter",
            Self::Move { .. } => "move",
            Self::Hover { .. } => "hover",
            Self::Reveal { .. } => "reveal",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

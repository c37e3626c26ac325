//! Masonry grid layout and animation engine.
//!
//! This module packs variable-height items into responsive columns and drives
//! entry, update, hover and scroll-reveal tweens over the result.
//!
//! # Architecture
//!
//! - **State**: Geometry and the item / slot data model
//! - **Layout**: Greedy shortest-column packing, breakpoints, filtering
//! - **Effects**: Tween commands, the driver contract, override bookkeeping
//! - **Engine**: The stateful orchestrator tying inputs to effects
//!
//! # Usage
//!
//! ```rust,ignore
//! use masonry_lib::config::MasonryConfig;
//! use masonry_lib::masonry::{MasonryEngine, RecordingDriver, Size};
//!
//! let mut engine = MasonryEngine::new(RecordingDriver::new(), &MasonryConfig::default())?;
//! engine.set_items(items)?;
//! engine.on_container_resize(Size::new(900.0, 0.0));
//! ```

pub mod debouncer;
pub mod effects;
pub mod engine;
pub mod host;
pub mod layout;
pub mod navigation;
pub mod nodes;
pub mod reveal;
pub mod state;

pub use effects::{
    AnimationDriver, DriverCall, Layer, MasonryEffect, Property, RecordingDriver, Timing,
    TweenHandle, TweenVars,
};
pub use engine::{MasonryEngine, TeardownSummary};
pub use host::{HostEvents, ListenerId, ListenerKind, RecordingHost};
pub use layout::{Breakpoints, LayoutParams, compute_layout, filter_by_category};
pub use navigation::{ClickCallback, ClickOutcome, LinkOpener, SystemLinkOpener};
pub use nodes::{ItemNodes, NodeId};
pub use state::{Item, ItemId, LayoutResult, LayoutSlot, Rect, Size};

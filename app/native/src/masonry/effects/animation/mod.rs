//! Animation building blocks for the masonry engine.
//!
//! - [`easing`]: GSAP-style easing curves, used to sample tween progress
//! - [`entry`]: off-screen start positions and per-item entry directions
//! - [`transition`]: slot movement between two layout passes
//! - [`state`]: live tween registry backing override-on-repeat

pub mod easing;
pub mod entry;
pub mod state;
pub mod transition;

pub use easing::{apply_easing, lerp};
pub use entry::{EntryPlanner, entry_origin};
pub use state::{Kill, TweenRegistry};
pub use transition::{SlotTransition, diff_layouts};

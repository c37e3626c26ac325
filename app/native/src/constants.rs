//! Internal constants for masonry layout and animation tuning.
//!
//! This module centralizes the magic numbers used by the engine. Most of them
//! are defaults for configuration fields; a few are fixed visual constants.
//!
//! # Organization
//!
//! Constants are grouped by functionality:
//! - `layout` - Packing and responsive column defaults
//! - `animation` - Entry and update tween parameters
//! - `hover` - Pointer hover feedback
//! - `reveal` - Scroll-triggered batch reveal

/// Layout packing defaults.
pub mod layout {
    /// Factor applied to every declared item height before packing.
    ///
    /// Item heights are authored at twice their on-screen size.
    pub const DEFAULT_HEIGHT_SCALE: f64 = 0.5;

    /// Container height reported before the first real width measurement.
    ///
    /// Keeps the container from collapsing to zero height on first paint.
    pub const DEFAULT_FALLBACK_HEIGHT: f64 = 800.0;

    /// Column count when no breakpoint matches.
    pub const DEFAULT_COLUMNS: usize = 1;

    /// Viewport resize settle time before breakpoints are re-evaluated (ms).
    pub const RESIZE_DEBOUNCE_MS: u64 = 100;
}

/// Tween parameters for initial mount and layout updates.
pub mod animation {
    /// Initial mount tween duration (seconds).
    pub const INITIAL_DURATION_SECS: f64 = 1.4;

    /// Delay added per item index on initial mount (seconds).
    pub const INITIAL_STAGGER_SECS: f64 = 0.15;

    /// Update tween duration (seconds).
    pub const UPDATE_DURATION_SECS: f64 = 1.2;

    /// Distance outside the viewport where off-screen entries start (px).
    pub const OFFSCREEN_MARGIN: f64 = 200.0;

    /// Entry blur radius (px).
    pub const ENTRY_BLUR_PX: f64 = 10.0;
}

/// Pointer hover feedback.
pub mod hover {
    /// Hover tween duration (seconds).
    pub const DURATION_SECS: f64 = 0.3;

    /// Scale applied while hovered.
    pub const SCALE: f64 = 0.97;

    /// Color overlay opacity while hovered.
    pub const OVERLAY_OPACITY: f64 = 0.3;
}

/// Scroll-triggered batch reveal.
pub mod reveal {
    /// Vertical offset a node slides in from (px).
    pub const OFFSET: f64 = 60.0;

    /// Fraction of the viewport height a node's top must cross to reveal.
    pub const TRIGGER_RATIO: f64 = 0.9;

    /// Reveal tween duration (seconds).
    pub const DURATION_SECS: f64 = 0.8;

    /// Delay between nodes revealed in the same batch (seconds).
    pub const BATCH_STAGGER_SECS: f64 = 0.1;
}

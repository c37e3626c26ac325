//! Masonry - a column-packing grid layout engine with staged animations.
//!
//! This library packs variable-height items into responsive columns and turns
//! every layout change into tween commands for a pluggable animation driver:
//! staggered entry from off-screen, smooth moves on resize and filtering,
//! hover feedback, and a once-only scroll reveal. The `masonry` binary drives
//! the same engine from the command line.

// Core modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod schema;

// Engine
pub mod masonry;

//! Configuration types for Masonry.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{animation, hover, layout, reveal};

/// Where freshly mounted items fly in from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    /// From above the viewport.
    Top,
    /// From below the viewport.
    #[default]
    Bottom,
    /// From the left of the viewport.
    Left,
    /// From the right of the viewport.
    Right,
    /// From the center of the container.
    Center,
    /// One of top/bottom/left/right, picked once per item.
    Random,
}

/// Easing curve for a tween, named the way GSAP names them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EasingType {
    /// Constant speed.
    #[serde(rename = "none", alias = "linear")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[serde(rename = "power1.out", alias = "power1")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    /// Quick start, soft landing. Used for entries and hover.
    #[serde(rename = "power2.out", alias = "power2")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "power3.in")]
    Power3In,
    /// Default for layout updates.
    #[default]
    #[serde(rename = "power3.out", alias = "power3")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "power4.in")]
    Power4In,
    #[serde(rename = "power4.out", alias = "power4")]
    Power4Out,
    #[serde(rename = "power4.inOut")]
    Power4InOut,
    #[serde(rename = "sine.in")]
    SineIn,
    #[serde(rename = "sine.out", alias = "sine")]
    SineOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
    #[serde(rename = "expo.in")]
    ExpoIn,
    #[serde(rename = "expo.out", alias = "expo")]
    ExpoOut,
    #[serde(rename = "expo.inOut")]
    ExpoInOut,
    #[serde(rename = "back.in")]
    BackIn,
    #[serde(rename = "back.out", alias = "back")]
    BackOut,
    #[serde(rename = "back.inOut")]
    BackInOut,
}

/// A responsive breakpoint: a width media query and the column count it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    /// Media query, e.g. `(min-width:1000px)`.
    pub query: String,

    /// Column count while the query matches.
    pub columns: NonZeroUsize,
}

impl BreakpointConfig {
    fn new(query: &str, columns: NonZeroUsize) -> Self {
        Self { query: query.to_string(), columns }
    }
}

/// Layout packing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Factor applied to every declared item height.
    /// Default: 0.5
    pub height_scale: f64,

    /// Container height used before the container has been measured.
    /// Default: 800
    pub fallback_height: f64,

    /// Column count when no breakpoint matches.
    /// Default: 1
    pub default_columns: NonZeroUsize,

    /// Ordered breakpoints. The first matching query wins.
    /// Default: `(min-width:1000px)` → 3, `(min-width:600px)` → 2
    pub breakpoints: Vec<BreakpointConfig>,

    /// How long viewport resizes must settle before breakpoints are re-evaluated (ms).
    /// 0 applies every resize immediately.
    /// Default: 100
    pub resize_debounce_ms: u64,

    /// Hold layout animations until item media has finished loading.
    /// Default: true
    pub await_media: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            height_scale: layout::DEFAULT_HEIGHT_SCALE,
            fallback_height: layout::DEFAULT_FALLBACK_HEIGHT,
            default_columns: NonZeroUsize::MIN,
            breakpoints: vec![
                BreakpointConfig::new("(min-width:1000px)", NonZeroUsize::MIN.saturating_add(2)),
                BreakpointConfig::new("(min-width:600px)", NonZeroUsize::MIN.saturating_add(1)),
            ],
            resize_debounce_ms: layout::RESIZE_DEBOUNCE_MS,
            await_media: true,
        }
    }
}

/// Entry and update tween configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Where items fly in from on first mount.
    /// Default: "bottom"
    pub entry_direction: EntryDirection,

    /// Easing for layout updates (resize, item list changes).
    /// Default: "power3.out"
    pub easing: EasingType,

    /// Duration of layout updates in seconds.
    /// Default: 1.2
    pub duration: f64,

    /// Easing for the initial mount.
    /// Default: "power2.out"
    pub initial_easing: EasingType,

    /// Duration of the initial mount in seconds.
    /// Default: 1.4
    pub initial_duration: f64,

    /// Delay added per item index on initial mount, in seconds.
    /// Default: 0.15
    pub stagger: f64,

    /// Seed for the `random` entry direction. Unset uses a fresh seed per engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            entry_direction: EntryDirection::Bottom,
            easing: EasingType::Power3Out,
            duration: animation::UPDATE_DURATION_SECS,
            initial_easing: EasingType::Power2Out,
            initial_duration: animation::INITIAL_DURATION_SECS,
            stagger: animation::INITIAL_STAGGER_SECS,
            random_seed: None,
        }
    }
}

/// Pointer hover configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HoverConfig {
    /// Scale items while hovered.
    /// Default: true
    pub scale_enabled: bool,

    /// Scale factor while hovered.
    /// Default: 0.97
    pub scale: f64,

    /// Fade in the item's color overlay while hovered.
    /// Default: true
    pub color_shift_enabled: bool,

    /// Overlay opacity while hovered.
    /// Default: 0.3
    pub overlay_opacity: f64,

    /// Hover tween duration in seconds.
    /// Default: 0.3
    pub duration: f64,

    /// Hover tween easing.
    /// Default: "power2.out"
    pub easing: EasingType,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale_enabled: true,
            scale: hover::SCALE,
            color_shift_enabled: true,
            overlay_opacity: hover::OVERLAY_OPACITY,
            duration: hover::DURATION_SECS,
            easing: EasingType::Power2Out,
        }
    }
}

/// Blur-to-focus configuration for the initial mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BlurConfig {
    /// Start entries blurred and sharpen them as they land.
    /// Default: true
    pub enabled: bool,

    /// Starting blur radius in pixels.
    /// Default: 10
    pub pixels: f64,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pixels: animation::ENTRY_BLUR_PX,
        }
    }
}

/// Scroll-triggered reveal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Reveal items as they scroll into view.
    /// Default: true
    pub enabled: bool,

    /// Distance items slide up from, in pixels.
    /// Default: 60
    pub offset: f64,

    /// Fraction of the viewport height an item's top must cross (0.0-1.0).
    /// Default: 0.9
    pub trigger_ratio: f64,

    /// Reveal tween duration in seconds.
    /// Default: 0.8
    pub duration: f64,

    /// Reveal tween easing.
    /// Default: "power2.out"
    pub easing: EasingType,

    /// Delay between items revealed in the same batch, in seconds.
    /// Default: 0.1
    pub batch_stagger: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: reveal::OFFSET,
            trigger_ratio: reveal::TRIGGER_RATIO,
            duration: reveal::DURATION_SECS,
            easing: EasingType::Power2Out,
            batch_stagger: reveal::BATCH_STAGGER_SECS,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MasonryConfig {
    /// Layout packing and responsive columns.
    pub layout: LayoutConfig,

    /// Entry and update tweens.
    pub animation: AnimationConfig,

    /// Hover feedback.
    pub hover: HoverConfig,

    /// Blur-to-focus on entry.
    pub blur: BlurConfig,

    /// Scroll-triggered reveal.
    pub reveal: RevealConfig,
}

impl MasonryConfig {
    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("layout.heightScale", self.layout.height_scale),
            ("layout.fallbackHeight", self.layout.fallback_height),
            ("animation.duration", self.animation.duration),
            ("animation.initialDuration", self.animation.initial_duration),
            ("animation.stagger", self.animation.stagger),
            ("hover.duration", self.hover.duration),
            ("blur.pixels", self.blur.pixels),
            ("reveal.duration", self.reveal.duration),
            ("reveal.batchStagger", self.reveal.batch_stagger),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal.trigger_ratio) {
            return Err(ConfigError::Invalid(format!(
                "reveal.triggerRatio must be between 0 and 1, got {}",
                self.reveal.trigger_ratio
            )));
        }

        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/masonry/config.jsonc or \
         ~/.config/masonry/config.json"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The configuration parsed but holds out-of-range values.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Directory name under the configuration roots.
const CONFIG_DIR_NAME: &str = "masonry";

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/masonry/`
/// 2. `~/.config/masonry/`
/// 3. The platform configuration directory (e.g. `~/Library/Application Support/masonry/`)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        dirs_to_check.push(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join(CONFIG_DIR_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join(CONFIG_DIR_NAME));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Parses a configuration from a JSONC reader and validates it.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for malformed JSON and
/// `ConfigError::Invalid` for out-of-range values.
pub fn parse_config(reader: impl Read) -> Result<MasonryConfig, ConfigError> {
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(reader);
    let config: MasonryConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration from the first existing default path.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(MasonryConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, or the read,
/// parse and validation errors of [`parse_config`].
pub fn load_config_from_path(path: &Path) -> Result<(MasonryConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    let config = parse_config(file)?;
    Ok((config, path.to_path_buf()))
}

//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
///
/// The template parses to the default configuration; uncommenting an option
/// overrides just that value.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Masonry Configuration File
// ===========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // ============================================================================
  // Layout
  // ============================================================================
  // "layout": {
  //   // Factor applied to every declared item height
  //   "heightScale": 0.5,
  //
  //   // Container height used before the container has been measured
  //   "fallbackHeight": 800,
  //
  //   // Column count when no breakpoint matches
  //   "defaultColumns": 1,
  //
  //   // Ordered breakpoints, the first matching query wins.
  //   // Supported features: (min-width: N[px]) and (max-width: N[px]),
  //   // optionally joined with "and".
  //   "breakpoints": [
  //     { "query": "(min-width:1000px)", "columns": 3 },
  //     { "query": "(min-width:600px)", "columns": 2 }
  //   ],
  //
  //   // Milliseconds viewport resizes must settle before re-evaluating
  //   // breakpoints (0 = apply immediately)
  //   "resizeDebounceMs": 100,
  //
  //   // Wait for item media to load before animating into place
  //   "awaitMedia": true
  // },

  // ============================================================================
  // Entry and Update Animations
  // ============================================================================
  // Easings use GSAP names: "none", "power1".."power4", "sine", "expo",
  // "back", each with ".in", ".out" or ".inOut".
  // "animation": {
  //   // Where items fly in from: "top", "bottom", "left", "right",
  //   // "center" or "random"
  //   "entryDirection": "bottom",
  //
  //   // Easing and duration (seconds) for layout updates
  //   "easing": "power3.out",
  //   "duration": 1.2,
  //
  //   // Easing and duration (seconds) for the initial mount
  //   "initialEasing": "power2.out",
  //   "initialDuration": 1.4,
  //
  //   // Delay added per item index on initial mount (seconds)
  //   "stagger": 0.15
  //
  //   // Seed for the "random" entry direction (omit for a fresh seed)
  //   // "randomSeed": 42
  // },

  // ============================================================================
  // Hover Feedback
  // ============================================================================
  // "hover": {
  //   // Shrink items slightly while hovered
  //   "scaleEnabled": true,
  //   "scale": 0.97,
  //
  //   // Fade in the item's color overlay while hovered
  //   "colorShiftEnabled": true,
  //   "overlayOpacity": 0.3,
  //
  //   "duration": 0.3,
  //   "easing": "power2.out"
  // },

  // ============================================================================
  // Blur to Focus
  // ============================================================================
  // "blur": {
  //   // Start entries blurred and sharpen them as they land
  //   "enabled": true,
  //   "pixels": 10
  // },

  // ============================================================================
  // Scroll Reveal
  // ============================================================================
  // "reveal": {
  //   // Fade and slide items in as they scroll into view (once per item)
  //   "enabled": true,
  //
  //   // Distance items slide up from (pixels)
  //   "offset": 60,
  //
  //   // Fraction of the viewport an item's top must cross (0.0 - 1.0)
  //   "triggerRatio": 0.9,
  //
  //   "duration": 0.8,
  //   "easing": "power2.out",
  //
  //   // Delay between items revealed together (seconds)
  //   "batchStagger": 0.1
  // }
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MasonryConfig, parse_config};

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template();
        let config = parse_config(template.as_bytes()).unwrap();
        assert_eq!(config, MasonryConfig::default());
    }

    #[test]
    fn test_template_contains_all_sections() {
        let template = generate_config_template();
        for section in ["layout", "animation", "hover", "blur", "reveal"] {
            assert!(template.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }

    #[test]
    fn test_create_config_file_makes_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");
        create_config_file(&path).unwrap();
        assert!(path.exists());
    }
}

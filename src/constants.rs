//! Centralized constants for the engine catalogue.
//!
//! File names, directory names and preset fallbacks live here so they can be
//! changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "engines";

/// Catalogue filename, looked up in the working directory and the config dir.
pub const CONFIG_FILENAME: &str = "engines.yaml";

/// Catalogue compiled into the binary, used when no file is found.
pub const BUILTIN_CONFIG: &str = include_str!("../engines.yaml");

// --- Temperature presets ---

/// Label of the low-randomness preset.
pub const PRESET_PRECISE: &str = "precise";

/// Label of the middle preset.
pub const PRESET_BALANCED: &str = "balanced";

/// Label of the high-randomness preset.
pub const PRESET_CREATIVE: &str = "creative";

/// Fallback value for `precise` when the catalogue omits it.
pub const PRESET_PRECISE_DEFAULT: f64 = 0.20;

/// Fallback value for `balanced` when the catalogue omits it.
pub const PRESET_BALANCED_DEFAULT: f64 = 0.50;

/// Fallback value for `creative` when the catalogue omits it.
pub const PRESET_CREATIVE_DEFAULT: f64 = 0.75;

/// Upper bound for any preset value.
pub const PRESET_MAX: f64 = 1.0;

/// Lower bound for every temperature.
pub const TEMPERATURE_MIN: f64 = 0.0;

/// Built-in preset values, in display order.
pub const DEFAULT_PRESETS: &[(&str, f64)] = &[
    (PRESET_PRECISE, PRESET_PRECISE_DEFAULT),
    (PRESET_BALANCED, PRESET_BALANCED_DEFAULT),
    (PRESET_CREATIVE, PRESET_CREATIVE_DEFAULT),
];

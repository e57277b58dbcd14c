//! Editor configuration module.
//!
//! Handles loading, validating, and merging `retouch.toml`. Stock defaults
//! are overridden by whatever the user file specifies; a missing file means
//! stock defaults throughout.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! jpeg_quality = 90         # JPEG encoding quality (1-100)
//! # format = "png"          # Force an output format (png, jpeg, tiff, webp, bmp)
//!
//! [rotate]
//! background = 0            # Sample value for canvas exposed by rotation (0-255)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [rotate]
//! background = 255
//! ```
//!
//! Unknown keys are rejected to catch typos early. Configuration never
//! changes what an edit does; it only shapes encoding and rotation fill.

use crate::imaging::{ImageCodec, OutputFormat, TransformOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `retouch.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Encoding settings for saved images.
    pub output: OutputConfig,
    /// Rotation canvas settings.
    pub rotate: RotateConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        if let Some(format) = &self.output.format {
            if OutputFormat::from_extension(format).is_none() {
                return Err(ConfigError::Validation(format!(
                    "output.format '{format}' is not one of png, jpeg, tiff, webp, bmp"
                )));
            }
        }
        Ok(())
    }

    /// Transform settings derived from this config.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            rotate_background: self.rotate.background,
        }
    }

    /// Codec configured with this config's encoder settings.
    pub fn codec(&self) -> ImageCodec {
        ImageCodec::new(self.output.jpeg_quality)
    }

    /// Forced output format, if configured.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output
            .format
            .as_deref()
            .and_then(OutputFormat::from_extension)
    }
}

/// Output encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u8,
    /// Output format overriding the one inferred from the file extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            format: None,
        }
    }
}

/// Rotation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateConfig {
    /// Sample value written to every channel of canvas the rotated image
    /// does not cover.
    pub background: u8,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EditorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EditorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EditorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `retouch.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Retouch Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality when saving .jpg/.jpeg files (1 = worst, 100 = best).
jpeg_quality = 90

# Force an output format regardless of the output file's extension.
# One of: png, jpeg, tiff, webp, bmp
# format = "png"

# ---------------------------------------------------------------------------
# Rotation
# ---------------------------------------------------------------------------
[rotate]
# Rotating by anything other than a multiple of 90 degrees enlarges the
# canvas to fit the whole image. Exposed corners are filled with this
# sample value on every channel (0 = black, 255 = white).
background = 0
"##
}

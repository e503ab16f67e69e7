//! Configuration file support for inkpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkpad/config.toml`. Settings include the canvas size, brush
//! defaults, and where rendered images are exported.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportConfig};

use crate::surface::MAX_DIMENSION;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1024
/// height = 768
///
/// [drawing]
/// default_color = "black"
/// default_brush_width = 5.0
///
/// [export]
/// directory = "/home/me/Pictures"
/// filename_template = "sketch_%Y-%m-%d_%H%M%S"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawable area dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Brush defaults (color, width)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Export location for rendered images
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    /// - `drawing.default_brush_width`: 0.5 - 500.0
    fn validate_and_clamp(&mut self) {
        if !(1..=MAX_DIMENSION).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width,
                MAX_DIMENSION
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_DIMENSION);
        }

        if !(1..=MAX_DIMENSION).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height,
                MAX_DIMENSION
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_DIMENSION);
        }

        let width = self.drawing.default_brush_width;
        if !width.is_finite() {
            log::warn!("Invalid default_brush_width {}, using 5.0", width);
            self.drawing.default_brush_width = 5.0;
        } else if !(0.5..=500.0).contains(&width) {
            log::warn!(
                "Invalid default_brush_width {:.1}, clamping to 0.5-500.0 range",
                width
            );
            self.drawing.default_brush_width = width.clamp(0.5, 500.0);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkpad/config.toml`
    /// (`$XDG_CONFIG_HOME` is honored).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Returns the JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

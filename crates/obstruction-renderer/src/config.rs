//! Render configuration shared by the raster and vector renderers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::{ColorEndpoints, PixelFormat};
use crate::error::{RenderError, RenderResult};

/// Output filename used by the raster renderer when none is configured.
pub const DEFAULT_RASTER_FILENAME: &str = "obstruction_map.png";
/// Output filename used by the vector renderer when none is configured.
pub const DEFAULT_VECTOR_FILENAME: &str = "obstruction_map.svg";
pub const DEFAULT_UPSCALE_FACTOR: u32 = 4;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Options for a single render call.
///
/// Every field has a default; deserialized configs may omit any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Destination file. Falls back to the renderer's default filename.
    pub output_path: Option<PathBuf>,
    pub colors: ColorEndpoints,
    /// Emit a single intensity channel (taken from green) instead of RGB.
    pub greyscale: bool,
    /// Include an alpha channel in raster output.
    pub alpha: bool,
    /// Output units per grid cell (vector only).
    pub upscale_factor: u32,
    /// Font family for compass labels (vector only).
    pub font_family: String,
    /// Font size in px for compass labels (vector only).
    pub font_size: f64,
    /// Overlay N/S/E/W labels (vector only).
    pub compass_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_path: None,
            colors: ColorEndpoints::default(),
            greyscale: false,
            alpha: true,
            upscale_factor: DEFAULT_UPSCALE_FACTOR,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            compass_labels: true,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Raster pixel layout selected by the greyscale and alpha flags.
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_flags(self.greyscale, self.alpha)
    }

    pub fn raster_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_RASTER_FILENAME))
    }

    pub fn vector_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_VECTOR_FILENAME))
    }

    /// Reject vector-only settings the SVG renderer cannot honor.
    ///
    /// Raster output reads none of these fields, so the raster renderer
    /// skips this check.
    pub fn validate_vector(&self) -> RenderResult<()> {
        if self.upscale_factor == 0 {
            return Err(RenderError::InvalidConfig {
                field: "upscale_factor",
                message: "must be at least 1".to_string(),
            });
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(RenderError::InvalidConfig {
                field: "font_size",
                message: format!("must be a positive number, got {}", self.font_size),
            });
        }
        if self.font_family.trim().is_empty() {
            return Err(RenderError::InvalidConfig {
                field: "font_family",
                message: "must not be empty".to_string(),
            });
        }
        // The family lands unquoted inside a CSS rule
        if let Some(ch) = self
            .font_family
            .chars()
            .find(|c| matches!(c, ';' | '{' | '}') || c.is_control())
        {
            return Err(RenderError::InvalidConfig {
                field: "font_family",
                message: format!("must not contain {:?}", ch),
            });
        }
        Ok(())
    }
}

//! Render configuration assembly for the CLI.
//!
//! Precedence, lowest to highest: built-in defaults, YAML config file,
//! environment variables, command-line flags. Clap resolves the last two.

use anyhow::{Context, Result};
use obstruction_renderer::{Color, RenderConfig};
use std::path::{Path, PathBuf};

/// Overrides collected from the command line and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub obstructed_color: Option<Color>,
    pub unobstructed_color: Option<Color>,
    pub no_data_color: Option<Color>,
    pub greyscale: bool,
    pub no_alpha: bool,
    pub upscale_factor: Option<u32>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub no_compass: bool,
}

/// Load a `RenderConfig` from a YAML file. Omitted fields keep their defaults.
pub fn load_yaml(path: &Path) -> Result<RenderConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_yaml(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_yaml(contents: &str) -> Result<RenderConfig> {
    // An empty document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(RenderConfig::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

/// Apply overrides on top of a base configuration.
///
/// Boolean switches only ever turn their feature on (greyscale) or off
/// (alpha, compass labels); they never restore the base value.
pub fn apply_overrides(mut config: RenderConfig, overrides: Overrides) -> RenderConfig {
    if let Some(output) = overrides.output {
        config.output_path = Some(output);
    }
    if let Some(color) = overrides.obstructed_color {
        config.colors.obstructed = color;
    }
    if let Some(color) = overrides.unobstructed_color {
        config.colors.unobstructed = color;
    }
    if let Some(color) = overrides.no_data_color {
        config.colors.no_data = color;
    }
    if overrides.greyscale {
        config.greyscale = true;
    }
    if overrides.no_alpha {
        config.alpha = false;
    }
    if let Some(factor) = overrides.upscale_factor {
        config.upscale_factor = factor;
    }
    if let Some(family) = overrides.font_family {
        config.font_family = family;
    }
    if let Some(size) = overrides.font_size {
        config.font_size = size;
    }
    if overrides.no_compass {
        config.compass_labels = false;
    }
    config
}

/// Build the final configuration from an optional YAML file plus overrides.
///
/// With `vector` set, the SVG-only settings are validated as well, so a bad
/// font or upscale factor is reported before the grid is read.
pub fn resolve(
    config_file: Option<&Path>,
    overrides: Overrides,
    vector: bool,
) -> Result<RenderConfig> {
    let base = match config_file {
        Some(path) => load_yaml(path)?,
        None => RenderConfig::default(),
    };
    let config = apply_overrides(base, overrides);
    if vector {
        config
            .validate_vector()
            .context("Invalid render configuration")?;
    }
    Ok(config)
}

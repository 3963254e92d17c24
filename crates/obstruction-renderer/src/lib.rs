//! Obstruction map rendering for satellite dish signal-quality grids.
//!
//! Turns a 2-D grid of per-direction quality samples into:
//! - PNG raster images (one pixel per cell)
//! - SVG vector images (upscaled cells with compass labels)

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod png;
pub mod raster;
pub mod svg;

use std::path::PathBuf;

pub use color::{Color, ColorEndpoints, PixelFormat};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use grid::QualityGrid;
pub use raster::{render_raster, write_raster};
pub use svg::{build_svg, render_vector};

/// Encoded output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// What a render call wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub path: PathBuf,
    /// Output width in pixels (PNG) or user units (SVG).
    pub width: usize,
    pub height: usize,
    pub format: ImageFormat,
    pub bytes_written: u64,
}

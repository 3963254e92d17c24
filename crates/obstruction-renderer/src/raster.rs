//! Raster (PNG) obstruction map rendering.
//!
//! One pixel per grid cell, no upscaling. Rows are interpolated and handed
//! to the PNG encoder one at a time.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::color::push_interpolated;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::grid::QualityGrid;
use crate::png::PngEncoder;
use crate::{ImageFormat, RenderSummary};

/// Interpolate one grid row into raw pixel bytes.
pub fn render_row(row: &[f64], config: &RenderConfig, out: &mut Vec<u8>) {
    let format = config.pixel_format();
    out.clear();
    out.reserve(row.len() * format.channels());
    for &value in row {
        push_interpolated(value, &config.colors, format, out);
    }
}

/// Render the whole grid into a row-major pixel buffer.
pub fn render_pixels(grid: &QualityGrid<'_>, config: &RenderConfig) -> Vec<u8> {
    let format = config.pixel_format();
    let mut pixels = Vec::with_capacity(grid.width() * grid.height() * format.channels());
    let mut row_buf = Vec::new();
    for row in grid.rows() {
        render_row(row, config, &mut row_buf);
        pixels.extend_from_slice(&row_buf);
    }
    pixels
}

/// Encode the grid as PNG into `sink`, returning the number of bytes written.
///
/// The grid is validated before anything is written. Vector-only settings
/// (upscale, font) are ignored.
pub fn write_raster<W: Write>(rows: &[Vec<f64>], config: &RenderConfig, sink: W) -> RenderResult<u64> {
    let grid = QualityGrid::new(rows)?;
    encode_grid(&grid, config, sink)
}

fn encode_grid<W: Write>(grid: &QualityGrid<'_>, config: &RenderConfig, sink: W) -> RenderResult<u64> {
    let mut encoder = PngEncoder::new(sink, grid.width(), grid.height(), config.pixel_format())?;
    let mut row_buf = Vec::new();
    for row in grid.rows() {
        render_row(row, config, &mut row_buf);
        encoder.write_row(&row_buf)?;
    }
    let (_, bytes_written) = encoder.finish()?;
    Ok(bytes_written)
}

/// Render the grid to a PNG file at the configured output path.
///
/// An existing file is overwritten. An invalid grid leaves the path
/// untouched; an encoder failure mid-stream may leave a truncated file.
pub fn render_raster(rows: &[Vec<f64>], config: &RenderConfig) -> RenderResult<RenderSummary> {
    let grid = QualityGrid::new(rows)?;

    let path = config.raster_path().to_path_buf();
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        format = ?config.pixel_format(),
        no_data = grid.no_data_count(),
        "Rendering raster obstruction map"
    );

    let file = BufWriter::new(File::create(&path)?);
    let bytes_written = encode_grid(&grid, config, file)?;

    tracing::info!(path = %path.display(), bytes = bytes_written, "Wrote PNG obstruction map");

    Ok(RenderSummary {
        path,
        width: grid.width(),
        height: grid.height(),
        format: ImageFormat::Png,
        bytes_written,
    })
}

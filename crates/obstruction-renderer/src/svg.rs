//! Vector (SVG) obstruction map rendering with compass labels.
//!
//! Each grid cell becomes an `upscale_factor`-sized square drawn with
//! `shape-rendering="crispEdges"` so neighbouring cells tile without seams.

use std::fs;

use crate::color::{interpolate, Color};
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::grid::QualityGrid;
use crate::{ImageFormat, RenderSummary};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A compass letter and its anchor position in output units.
#[derive(Debug, Clone, PartialEq)]
pub struct CompassLabel {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Positions of the N/S/W/E labels for an image of the given size.
///
/// North sits one font size below the top edge, the others half a font size
/// in from their edge.
pub fn compass_labels(width: f64, height: f64, font_size: f64) -> [CompassLabel; 4] {
    let half = font_size / 2.0;
    [
        CompassLabel { text: "N", x: width / 2.0, y: font_size },
        CompassLabel { text: "S", x: width / 2.0, y: height - half },
        CompassLabel { text: "W", x: half, y: height / 2.0 },
        CompassLabel { text: "E", x: width - half, y: height / 2.0 },
    ]
}

/// Fill color for one cell. Vector output carries no alpha.
pub fn cell_fill(value: f64, config: &RenderConfig) -> String {
    let color = interpolate(value, &config.colors);
    if config.greyscale {
        Color::new(color.g, color.g, color.g, 0xFF).to_rgb_string()
    } else {
        color.to_rgb_string()
    }
}

/// Build the SVG document for a grid.
pub fn build_svg(rows: &[Vec<f64>], config: &RenderConfig) -> RenderResult<String> {
    let grid = QualityGrid::new(rows)?;
    config.validate_vector()?;
    Ok(build_document(&grid, config))
}

fn build_document(grid: &QualityGrid<'_>, config: &RenderConfig) -> String {
    let scale = config.upscale_factor as usize;
    let width = grid.width() * scale;
    let height = grid.height() * scale;

    let mut lines = Vec::with_capacity(grid.width() * grid.height() + 7);
    lines.push(format!(
        r#"<svg width="{}" height="{}" xmlns="{}">"#,
        width, height, SVG_NAMESPACE
    ));
    lines.push(format!(
        "<style>text {{ font-family: {}; font-size: {}px; color: #FFFFFF; }}</style>",
        escape_xml(&config.font_family),
        config.font_size
    ));

    for (y, x, value) in grid.cells() {
        lines.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" shape-rendering="crispEdges"/>"#,
            x * scale,
            y * scale,
            scale,
            scale,
            cell_fill(value, config)
        ));
    }

    if config.compass_labels {
        for label in compass_labels(width as f64, height as f64, config.font_size) {
            lines.push(format!(
                r#"<text x="{}" y="{}" text-anchor="middle" fill="white">{}</text>"#,
                label.x, label.y, label.text
            ));
        }
    }

    lines.push("</svg>".to_string());
    lines.join("\n")
}

/// Render the grid to an SVG file at the configured output path.
///
/// The document is built in memory and written in a single call, so a
/// failure before the write never leaves a partial file.
pub fn render_vector(rows: &[Vec<f64>], config: &RenderConfig) -> RenderResult<RenderSummary> {
    let grid = QualityGrid::new(rows)?;
    config.validate_vector()?;

    let scale = config.upscale_factor as usize;
    tracing::debug!(
        columns = grid.width(),
        rows = grid.height(),
        upscale = scale,
        no_data = grid.no_data_count(),
        "Rendering vector obstruction map"
    );

    let document = build_document(&grid, config);
    let path = config.vector_path().to_path_buf();
    fs::write(&path, &document)?;

    tracing::info!(path = %path.display(), bytes = document.len(), "Wrote SVG obstruction map");

    Ok(RenderSummary {
        path,
        width: grid.width() * scale,
        height: grid.height() * scale,
        format: ImageFormat::Svg,
        bytes_written: document.len() as u64,
    })
}

/// Escape the XML special characters in text content.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

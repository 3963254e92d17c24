//! Validated view over a quality grid.

use crate::error::{RenderError, RenderResult};

/// A non-empty, rectangular grid of per-direction quality samples.
///
/// Rows run top to bottom, columns left to right. Values in `[0, 1]` are
/// quality toward unobstructed; negative values mean no data.
#[derive(Debug, Clone, Copy)]
pub struct QualityGrid<'a> {
    rows: &'a [Vec<f64>],
    width: usize,
}

impl<'a> QualityGrid<'a> {
    /// Validate `rows` and wrap them.
    ///
    /// Fails when there are no rows, the first row is empty, or any row
    /// length differs from the first.
    pub fn new(rows: &'a [Vec<f64>]) -> RenderResult<Self> {
        let width = match rows.first() {
            None => return Err(RenderError::InvalidGrid("Zero-length".to_string())),
            Some(first) if first.is_empty() => {
                return Err(RenderError::InvalidGrid("Zero-length".to_string()))
            }
            Some(first) => first.len(),
        };

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RenderError::InvalidGrid(format!(
                "row {} has {} columns, expected {}",
                index,
                row.len(),
                width
            )));
        }

        Ok(Self { rows, width })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &'a [Vec<f64>] {
        self.rows
    }

    /// Iterate `(row, col, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + 'a {
        let rows = self.rows;
        rows.iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &v)| (y, x, v)))
    }

    /// Count of cells carrying the no-data sentinel.
    pub fn no_data_count(&self) -> usize {
        self.cells()
            .filter(|&(_, _, v)| crate::color::normalize(v).is_none())
            .count()
    }
}

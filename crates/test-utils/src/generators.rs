//! Synthetic quality grids shaped like dish obstruction maps.
//!
//! Grids are `Vec<Vec<f64>>` in row-major order (row 0 is the top of the
//! image). Negative values mark directions without data.

/// Value used for cells without data.
pub const NO_DATA: f64 = -1.0;

/// Creates a grid where every cell holds `value`.
pub fn create_uniform_grid(width: usize, height: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; width]; height]
}

/// Creates a left-to-right ramp from 0.0 in the first column to 1.0 in the
/// last.
///
/// A single-column grid is all 0.0.
pub fn create_gradient_grid(width: usize, height: usize) -> Vec<Vec<f64>> {
    let denom = width.saturating_sub(1).max(1) as f64;
    let row: Vec<f64> = (0..width).map(|x| x as f64 / denom).collect();
    vec![row; height]
}

/// Creates a square dish-style map.
///
/// Cells outside the inscribed circle carry [`NO_DATA`]. Inside the circle
/// quality is 1.0 except for an obstructed wedge in the north-east quadrant,
/// which fades from 0.0 at the horizon to 1.0 at the zenith.
///
/// # Arguments
///
/// * `size` - Width and height in cells (real dishes report 123x123)
pub fn create_dish_grid(size: usize) -> Vec<Vec<f64>> {
    let center = (size as f64 - 1.0) / 2.0;
    let radius = size as f64 / 2.0;

    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let dx = x as f64 - center;
                    let dy = y as f64 - center;
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist > radius {
                        NO_DATA
                    } else if dx > 0.0 && dy < 0.0 {
                        // North-east wedge: worse toward the horizon
                        (1.0 - dist / radius).clamp(0.0, 1.0)
                    } else {
                        1.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Creates a grid with a deterministic pseudo-random mix of values.
///
/// Roughly one cell in eight is [`NO_DATA`]; a few exceed 1.0 to exercise
/// clamping.
pub fn create_noisy_grid(width: usize, height: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut state = seed | 1;
    let mut grid = Vec::with_capacity(height);

    for _ in 0..height {
        let mut row = Vec::with_capacity(width);
        for _ in 0..width {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;

            let value = match state % 8 {
                0 => NO_DATA,
                1 => 1.0 + (state >> 32) as f64 / u32::MAX as f64,
                _ => (state >> 11) as f64 / (1u64 << 53) as f64,
            };
            row.push(value);
        }
        grid.push(row);
    }

    grid
}

//! Quality grid input loading.
//!
//! Accepts either a bare JSON array of rows or an object carrying the rows
//! under `obstruction_map` (or `snr`), which is how dish status dumps nest it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GridDocument {
    Bare(Vec<Vec<f64>>),
    Wrapped {
        #[serde(alias = "snr")]
        obstruction_map: Vec<Vec<f64>>,
    },
}

impl GridDocument {
    fn into_rows(self) -> Vec<Vec<f64>> {
        match self {
            GridDocument::Bare(rows) => rows,
            GridDocument::Wrapped { obstruction_map } => obstruction_map,
        }
    }
}

/// Parse a grid from JSON text.
pub fn parse_grid(json: &str) -> Result<Vec<Vec<f64>>> {
    let document: GridDocument =
        serde_json::from_str(json).context("Grid must be an array of numeric rows")?;
    Ok(document.into_rows())
}

/// Load a grid from `path`, or from stdin when `path` is `-`.
pub fn load_grid(path: &Path) -> Result<Vec<Vec<f64>>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read grid from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid file {}", path.display()))?
    };

    parse_grid(&contents).with_context(|| format!("Invalid grid in {}", path.display()))
}

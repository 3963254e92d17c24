//! Obstruction map renderer CLI.
//!
//! Reads a dish quality grid from a JSON file and writes it as:
//! - PNG raster (one pixel per cell, optional greyscale/alpha)
//! - SVG vector (upscaled cells with N/S/E/W compass labels)

mod config;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use obstruction_renderer::{render_raster, render_vector, Color, RenderError};

use config::Overrides;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Png,
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "obstruction-map")]
#[command(about = "Render a dish obstruction map to PNG or SVG")]
struct Args {
    /// Grid JSON file (`-` reads stdin)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, env = "OBSTRUCTION_FORMAT", default_value = "svg")]
    format: OutputFormat,

    /// Output file (default: obstruction_map.png / obstruction_map.svg)
    #[arg(short, long, env = "OBSTRUCTION_OUTPUT")]
    output: Option<PathBuf>,

    /// YAML render configuration file
    #[arg(short, long, env = "OBSTRUCTION_CONFIG")]
    config: Option<PathBuf>,

    /// Color for obstructed cells (AARRGGBB)
    #[arg(long, env = "OBSTRUCTION_OBSTRUCTED_COLOR")]
    obstructed_color: Option<Color>,

    /// Color for unobstructed cells (AARRGGBB)
    #[arg(long, env = "OBSTRUCTION_UNOBSTRUCTED_COLOR")]
    unobstructed_color: Option<Color>,

    /// Color for cells without data (AARRGGBB)
    #[arg(long, env = "OBSTRUCTION_NO_DATA_COLOR")]
    no_data_color: Option<Color>,

    /// Single intensity channel instead of RGB
    #[arg(long)]
    greyscale: bool,

    /// Drop the alpha channel (PNG only)
    #[arg(long)]
    no_alpha: bool,

    /// Output units per grid cell (SVG only)
    #[arg(long, env = "OBSTRUCTION_UPSCALE_FACTOR")]
    upscale_factor: Option<u32>,

    /// Compass label font family (SVG only)
    #[arg(long, env = "OBSTRUCTION_FONT_FAMILY")]
    font_family: Option<String>,

    /// Compass label font size in px (SVG only)
    #[arg(long, env = "OBSTRUCTION_FONT_SIZE")]
    font_size: Option<f64>,

    /// Omit the N/S/E/W labels (SVG only)
    #[arg(long)]
    no_compass: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            obstructed_color: self.obstructed_color,
            unobstructed_color: self.unobstructed_color,
            no_data_color: self.no_data_color,
            greyscale: self.greyscale,
            no_alpha: self.no_alpha,
            upscale_factor: self.upscale_factor,
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            no_compass: self.no_compass,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Exit status for a rejected grid, color or setting.
const EXIT_INPUT_ERROR: u8 = 2;

/// Map a failure to the process exit status: [`EXIT_INPUT_ERROR`] when the
/// renderer rejected its input, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<RenderError>() {
        Some(render_err) if render_err.is_input_error() => ExitCode::from(EXIT_INPUT_ERROR),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = init_tracing(&args.log_level, args.json_logs) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Obstruction map rendering failed");
            exit_code(&e)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let render_config = config::resolve(
        args.config.as_deref(),
        args.overrides(),
        args.format == OutputFormat::Svg,
    )?;
    let rows = input::load_grid(&args.input)?;

    info!(
        input = %args.input.display(),
        format = ?args.format,
        rows = rows.len(),
        "Rendering obstruction map"
    );

    let summary = match args.format {
        OutputFormat::Png => render_raster(&rows, &render_config),
        OutputFormat::Svg => render_vector(&rows, &render_config),
    }
    .context("Failed to render obstruction map")?;

    info!(
        path = %summary.path.display(),
        width = summary.width,
        height = summary.height,
        bytes = summary.bytes_written,
        mime = summary.format.mime_type(),
        "Obstruction map written"
    );

    println!("{}", summary.path.display());
    Ok(())
}

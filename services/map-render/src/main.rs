//! Occupancy grid render tool.
//!
//! Reads a `nav_msgs/OccupancyGrid` JSON message, colorizes it with the
//! configured palette and writes the texture as PNG. The quad placement can
//! be written next to it as JSON for whatever draws the texture.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use grid_common::{CellCensus, LayerOptions, OccupancyGrid, PaletteName};
use renderer::{png, OccupancyGridLayer, Placement};

#[derive(Parser, Debug)]
#[command(name = "map-render")]
#[command(about = "Render an occupancy grid message to a PNG texture")]
struct Args {
    /// Grid message (JSON)
    #[arg(short, long, env = "MAP_RENDER_INPUT")]
    input: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Layer options file (.json, .yaml or .yml)
    #[arg(long, env = "MAP_RENDER_OPTIONS")]
    options: Option<PathBuf>,

    /// Palette name (raw, map, costmap); overrides the options file
    #[arg(short, long)]
    palette: Option<String>,

    /// Material opacity; overrides the options file
    #[arg(long)]
    opacity: Option<f32>,

    /// Write the quad placement as JSON to this path
    #[arg(long)]
    placement: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "MAP_RENDER_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// Placement file contents.
#[derive(Debug, Serialize)]
struct PlacementFile {
    width: u32,
    height: u32,
    resolution: f64,
    palette: PaletteName,
    opacity: f32,
    placement: Placement,
}

/// What a render run produced.
#[derive(Debug)]
struct RenderSummary {
    width: u32,
    height: u32,
    png_bytes: usize,
    census: CellCensus,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let summary = run(&args)?;
    info!(
        width = summary.width,
        height = summary.height,
        bytes = summary.png_bytes,
        free = summary.census.free,
        occupied = summary.census.occupied,
        unknown = summary.census.unknown,
        other = summary.census.other,
        output = %args.output.display(),
        "Render complete"
    );
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Options file first, then command-line overrides.
fn resolve_options(args: &Args) -> Result<LayerOptions> {
    let mut options = match &args.options {
        Some(path) => LayerOptions::from_file(path)
            .with_context(|| format!("Failed to load layer options from {}", path.display()))?,
        None => LayerOptions::default(),
    };
    if let Some(palette) = &args.palette {
        options = options.with_palette(palette.as_str());
    }
    if let Some(opacity) = args.opacity {
        options = options.with_opacity(opacity);
    }
    Ok(options)
}

fn run(args: &Args) -> Result<RenderSummary> {
    let options = resolve_options(args)?;
    let grid = OccupancyGrid::from_file(&args.input)
        .with_context(|| format!("Failed to load grid from {}", args.input.display()))?;

    info!(
        input = %args.input.display(),
        width = grid.width(),
        height = grid.height(),
        resolution = grid.resolution(),
        palette = %options.palette,
        "Loaded occupancy grid"
    );

    let census = grid.census();
    let layer = OccupancyGridLayer::with_options(&grid, options);

    let png_bytes = png::write_file(layer.pixels(), &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(path) = &args.placement {
        write_placement(&layer, path)?;
    }

    Ok(RenderSummary {
        width: layer.info().width,
        height: layer.info().height,
        png_bytes,
        census,
    })
}

fn write_placement(layer: &OccupancyGridLayer, path: &Path) -> Result<()> {
    let info = layer.info();
    let file = PlacementFile {
        width: info.width,
        height: info.height,
        resolution: info.resolution,
        palette: layer.options().palette,
        opacity: layer.options().effective_opacity(),
        placement: *layer.placement(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote placement");
    Ok(())
}

//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments for the ugrid demo.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "ugrid", about = "Spherical polygon geometry for unstructured grids")]
pub struct CliArgs {
    /// Run per-face work on the rayon pool.
    #[arg(long)]
    pub parallel: Option<bool>,

    /// Face count at which parallel processing kicks in.
    #[arg(long)]
    pub parallel_threshold: Option<usize>,

    /// Split faces crossing the antimeridian.
    #[arg(long)]
    pub correct_antimeridian: Option<bool>,

    /// Render backend (poly_collection, line_collection, geo_json).
    #[arg(long)]
    pub backend: Option<String>,

    /// File to write the rendered output to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Demo grid cells around a latitude circle.
    #[arg(long)]
    pub lon_cells: Option<u32>,

    /// Demo grid cells from pole to pole.
    #[arg(long)]
    pub lat_cells: Option<u32>,

    /// Longitude offset of the demo grid in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon_offset: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// `--config` if given, otherwise [`default_config_dir`].
    pub fn config_dir(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_dir)
    }
}

/// `<platform config dir>/ugrid`, or `./ugrid` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ugrid")
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(parallel) = args.parallel {
            self.geometry.parallel = parallel;
        }
        if let Some(threshold) = args.parallel_threshold {
            self.geometry.parallel_threshold = threshold;
        }
        if let Some(correct) = args.correct_antimeridian {
            self.geometry.correct_antimeridian_polygons = correct;
        }
        if let Some(ref backend) = args.backend {
            self.render.backend = backend.clone();
        }
        if let Some(ref path) = args.output {
            self.render.output_path = Some(path.clone());
        }
        if let Some(cells) = args.lon_cells {
            self.demo.lon_cells = cells;
        }
        if let Some(cells) = args.lat_cells {
            self.demo.lat_cells = cells;
        }
        if let Some(offset) = args.lon_offset {
            self.demo.lon_offset_deg = offset;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

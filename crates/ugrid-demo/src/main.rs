//! Demo binary that runs the geometry pipeline on a synthetic lat-lon grid.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p ugrid-demo -- --backend geo_json --output mesh.geojson`
//! to export the corrected polygons.

mod grid;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use ugrid_config::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_dir = args.config_dir();

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        return ExitCode::from(2);
    }

    let log_dir = config_dir.join("logs");
    ugrid_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match pipeline::run(&config) {
        Ok(summary) => {
            summary.log();
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("pipeline failed: {e}");
            ExitCode::FAILURE
        }
    }
}

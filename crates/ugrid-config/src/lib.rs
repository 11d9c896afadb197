//! Configuration for the ugrid tools.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Unknown or missing fields fall back to defaults so older
//! and newer config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, default_config_dir};
pub use config::{Config, DebugConfig, DemoConfig, GeometryConfig, RenderConfig};
pub use error::ConfigError;

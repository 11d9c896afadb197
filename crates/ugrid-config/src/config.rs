//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Shell building and antimeridian handling.
    pub geometry: GeometryConfig,
    /// Output backend selection.
    pub render: RenderConfig,
    /// Synthetic grid used by the demo binary.
    pub demo: DemoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Geometry engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryConfig {
    /// Spread per-face work over the rayon thread pool.
    pub parallel: bool,
    /// Minimum face count before going parallel.
    pub parallel_threshold: usize,
    /// Split faces crossing the antimeridian before rendering.
    pub correct_antimeridian_polygons: bool,
}

/// Render backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Backend name: `poly_collection`, `line_collection` or `geo_json`.
    pub backend: String,
    /// Where to write the rendered output; nothing is written when unset.
    pub output_path: Option<PathBuf>,
}

/// Synthetic lat-lon grid parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Cells around each latitude circle.
    pub lon_cells: u32,
    /// Cells from pole to pole.
    pub lat_cells: u32,
    /// Longitude of the first grid column's western edge, relative to -180.
    pub lon_offset_deg: f64,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g. "debug", "info,ugrid_geometry=trace").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1024,
            correct_antimeridian_polygons: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: "poly_collection".to_string(),
            output_path: None,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            lon_cells: 36,
            lat_cells: 18,
            lon_offset_deg: 5.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values that parse but cannot describe a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.demo.lon_cells < 3 {
            return Err(ConfigError::Invalid {
                field: "demo.lon_cells",
                reason: format!("need at least 3 cells, got {}", self.demo.lon_cells),
            });
        }
        if self.demo.lat_cells == 0 {
            return Err(ConfigError::Invalid {
                field: "demo.lat_cells",
                reason: "need at least 1 cell".to_string(),
            });
        }
        if !self.demo.lon_offset_deg.is_finite() {
            return Err(ConfigError::Invalid {
                field: "demo.lon_offset_deg",
                reason: format!("{} is not finite", self.demo.lon_offset_deg),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

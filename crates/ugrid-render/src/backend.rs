//! Backend selection and the input/output types shared by every backend.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use ugrid_geometry::{BuildOptions, PolygonShells};

use crate::{
    GeoJsonBackend, LineCollection, LineCollectionBackend, PolyCollection, PolyCollectionBackend,
    RenderError,
};

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Raw shells plus how the antimeridian should be treated.
#[derive(Clone, Copy, Debug)]
pub struct RenderInput<'a> {
    pub shells: &'a PolygonShells,
    /// Split faces that cross the antimeridian before rendering.
    pub correct_antimeridian: bool,
    /// Parallelism used when correcting shells.
    pub options: BuildOptions,
}

impl<'a> RenderInput<'a> {
    /// Corrected rendering with default build options.
    pub fn new(shells: &'a PolygonShells) -> Self {
        Self {
            shells,
            correct_antimeridian: true,
            options: BuildOptions::default(),
        }
    }

    #[must_use]
    pub fn with_antimeridian_correction(mut self, correct: bool) -> Self {
        self.correct_antimeridian = correct;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of a render call, one variant per backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RenderOutput {
    PolyCollection(PolyCollection),
    LineCollection(LineCollection),
    /// A GeoJSON `FeatureCollection`.
    GeoJson(serde_json::Value),
}

impl RenderOutput {
    /// Number of polygons, polylines or features produced.
    pub fn item_count(&self) -> usize {
        match self {
            Self::PolyCollection(c) => c.polygons.len(),
            Self::LineCollection(c) => c.lines.len(),
            Self::GeoJson(value) => value["features"].as_array().map_or(0, Vec::len),
        }
    }

    /// Pretty-printed JSON. GeoJSON is written bare so other tools can read it.
    pub fn to_json_pretty(&self) -> Result<String, RenderError> {
        let json = match self {
            Self::GeoJson(value) => serde_json::to_string_pretty(value)?,
            other => serde_json::to_string_pretty(other)?,
        };
        Ok(json)
    }
}

/// `(lon, lat)` vertices as plain pairs.
pub(crate) fn lonlat_pairs(ring: &[DVec2]) -> Vec<[f64; 2]> {
    ring.iter().map(|v| v.to_array()).collect()
}

// ---------------------------------------------------------------------------
// Backend trait and registry
// ---------------------------------------------------------------------------

/// Turns raw polygon shells into a consumer-specific shape.
pub trait RenderBackend: Send + Sync {
    /// Name used in configuration files.
    fn name(&self) -> &'static str;

    /// Render `input`.
    fn render(&self, input: &RenderInput<'_>) -> Result<RenderOutput, RenderError>;
}

/// The built-in backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Corrected polygons plus the face each one came from.
    #[default]
    PolyCollection,
    /// One closed polyline per corrected polygon.
    LineCollection,
    /// One GeoJSON feature per face.
    GeoJson,
}

impl BackendKind {
    /// Every built-in backend.
    pub const ALL: [Self; 3] = [Self::PolyCollection, Self::LineCollection, Self::GeoJson];

    /// Configuration name of this backend.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PolyCollection => "poly_collection",
            Self::LineCollection => "line_collection",
            Self::GeoJson => "geo_json",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RenderError::Unsupported(format!("unknown render backend {s:?}")))
    }
}

/// Instantiate the backend for `kind`.
pub fn backend_for(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::PolyCollection => Box::new(PolyCollectionBackend),
        BackendKind::LineCollection => Box::new(LineCollectionBackend),
        BackendKind::GeoJson => Box::new(GeoJsonBackend),
    }
}

//! Rendering backends for mesh polygons.
//!
//! The geometry engine produces plain `(lon, lat)` shells. This crate turns
//! them into the shapes downstream consumers expect: a polygon collection
//! with provenance, closed polylines, or a GeoJSON `FeatureCollection`.
//! Backends are selected at runtime through [`BackendKind`].

mod backend;
mod error;
mod geojson;
mod line_collection;
mod poly_collection;

#[cfg(test)]
mod test_support;

pub use backend::{BackendKind, RenderBackend, RenderInput, RenderOutput, backend_for};
pub use error::RenderError;
pub use geojson::GeoJsonBackend;
pub use line_collection::{LineCollection, LineCollectionBackend};
pub use poly_collection::{PolyCollection, PolyCollectionBackend};

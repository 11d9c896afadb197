//! Spherical polygon geometry for unstructured climate and ocean meshes.
//!
//! Turns face-node connectivity into closed `(lon, lat)` polygon shells,
//! finds and splits faces that cross the antimeridian, intersects
//! great-circle arcs, and decides whether a pole lies inside a face.
//!
//! All operations are pure functions over borrowed mesh arrays. Per-face
//! work runs on the rayon pool when [`BuildOptions`] allows it; serial and
//! parallel runs produce identical output.

mod antimeridian;
mod error;
mod intersection;
mod mesh;
mod options;
mod pole;
mod shells;
mod split;

pub use antimeridian::{
    ANTIMERIDIAN_DELTA_DEG, CorrectedShells, FacePolygon, antimeridian_face_indices,
    build_corrected_shells, crosses_antimeridian, face_polygons,
};
pub use error::GeometryError;
pub use intersection::{ERROR_TOLERANCE, gca_gca_intersection, point_within_gca};
pub use mesh::MeshView;
pub use options::BuildOptions;
pub use pole::{
    EQUATOR_REFERENCE, Pole, PolygonLocation, classify_polygon_location,
    count_equator_crossings, pole_point_inside_polygon, pole_point_inside_polygon_named,
};
pub use shells::{PolygonShells, build_polygon_shells};
pub use split::split_at_antimeridian;

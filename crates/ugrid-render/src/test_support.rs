//! Shared fixtures for backend tests.

use ugrid_connectivity::FaceNodeConnectivity;
use ugrid_coords::NodeCoords;
use ugrid_geometry::{BuildOptions, PolygonShells, build_polygon_shells};

/// Two quads: face 0 straddles the antimeridian, face 1 sits at the prime meridian.
pub(crate) fn two_quads() -> PolygonShells {
    let lon = [170.0, -170.0, -170.0, 170.0, 0.0, 10.0, 10.0, 0.0];
    let lat = [0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 10.0];
    let coords = NodeCoords::new(&lon, &lat).unwrap();
    let faces = FaceNodeConnectivity::from_faces(&[[0, 1, 2, 3], [4, 5, 6, 7]]);
    build_polygon_shells(&coords, &faces, &BuildOptions::serial()).unwrap()
}

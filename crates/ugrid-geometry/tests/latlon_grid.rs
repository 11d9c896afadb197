//! End-to-end checks on a regular lat-lon grid whose seam column straddles ±180°.

use glam::DVec3;
use ugrid_connectivity::FaceNodeConnectivity;
use ugrid_coords::{NodeCoords, xyz_to_lonlat_deg};
use ugrid_geometry::{
    BuildOptions, MeshView, Pole, antimeridian_face_indices, build_corrected_shells,
    build_polygon_shells, crosses_antimeridian,
};

const NLON: usize = 36;
const NLAT: usize = 18;

/// Quad grid with `NLON x NLAT` cells of 10°, first column starting at
/// `start_lon`. Faces are numbered row by row from the south.
fn latlon_grid(start_lon: f64) -> (Vec<f64>, Vec<f64>, FaceNodeConnectivity) {
    let dlon = 360.0 / NLON as f64;
    let dlat = 180.0 / NLAT as f64;
    let mut lon = Vec::with_capacity(NLON * (NLAT + 1));
    let mut lat = Vec::with_capacity(NLON * (NLAT + 1));
    for j in 0..=NLAT {
        for i in 0..NLON {
            lon.push(start_lon + i as f64 * dlon);
            lat.push(-90.0 + j as f64 * dlat);
        }
    }

    let node = |i: usize, j: usize| j * NLON + (i % NLON);
    let faces: Vec<[usize; 4]> = (0..NLAT)
        .flat_map(|j| (0..NLON).map(move |i| [node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)]))
        .collect();
    (lon, lat, FaceNodeConnectivity::from_faces(&faces))
}

fn face_index(i: usize, j: usize) -> usize {
    j * NLON + i
}

#[test]
fn test_seam_column_is_flagged() {
    let (lon, lat, faces) = latlon_grid(-175.0);
    let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
    let expected: Vec<usize> = (0..NLAT).map(|j| face_index(NLON - 1, j)).collect();
    assert_eq!(mesh.antimeridian_face_indices().unwrap(), expected);
}

#[test]
fn test_wrapped_longitudes_flag_one_column() {
    // Same grid stored as [0, 360): 185 and up wrap to negative longitudes.
    let (lon, lat, faces) = latlon_grid(5.0);
    let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
    let flagged = mesh.antimeridian_face_indices().unwrap();
    let expected: Vec<usize> = (0..NLAT).map(|j| face_index(17, j)).collect();
    assert_eq!(flagged, expected);

    let shells = mesh.polygon_shells().unwrap();
    assert!(shells.as_flat().iter().all(|v| v.x >= -180.0 && v.x < 180.0));
}

#[test]
fn test_corrected_shells_never_cross_and_map_back() {
    let (lon, lat, faces) = latlon_grid(-175.0);
    let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
    let shells = mesh.polygon_shells().unwrap();
    let flagged = antimeridian_face_indices(&shells, &BuildOptions::serial());
    let corrected = build_corrected_shells(&shells, &BuildOptions::serial());

    assert_eq!(corrected.len(), NLON * NLAT + flagged.len());
    for (face, piece) in corrected.iter() {
        assert!(!crosses_antimeridian(piece), "face {face} piece still crosses");
        assert_eq!(piece.first(), piece.last());
    }
    for face in 0..shells.num_faces() {
        let pieces = corrected.pieces_of(face);
        if flagged.contains(&face) {
            assert_eq!(pieces.len(), 2, "face {face}");
        } else {
            assert_eq!(pieces, &[shells.shell(face).to_vec()]);
        }
    }
}

#[test]
fn test_parallel_build_is_bit_identical() {
    let (lon, lat, faces) = latlon_grid(-175.0);
    let coords = NodeCoords::new(&lon, &lat).unwrap();
    let serial = BuildOptions::serial();
    let parallel = BuildOptions::default().with_parallel_threshold(1);

    let a = build_polygon_shells(&coords, &faces, &serial).unwrap();
    let b = build_polygon_shells(&coords, &faces, &parallel).unwrap();
    let bits = |s: &ugrid_geometry::PolygonShells| -> Vec<(u64, u64)> {
        s.as_flat().iter().map(|v| (v.x.to_bits(), v.y.to_bits())).collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(
        antimeridian_face_indices(&a, &serial),
        antimeridian_face_indices(&b, &parallel)
    );
    assert_eq!(
        build_corrected_shells(&a, &serial),
        build_corrected_shells(&b, &parallel)
    );
}

#[test]
fn test_rebuild_is_idempotent() {
    let (lon, lat, faces) = latlon_grid(-175.0);
    let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
    assert_eq!(mesh.polygon_shells().unwrap(), mesh.polygon_shells().unwrap());
    assert_eq!(mesh.corrected_shells().unwrap(), mesh.corrected_shells().unwrap());
}

#[test]
fn test_only_polar_row_contains_pole() {
    // Column 17 spans -5..5, so the equator rows have (1, 0, 0) on an edge.
    for start_lon in [-175.0, -180.0] {
        let (lon, lat, faces) = latlon_grid(start_lon);
        let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
        for j in 0..NLAT {
            for i in 0..NLON {
                let face = face_index(i, j);
                assert_eq!(
                    mesh.pole_inside_face(Pole::North, face).unwrap(),
                    j == NLAT - 1,
                    "north, face ({i}, {j}) from lon {start_lon}"
                );
                assert_eq!(
                    mesh.pole_inside_face(Pole::South, face).unwrap(),
                    j == 0,
                    "south, face ({i}, {j}) from lon {start_lon}"
                );
            }
        }
    }
}

#[test]
fn test_octant_triangle_closes() {
    let s = 1.0 / 3f64.sqrt();
    let (lon, lat): (Vec<f64>, Vec<f64>) = [
        DVec3::new(s, s, s),
        DVec3::new(-s, s, s),
        DVec3::new(-s, -s, s),
    ]
    .into_iter()
    .map(|p| xyz_to_lonlat_deg(p).unwrap())
    .unzip();
    let faces = FaceNodeConnectivity::from_faces(&[[0, 1, 2]]);
    let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();

    let shells = mesh.polygon_shells().unwrap();
    let shell = shells.shell(0);
    assert_eq!(shell.len(), 4);
    assert_eq!(shell[0], shell[3]);
    assert!(mesh.pole_inside_face(Pole::North, 0).is_ok());
}

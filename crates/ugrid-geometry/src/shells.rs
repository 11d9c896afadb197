//! Polygon shells: closed `(lon, lat)` vertex rings, one fixed-width row per face.

use glam::DVec2;
use rayon::prelude::*;
use ugrid_connectivity::{FaceNodeConnectivity, close_face_nodes};
use ugrid_coords::NodeCoords;

use crate::{BuildOptions, GeometryError};

/// Rectangular `(num_faces, max_closed_nodes)` array of `(lon, lat)` vertices.
///
/// Row `i` holds face `i`'s closed ring in its first `closed_count(i)` slots;
/// the remaining slots repeat the first vertex so every row has the same
/// width. Use [`PolygonShells::shell`] to get only the meaningful prefix.
///
/// Vertices are stored as `DVec2` with `x = lon` and `y = lat`, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonShells {
    vertices: Vec<DVec2>,
    stride: usize,
    closed_counts: Vec<usize>,
}

impl PolygonShells {
    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.closed_counts.len()
    }

    /// Row width, i.e. `max_nodes_per_face + 1`.
    #[inline]
    pub fn max_closed_nodes(&self) -> usize {
        self.stride
    }

    /// Meaningful length of every row.
    #[inline]
    pub fn closed_counts(&self) -> &[usize] {
        &self.closed_counts
    }

    /// Meaningful length of row `face`.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn closed_count(&self, face: usize) -> usize {
        self.closed_counts[face]
    }

    /// Full padded row of `face`.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn padded_row(&self, face: usize) -> &[DVec2] {
        let start = face * self.stride;
        &self.vertices[start..start + self.stride]
    }

    /// Closed ring of `face` without padding; first and last vertex are equal.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn shell(&self, face: usize) -> &[DVec2] {
        &self.padded_row(face)[..self.closed_counts[face]]
    }

    /// Iterate over every face's trimmed shell.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[DVec2]> + '_ {
        (0..self.num_faces()).map(move |face| self.shell(face))
    }

    /// The whole row-major vertex buffer, `num_faces * max_closed_nodes` long.
    #[inline]
    pub fn as_flat(&self) -> &[DVec2] {
        &self.vertices
    }
}

/// Build the polygon shell of every face.
///
/// Faces are closed first (fewer than three nodes is an error). Longitudes
/// are wrapped into `[-180, 180)` when any node longitude exceeds 180;
/// latitudes are copied unchanged.
pub fn build_polygon_shells(
    coords: &NodeCoords<'_>,
    faces: &FaceNodeConnectivity,
    options: &BuildOptions,
) -> Result<PolygonShells, GeometryError> {
    faces.check_node_bounds(coords.len())?;
    let closed = close_face_nodes(faces)?;

    let lon = coords.normalized_longitudes();
    let lat = coords.lat();
    let stride = closed.width();
    let num_faces = closed.num_faces();

    let fill_row = |face: usize, row: &mut [DVec2]| {
        for (slot, node) in closed.ring(face).enumerate() {
            row[slot] = DVec2::new(lon[node], lat[node]);
        }
        let first = row[0];
        row[closed.closed_count(face)..].fill(first);
    };

    let mut vertices = vec![DVec2::ZERO; num_faces * stride];
    if options.use_parallel(num_faces) {
        vertices
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(face, row)| fill_row(face, row));
    } else {
        vertices
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(face, row)| fill_row(face, row));
    }

    tracing::debug!(
        faces = num_faces,
        max_closed_nodes = stride,
        normalized = matches!(lon, std::borrow::Cow::Owned(_)),
        "built polygon shells"
    );

    Ok(PolygonShells {
        vertices,
        stride,
        closed_counts: closed.closed_counts().to_vec(),
    })
}

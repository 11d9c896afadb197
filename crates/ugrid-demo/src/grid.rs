//! Synthetic regular lat-lon grid for exercising the geometry pipeline.

use ugrid_connectivity::FaceNodeConnectivity;

/// Quad grid covering the sphere, stored the way mesh files store it:
/// parallel node coordinate arrays plus face-node connectivity.
///
/// Nodes are numbered row by row from the south pole; each pole is repeated
/// once per column. Faces wind counter-clockwise (east, then north).
#[derive(Clone, Debug)]
pub struct LatLonGrid {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub faces: FaceNodeConnectivity,
    pub lon_cells: usize,
    pub lat_cells: usize,
}

impl LatLonGrid {
    /// Grid with `lon_cells x lat_cells` equal-angle cells.
    ///
    /// The first column starts at `-180 + lon_offset_deg`. Any offset that is
    /// not a multiple of the cell width puts one column across the
    /// antimeridian.
    pub fn generate(lon_cells: usize, lat_cells: usize, lon_offset_deg: f64) -> Self {
        let dlon = 360.0 / lon_cells as f64;
        let dlat = 180.0 / lat_cells as f64;

        let num_nodes = lon_cells * (lat_cells + 1);
        let mut lon = Vec::with_capacity(num_nodes);
        let mut lat = Vec::with_capacity(num_nodes);
        for j in 0..=lat_cells {
            for i in 0..lon_cells {
                lon.push(-180.0 + lon_offset_deg + i as f64 * dlon);
                lat.push(-90.0 + j as f64 * dlat);
            }
        }

        let node = |i: usize, j: usize| j * lon_cells + i % lon_cells;
        let faces: Vec<[usize; 4]> = (0..lat_cells)
            .flat_map(|j| {
                (0..lon_cells)
                    .map(move |i| [node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)])
            })
            .collect();

        Self {
            lon,
            lat,
            faces: FaceNodeConnectivity::from_faces(&faces),
            lon_cells,
            lat_cells,
        }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.lon.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.num_faces()
    }

    /// Index of the cell in column `i`, row `j`.
    #[inline]
    pub fn face_index(&self, i: usize, j: usize) -> usize {
        j * self.lon_cells + i
    }
}

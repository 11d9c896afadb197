//! Read-only mesh view tying node coordinates to face connectivity.

use glam::DVec3;
use rayon::prelude::*;
use ugrid_connectivity::{FaceNodeConnectivity, face_edges_cartesian};
use ugrid_coords::NodeCoords;

use crate::{
    BuildOptions, CorrectedShells, FacePolygon, GeometryError, Pole, PolygonShells,
    antimeridian_face_indices, build_corrected_shells, build_polygon_shells, face_polygons,
    pole_point_inside_polygon,
};

/// A mesh borrowed from its owner, plus the unit-sphere position of every node.
///
/// Construction validates that every face references an existing node, so
/// the per-face queries below only fail on genuinely bad faces.
#[derive(Clone, Debug)]
pub struct MeshView<'a> {
    coords: NodeCoords<'a>,
    faces: &'a FaceNodeConnectivity,
    xyz: Vec<DVec3>,
    options: BuildOptions,
}

impl<'a> MeshView<'a> {
    pub fn new(coords: NodeCoords<'a>, faces: &'a FaceNodeConnectivity) -> Result<Self, GeometryError> {
        faces.check_node_bounds(coords.len())?;
        Ok(Self {
            xyz: coords.to_xyz(),
            coords,
            faces,
            options: BuildOptions::default(),
        })
    }

    /// Shorthand for [`NodeCoords::new`] followed by [`MeshView::new`].
    pub fn from_arrays(
        lon: &'a [f64],
        lat: &'a [f64],
        faces: &'a FaceNodeConnectivity,
    ) -> Result<Self, GeometryError> {
        Self::new(NodeCoords::new(lon, lat)?, faces)
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn coords(&self) -> &NodeCoords<'a> {
        &self.coords
    }

    #[inline]
    pub fn faces(&self) -> &FaceNodeConnectivity {
        self.faces
    }

    #[inline]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Unit-sphere position of every node.
    #[inline]
    pub fn node_xyz(&self) -> &[DVec3] {
        &self.xyz
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.num_faces()
    }

    pub fn polygon_shells(&self) -> Result<PolygonShells, GeometryError> {
        build_polygon_shells(&self.coords, self.faces, &self.options)
    }

    pub fn antimeridian_face_indices(&self) -> Result<Vec<usize>, GeometryError> {
        Ok(antimeridian_face_indices(&self.polygon_shells()?, &self.options))
    }

    pub fn corrected_shells(&self) -> Result<CorrectedShells, GeometryError> {
        Ok(build_corrected_shells(&self.polygon_shells()?, &self.options))
    }

    pub fn face_polygons(&self, correct: bool) -> Result<Vec<FacePolygon>, GeometryError> {
        Ok(face_polygons(&self.polygon_shells()?, correct, &self.options))
    }

    /// Edges of `face` as Cartesian endpoint pairs, in ring order.
    pub fn face_edges_cartesian(&self, face: usize) -> Result<Vec<[DVec3; 2]>, GeometryError> {
        Ok(face_edges_cartesian(self.faces, face, &self.xyz)?)
    }

    /// Whether `pole` lies inside `face`.
    pub fn pole_inside_face(&self, pole: Pole, face: usize) -> Result<bool, GeometryError> {
        pole_point_inside_polygon(pole, &self.face_edges_cartesian(face)?)
    }

    /// Indices of every face containing `pole`, ascending.
    ///
    /// Fails on the first face the classifier rejects.
    pub fn faces_containing_pole(&self, pole: Pole) -> Result<Vec<usize>, GeometryError> {
        let test = |face: usize| {
            self.pole_inside_face(pole, face)
                .map(|inside| inside.then_some(face))
        };

        let n = self.num_faces();
        let hits: Vec<Option<usize>> = if self.options.use_parallel(n) {
            (0..n).into_par_iter().map(test).collect::<Result<_, _>>()?
        } else {
            (0..n).map(test).collect::<Result<_, _>>()?
        };

        let faces: Vec<usize> = hits.into_iter().flatten().collect();
        tracing::debug!(%pole, faces = ?faces, "pole containment");
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugrid_connectivity::TopologyError;

    /// Four triangles fanning around the north pole plus one equatorial quad.
    fn polar_fan() -> (Vec<f64>, Vec<f64>, FaceNodeConnectivity) {
        let lon = vec![0.0, 0.0, 90.0, 180.0, 270.0, 10.0, 20.0, 20.0, 10.0];
        let lat = vec![90.0, 60.0, 60.0, 60.0, 60.0, -5.0, -5.0, 5.0, 5.0];
        let faces = FaceNodeConnectivity::from_faces(&[
            vec![0, 1, 2],
            vec![0, 2, 3],
            vec![0, 3, 4],
            vec![0, 4, 1],
            vec![5, 6, 7, 8],
        ]);
        (lon, lat, faces)
    }

    #[test]
    fn test_faces_touching_pole_contain_it() {
        let (lon, lat, faces) = polar_fan();
        let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
        assert_eq!(mesh.faces_containing_pole(Pole::North).unwrap(), vec![0, 1, 2, 3]);
        assert!(mesh.faces_containing_pole(Pole::South).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_pole_scan_matches_serial() {
        let (lon, lat, faces) = polar_fan();
        let serial = MeshView::from_arrays(&lon, &lat, &faces)
            .unwrap()
            .with_options(BuildOptions::serial());
        let parallel = MeshView::from_arrays(&lon, &lat, &faces)
            .unwrap()
            .with_options(BuildOptions::default().with_parallel_threshold(0));
        assert_eq!(
            serial.faces_containing_pole(Pole::North).unwrap(),
            parallel.faces_containing_pole(Pole::North).unwrap()
        );
    }

    #[test]
    fn test_bad_node_index_is_caught_up_front() {
        let lon = [0.0, 1.0, 2.0];
        let lat = [0.0; 3];
        let faces = FaceNodeConnectivity::from_faces(&[[0, 1, 5]]);
        let err = MeshView::from_arrays(&lon, &lat, &faces).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::Topology(TopologyError::NodeOutOfRange { node: 5, .. })
        ));
    }

    #[test]
    fn test_mismatched_arrays_are_rejected() {
        let lon = [0.0, 1.0, 2.0];
        let lat = [0.0; 2];
        let faces = FaceNodeConnectivity::from_faces(&[[0, 1, 2]]);
        assert!(matches!(
            MeshView::from_arrays(&lon, &lat, &faces),
            Err(GeometryError::Coord(_))
        ));
    }

    #[test]
    fn test_unknown_face_is_an_error() {
        let (lon, lat, faces) = polar_fan();
        let mesh = MeshView::from_arrays(&lon, &lat, &faces).unwrap();
        assert!(matches!(
            mesh.pole_inside_face(Pole::North, 9),
            Err(GeometryError::Topology(TopologyError::FaceOutOfRange { face: 9, .. }))
        ));
    }
}

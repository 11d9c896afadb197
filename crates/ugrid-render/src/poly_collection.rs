//! Polygon collection backend: corrected shells with provenance.

use serde::Serialize;
use ugrid_geometry::build_corrected_shells;

use crate::backend::lonlat_pairs;
use crate::{RenderBackend, RenderError, RenderInput, RenderOutput};

/// Polygons ready for a plotting library's polygon collection.
///
/// `original_faces[k]` is the mesh face polygon `k` was cut from, so face
/// data can be mapped onto split polygons.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PolyCollection {
    pub polygons: Vec<Vec<[f64; 2]>>,
    pub original_faces: Vec<usize>,
}

/// Renders every face as antimeridian-corrected polygons.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyCollectionBackend;

impl RenderBackend for PolyCollectionBackend {
    fn name(&self) -> &'static str {
        "poly_collection"
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<RenderOutput, RenderError> {
        if !input.correct_antimeridian {
            return Err(RenderError::Unsupported(
                "poly_collection always splits antimeridian faces".into(),
            ));
        }

        let corrected = build_corrected_shells(input.shells, &input.options);
        let collection = PolyCollection {
            polygons: corrected.iter().map(|(_, shell)| lonlat_pairs(shell)).collect(),
            original_faces: corrected.original_faces().to_vec(),
        };
        tracing::debug!(
            faces = input.shells.num_faces(),
            polygons = collection.polygons.len(),
            "rendered poly collection"
        );
        Ok(RenderOutput::PolyCollection(collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_quads;

    #[test]
    fn test_split_face_maps_back_to_its_source() {
        let shells = two_quads();
        let output = PolyCollectionBackend.render(&RenderInput::new(&shells)).unwrap();
        let RenderOutput::PolyCollection(collection) = output else {
            panic!("expected a poly collection");
        };
        assert_eq!(collection.original_faces, vec![0, 0, 1]);
        assert_eq!(collection.polygons.len(), 3);
        assert_eq!(collection.polygons[2][0], [0.0, 0.0]);
    }

    #[test]
    fn test_uncorrected_request_is_unsupported() {
        let shells = two_quads();
        let input = RenderInput::new(&shells).with_antimeridian_correction(false);
        assert!(matches!(
            PolyCollectionBackend.render(&input),
            Err(RenderError::Unsupported(_))
        ));
    }
}

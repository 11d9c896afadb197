//! GeoJSON backend: one feature per mesh face.

use serde_json::{Value, json};
use ugrid_geometry::{FacePolygon, face_polygons};

use crate::backend::lonlat_pairs;
use crate::{RenderBackend, RenderError, RenderInput, RenderOutput};

/// Renders a `FeatureCollection` with a `Polygon` or `MultiPolygon` per face.
///
/// Each feature carries its face index in `properties.face_index`. Faces
/// split at the antimeridian become `MultiPolygon`s; with correction off
/// every face is a `Polygon` of its raw shell.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoJsonBackend;

fn geometry(polygon: &FacePolygon) -> Value {
    match polygon {
        FacePolygon::Polygon(ring) => json!({
            "type": "Polygon",
            "coordinates": [lonlat_pairs(ring)],
        }),
        FacePolygon::MultiPolygon(rings) => json!({
            "type": "MultiPolygon",
            "coordinates": rings.iter().map(|r| vec![lonlat_pairs(r)]).collect::<Vec<_>>(),
        }),
    }
}

impl RenderBackend for GeoJsonBackend {
    fn name(&self) -> &'static str {
        "geo_json"
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<RenderOutput, RenderError> {
        let polygons = face_polygons(input.shells, input.correct_antimeridian, &input.options);
        let features: Vec<Value> = polygons
            .iter()
            .enumerate()
            .map(|(face, polygon)| {
                json!({
                    "type": "Feature",
                    "properties": { "face_index": face },
                    "geometry": geometry(polygon),
                })
            })
            .collect();

        tracing::debug!(features = features.len(), "rendered geojson");
        Ok(RenderOutput::GeoJson(json!({
            "type": "FeatureCollection",
            "features": features,
        })))
    }
}

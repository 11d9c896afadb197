//! Line collection backend: face outlines as closed polylines.

use serde::Serialize;
use ugrid_geometry::build_corrected_shells;

use crate::backend::lonlat_pairs;
use crate::{RenderBackend, RenderError, RenderInput, RenderOutput};

/// Closed polylines, one per corrected polygon.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LineCollection {
    pub lines: Vec<Vec<[f64; 2]>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LineCollectionBackend;

impl RenderBackend for LineCollectionBackend {
    fn name(&self) -> &'static str {
        "line_collection"
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<RenderOutput, RenderError> {
        if !input.correct_antimeridian {
            return Err(RenderError::Unsupported(
                "line_collection always splits antimeridian faces".into(),
            ));
        }

        let corrected = build_corrected_shells(input.shells, &input.options);
        let lines: Vec<Vec<[f64; 2]>> = corrected.iter().map(|(_, shell)| lonlat_pairs(shell)).collect();
        tracing::debug!(lines = lines.len(), "rendered line collection");
        Ok(RenderOutput::LineCollection(LineCollection { lines }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_quads;

    #[test]
    fn test_every_line_is_closed() {
        let shells = two_quads();
        let output = LineCollectionBackend.render(&RenderInput::new(&shells)).unwrap();
        let RenderOutput::LineCollection(collection) = output else {
            panic!("expected a line collection");
        };
        assert_eq!(collection.lines.len(), 3);
        for line in &collection.lines {
            assert_eq!(line.first(), line.last(), "open line: {line:?}");
            assert!(
                line.windows(2).all(|w| (w[1][0] - w[0][0]).abs() < 180.0),
                "line jumps the seam: {line:?}"
            );
        }
    }
}

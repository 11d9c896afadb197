//! Antimeridian detection and correction.
//!
//! A face is flagged when two consecutive shell vertices differ in longitude
//! by [`ANTIMERIDIAN_DELTA_DEG`] or more. Flagged faces are split into pieces
//! that no longer jump across the seam; every piece remembers the face it
//! came from.

use glam::DVec2;
use rayon::prelude::*;

use crate::split::split_at_antimeridian;
use crate::{BuildOptions, PolygonShells};

/// Longitude jump, in degrees, that marks an edge as crossing the seam.
pub const ANTIMERIDIAN_DELTA_DEG: f64 = 180.0;

/// Whether any edge of `shell` jumps across the antimeridian.
#[inline]
#[must_use]
pub fn crosses_antimeridian(shell: &[DVec2]) -> bool {
    shell
        .windows(2)
        .any(|w| (w[1].x - w[0].x).abs() >= ANTIMERIDIAN_DELTA_DEG)
}

/// Indices of the faces whose shell crosses the antimeridian, ascending.
///
/// The padded rows are scanned; padding repeats the first vertex and adds
/// no jump of its own.
pub fn antimeridian_face_indices(shells: &PolygonShells, options: &BuildOptions) -> Vec<usize> {
    let num_faces = shells.num_faces();
    let flagged: Vec<usize> = if options.use_parallel(num_faces) {
        (0..num_faces)
            .into_par_iter()
            .filter(|&face| crosses_antimeridian(shells.padded_row(face)))
            .collect()
    } else {
        (0..num_faces)
            .filter(|&face| crosses_antimeridian(shells.padded_row(face)))
            .collect()
    };

    tracing::debug!(faces = num_faces, flagged = flagged.len(), "scanned for antimeridian faces");
    flagged
}

/// Shells after antimeridian correction, with provenance.
///
/// Pieces are ordered by source face; a split face contributes several
/// consecutive pieces, every other face exactly one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrectedShells {
    shells: Vec<Vec<DVec2>>,
    original_face: Vec<usize>,
}

impl CorrectedShells {
    /// Number of pieces.
    #[inline]
    pub fn len(&self) -> usize {
        self.shells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// Closed ring of piece `k`.
    ///
    /// # Panics
    /// Panics if `k` is out of range.
    #[inline]
    pub fn shell(&self, k: usize) -> &[DVec2] {
        &self.shells[k]
    }

    /// Face that piece `k` was cut from.
    ///
    /// # Panics
    /// Panics if `k` is out of range.
    #[inline]
    pub fn original_face(&self, k: usize) -> usize {
        self.original_face[k]
    }

    /// Source face of every piece, non-decreasing.
    #[inline]
    pub fn original_faces(&self) -> &[usize] {
        &self.original_face
    }

    /// Iterate over `(source face, piece)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &[DVec2])> + '_ {
        self.original_face
            .iter()
            .copied()
            .zip(self.shells.iter().map(Vec::as_slice))
    }

    /// All pieces cut from `face`; empty if `face` is unknown.
    pub fn pieces_of(&self, face: usize) -> &[Vec<DVec2>] {
        let start = self.original_face.partition_point(|&f| f < face);
        let end = self.original_face.partition_point(|&f| f <= face);
        &self.shells[start..end]
    }
}

/// Split every antimeridian-crossing face; pass the rest through unchanged.
pub fn build_corrected_shells(shells: &PolygonShells, options: &BuildOptions) -> CorrectedShells {
    let num_faces = shells.num_faces();
    let correct_face = |face: usize| -> Vec<Vec<DVec2>> {
        let shell = shells.shell(face);
        if crosses_antimeridian(shells.padded_row(face)) {
            split_at_antimeridian(shell)
        } else {
            vec![shell.to_vec()]
        }
    };

    let per_face: Vec<Vec<Vec<DVec2>>> = if options.use_parallel(num_faces) {
        (0..num_faces).into_par_iter().map(correct_face).collect()
    } else {
        (0..num_faces).map(correct_face).collect()
    };

    let mut corrected = CorrectedShells::default();
    for (face, pieces) in per_face.into_iter().enumerate() {
        corrected
            .original_face
            .extend(std::iter::repeat_n(face, pieces.len()));
        corrected.shells.extend(pieces);
    }

    tracing::debug!(
        faces = num_faces,
        pieces = corrected.len(),
        "corrected antimeridian shells"
    );
    corrected
}

/// A face rendered as one ring or, after splitting, several.
#[derive(Clone, Debug, PartialEq)]
pub enum FacePolygon {
    Polygon(Vec<DVec2>),
    MultiPolygon(Vec<Vec<DVec2>>),
}

impl FacePolygon {
    /// The rings making up this face.
    pub fn rings(&self) -> &[Vec<DVec2>] {
        match self {
            Self::Polygon(ring) => std::slice::from_ref(ring),
            Self::MultiPolygon(rings) => rings,
        }
    }
}

/// One geometry per face, in face order.
///
/// With `correct` set, faces split at the antimeridian become
/// [`FacePolygon::MultiPolygon`]; otherwise every face is its raw shell.
pub fn face_polygons(shells: &PolygonShells, correct: bool, options: &BuildOptions) -> Vec<FacePolygon> {
    if !correct {
        return shells
            .iter()
            .map(|shell| FacePolygon::Polygon(shell.to_vec()))
            .collect();
    }

    let corrected = build_corrected_shells(shells, options);
    (0..shells.num_faces())
        .map(|face| match corrected.pieces_of(face) {
            [single] => FacePolygon::Polygon(single.clone()),
            pieces => FacePolygon::MultiPolygon(pieces.to_vec()),
        })
        .collect()
}

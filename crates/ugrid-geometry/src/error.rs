//! Geometry error types.

use ugrid_connectivity::TopologyError;
use ugrid_coords::CoordError;

/// Errors raised by the geometry engine.
///
/// None of these are transient: the computation is deterministic, so
/// retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The pole name is neither `North` nor `South`.
    #[error("pole must be \"North\" or \"South\", got {0:?}")]
    InvalidPole(String),

    /// The face crosses the equator more often than the parity test can resolve.
    #[error("face crosses the equator {crossings} times; at most 2 are supported")]
    UnsupportedTopology {
        /// Number of edges straddling the equator.
        crossings: usize,
    },

    /// The face boundary passes through both equator reference points, so
    /// no reference arc can end outside it.
    #[error("face boundary passes through both (1, 0, 0) and (-1, 0, 0)")]
    AmbiguousReference,

    /// A face was given with no edges.
    #[error("face has no edges")]
    EmptyFace,

    /// Invalid connectivity.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Invalid node coordinates.
    #[error(transparent)]
    Coord(#[from] CoordError),
}

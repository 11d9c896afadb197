//! Connectivity error types.

/// Errors raised while validating or walking face-node connectivity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// The raw table length is not a whole number of rows.
    #[error("connectivity of length {len} cannot be split into rows of width {width}")]
    ShapeMismatch {
        /// Number of raw entries.
        len: usize,
        /// Requested row width (`max_nodes_per_face`).
        width: usize,
    },

    /// A face has fewer than three valid nodes.
    #[error("face {face} has {valid} valid nodes; at least 3 are required")]
    DegenerateFace {
        /// Face index.
        face: usize,
        /// Number of valid nodes found.
        valid: usize,
    },

    /// A node index follows an absent slot, breaking the contiguous prefix.
    #[error("face {face} has a node at slot {slot} after an absent slot")]
    NonContiguousFace {
        /// Face index.
        face: usize,
        /// Offending slot within the row.
        slot: usize,
    },

    /// A raw index is negative but is not the fill value.
    #[error("face {face} slot {slot} holds invalid node index {value}")]
    InvalidNodeIndex {
        /// Face index.
        face: usize,
        /// Slot within the row.
        slot: usize,
        /// Raw value found.
        value: i64,
    },

    /// A node index does not exist in the coordinate table.
    #[error("face {face} references node {node} but the mesh has {num_nodes} nodes")]
    NodeOutOfRange {
        /// Face index.
        face: usize,
        /// Node index referenced.
        node: usize,
        /// Size of the coordinate table.
        num_nodes: usize,
    },

    /// A face index does not exist.
    #[error("face {face} requested but the mesh has {num_faces} faces")]
    FaceOutOfRange {
        /// Face index requested.
        face: usize,
        /// Number of faces in the mesh.
        num_faces: usize,
    },

    /// The valid-count array does not have one entry per face.
    #[error("expected {expected} valid counts, got {actual}")]
    CountsLength {
        /// Number of faces.
        expected: usize,
        /// Number of counts supplied.
        actual: usize,
    },

    /// A caller-provided valid count disagrees with the row contents.
    #[error("face {face} declares {declared} valid nodes but its row holds {found}")]
    CountMismatch {
        /// Face index.
        face: usize,
        /// Count supplied by the mesh.
        declared: usize,
        /// Count found in the row.
        found: usize,
    },
}

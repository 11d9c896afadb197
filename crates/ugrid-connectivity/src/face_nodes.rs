//! Fixed-width face-node rows with explicit absent slots.
//!
//! Mesh readers hand over a rectangular `num_faces × max_nodes_per_face`
//! integer table where short faces are padded with a fill value. The table
//! is converted once into [`FaceNode`] values plus a per-face valid count,
//! so nothing downstream compares against the sentinel again.

use crate::TopologyError;

/// Default fill value for missing nodes in raw connectivity tables.
pub const FILL_VALUE: i64 = i64::MIN;

/// One slot of a face row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FaceNode {
    /// Index into the mesh's node table.
    Node(usize),
    /// Unused slot past the end of a short face.
    #[default]
    Absent,
}

impl FaceNode {
    /// Node index, or `None` for an absent slot.
    #[inline]
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            FaceNode::Node(i) => Some(i),
            FaceNode::Absent => None,
        }
    }

    /// Whether the slot holds a node.
    #[inline]
    #[must_use]
    pub fn is_node(self) -> bool {
        matches!(self, FaceNode::Node(_))
    }
}

/// Rectangular face-node table with a contiguous valid prefix per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceNodeConnectivity {
    /// Row-major `num_faces * max_nodes_per_face` slots.
    slots: Vec<FaceNode>,
    max_nodes_per_face: usize,
    valid_counts: Vec<usize>,
}

impl FaceNodeConnectivity {
    /// Convert a raw sentinel-padded table.
    ///
    /// `raw` is row-major with `max_nodes_per_face` entries per face. Entries
    /// equal to `fill_value` become [`FaceNode::Absent`]; any other negative
    /// value is rejected, as is a node that follows an absent slot.
    pub fn from_padded(
        raw: &[i64],
        max_nodes_per_face: usize,
        fill_value: i64,
    ) -> Result<Self, TopologyError> {
        if max_nodes_per_face == 0 || raw.len() % max_nodes_per_face != 0 {
            return Err(TopologyError::ShapeMismatch {
                len: raw.len(),
                width: max_nodes_per_face,
            });
        }

        let num_faces = raw.len() / max_nodes_per_face;
        let mut slots = Vec::with_capacity(raw.len());
        let mut valid_counts = Vec::with_capacity(num_faces);

        for (face, row) in raw.chunks_exact(max_nodes_per_face).enumerate() {
            let mut valid = 0;
            let mut seen_absent = false;
            for (slot, &value) in row.iter().enumerate() {
                if value == fill_value {
                    seen_absent = true;
                    slots.push(FaceNode::Absent);
                    continue;
                }
                if value < 0 {
                    return Err(TopologyError::InvalidNodeIndex { face, slot, value });
                }
                if seen_absent {
                    return Err(TopologyError::NonContiguousFace { face, slot });
                }
                valid += 1;
                slots.push(FaceNode::Node(value as usize));
            }
            valid_counts.push(valid);
        }

        Ok(Self {
            slots,
            max_nodes_per_face,
            valid_counts,
        })
    }

    /// Convert a raw table and check it against the mesh's declared counts.
    pub fn from_padded_with_counts(
        raw: &[i64],
        max_nodes_per_face: usize,
        fill_value: i64,
        valid_counts: &[usize],
    ) -> Result<Self, TopologyError> {
        let table = Self::from_padded(raw, max_nodes_per_face, fill_value)?;
        if valid_counts.len() != table.num_faces() {
            return Err(TopologyError::CountsLength {
                expected: table.num_faces(),
                actual: valid_counts.len(),
            });
        }
        for (face, (&declared, &found)) in valid_counts.iter().zip(&table.valid_counts).enumerate()
        {
            if declared != found {
                return Err(TopologyError::CountMismatch {
                    face,
                    declared,
                    found,
                });
            }
        }
        Ok(table)
    }

    /// Build a table from variable-length faces.
    ///
    /// The row width is the longest face; shorter faces are padded with
    /// [`FaceNode::Absent`].
    pub fn from_faces<F: AsRef<[usize]>>(faces: &[F]) -> Self {
        let max_nodes_per_face = faces
            .iter()
            .map(|f| f.as_ref().len())
            .max()
            .unwrap_or(0);

        let mut slots = Vec::with_capacity(faces.len() * max_nodes_per_face);
        let mut valid_counts = Vec::with_capacity(faces.len());
        for face in faces {
            let nodes = face.as_ref();
            slots.extend(nodes.iter().map(|&n| FaceNode::Node(n)));
            slots.extend(std::iter::repeat_n(
                FaceNode::Absent,
                max_nodes_per_face - nodes.len(),
            ));
            valid_counts.push(nodes.len());
        }

        Self {
            slots,
            max_nodes_per_face,
            valid_counts,
        }
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.valid_counts.len()
    }

    /// Row width.
    #[inline]
    pub fn max_nodes_per_face(&self) -> usize {
        self.max_nodes_per_face
    }

    /// Valid-node count of every face.
    #[inline]
    pub fn valid_counts(&self) -> &[usize] {
        &self.valid_counts
    }

    /// Valid-node count of `face`.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn valid_count(&self, face: usize) -> usize {
        self.valid_counts[face]
    }

    /// Full padded row of `face`.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn row(&self, face: usize) -> &[FaceNode] {
        let start = face * self.max_nodes_per_face;
        &self.slots[start..start + self.max_nodes_per_face]
    }

    /// Node indices of `face`, in order, without padding.
    pub fn nodes(&self, face: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(face)[..self.valid_counts[face]]
            .iter()
            .filter_map(|n| n.index())
    }

    /// Check every referenced node against a coordinate table size.
    pub fn check_node_bounds(&self, num_nodes: usize) -> Result<(), TopologyError> {
        for face in 0..self.num_faces() {
            if let Some(node) = self.nodes(face).find(|&n| n >= num_nodes) {
                return Err(TopologyError::NodeOutOfRange {
                    face,
                    node,
                    num_nodes,
                });
            }
        }
        Ok(())
    }
}

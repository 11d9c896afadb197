//! Closing faces into rings: repeat each face's first node after its last.

use crate::{FaceNode, FaceNodeConnectivity, TopologyError};

/// Minimum number of valid nodes a face needs to enclose an area.
pub const MIN_FACE_NODES: usize = 3;

/// Face rows one slot wider than the source, each closed back to its first node.
///
/// Row `i` holds its valid nodes followed by the first node again at slot
/// `valid_count[i]`; later slots stay [`FaceNode::Absent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosedFaceNodes {
    slots: Vec<FaceNode>,
    width: usize,
    closed_counts: Vec<usize>,
}

impl ClosedFaceNodes {
    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.closed_counts.len()
    }

    /// Row width (`max_nodes_per_face + 1`).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Meaningful length of every row (`valid_count + 1`).
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
    pub fn row(&self, face: usize) -> &[FaceNode] {
        let start = face * self.width;
        &self.slots[start..start + self.width]
    }

    /// Closed ring of node indices for `face`; first and last are equal.
    pub fn ring(&self, face: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(face)[..self.closed_counts[face]]
            .iter()
            .filter_map(|n| n.index())
    }
}

/// Close every face of `faces`.
///
/// Fails with [`TopologyError::DegenerateFace`] on the first face with fewer
/// than [`MIN_FACE_NODES`] valid nodes.
pub fn close_face_nodes(faces: &FaceNodeConnectivity) -> Result<ClosedFaceNodes, TopologyError> {
    let width = faces.max_nodes_per_face() + 1;
    let mut slots = Vec::with_capacity(faces.num_faces() * width);
    let mut closed_counts = Vec::with_capacity(faces.num_faces());

    for face in 0..faces.num_faces() {
        let valid = faces.valid_count(face);
        if valid < MIN_FACE_NODES {
            return Err(TopologyError::DegenerateFace { face, valid });
        }

        let row = faces.row(face);
        slots.extend_from_slice(&row[..valid]);
        slots.push(row[0]);
        slots.extend(std::iter::repeat_n(FaceNode::Absent, width - valid - 1));
        closed_counts.push(valid + 1);
    }

    Ok(ClosedFaceNodes {
        slots,
        width,
        closed_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FILL_VALUE;

    #[test]
    fn test_closing_repeats_first_node() {
        let faces = FaceNodeConnectivity::from_faces(&[[4, 7, 9]]);
        let closed = close_face_nodes(&faces).unwrap();
        assert_eq!(closed.width(), 4);
        assert_eq!(closed.ring(0).collect::<Vec<_>>(), vec![4, 7, 9, 4]);
    }

    #[test]
    fn test_short_face_closes_before_padding() {
        let raw = [0, 1, 2, 3, 4, 5, 6, FILL_VALUE];
        let faces = FaceNodeConnectivity::from_padded(&raw, 4, FILL_VALUE).unwrap();
        let closed = close_face_nodes(&faces).unwrap();

        assert_eq!(closed.closed_counts(), &[5, 4]);
        assert_eq!(
            closed.row(1),
            &[
                FaceNode::Node(4),
                FaceNode::Node(5),
                FaceNode::Node(6),
                FaceNode::Node(4),
                FaceNode::Absent,
            ]
        );
    }

    #[test]
    fn test_every_ring_is_closed() {
        let faces = FaceNodeConnectivity::from_faces(&[vec![0, 1, 2], vec![1, 2, 3, 4], vec![5, 6, 7, 8, 9]]);
        let closed = close_face_nodes(&faces).unwrap();
        for face in 0..closed.num_faces() {
            let ring: Vec<_> = closed.ring(face).collect();
            assert_eq!(ring.len(), closed.closed_count(face));
            assert_eq!(ring.first(), ring.last(), "face {face} is not closed");
        }
    }

    #[test]
    fn test_degenerate_face_is_rejected() {
        let faces = FaceNodeConnectivity::from_faces(&[vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(
            close_face_nodes(&faces).unwrap_err(),
            TopologyError::DegenerateFace { face: 1, valid: 2 }
        );
    }
}

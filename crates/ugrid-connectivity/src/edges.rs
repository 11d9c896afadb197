//! Undirected edge interning and per-face Cartesian edge lists.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::closing::MIN_FACE_NODES;
use crate::{FaceNodeConnectivity, TopologyError};

/// Unique undirected edges of a mesh and the edges bounding each face.
///
/// Edge ids are assigned in first-encounter order (face by face, edge by
/// edge), so the numbering depends only on the connectivity table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeConnectivity {
    edge_nodes: Vec<[usize; 2]>,
    face_edges: Vec<Vec<usize>>,
}

impl EdgeConnectivity {
    /// Intern every edge of every face.
    ///
    /// Edge `(a, b)` and `(b, a)` share one id; its stored node pair is
    /// sorted ascending.
    pub fn build(faces: &FaceNodeConnectivity) -> Result<Self, TopologyError> {
        let mut ids: FxHashMap<[usize; 2], usize> = FxHashMap::default();
        let mut edge_nodes = Vec::new();
        let mut face_edges = Vec::with_capacity(faces.num_faces());

        for face in 0..faces.num_faces() {
            let valid = faces.valid_count(face);
            if valid < MIN_FACE_NODES {
                return Err(TopologyError::DegenerateFace { face, valid });
            }

            let nodes: Vec<usize> = faces.nodes(face).collect();
            let mut edges = Vec::with_capacity(valid);
            for (i, &a) in nodes.iter().enumerate() {
                let b = nodes[(i + 1) % valid];
                let key = if a <= b { [a, b] } else { [b, a] };
                let id = *ids.entry(key).or_insert_with(|| {
                    edge_nodes.push(key);
                    edge_nodes.len() - 1
                });
                edges.push(id);
            }
            face_edges.push(edges);
        }

        tracing::debug!(
            faces = faces.num_faces(),
            edges = edge_nodes.len(),
            "built edge connectivity"
        );

        Ok(Self {
            edge_nodes,
            face_edges,
        })
    }

    /// Number of unique edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edge_nodes.len()
    }

    /// Sorted node pair of every edge, indexed by edge id.
    #[inline]
    pub fn edge_nodes(&self) -> &[[usize; 2]] {
        &self.edge_nodes
    }

    /// Edge ids bounding `face`, in ring order.
    ///
    /// # Panics
    /// Panics if `face` is out of range.
    #[inline]
    pub fn face_edges(&self, face: usize) -> &[usize] {
        &self.face_edges[face]
    }
}

/// Edges of `face` as Cartesian endpoint pairs, in ring order.
///
/// Edge `k` runs from node `k` to node `k + 1`, the last one closing back to
/// the first node. `xyz` is the mesh's unit-sphere node table.
pub fn face_edges_cartesian(
    faces: &FaceNodeConnectivity,
    face: usize,
    xyz: &[DVec3],
) -> Result<Vec<[DVec3; 2]>, TopologyError> {
    if face >= faces.num_faces() {
        return Err(TopologyError::FaceOutOfRange {
            face,
            num_faces: faces.num_faces(),
        });
    }

    let valid = faces.valid_count(face);
    if valid < MIN_FACE_NODES {
        return Err(TopologyError::DegenerateFace { face, valid });
    }

    let points = faces
        .nodes(face)
        .map(|node| {
            xyz.get(node).copied().ok_or(TopologyError::NodeOutOfRange {
                face,
                node,
                num_nodes: xyz.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((0..valid)
        .map(|i| [points[i], points[(i + 1) % valid]])
        .collect())
}

//! Face-node connectivity for unstructured spherical meshes.
//!
//! Faces are stored as fixed-width rows whose unused slots are explicitly
//! [`FaceNode::Absent`] rather than a magic sentinel. This crate closes faces
//! into rings, interns undirected edges, and gathers per-face Cartesian edge
//! lists for the geometry engine.

mod closing;
mod edges;
mod error;
mod face_nodes;

pub use closing::{ClosedFaceNodes, MIN_FACE_NODES, close_face_nodes};
pub use edges::{EdgeConnectivity, face_edges_cartesian};
pub use error::TopologyError;
pub use face_nodes::{FILL_VALUE, FaceNode, FaceNodeConnectivity};

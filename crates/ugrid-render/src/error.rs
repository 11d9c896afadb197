//! Render error types.

use ugrid_geometry::GeometryError;

/// Errors that can occur while rendering mesh polygons.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Building the shells failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The backend cannot honour the request.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Failed to encode the output as JSON.
    #[error("failed to serialize render output: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Coordinate error types.

/// Errors raised while interpreting node coordinate arrays.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordError {
    /// Longitude and latitude arrays must be parallel.
    #[error("longitude array has {lon} entries but latitude array has {lat}")]
    LengthMismatch {
        /// Length of the longitude slice.
        lon: usize,
        /// Length of the latitude slice.
        lat: usize,
    },

    /// A zero-length vector has no direction on the sphere.
    #[error("cannot convert the zero vector to longitude/latitude")]
    ZeroVector,
}

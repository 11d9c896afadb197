//! Node coordinates on the unit sphere: lon/lat ↔ Cartesian conversion,
//! longitude normalization, and a borrowed view over a mesh's node table.

mod conversion;
mod error;
mod longitude;
mod node_coords;

pub use conversion::{lonlat_deg_to_xyz, lonlat_rad_to_xyz, xyz_to_lonlat_deg, xyz_to_lonlat_rad};
pub use error::CoordError;
pub use longitude::{needs_longitude_normalization, normalize_longitude_deg};
pub use node_coords::NodeCoords;

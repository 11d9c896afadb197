//! Borrowed read-only view over a mesh's node coordinate arrays.

use std::borrow::Cow;

use glam::DVec3;

use crate::conversion::lonlat_deg_to_xyz;
use crate::longitude::{needs_longitude_normalization, normalize_longitude_deg};
use crate::CoordError;

/// Parallel longitude/latitude arrays (degrees) owned by the mesh.
///
/// The view never copies or mutates the arrays; derived data such as
/// normalized longitudes or Cartesian positions are freshly allocated.
#[derive(Clone, Copy, Debug)]
pub struct NodeCoords<'a> {
    lon: &'a [f64],
    lat: &'a [f64],
}

impl<'a> NodeCoords<'a> {
    /// Wrap two parallel coordinate slices.
    pub fn new(lon: &'a [f64], lat: &'a [f64]) -> Result<Self, CoordError> {
        if lon.len() != lat.len() {
            return Err(CoordError::LengthMismatch {
                lon: lon.len(),
                lat: lat.len(),
            });
        }
        Ok(Self { lon, lat })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.lon.len()
    }

    /// Whether the mesh has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Raw longitudes as stored by the mesh.
    #[inline]
    pub fn lon(&self) -> &'a [f64] {
        self.lon
    }

    /// Raw latitudes as stored by the mesh.
    #[inline]
    pub fn lat(&self) -> &'a [f64] {
        self.lat
    }

    /// `(lon, lat)` of node `i`, or `None` when out of range.
    #[inline]
    pub fn lonlat(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.lon.get(i)?, *self.lat.get(i)?))
    }

    /// Unit-sphere position of node `i`, or `None` when out of range.
    #[inline]
    pub fn xyz(&self, i: usize) -> Option<DVec3> {
        self.lonlat(i).map(|(lon, lat)| lonlat_deg_to_xyz(lon, lat))
    }

    /// Longitudes in `[-180, 180)` when the dataset exceeds 180.
    ///
    /// Borrows the original slice when no value is above 180, so datasets
    /// already in the signed convention pay nothing.
    pub fn normalized_longitudes(&self) -> Cow<'a, [f64]> {
        if needs_longitude_normalization(self.lon) {
            Cow::Owned(self.lon.iter().map(|&x| normalize_longitude_deg(x)).collect())
        } else {
            Cow::Borrowed(self.lon)
        }
    }

    /// Unit-sphere positions of every node.
    pub fn to_xyz(&self) -> Vec<DVec3> {
        self.lon
            .iter()
            .zip(self.lat)
            .map(|(&lon, &lat)| lonlat_deg_to_xyz(lon, lat))
            .collect()
    }
}

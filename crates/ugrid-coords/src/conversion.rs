//! Longitude/latitude ↔ unit-sphere Cartesian conversion.
//!
//! The Cartesian frame has `+z` through the north pole and `+x` through
//! `(lon = 0, lat = 0)`:
//!
//! ```text
//! x = cos(lat) * cos(lon)
//! y = cos(lat) * sin(lon)
//! z = sin(lat)
//! ```

use std::f64::consts::PI;

use glam::DVec3;

use crate::CoordError;

/// Convert a longitude/latitude pair in radians to a unit vector.
#[inline]
#[must_use]
pub fn lonlat_rad_to_xyz(lon: f64, lat: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Convert a longitude/latitude pair in degrees to a unit vector.
#[inline]
#[must_use]
pub fn lonlat_deg_to_xyz(lon: f64, lat: f64) -> DVec3 {
    lonlat_rad_to_xyz(lon.to_radians(), lat.to_radians())
}

/// Convert a Cartesian point to `(lon, lat)` in radians.
///
/// The input does not need to be unit length. Longitude lies in `[-π, π)`,
/// latitude in `[-π/2, π/2]`.
pub fn xyz_to_lonlat_rad(p: DVec3) -> Result<(f64, f64), CoordError> {
    let len = p.length();
    if len == 0.0 || !len.is_finite() {
        return Err(CoordError::ZeroVector);
    }
    let dir = p / len;

    let mut lon = dir.y.atan2(dir.x);
    if lon >= PI {
        lon -= 2.0 * PI;
    }
    // Rounding can push |z| a hair past 1.
    let lat = dir.z.clamp(-1.0, 1.0).asin();

    Ok((lon, lat))
}

/// Convert a Cartesian point to `(lon, lat)` in degrees.
///
/// Longitude lies in `[-180, 180)`.
pub fn xyz_to_lonlat_deg(p: DVec3) -> Result<(f64, f64), CoordError> {
    let (lon, lat) = xyz_to_lonlat_rad(p)?;
    let mut lon_deg = lon.to_degrees();
    if lon_deg >= 180.0 {
        lon_deg -= 360.0;
    }
    Ok((lon_deg, lat.to_degrees()))
}

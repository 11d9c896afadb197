//! Longitude normalization into the `[-180, 180)` degree range.

/// Wrap a longitude in degrees into `[-180, 180)`.
///
/// Uses a Euclidean remainder so negative inputs wrap the same way as
/// positive ones: `-190` becomes `170`, `180` becomes `-180`.
#[inline]
#[must_use]
pub fn normalize_longitude_deg(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Whether a longitude array needs wrapping before shells are built.
///
/// Only the maximum is inspected: a dataset stored in `[0, 360)` is detected
/// by any value above 180. Datasets already in `[-180, 180]` are left alone.
#[must_use]
pub fn needs_longitude_normalization(lon: &[f64]) -> bool {
    lon.iter().any(|&x| x > 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_in_range_are_unchanged() {
        for &lon in &[-180.0, -90.0, 0.0, 45.5, 179.999] {
            assert_eq!(normalize_longitude_deg(lon), lon);
        }
    }

    #[test]
    fn test_positive_overflow_wraps_negative() {
        assert_eq!(normalize_longitude_deg(180.0), -180.0);
        assert_eq!(normalize_longitude_deg(190.0), -170.0);
        assert_eq!(normalize_longitude_deg(359.0), -1.0);
        assert_eq!(normalize_longitude_deg(360.0), 0.0);
    }

    #[test]
    fn test_negative_overflow_wraps_positive() {
        assert_eq!(normalize_longitude_deg(-190.0), 170.0);
        assert_eq!(normalize_longitude_deg(-540.0), -180.0);
    }

    #[test]
    fn test_detection_uses_max_value() {
        assert!(!needs_longitude_normalization(&[-180.0, 0.0, 180.0]));
        assert!(needs_longitude_normalization(&[0.0, 10.0, 181.0]));
        assert!(!needs_longitude_normalization(&[]));
    }
}

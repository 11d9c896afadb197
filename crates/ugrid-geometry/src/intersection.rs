//! Great-circle arc intersection on the unit sphere.
//!
//! An arc is a pair of unit vectors joined by the shorter great-circle path.
//! Every comparison uses the absolute tolerance [`ERROR_TOLERANCE`].

use glam::DVec3;

/// Absolute tolerance for on-arc and coincidence tests.
pub const ERROR_TOLERANCE: f64 = 1e-8;

/// Angle between two vectors, robust near 0 and π.
#[inline]
fn angle_between(u: DVec3, v: DVec3) -> f64 {
    u.cross(v).length().atan2(u.dot(v))
}

/// Whether `p` lies on the minor arc from `arc[0]` to `arc[1]`.
///
/// `p` must be within tolerance of the arc's great-circle plane and the two
/// angles `arc[0]..p` and `p..arc[1]` must add up to the arc's span. A
/// zero-length arc only contains its endpoint.
#[must_use]
pub fn point_within_gca(p: DVec3, arc: [DVec3; 2]) -> bool {
    let [a, b] = arc;
    let normal = a.cross(b);
    let len = normal.length();
    if len <= ERROR_TOLERANCE {
        return (p - a).length() <= ERROR_TOLERANCE || (p - b).length() <= ERROR_TOLERANCE;
    }
    if (normal / len).dot(p).abs() > ERROR_TOLERANCE {
        return false;
    }
    angle_between(a, p) + angle_between(p, b) - angle_between(a, b) <= ERROR_TOLERANCE
}

/// Flip `v` so its largest-magnitude component is positive.
fn canonical_sign(v: DVec3) -> DVec3 {
    let abs = v.abs();
    let dominant = if abs.x >= abs.y && abs.x >= abs.z {
        v.x
    } else if abs.y >= abs.z {
        v.y
    } else {
        v.z
    };
    if dominant < 0.0 { -v } else { v }
}

fn lexicographic(a: DVec3, b: DVec3) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x)
        .then(a.y.total_cmp(&b.y))
        .then(a.z.total_cmp(&b.z))
}

/// Replace `p` with the nearest arc endpoint within tolerance, if any.
fn snap_to_endpoint(p: DVec3, a: [DVec3; 2], b: [DVec3; 2]) -> DVec3 {
    [a[0], a[1], b[0], b[1]]
        .into_iter()
        .map(|e| ((e - p).length(), e))
        .filter(|&(d, _)| d <= ERROR_TOLERANCE)
        .min_by(|x, y| x.0.total_cmp(&y.0).then(lexicographic(x.1, y.1)))
        .map_or(p, |(_, e)| e)
}

/// Intersection of arcs lying on the same great circle.
///
/// Any endpoint of one arc that lies on the other is shared; the
/// lexicographically smallest is returned so the result does not depend on
/// argument order.
fn coincident_intersection(a: [DVec3; 2], b: [DVec3; 2]) -> Option<DVec3> {
    a.iter()
        .copied()
        .filter(|&p| point_within_gca(p, b))
        .chain(b.iter().copied().filter(|&p| point_within_gca(p, a)))
        .min_by(|&x, &y| lexicographic(x, y))
}

/// Intersection point of two great-circle arcs, if they meet.
///
/// The great circles through `a` and `b` meet in two antipodal points; the
/// one lying on both minor arcs is returned. The result is the same for
/// `(a, b)` and `(b, a)`, and an arc endpoint within tolerance of the result
/// is returned exactly.
///
/// ```
/// use glam::DVec3;
/// use ugrid_geometry::gca_gca_intersection;
///
/// let equator = [DVec3::new(1.0, -1.0, 0.0).normalize(), DVec3::new(1.0, 1.0, 0.0).normalize()];
/// let meridian = [DVec3::new(1.0, 0.0, -1.0).normalize(), DVec3::new(1.0, 0.0, 1.0).normalize()];
/// let p = gca_gca_intersection(equator, meridian).unwrap();
/// assert!((p - DVec3::X).length() < 1e-12);
/// ```
#[must_use]
pub fn gca_gca_intersection(a: [DVec3; 2], b: [DVec3; 2]) -> Option<DVec3> {
    let na = a[0].cross(a[1]);
    let nb = b[0].cross(b[1]);
    if na.length() <= ERROR_TOLERANCE || nb.length() <= ERROR_TOLERANCE {
        return coincident_intersection(a, b);
    }

    let line = na.normalize().cross(nb.normalize());
    if line.length() <= ERROR_TOLERANCE {
        return coincident_intersection(a, b);
    }

    let candidate = canonical_sign(line.normalize());
    [candidate, -candidate]
        .into_iter()
        .find(|&p| point_within_gca(p, a) && point_within_gca(p, b))
        .map(|p| snap_to_endpoint(p, a, b))
}

//! Pole-in-face containment by ray-crossing parity.
//!
//! A reference arc runs from the pole down the `lon = 0` meridian to
//! [`EQUATOR_REFERENCE`]. A face contains the pole when that arc crosses the
//! face boundary an odd number of times. An arc passing through a face
//! vertex is counted with a half-open rule, so the vertex counts once or not
//! at all.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::GeometryError;
use crate::intersection::{ERROR_TOLERANCE, gca_gca_intersection, point_within_gca};

/// Equator point at which every reference arc ends.
pub const EQUATOR_REFERENCE: DVec3 = DVec3::X;

/// Normal of the meridian plane holding every reference arc.
const MERIDIAN_NORMAL: DVec3 = DVec3::Y;

/// One of the two geographic poles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pole {
    North,
    South,
}

impl Pole {
    /// Unit vector of the pole: `(0, 0, 1)` or `(0, 0, -1)`.
    #[inline]
    #[must_use]
    pub fn point(self) -> DVec3 {
        match self {
            Self::North => DVec3::Z,
            Self::South => DVec3::NEG_Z,
        }
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "North",
            Self::South => "South",
        })
    }
}

impl FromStr for Pole {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "North" => Ok(Self::North),
            "South" => Ok(Self::South),
            other => Err(GeometryError::InvalidPole(other.to_owned())),
        }
    }
}

/// Hemisphere a face lies in, judged from its edge endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolygonLocation {
    /// Every endpoint has `z > 0`.
    North,
    /// Every endpoint has `z < 0`.
    South,
    /// Anything else, including faces touching the equator.
    Equator,
}

/// Classify a face by the sign of its endpoints' `z`.
#[must_use]
pub fn classify_polygon_location(edges: &[[DVec3; 2]]) -> PolygonLocation {
    let mut points = edges.iter().flatten();
    if points.clone().all(|p| p.z > 0.0) {
        PolygonLocation::North
    } else if points.all(|p| p.z < 0.0) {
        PolygonLocation::South
    } else {
        PolygonLocation::Equator
    }
}

/// Number of edges whose endpoints lie strictly on opposite sides of the equator.
#[must_use]
pub fn count_equator_crossings(edges: &[[DVec3; 2]]) -> usize {
    edges
        .iter()
        .filter(|[a, b]| (a.z > 0.0 && b.z < 0.0) || (a.z < 0.0 && b.z > 0.0))
        .count()
}

/// Whether a reference-arc hit at `p` counts as a crossing of `edge`.
///
/// A hit at an edge endpoint counts only when the other endpoint lies
/// strictly on the positive side of the meridian plane. Of the two edges
/// meeting at a vertex on the arc, both or neither count when the boundary
/// only touches the arc, and exactly one when it passes through.
fn counts_as_crossing(p: DVec3, [a, b]: [DVec3; 2]) -> bool {
    let at = |e: DVec3| (p - e).length() <= ERROR_TOLERANCE;
    let positive = |e: DVec3| e.dot(MERIDIAN_NORMAL) > ERROR_TOLERANCE;
    match (at(a), at(b)) {
        (true, true) => false,
        (true, false) => positive(b),
        (false, true) => positive(a),
        (false, false) => true,
    }
}

/// Odd number of crossings on the arc from `pole_point` to `reference`, or
/// the arc hits the pole itself.
fn crossing_parity<'a>(
    pole_point: DVec3,
    reference: DVec3,
    edges: impl Iterator<Item = &'a [DVec3; 2]>,
) -> bool {
    let arc = [pole_point, reference];
    let mut crossings = 0usize;
    for &edge in edges {
        let Some(p) = gca_gca_intersection(arc, edge) else {
            continue;
        };
        if (p - pole_point).length() <= ERROR_TOLERANCE {
            return true;
        }
        if counts_as_crossing(p, edge) {
            crossings += 1;
        }
    }
    crossings % 2 == 1
}

/// Equator endpoint of the reference arcs for an equator-straddling face.
///
/// [`EQUATOR_REFERENCE`] unless the boundary passes through it; then its
/// antipode on the `lon = 180` meridian.
fn equator_reference(edges: &[[DVec3; 2]]) -> Result<DVec3, GeometryError> {
    let touches = |point: DVec3| edges.iter().any(|&edge| point_within_gca(point, edge));
    [EQUATOR_REFERENCE, -EQUATOR_REFERENCE]
        .into_iter()
        .find(|&point| !touches(point))
        .ok_or(GeometryError::AmbiguousReference)
}

/// Whether `pole` lies inside the face bounded by `edges`.
///
/// `edges` is the face's closed edge loop as Cartesian endpoint pairs. A face
/// entirely in the opposite hemisphere never contains the pole.
///
/// A face straddling the equator may cross it at most twice. Its northern
/// edges are tested against the arc from the north pole, its southern edges
/// against the arc from the south pole, both ending at the same equator
/// point. Each parity says whether that pole and the equator point lie on
/// different sides of the boundary, so odd parity on both arcs means the
/// equator point is inside the face and neither pole is. A face holding a
/// pole and the equator point together is beyond this test.
///
/// # Errors
/// [`GeometryError::EmptyFace`] for an empty edge list,
/// [`GeometryError::UnsupportedTopology`] for an equator-straddling face
/// with more than two crossings, and [`GeometryError::AmbiguousReference`]
/// when its boundary passes through both `(1, 0, 0)` and `(-1, 0, 0)`.
pub fn pole_point_inside_polygon(pole: Pole, edges: &[[DVec3; 2]]) -> Result<bool, GeometryError> {
    if edges.is_empty() {
        return Err(GeometryError::EmptyFace);
    }

    match (pole, classify_polygon_location(edges)) {
        (Pole::North, PolygonLocation::North) | (Pole::South, PolygonLocation::South) => {
            Ok(crossing_parity(pole.point(), EQUATOR_REFERENCE, edges.iter()))
        }
        (_, PolygonLocation::Equator) => {
            let crossings = count_equator_crossings(edges);
            if crossings > 2 {
                return Err(GeometryError::UnsupportedTopology { crossings });
            }
            let reference = equator_reference(edges)?;
            let north = crossing_parity(
                Pole::North.point(),
                reference,
                edges.iter().filter(|e| e.iter().any(|p| p.z > 0.0)),
            );
            let south = crossing_parity(
                Pole::South.point(),
                reference,
                edges.iter().filter(|e| e.iter().any(|p| p.z < 0.0)),
            );
            Ok(match pole {
                Pole::North => north && !south,
                Pole::South => south && !north,
            })
        }
        _ => Ok(false),
    }
}

/// [`pole_point_inside_polygon`] with the pole given by name.
///
/// # Errors
/// [`GeometryError::InvalidPole`] unless `pole` is `"North"` or `"South"`,
/// plus everything [`pole_point_inside_polygon`] returns.
pub fn pole_point_inside_polygon_named(
    pole: &str,
    edges: &[[DVec3; 2]],
) -> Result<bool, GeometryError> {
    pole_point_inside_polygon(pole.parse()?, edges)
}

//! Splitting a `(lon, lat)` ring where it crosses the ±180° meridian.
//!
//! The ring is first unwrapped so that successive longitudes never jump by
//! more than 180°. Two situations remain:
//!
//! - The unwrapped ring closes with a net ±360° offset: it winds around a
//!   pole. It is cut once at the seam and closed along the pole's latitude.
//! - Otherwise it straddles `lon = ±180` in unwrapped space. It is cut along
//!   that line into pieces on either side, and the pieces beyond the seam are
//!   shifted back by 360°.
//!
//! Latitudes at the cut are linearly interpolated in `(lon, lat)` space.
//!
//! An edge spanning exactly 180° of longitude runs over a pole. Before
//! unwrapping it is replaced by a detour up to the pole, along it, and back
//! down, so no edge is left whose direction round the globe is ambiguous.

use glam::DVec2;
use ugrid_coords::normalize_longitude_deg;

/// Longitude of the seam in degrees.
const SEAM: f64 = 180.0;

/// Tolerance for comparing positions along the seam and for discarding
/// zero-area slivers.
const EPS: f64 = 1e-12;

/// Split a closed `(lon, lat)` ring at the antimeridian.
///
/// Returns one or more closed rings whose successive longitudes never jump
/// by 180° or more. Each output ring keeps the input's winding direction.
/// A ring that only touches the seam comes back unwrapped in one piece, with
/// its seam vertices written as whichever of ±180 keeps it continuous.
pub fn split_at_antimeridian(shell: &[DVec2]) -> Vec<Vec<DVec2>> {
    let ring = open_ring(shell);
    if ring.len() < 3 {
        return vec![shell.to_vec()];
    }
    let ring = expand_pole_edges(&ring);

    let (unwrapped, net_offset) = unwrap_longitudes(&ring);
    if net_offset != 0.0 {
        return vec![split_polar(&unwrapped, net_offset)];
    }

    split_straddling(&unwrapped).unwrap_or_else(|| vec![close(unwrapped)])
}

/// Drop repeated consecutive vertices and the closing vertex.
fn open_ring(shell: &[DVec2]) -> Vec<DVec2> {
    let mut ring: Vec<DVec2> = Vec::with_capacity(shell.len());
    for &p in shell {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.last() == ring.first() {
        ring.pop();
    }
    ring
}

fn close(mut ring: Vec<DVec2>) -> Vec<DVec2> {
    if let Some(first) = ring.first().copied() {
        if ring.last() != Some(&first) {
            ring.push(first);
        }
    }
    ring
}

fn wrap_step(delta: f64) -> f64 {
    if delta > SEAM {
        -360.0
    } else if delta < -SEAM {
        360.0
    } else {
        0.0
    }
}

/// Whether the edge from `a` to `b` spans exactly half a turn of longitude.
fn is_pole_edge(a: DVec2, b: DVec2) -> bool {
    ((b.x - a.x).abs() - SEAM).abs() <= EPS
}

/// Replace every half-turn edge of an open ring with a detour through the
/// pole it passes.
///
/// The pole is the one on the edge's side of the equator, or the ring's side
/// when the endpoints are antipodal. The detour walks along the pole in 90°
/// steps, eastward or westward, whichever moves the ring's net winding
/// towards zero.
fn expand_pole_edges(ring: &[DVec2]) -> Vec<DVec2> {
    let n = ring.len();
    let edge = |i: usize| (ring[i], ring[(i + 1) % n]);
    if !(0..n).map(edge).any(|(a, b)| is_pole_edge(a, b)) {
        return ring.to_vec();
    }

    let mut winding: f64 = (0..n)
        .map(edge)
        .filter(|&(a, b)| !is_pole_edge(a, b))
        .map(|(a, b)| {
            let delta = b.x - a.x;
            delta + wrap_step(delta)
        })
        .sum();
    let ring_lat_sum: f64 = ring.iter().map(|p| p.y).sum();

    let mut out = Vec::with_capacity(4 * n);
    for (a, b) in (0..n).map(edge) {
        out.push(a);
        if !is_pole_edge(a, b) {
            continue;
        }

        let step = if winding > 0.0 { -SEAM } else { SEAM };
        winding += step;

        let lat_sum = a.y + b.y;
        let north = if lat_sum.abs() > EPS { lat_sum > 0.0 } else { ring_lat_sum >= 0.0 };
        let pole_lat = if north { 90.0 } else { -90.0 };
        out.extend([
            DVec2::new(a.x, pole_lat),
            DVec2::new(normalize_longitude_deg(a.x + 0.5 * step), pole_lat),
            DVec2::new(b.x, pole_lat),
        ]);
    }

    open_ring(&out)
}

/// Make longitudes continuous along the ring.
///
/// Returns the unwrapped open ring and the longitude offset picked up by the
/// closing edge: zero for an ordinary ring, ±360 for a ring around a pole.
fn unwrap_longitudes(ring: &[DVec2]) -> (Vec<DVec2>, f64) {
    let mut offset = 0.0;
    let mut out = Vec::with_capacity(ring.len());
    out.push(ring[0]);
    for pair in ring.windows(2) {
        offset += wrap_step(pair[1].x - pair[0].x);
        out.push(DVec2::new(pair[1].x + offset, pair[1].y));
    }
    let last = ring[ring.len() - 1];
    let net = offset + wrap_step(ring[0].x - last.x);
    (out, net)
}

fn signed_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    0.5 * twice
}

fn dedup_consecutive(ring: &mut Vec<DVec2>) {
    ring.dedup_by(|b, a| (*a - *b).length() <= EPS);
}

/// Close a ring around a pole through the pole's latitude.
fn split_polar(unwrapped: &[DVec2], net: f64) -> Vec<DVec2> {
    let dir = net.signum();
    let seam = dir * SEAM;
    let n = unwrapped.len();
    let lap = DVec2::new(net, 0.0);

    // How far past the seam a point is, in the direction of travel.
    let beyond = |p: DVec2| (p.x - seam) * dir;

    // The ring followed by its first vertex one lap later is guaranteed to
    // reach the seam.
    let path_point = |i: usize| if i < n { unwrapped[i] } else { unwrapped[0] + lap };
    let cut_index = (0..=n).find(|&i| beyond(path_point(i)) >= 0.0).unwrap_or(0);
    let cut = if cut_index == 0 {
        path_point(0)
    } else {
        let a = path_point(cut_index - 1);
        let b = path_point(cut_index);
        let t = beyond(a) / (beyond(a) - beyond(b));
        DVec2::new(seam, a.y + t * (b.y - a.y))
    };

    let mut out = Vec::with_capacity(n + 9);
    out.push(cut);
    out.extend_from_slice(&unwrapped[cut_index.min(n)..]);
    out.extend(unwrapped[..cut_index.min(n)].iter().map(|&p| p + lap));
    out.push(cut + lap);

    // Start the lap at -180 when travelling east, +180 when travelling west.
    let shift = DVec2::new(-2.0 * seam, 0.0);
    for p in &mut out {
        *p += shift;
    }

    let lat_sum: f64 = unwrapped.iter().map(|p| p.y).sum();
    let pole_lat = if lat_sum >= 0.0 { 90.0 } else { -90.0 };

    // Walk back along the pole in 90° steps so no edge spans 180°.
    let end_lon = out[out.len() - 1].x;
    for k in 0..=4 {
        out.push(DVec2::new(end_lon - dir * 90.0 * k as f64, pole_lat));
    }
    out.push(out[0]);

    dedup_consecutive(&mut out);
    out
}

/// Split a ring that straddles `lon = ±180` in unwrapped space.
///
/// Returns `None` when the ring does not reach past the seam.
fn split_straddling(unwrapped: &[DVec2]) -> Option<Vec<Vec<DVec2>>> {
    let min = unwrapped.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max = unwrapped.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);

    // Work against +180 only; a ring past -180 is mirrored first.
    let mirrored = if max > SEAM {
        false
    } else if min < -SEAM {
        true
    } else {
        return None;
    };

    let mut ring: Vec<DVec2> = unwrapped
        .iter()
        .map(|&p| if mirrored { DVec2::new(-p.x, p.y) } else { p })
        .collect();
    let input_ccw = signed_area(unwrapped) >= 0.0;
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }

    let (near, far) = split_ccw(&ring);

    let mut pieces = Vec::with_capacity(near.len() + far.len());
    let shifted = near
        .into_iter()
        .map(|p| (p, 0.0))
        .chain(far.into_iter().map(|p| (p, -2.0 * SEAM)));
    for (mut piece, shift) in shifted {
        for v in &mut piece {
            v.x += shift;
            if mirrored {
                v.x = -v.x;
            }
        }
        // Pieces come out counter-clockwise; mirroring flips that.
        if mirrored == input_ccw {
            piece.reverse();
        }
        if let Some(piece) = finish_piece(piece) {
            pieces.push(piece);
        }
    }

    (!pieces.is_empty()).then_some(pieces)
}

/// Close a piece, or drop it if it has collapsed to a sliver.
fn finish_piece(mut piece: Vec<DVec2>) -> Option<Vec<DVec2>> {
    dedup_consecutive(&mut piece);
    let mut ring = open_ring(&piece);
    dedup_consecutive(&mut ring);
    if ring.len() < 3 || signed_area(&ring).abs() <= EPS {
        return None;
    }
    Some(close(ring))
}

/// Run of ring vertices between two consecutive seam crossings.
struct Chain {
    far: bool,
    /// Entry crossing, the vertices on one side, exit crossing.
    points: Vec<DVec2>,
}

fn is_far(p: DVec2) -> bool {
    p.x > SEAM
}

fn seam_crossing(a: DVec2, b: DVec2) -> DVec2 {
    let t = (SEAM - a.x) / (b.x - a.x);
    DVec2::new(SEAM, a.y + t * (b.y - a.y))
}

/// Cut a counter-clockwise ring along `lon = 180`.
///
/// Returns the pieces with `lon <= 180` and those with `lon > 180`, each
/// open (closing vertex not repeated) and counter-clockwise.
fn split_ccw(ring: &[DVec2]) -> (Vec<Vec<DVec2>>, Vec<Vec<DVec2>>) {
    let n = ring.len();
    let crosses = |k: usize| is_far(ring[k]) != is_far(ring[(k + 1) % n]);

    let Some(start) = (0..n).find(|&k| crosses(k)) else {
        return if is_far(ring[0]) {
            (Vec::new(), vec![ring.to_vec()])
        } else {
            (vec![ring.to_vec()], Vec::new())
        };
    };

    let mut chains = Vec::new();
    let mut current = vec![seam_crossing(ring[start], ring[(start + 1) % n])];
    for step in 1..=n {
        let k = (start + step) % n;
        let a = ring[k];
        current.push(a);
        if crosses(k) {
            let c = seam_crossing(a, ring[(k + 1) % n]);
            current.push(c);
            chains.push(Chain {
                far: is_far(a),
                points: std::mem::replace(&mut current, vec![c]),
            });
        }
    }

    (assemble(&chains, false), assemble(&chains, true))
}

/// Join the chains of one side into closed pieces.
///
/// With the ring counter-clockwise, the interior of a near piece lies west
/// of the seam, so its boundary runs north along the seam from a chain's
/// exit to the next entry. Far pieces run south.
fn assemble(chains: &[Chain], far: bool) -> Vec<Vec<DVec2>> {
    let side: Vec<usize> = (0..chains.len()).filter(|&j| chains[j].far == far).collect();
    let mut used = vec![false; chains.len()];
    let mut pieces = Vec::new();

    let ahead = |from: f64, to: f64| {
        if far {
            to <= from + EPS
        } else {
            to >= from - EPS
        }
    };

    for &first in &side {
        if used[first] {
            continue;
        }
        used[first] = true;
        let mut piece = chains[first].points.clone();

        for _ in 0..side.len() {
            let end = piece[piece.len() - 1].y;
            let next = side
                .iter()
                .copied()
                .filter(|&j| j == first || !used[j])
                .filter(|&j| ahead(end, chains[j].points[0].y))
                .min_by(|&i, &j| {
                    let di = (chains[i].points[0].y - end).abs();
                    let dj = (chains[j].points[0].y - end).abs();
                    di.total_cmp(&dj)
                });
            match next {
                Some(j) if j != first => {
                    used[j] = true;
                    piece.extend_from_slice(&chains[j].points);
                }
                _ => break,
            }
        }

        pieces.push(piece);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<DVec2> {
        let mut r: Vec<DVec2> = points.iter().map(|&(x, y)| DVec2::new(x, y)).collect();
        r.push(r[0]);
        r
    }

    fn max_jump(piece: &[DVec2]) -> f64 {
        piece
            .windows(2)
            .map(|w| (w[1].x - w[0].x).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_square_across_seam_splits_in_two() {
        let shell = ring(&[(170.0, 0.0), (-170.0, 0.0), (-170.0, 10.0), (170.0, 10.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 2, "pieces: {pieces:?}");

        let west = &pieces[0];
        let east = &pieces[1];
        assert!(west.iter().all(|p| p.x >= 170.0 && p.x <= 180.0), "{west:?}");
        assert!(east.iter().all(|p| p.x >= -180.0 && p.x <= -170.0), "{east:?}");
        for piece in &pieces {
            assert_eq!(piece.first(), piece.last());
            assert!(max_jump(piece) < 180.0);
            assert!((signed_area(&open_ring(piece)).abs() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_split_keeps_winding_direction() {
        let ccw = ring(&[(170.0, 0.0), (-170.0, 0.0), (-170.0, 10.0), (170.0, 10.0)]);
        let mut cw = ccw.clone();
        cw.reverse();

        for piece in split_at_antimeridian(&ccw) {
            assert!(signed_area(&open_ring(&piece)) > 0.0);
        }
        for piece in split_at_antimeridian(&cw) {
            assert!(signed_area(&open_ring(&piece)) < 0.0);
        }
    }

    #[test]
    fn test_crossing_latitude_is_interpolated() {
        let shell = ring(&[(175.0, 0.0), (-175.0, 10.0), (175.0, 10.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 2);
        let seam_points: Vec<DVec2> = pieces[0].iter().copied().filter(|p| p.x == 180.0).collect();
        assert!(
            seam_points.iter().any(|p| (p.y - 5.0).abs() < 1e-9),
            "expected a cut at lat 5: {seam_points:?}"
        );
    }

    #[test]
    fn test_ring_starting_east_of_seam() {
        // Starts on the negative side, so unwrapping runs past -180.
        let shell = ring(&[(-175.0, 0.0), (-175.0, 10.0), (175.0, 10.0), (175.0, 0.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 2, "pieces: {pieces:?}");
        for piece in &pieces {
            assert!(max_jump(piece) < 180.0, "{piece:?}");
            assert!(piece.iter().all(|p| p.x.abs() >= 175.0 - 1e-9));
        }
        assert!(pieces[0].iter().all(|p| p.x < 0.0));
        assert!(pieces[1].iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn test_concave_ring_yields_three_pieces() {
        // A "C" opening east: both prongs reach across the seam.
        let shell = ring(&[
            (170.0, 0.0),
            (-170.0, 0.0),
            (-170.0, 3.0),
            (175.0, 3.0),
            (175.0, 7.0),
            (-170.0, 7.0),
            (-170.0, 10.0),
            (170.0, 10.0),
        ]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 3, "pieces: {pieces:?}");
        let total: f64 = pieces
            .iter()
            .map(|p| signed_area(&open_ring(p)).abs())
            .sum();
        // 20 x 10 square minus the 15 x 4 notch.
        assert!((total - 140.0).abs() < 1e-9, "total area {total}");
    }

    #[test]
    fn test_ring_around_north_pole_closes_through_pole() {
        let shell = ring(&[(0.0, 80.0), (90.0, 80.0), (180.0, 80.0), (-90.0, 80.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 1);
        let piece = &pieces[0];
        assert_eq!(piece.first(), piece.last());
        assert!(piece.iter().any(|p| p.y == 90.0));
        assert!(piece.iter().all(|p| p.x >= -180.0 && p.x <= 180.0));
        assert!(max_jump(piece) < 180.0, "{piece:?}");
    }

    #[test]
    fn test_ring_around_south_pole_uses_south_pole() {
        let shell = ring(&[(45.0, -75.0), (-45.0, -75.0), (-135.0, -75.0), (135.0, -75.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].iter().any(|p| p.y == -90.0));
        assert!(pieces[0].iter().all(|p| p.y <= -75.0 + 1e-9));
    }

    #[test]
    fn test_ring_touching_seam_is_rewrapped() {
        let shell = ring(&[(170.0, 0.0), (-180.0, 0.0), (-180.0, 10.0), (170.0, 10.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 1);
        let xs: Vec<f64> = pieces[0].iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![170.0, 180.0, 180.0, 170.0, 170.0]);
    }

    #[test]
    fn test_half_turn_edges_detour_through_pole() {
        // Both long edges span exactly 180° of longitude.
        let shell = ring(&[(-90.0, 0.0), (90.0, 0.0), (90.0, 10.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert_eq!(piece.first(), piece.last());
            assert!(!crate::crosses_antimeridian(piece), "piece still crosses: {piece:?}");
            assert!(max_jump(piece) < 180.0, "{piece:?}");
        }
        assert!(pieces.iter().flatten().any(|p| p.y == 90.0));
    }

    #[test]
    fn test_half_cap_closes_along_the_pole() {
        // Eastern half of the cap above 80°N; the last edge runs over the pole.
        let shell = ring(&[(0.0, 80.0), (90.0, 80.0), (-180.0, 80.0)]);
        let pieces = split_at_antimeridian(&shell);
        assert_eq!(pieces.len(), 1, "pieces: {pieces:?}");
        let piece = &pieces[0];
        assert!(!crate::crosses_antimeridian(piece), "{piece:?}");
        assert!(piece.iter().all(|p| p.y >= 80.0 && p.x >= 0.0 && p.x <= 180.0), "{piece:?}");
        // 180 x 10 in (lon, lat), walked back along the pole rather than around it.
        assert!((signed_area(&open_ring(piece)).abs() - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_away_from_seam_is_unchanged() {
        let shell = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(split_at_antimeridian(&shell), vec![shell]);
    }
}

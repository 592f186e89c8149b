//! Operations on polygon rings and open polylines in the plane. A ring is a list of vertices
//! without a repeated closing vertex; the edge from the last vertex back to the first is implied.

use crate::common::points::{dedup_ring, dist, lerp_point};
use crate::geom2::Point2;
use itertools::Itertools;

const ON_EDGE_TOL: f64 = 1e-10;

/// Signed area of a polygon ring by the shoelace formula, positive when the vertices wind
/// counter-clockwise.
///
/// # Examples
///
/// ```
/// use hldsize::geom2::signed_area;
/// use hldsize::Point2;
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert_eq!(signed_area(&square), 1.0);
/// ```
pub fn signed_area(ring: &[Point2]) -> f64 {
    ring.iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        * 0.5
}

/// Even-odd test for whether a point lies inside a polygon ring.
pub fn point_in_polygon(ring: &[Point2], p: &Point2) -> bool {
    let mut inside = false;
    for (a, b) in ring.iter().circular_tuple_windows() {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Intersect the segments `a0 -> a1` and `b0 -> b1`, returning the parameters along each segment
/// at the intersection point, or `None` if the segments are parallel or do not meet.
pub fn segment_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.perp(&db);
    if denom.abs() < 1e-15 {
        return None;
    }

    let w = b0 - a0;
    let s = w.perp(&db) / denom;
    let t = w.perp(&da) / denom;
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some((s, t))
    } else {
        None
    }
}

/// The point at a fractional position along an open polyline, where the integer part selects the
/// segment and the fractional part the position within it.
fn point_at_position(points: &[Point2], position: f64) -> Point2 {
    let last = points.len() - 1;
    let i = (position.floor().max(0.0) as usize).min(last.saturating_sub(1));
    lerp_point(&points[i], &points[(i + 1).min(last)], position - i as f64)
}

/// A crossing of a cutting polyline through an edge of a polygon ring.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    position: f64,
    point: Point2,
}

fn crossings(ring: &[Point2], cut: &[Point2]) -> Vec<Crossing> {
    let mut result = Vec::new();
    for (j, (c0, c1)) in cut.iter().tuple_windows().enumerate() {
        for (e0, e1) in ring.iter().circular_tuple_windows() {
            if let Some((s, t)) = segment_intersection(c0, c1, e0, e1) {
                // Half open on both segments so that a crossing through a shared vertex is
                // counted once, except for the final vertex of the cut
                let last_cut = j == cut.len() - 2;
                if t < 1.0 && (s < 1.0 || last_cut) {
                    result.push(Crossing {
                        position: j as f64 + s,
                        point: lerp_point(c0, c1, s),
                    });
                }
            }
        }
    }

    result.sort_by(|a, b| a.position.total_cmp(&b.position));
    result.dedup_by(|a, b| (a.position - b.position).abs() < ON_EDGE_TOL);
    result
}

/// Distance from a point to the segment `a -> b` and the parameter of the closest point.
fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> (f64, f64) {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 < 1e-30 {
        return (dist(p, a), 0.0);
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (dist(p, &lerp_point(a, b, t)), t)
}

/// Insert a point which lies on the boundary of the ring into the ring, returning its index. If
/// the point coincides with an existing vertex that index is returned and nothing is inserted.
fn insert_on_boundary(ring: &mut Vec<Point2>, p: &Point2) -> usize {
    if let Some(i) = ring.iter().position(|v| dist(v, p) < ON_EDGE_TOL) {
        return i;
    }

    let n = ring.len();
    let (edge, _) = (0..n)
        .map(|i| (i, distance_to_segment(p, &ring[i], &ring[(i + 1) % n]).0))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((0, 0.0));

    ring.insert(edge + 1, *p);
    edge + 1
}

/// Split a ring along a path whose two end points lie on its boundary and whose interior lies
/// inside of it, producing the two rings on either side of the path.
fn split_ring_by_chord(ring: &[Point2], path: &[Point2]) -> (Vec<Point2>, Vec<Point2>) {
    let start = path[0];
    let end = path[path.len() - 1];
    let inner = &path[1..path.len() - 1];

    let mut working = ring.to_vec();
    insert_on_boundary(&mut working, &start);
    let ib = insert_on_boundary(&mut working, &end);
    let ia = insert_on_boundary(&mut working, &start);

    let n = working.len();
    let walk = |from: usize, to: usize| -> Vec<Point2> {
        let mut out = Vec::new();
        let mut i = from;
        loop {
            out.push(working[i]);
            if i == to {
                break;
            }
            i = (i + 1) % n;
        }
        out
    };

    let mut first = walk(ia, ib);
    first.extend(inner.iter().rev());

    let mut second = walk(ib, ia);
    second.extend(inner.iter());

    (
        dedup_ring(&first, ON_EDGE_TOL),
        dedup_ring(&second, ON_EDGE_TOL),
    )
}

/// Split a polygon ring by an open cutting polyline. Each stretch of the cut which passes through
/// the interior of the polygon from one boundary crossing to the next divides the fragment it
/// lies in, so a cut crossing the boundary 2k times produces up to k + 1 fragments. A cut which
/// does not pass through the polygon returns the polygon unchanged as the only fragment.
///
/// # Arguments
///
/// * `ring`: the polygon to split, without a repeated closing vertex
/// * `cut`: the cutting polyline, which should not intersect itself
///
/// returns: Vec<Vec<OPoint<f64, Const<2>>, Global>, Global>
pub fn split_polygon(ring: &[Point2], cut: &[Point2]) -> Vec<Vec<Point2>> {
    let mut fragments = vec![ring.to_vec()];
    if cut.len() < 2 || ring.len() < 3 {
        return fragments;
    }

    let found = crossings(ring, cut);
    for (c0, c1) in found.iter().tuple_windows() {
        let middle = point_at_position(cut, 0.5 * (c0.position + c1.position));
        if !point_in_polygon(ring, &middle) {
            continue;
        }

        let mut path = vec![c0.point];
        path.extend(
            cut.iter()
                .enumerate()
                .filter(|(i, _)| (*i as f64) > c0.position && (*i as f64) < c1.position)
                .map(|(_, p)| *p),
        );
        path.push(c1.point);

        if let Some(k) = fragments
            .iter()
            .position(|f| point_in_polygon(f, &middle))
        {
            let target = fragments.remove(k);
            let (a, b) = split_ring_by_chord(&target, &path);
            fragments.extend([a, b].into_iter().filter(|f| f.len() >= 3));
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]
    }

    fn total_area(fragments: &[Vec<Point2>]) -> f64 {
        fragments.iter().map(|f| signed_area(f).abs()).sum()
    }

    #[test]
    fn point_in_square() {
        let s = square();
        assert!(point_in_polygon(&s, &Point2::new(1.0, 1.0)));
        assert!(!point_in_polygon(&s, &Point2::new(3.0, 1.0)));
        assert!(!point_in_polygon(&s, &Point2::new(1.0, -0.1)));
    }

    #[test]
    fn straight_cut_halves() {
        let cut = vec![Point2::new(1.0, 3.0), Point2::new(1.0, -1.0)];
        let fragments = split_polygon(&square(), &cut);
        assert_eq!(fragments.len(), 2);
        for f in fragments.iter() {
            assert_relative_eq!(signed_area(f).abs(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn bent_cut_preserves_area() {
        let cut = vec![
            Point2::new(1.5, 3.0),
            Point2::new(1.5, 1.0),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, -1.0),
        ];
        let fragments = split_polygon(&square(), &cut);
        assert_eq!(fragments.len(), 2);
        assert_relative_eq!(total_area(&fragments), 4.0, epsilon = 1e-12);

        let areas = fragments
            .iter()
            .map(|f| signed_area(f).abs())
            .sorted_by(|a, b| a.total_cmp(b))
            .collect::<Vec<_>>();
        // The right side is the smaller piece, the left one holds the extra quarter under the diagonal
        assert_relative_eq!(areas[0], 1.75, epsilon = 1e-12);
    }

    #[test]
    fn cut_which_misses_returns_original() {
        let cut = vec![Point2::new(3.0, 3.0), Point2::new(3.0, -1.0)];
        let fragments = split_polygon(&square(), &cut);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), 4);
    }

    #[test]
    fn cut_ending_inside_returns_original() {
        let cut = vec![Point2::new(1.0, 3.0), Point2::new(1.0, 1.0)];
        let fragments = split_polygon(&square(), &cut);
        assert_eq!(fragments.len(), 1);
    }

    #[test]
    fn double_crossing_cut_makes_three_fragments() {
        // A U shaped cut entering and leaving the top edge twice
        let cut = vec![
            Point2::new(0.5, 3.0),
            Point2::new(0.5, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(1.5, 1.0),
            Point2::new(1.5, 3.0),
        ];
        let fragments = split_polygon(&square(), &cut);
        assert_eq!(fragments.len(), 3);
        assert_relative_eq!(total_area(&fragments), 4.0, epsilon = 1e-12);
    }
}

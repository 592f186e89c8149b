//! Common operations on f64 points in D-dimensional space.

use parry3d_f64::na::Point;

/// Returns the distance between two points in D-dimensional space.
///
/// # Examples
///
/// ```
/// use hldsize::common::points::dist;
/// use hldsize::Point2;
/// let d = dist(&Point2::new(1.0, 2.0), &Point2::new(3.0, 2.0));
/// assert_eq!(d, 2.0);
/// ```
pub fn dist<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm()
}

/// Returns the midpoint between two points in D-dimensional space.
pub fn mid_point<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> Point<f64, D> {
    b + (a - b) * 0.5
}

/// Returns the point a fraction `f` of the way from `a` to `b`. Values of `f` outside of [0, 1]
/// extrapolate along the line through both points.
pub fn lerp_point<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>, f: f64) -> Point<f64, D> {
    a + (b - a) * f
}

/// Remove consecutive points which are within `tol` of their predecessor. If the resulting list
/// is closed (the last point is within `tol` of the first) the closing point is also removed, so
/// the result is suitable as a polygon ring without a repeated vertex.
///
/// # Arguments
///
/// * `points`: an ordered list of points
/// * `tol`: the distance below which two neighboring points are considered identical
///
/// returns: Vec<OPoint<f64, Const<{ D }>>, Global>
pub fn dedup_ring<const D: usize>(points: &[Point<f64, D>], tol: f64) -> Vec<Point<f64, D>> {
    let mut result: Vec<Point<f64, D>> = Vec::with_capacity(points.len());
    for p in points {
        match result.last() {
            Some(last) if dist(last, p) <= tol => {}
            _ => result.push(*p),
        }
    }

    while result.len() > 1 && dist(&result[0], &result[result.len() - 1]) <= tol {
        result.pop();
    }

    result
}

use crate::common::{swept_angle, AngleDir};
use crate::geom2::{Point2, Vector2};
use crate::Result;

/// A circular arc in the plane, defined by a center, a radius, a starting angle and a signed
/// sweep. A positive sweep travels counter-clockwise.
#[derive(Debug, Clone, Copy)]
pub struct Arc2 {
    pub center: Point2,
    pub radius: f64,
    pub start: f64,
    pub sweep: f64,
}

impl Arc2 {
    pub fn new(center: Point2, radius: f64, start: f64, sweep: f64) -> Self {
        Self {
            center,
            radius,
            start,
            sweep,
        }
    }

    /// Create an arc which travels from the angle `start` to the angle `end` (both in radians) in
    /// the direction `dir`.
    pub fn from_angles(center: Point2, radius: f64, start: f64, end: f64, dir: AngleDir) -> Self {
        Self::new(center, radius, start, swept_angle(start, end, dir))
    }

    /// Create the arc which begins at `p0`, passes through `p1`, and ends at `p2`. Fails if the
    /// three points are collinear.
    ///
    /// # Arguments
    ///
    /// * `p0`: the start point of the arc
    /// * `p1`: an intermediate point on the arc
    /// * `p2`: the end point of the arc
    ///
    /// returns: Result<Arc2, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use hldsize::geom2::Arc2;
    /// use hldsize::Point2;
    /// use approx::assert_relative_eq;
    /// let arc = Arc2::from_three_points(
    ///     &Point2::new(1.0, 0.0),
    ///     &Point2::new(0.0, 1.0),
    ///     &Point2::new(-1.0, 0.0),
    /// ).unwrap();
    /// assert_relative_eq!(arc.radius, 1.0, epsilon = 1e-12);
    /// assert_relative_eq!(arc.sweep, std::f64::consts::PI, epsilon = 1e-12);
    /// ```
    pub fn from_three_points(p0: &Point2, p1: &Point2, p2: &Point2) -> Result<Self> {
        let d = 2.0 * (p0.x * (p1.y - p2.y) + p1.x * (p2.y - p0.y) + p2.x * (p0.y - p1.y));
        if d.abs() < 1e-14 {
            return Err("Cannot construct an arc through three collinear points".into());
        }

        let s0 = p0.coords.norm_squared();
        let s1 = p1.coords.norm_squared();
        let s2 = p2.coords.norm_squared();
        let center = Point2::new(
            (s0 * (p1.y - p2.y) + s1 * (p2.y - p0.y) + s2 * (p0.y - p1.y)) / d,
            (s0 * (p2.x - p1.x) + s1 * (p0.x - p2.x) + s2 * (p1.x - p0.x)) / d,
        );

        let turn = (p1 - p0).perp(&(p2 - p1));
        let dir = AngleDir::from_sign(turn);
        let start = angle_of(&(p0 - center));
        let end = angle_of(&(p2 - center));

        Ok(Self::from_angles(
            center,
            (p0 - center).norm(),
            start,
            end,
            dir,
        ))
    }

    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.start + self.sweep)
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// Sample the arc at `count` evenly spaced angles, including both ends.
    pub fn sample(&self, count: usize) -> Vec<Point2> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let f = i as f64 / (count - 1) as f64;
                self.point_at_angle(self.start + self.sweep * f)
            })
            .collect()
    }
}

fn angle_of(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

use crate::geom3::{Point3, UnitVec3};

/// A plane given by its unit normal and its signed offset from the origin along that normal.
#[derive(Debug, Clone)]
pub struct Plane3 {
    pub normal: UnitVec3,
    pub d: f64,
}

impl Plane3 {
    pub fn new(normal: UnitVec3, d: f64) -> Self {
        Self { normal, d }
    }

    pub fn from_point_and_normal(point: &Point3, normal: &UnitVec3) -> Self {
        Self::new(*normal, normal.dot(&point.coords))
    }

    /// The signed distance from the plane to a point, positive on the side the normal points to.
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.d
    }

    /// Find where the line through `a` and `b` crosses the plane, expressed as the parameter `t`
    /// such that the crossing is at `a + t * (b - a)`. Values outside of [0, 1] lie beyond the
    /// ends of the segment. Returns `None` if the line is parallel to the plane.
    ///
    /// # Arguments
    ///
    /// * `a`: the point at t = 0
    /// * `b`: the point at t = 1
    ///
    /// returns: Option<f64>
    pub fn intersection_param(&self, a: &Point3, b: &Point3) -> Option<f64> {
        let denom = self.normal.dot(&(b - a));
        if denom.abs() < 1e-12 {
            None
        } else {
            Some(-self.signed_distance_to_point(a) / denom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom3::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn intersection_param_beyond_segment() {
        let plane = Plane3::from_point_and_normal(&Point3::new(0.0, 2.0, 0.0), &Vector3::y_axis());
        let t = plane
            .intersection_param(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn intersection_param_parallel() {
        let plane = Plane3::from_point_and_normal(&Point3::origin(), &Vector3::z_axis());
        let t = plane.intersection_param(&Point3::new(0.0, 0.0, 1.0), &Point3::new(1.0, 0.0, 1.0));
        assert!(t.is_none());
    }

    #[test]
    fn signed_distance_follows_normal() {
        let plane = Plane3::from_point_and_normal(&Point3::new(0.0, 3.0, 0.0), &Vector3::y_axis());
        assert_relative_eq!(plane.signed_distance_to_point(&Point3::new(5.0, 4.0, -1.0)), 1.0);
        assert_relative_eq!(plane.signed_distance_to_point(&Point3::new(5.0, 1.0, -1.0)), -2.0);
    }
}

use crate::airfoil::AirfoilSection;
use crate::common::AngleDir;
use crate::flaps::FlapStyle;
use crate::geom2::{Arc2, Point2};
use crate::hld::FlapType;
use crate::Result;
use std::f64::consts::FRAC_PI_2;

/// A hinged flap without a slot. The flap nose is a circular arc around the hinge point, so the
/// flap can rotate about the hinge without leaving a gap in the skin.
pub struct PlainFlap {}

impl PlainFlap {
    pub fn new() -> Self {
        PlainFlap {}
    }

    /// Create a new boxed instance of the `PlainFlap` struct.
    pub fn make() -> Box<dyn FlapStyle> {
        Box::new(PlainFlap::new())
    }
}

impl FlapStyle for PlainFlap {
    fn flap_type(&self) -> FlapType {
        FlapType::Plain
    }

    fn hinge_point(&self, airfoil: &AirfoilSection, hinge: f64) -> Point2 {
        let hd = airfoil.hinge_dimension(hinge);
        Point2::new(hinge, hd.mid)
    }

    fn dividing_profile(&self, airfoil: &AirfoilSection, hinge: f64) -> Result<Vec<Point2>> {
        let hd = airfoil.hinge_dimension(hinge);
        let radius = 0.9 * hd.height * 0.5 / 1.01;
        let center = Point2::new(hinge, hd.mid);
        let nose = Arc2::from_angles(center, radius, FRAC_PI_2, 3.0 * FRAC_PI_2, AngleDir::Ccw);

        let mut profile = vec![Point2::new(hinge, hd.mid + hd.height)];
        profile.extend(nose.sample(25));
        profile.push(Point2::new(hinge, hd.mid - hd.height));
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nose_runs_through_the_front() {
        let af = AirfoilSection::naca4("0012", 40).unwrap();
        let profile = PlainFlap::new().dividing_profile(&af, 0.7).unwrap();
        let hd = af.hinge_dimension(0.7);

        assert_relative_eq!(profile[0].y, hd.height, epsilon = 1e-12);
        assert_relative_eq!(profile[profile.len() - 1].y, -hd.height, epsilon = 1e-12);

        let front = profile.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        assert_relative_eq!(front, 0.7 - 0.45 * hd.height / 1.01, epsilon = 1e-12);
    }
}

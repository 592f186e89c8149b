use crate::airfoil::AirfoilSection;
use crate::common::AngleDir;
use crate::flaps::slotted::{nose_circle, safety_line};
use crate::flaps::FlapStyle;
use crate::geom2::{Arc2, Point2};
use crate::geom3::Vector3;
use crate::hld::FlapType;
use crate::Result;
use std::f64::consts::FRAC_PI_2;

/// A fowler flap, cut from the lower aft part of the section by a line running forward from the
/// trailing edge. On deflection it slides aft to the trailing edge of the main wing and down below
/// it before rotating.
pub struct FowlerFlap {}

impl FowlerFlap {
    pub fn new() -> Self {
        FowlerFlap {}
    }

    /// Create a new boxed instance of the `FowlerFlap` struct.
    pub fn make() -> Box<dyn FlapStyle> {
        Box::new(FowlerFlap::new())
    }
}

impl FlapStyle for FowlerFlap {
    fn flap_type(&self) -> FlapType {
        FlapType::Fowler
    }

    fn hinge_point(&self, airfoil: &AirfoilSection, hinge: f64) -> Point2 {
        nose_circle(airfoil, hinge).0
    }

    fn dividing_profile(&self, airfoil: &AirfoilSection, hinge: f64) -> Result<Vec<Point2>> {
        let (center, radius) = nose_circle(airfoil, hinge);
        let te = airfoil.trailing_edge();
        let nose = Arc2::from_angles(center, radius, FRAC_PI_2, 3.0 * FRAC_PI_2, AngleDir::Ccw);

        let mut profile = vec![Point2::new(te.x + 0.001, te.y + 0.001)];
        profile.extend(nose.sample(19));
        profile.push(safety_line(airfoil, hinge)[1]);
        Ok(profile)
    }

    fn displacement(
        &self,
        airfoil: &AirfoilSection,
        hinge: f64,
        mean_chord: f64,
        deflection: f64,
    ) -> Vector3 {
        if deflection <= 0.0 {
            return Vector3::zeros();
        }

        let hd = airfoil.hinge_dimension(hinge);
        Vector3::new(
            (1.0 - hinge) * mean_chord,
            0.0,
            (-hd.mid - 0.5 * hd.height) * mean_chord,
        )
    }

    fn fallback(&self) -> Option<FlapType> {
        Some(FlapType::Slotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn displacement_only_when_deflected() {
        let af = AirfoilSection::default();
        let style = FowlerFlap::new();
        assert_eq!(style.displacement(&af, 0.8, 3.0, 0.0), Vector3::zeros());

        let d = style.displacement(&af, 0.8, 3.0, 30.0);
        assert_relative_eq!(d.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(d.y, 0.0);
        assert!(d.z < 0.0);
    }

    #[test]
    fn line_starts_behind_trailing_edge() {
        let af = AirfoilSection::default();
        let profile = FowlerFlap::new().dividing_profile(&af, 0.8).unwrap();
        assert!(profile[0].x > 1.0);

        // The line meets the top of the nose circle at the hinge mid-height
        let hd = af.hinge_dimension(0.8);
        assert_relative_eq!(profile[1].x, 0.8, epsilon = 1e-12);
        assert_relative_eq!(profile[1].y, hd.mid, epsilon = 1e-12);
    }
}

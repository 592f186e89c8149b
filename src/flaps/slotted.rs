use crate::airfoil::AirfoilSection;
use crate::common::AngleDir;
use crate::flaps::FlapStyle;
use crate::geom2::{Arc2, Point2};
use crate::hld::FlapType;
use crate::Result;
use std::f64::consts::PI;

/// Offset of the dividing surface above the upper skin where it starts, and the chordwise spacing
/// of the two points which set the direction of the cove arc there.
const SKIN_OFFSET: f64 = 0.001;

/// The rounded nose shared by the slotted and fowler flaps, a circle of a quarter of the hinge
/// height whose top is at the hinge mid-height.
pub(crate) fn nose_circle(airfoil: &AirfoilSection, hinge: f64) -> (Point2, f64) {
    let hd = airfoil.hinge_dimension(hinge);
    let radius = hd.height * 0.25;
    (Point2::new(hinge, hd.mid - radius), radius)
}

/// The straight line leaving the bottom of the nose circle aft and down through the lower skin.
pub(crate) fn safety_line(airfoil: &AirfoilSection, hinge: f64) -> [Point2; 2] {
    let hd = airfoil.hinge_dimension(hinge);
    [
        Point2::new(hinge, hd.mid - 0.5 * hd.height),
        Point2::new(hinge + 0.5 * hd.height, hd.mid - 1.25 * hd.height),
    ]
}

/// A single slotted flap. The main wing keeps a cove which opens from the upper skin aft of the
/// hinge down to the flap nose, and the flap rotates about a hinge below the wing.
pub struct SlottedFlap {}

impl SlottedFlap {
    pub fn new() -> Self {
        SlottedFlap {}
    }

    /// Create a new boxed instance of the `SlottedFlap` struct.
    pub fn make() -> Box<dyn FlapStyle> {
        Box::new(SlottedFlap::new())
    }
}

impl FlapStyle for SlottedFlap {
    fn flap_type(&self) -> FlapType {
        FlapType::Slotted
    }

    fn hinge_point(&self, airfoil: &AirfoilSection, hinge: f64) -> Point2 {
        let hd = airfoil.hinge_dimension(hinge);
        Point2::new(hinge, hd.mid - 1.25 * hd.height)
    }

    fn dividing_profile(&self, airfoil: &AirfoilSection, hinge: f64) -> Result<Vec<Point2>> {
        let hd = airfoil.hinge_dimension(hinge);
        let (center, radius) = nose_circle(airfoil, hinge);

        let x1 = hinge + 0.5 * hd.height;
        let x2 = x1 + SKIN_OFFSET;
        let p1 = Point2::new(x1, airfoil.upper_at(x1) + SKIN_OFFSET);
        let p2 = Point2::new(x2, airfoil.upper_at(x2) + SKIN_OFFSET);
        let p3 = Point2::new(center.x - radius, center.y);
        let cove = Arc2::from_three_points(&p2, &p1, &p3)?;
        let nose = Arc2::from_angles(center, radius, PI, 1.5 * PI, AngleDir::Ccw);

        let mut profile = cove.sample(25);
        profile.extend(nose.sample(10).into_iter().skip(1));
        profile.push(safety_line(airfoil, hinge)[1]);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::points::dist;
    use approx::assert_relative_eq;

    #[test]
    fn profile_is_continuous() {
        let af = AirfoilSection::default();
        let profile = SlottedFlap::new().dividing_profile(&af, 0.75).unwrap();
        let hd = af.hinge_dimension(0.75);

        // Starts above the upper skin and the last point is below the lower skin
        assert!(profile[0].y > af.upper_at(profile[0].x));
        let last = profile[profile.len() - 1];
        assert!(last.y < af.lower_at(last.x));

        // No gaps between the pieces, the longest step is the safety line
        for w in profile.windows(2) {
            assert!(dist(&w[0], &w[1]) < hd.height);
        }
    }

    #[test]
    fn hinge_below_the_section() {
        let af = AirfoilSection::default();
        let hp = SlottedFlap::new().hinge_point(&af, 0.75);
        assert_relative_eq!(hp.x, 0.75);
        assert!(hp.y < af.lower_at(0.75));
    }
}

//! This module contains the airfoil section used for every spanwise station of the wing, along
//! with the measurements the sizing and flap construction need from it: surface heights at a
//! chordwise position, the hinge dimensions, thickness and camber.
//!
//! Section coordinates are chord-normalized (x, z) pairs. The point list runs along the lower
//! surface from the trailing edge to the leading edge, then along the upper surface from the
//! leading edge back to the trailing edge. The first half of the list is treated as the lower
//! surface and the second half as the upper surface.

mod naca;

use crate::common::linear_space;
use crate::common::points::mid_point;
use crate::geom2::Point2;
use crate::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The vertical position and height of the flap hinge at a chordwise location, both normalized
/// by the chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeDimension {
    /// The z coordinate midway between the upper and lower surfaces
    pub mid: f64,

    /// The local thickness enlarged by one percent, so that dividing surfaces sized from it
    /// always reach through the skin
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct AirfoilSection {
    points: Vec<Point2>,
}

impl AirfoilSection {
    /// Create an airfoil section from its chord-normalized coordinates, ordered from the trailing
    /// edge along the lower surface to the leading edge and back along the upper surface.
    ///
    /// # Arguments
    ///
    /// * `points`: the section coordinates, at least two per surface
    ///
    /// returns: Result<AirfoilSection, Box<dyn Error, Global>>
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 4 {
            return Err("An airfoil section needs at least two points on each surface".into());
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err("Airfoil coordinates must be finite".into());
        }

        Ok(Self { points })
    }

    pub fn from_coordinates(coords: &[[f64; 2]]) -> Result<Self> {
        Self::new(coords.iter().map(|c| Point2::new(c[0], c[1])).collect())
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn lower(&self) -> &[Point2] {
        &self.points[..self.points.len() / 2]
    }

    pub fn upper(&self) -> &[Point2] {
        &self.points[self.points.len() / 2..]
    }

    /// The height of the lower surface at the chordwise position `x`
    pub fn lower_at(&self, x: f64) -> f64 {
        surface_height(self.lower(), x)
    }

    /// The height of the upper surface at the chordwise position `x`
    pub fn upper_at(&self, x: f64) -> f64 {
        surface_height(self.upper(), x)
    }

    /// Measure the hinge mid-height and hinge height at the chordwise position `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hldsize::AirfoilSection;
    /// use approx::assert_relative_eq;
    /// let af = AirfoilSection::naca4("0012", 40).unwrap();
    /// let hd = af.hinge_dimension(0.7);
    /// assert_relative_eq!(hd.mid, 0.0, epsilon = 1e-12);
    /// assert!(hd.height > 0.05 && hd.height < 0.1);
    /// ```
    pub fn hinge_dimension(&self, x: f64) -> HingeDimension {
        let zt = self.upper_at(x);
        let zb = self.lower_at(x);
        HingeDimension {
            mid: (zt + zb) * 0.5,
            height: 1.01 * (zt - zb),
        }
    }

    /// The thickness-to-chord ratio, taken as the vertical extent of the section.
    pub fn thickness_ratio(&self) -> f64 {
        let (lo, hi) = self
            .points
            .iter()
            .map(|p| p.y)
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));
        hi - lo
    }

    /// The mean camber line sampled at `count` evenly spaced chordwise positions from the
    /// leading edge to the trailing edge.
    pub fn camber_line(&self, count: usize) -> Vec<Point2> {
        linear_space(0.0, 1.0, count.max(2))
            .into_iter()
            .map(|x| Point2::new(x, 0.5 * (self.upper_at(x) + self.lower_at(x))))
            .collect()
    }

    /// The largest height of the mean camber line above the chord.
    pub fn max_camber(&self) -> f64 {
        self.camber_line(101)
            .iter()
            .map(|p| p.y)
            .fold(0.0, f64::max)
    }

    /// The trailing edge point, midway between the first and last coordinates.
    pub fn trailing_edge(&self) -> Point2 {
        mid_point(&self.points[0], &self.points[self.points.len() - 1])
    }
}

/// Linearly interpolate the height of a surface polyline at `x`. The polyline may run in either
/// direction. Outside of its extent the height of the nearest end is used.
fn surface_height(surface: &[Point2], x: f64) -> f64 {
    for (a, b) in surface.iter().tuple_windows() {
        let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
        if lo.x <= x && x <= hi.x {
            let dx = hi.x - lo.x;
            return if dx < 1e-15 {
                0.5 * (lo.y + hi.y)
            } else {
                lo.y + (hi.y - lo.y) * (x - lo.x) / dx
            };
        }
    }

    surface
        .iter()
        .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
        .map(|p| p.y)
        .unwrap_or(0.0)
}

impl TryFrom<Vec<[f64; 2]>> for AirfoilSection {
    type Error = String;

    fn try_from(value: Vec<[f64; 2]>) -> std::result::Result<Self, Self::Error> {
        Self::from_coordinates(&value).map_err(|e| e.to_string())
    }
}

impl From<AirfoilSection> for Vec<[f64; 2]> {
    fn from(value: AirfoilSection) -> Self {
        value.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn diamond() -> AirfoilSection {
        AirfoilSection::from_coordinates(&[
            [1.0, 0.0],
            [0.5, -0.1],
            [0.0, 0.0],
            [0.0, 0.0],
            [0.5, 0.1],
            [1.0, 0.0],
        ])
        .unwrap()
    }

    #[test_case(0.25, 0.05)]
    #[test_case(0.5, 0.1)]
    #[test_case(0.75, 0.05)]
    fn upper_surface_interpolation(x: f64, expected: f64) {
        assert_relative_eq!(diamond().upper_at(x), expected, epsilon = 1e-12);
        assert_relative_eq!(diamond().lower_at(x), -expected, epsilon = 1e-12);
    }

    #[test]
    fn hinge_dimension_of_diamond() {
        let hd = diamond().hinge_dimension(0.5);
        assert_relative_eq!(hd.mid, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hd.height, 0.202, epsilon = 1e-12);
    }

    #[test]
    fn outside_extent_uses_nearest_end() {
        assert_relative_eq!(diamond().upper_at(1.2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn naca_0012_thickness() {
        let af = AirfoilSection::naca4("0012", 40).unwrap();
        assert_relative_eq!(af.thickness_ratio(), 0.12, epsilon = 2e-3);
        assert_relative_eq!(af.max_camber(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn naca_2412_camber() {
        let af = AirfoilSection::naca4("2412", 40).unwrap();
        assert_relative_eq!(af.max_camber(), 0.02, epsilon = 1e-3);
        assert_relative_eq!(af.trailing_edge(), Point2::new(1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn too_few_points() {
        assert!(AirfoilSection::from_coordinates(&[[1.0, 0.0], [0.0, 0.0], [1.0, 0.0]]).is_err());
    }

    #[test]
    fn json_round_trip_shape() {
        let af = diamond();
        let text = serde_json::to_string(&af).unwrap();
        assert!(text.starts_with("[[1.0,0.0],"));
        let back: AirfoilSection = serde_json::from_str(&text).unwrap();
        assert_eq!(back, af);
    }

    #[test]
    fn json_rejects_short_sections() {
        let result: serde_json::Result<AirfoilSection> = serde_json::from_str("[[1.0, 0.0]]");
        assert!(result.is_err());
    }
}

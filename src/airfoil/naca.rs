use crate::airfoil::AirfoilSection;
use crate::geom2::Point2;
use crate::Result;
use std::f64::consts::PI;

/// Half thickness of the NACA 4-digit family at `x` for a thickness ratio `t`, using the closed
/// trailing edge coefficient.
fn half_thickness(x: f64, t: f64) -> f64 {
    5.0 * t
        * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
            - 0.1036 * x.powi(4))
}

/// Mean camber line height and slope at `x` for a maximum camber `m` at position `p`.
fn camber(x: f64, m: f64, p: f64) -> (f64, f64) {
    if m == 0.0 || p == 0.0 {
        (0.0, 0.0)
    } else if x < p {
        let k = m / p.powi(2);
        (k * (2.0 * p * x - x * x), 2.0 * k * (p - x))
    } else {
        let k = m / (1.0 - p).powi(2);
        (k * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x), 2.0 * k * (p - x))
    }
}

impl AirfoilSection {
    /// Generate a NACA 4-digit airfoil section with a closed trailing edge and cosine spacing,
    /// with `points_per_side` points on each surface.
    ///
    /// # Arguments
    ///
    /// * `code`: the four digit designation, for example "2412"
    /// * `points_per_side`: the number of points on each of the upper and lower surfaces
    ///
    /// returns: Result<AirfoilSection, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use hldsize::AirfoilSection;
    /// let af = AirfoilSection::naca4("2412", 40).unwrap();
    /// assert_eq!(af.len(), 80);
    /// ```
    pub fn naca4(code: &str, points_per_side: usize) -> Result<Self> {
        let digits = code
            .trim()
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<_>>>()
            .filter(|d| d.len() == 4)
            .ok_or_else(|| format!("'{}' is not a NACA 4-digit designation", code))?;

        let m = digits[0] as f64 / 100.0;
        let p = digits[1] as f64 / 10.0;
        let t = (digits[2] * 10 + digits[3]) as f64 / 100.0;
        if t <= 0.0 {
            return Err(format!("NACA {} has zero thickness", code).into());
        }

        Self::new(section_points(m, p, t, points_per_side))
    }
}

impl Default for AirfoilSection {
    /// The NACA 2412 section with 40 points per surface.
    fn default() -> Self {
        Self {
            points: section_points(0.02, 0.4, 0.12, 40),
        }
    }
}

/// Build the lower surface from the trailing edge to the leading edge followed by the upper
/// surface back to the trailing edge.
fn section_points(m: f64, p: f64, t: f64, points_per_side: usize) -> Vec<Point2> {
    let n = points_per_side.max(3);
    let stations = (0..n)
        .map(|i| 0.5 * (1.0 - (PI * i as f64 / (n - 1) as f64).cos()))
        .collect::<Vec<_>>();

    let mut upper = Vec::with_capacity(n);
    let mut lower = Vec::with_capacity(n);
    for x in stations {
        let yt = half_thickness(x, t);
        let (yc, slope) = camber(x, m, p);
        let theta = slope.atan();
        upper.push(Point2::new(x - yt * theta.sin(), yc + yt * theta.cos()));
        lower.push(Point2::new(x + yt * theta.sin(), yc - yt * theta.cos()));
    }

    let mut points = lower.into_iter().rev().collect::<Vec<_>>();
    points.extend(upper);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surfaces_are_ordered() {
        let af = AirfoilSection::naca4("4415", 30).unwrap();
        assert_eq!(af.lower().len(), 30);
        assert_relative_eq!(af.lower()[0].x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(af.lower()[29].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(af.upper()[0].x, 0.0, epsilon = 1e-12);
        assert!(af.upper_at(0.3) > af.lower_at(0.3));
    }

    #[test]
    fn bad_designations() {
        assert!(AirfoilSection::naca4("24120", 40).is_err());
        assert!(AirfoilSection::naca4("24a2", 40).is_err());
        assert!(AirfoilSection::naca4("2400", 40).is_err());
    }
}

//! The wing planform record: a semi-span with a straight tapered inner panel from the root to the
//! kink and a second tapered outer panel from the kink to the tip, a single leading edge sweep,
//! and a single dihedral angle. All lengths are in meters and all angles in degrees.
//!
//! A planform is validated against numeric limits and a handful of consistency rules before use.
//! An invalid planform is never used; it is replaced by the default planform and the problems are
//! reported.

use crate::airfoil::AirfoilSection;
use crate::common::lerp;
use crate::geom3::Point3;
use crate::hld::FlapType;
use crate::notify::{Notifier, SizingEvent};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planform {
    /// Semi-span, the y coordinate of the tip
    pub span: f64,
    pub root_chord: f64,

    /// Kink chord divided by root chord
    pub taper_inner: f64,

    /// Tip chord divided by kink chord
    pub taper_outer: f64,

    /// Spanwise position of the kink
    pub kink_position: f64,

    /// Leading edge sweep
    pub sweep: f64,
    pub dihedral: f64,

    /// Chord fraction of the front spar
    pub front_spar: f64,

    /// Chord fraction of the rear spar, the most forward hinge position considered
    pub rear_spar: f64,

    /// Fraction of the span at which the outboard flap ends and the aileron begins
    pub outer_flap_limit: f64,
    pub fuselage_radius: f64,

    /// Spanwise gap between the inboard and outboard flaps
    pub flap_gap: f64,

    /// The maximum lift coefficient required with flaps deployed
    pub target_cl_max: f64,

    /// Geometric twist at the tip, varying linearly from zero at the root
    pub twist: f64,

    /// Flight speed at which the sectional and wing lift are evaluated, m/s
    pub speed: f64,

    /// Name of the flap style, checked when the flap is sized
    pub flap_type: String,

    #[serde(default = "default_max_deflection")]
    pub max_deflection: f64,

    #[serde(default)]
    pub airfoil: AirfoilSection,
}

fn default_max_deflection() -> f64 {
    45.0
}

impl Default for Planform {
    fn default() -> Self {
        Self {
            span: 12.0,
            root_chord: 5.0,
            taper_inner: 0.7,
            taper_outer: 2.0 / 3.5,
            kink_position: 4.0,
            sweep: 25.0,
            dihedral: 5.0,
            front_spar: 0.2,
            rear_spar: 0.67,
            outer_flap_limit: 0.8,
            fuselage_radius: 1.0,
            flap_gap: 0.3,
            target_cl_max: 2.5,
            twist: -2.0,
            speed: 70.0,
            flap_type: FlapType::Slotted.name().to_string(),
            max_deflection: default_max_deflection(),
            airfoil: AirfoilSection::default(),
        }
    }
}

impl Planform {
    /// Load a planform from its JSON representation. The result has not been validated.
    ///
    /// # Examples
    ///
    /// ```
    /// use hldsize::Planform;
    /// let json = serde_json::to_string(&Planform::default()).unwrap();
    /// let planform = Planform::from_json(&json).unwrap();
    /// assert_eq!(planform, Planform::default());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn flap_type(&self) -> Result<FlapType> {
        Ok(self.flap_type.parse::<FlapType>()?)
    }

    pub fn kink_chord(&self) -> f64 {
        self.root_chord * self.taper_inner
    }

    pub fn tip_chord(&self) -> f64 {
        self.kink_chord() * self.taper_outer
    }

    /// The local chord at the spanwise position `y`, linear over each of the two panels.
    pub fn chord_at(&self, y: f64) -> f64 {
        if y <= self.kink_position {
            lerp(self.root_chord, self.kink_chord(), y / self.kink_position)
        } else {
            lerp(
                self.kink_chord(),
                self.tip_chord(),
                (y - self.kink_position) / (self.span - self.kink_position),
            )
        }
    }

    /// The local leading edge point at the spanwise position `y`.
    pub fn leading_edge_at(&self, y: f64) -> Point3 {
        Point3::new(
            y * self.sweep.to_radians().tan(),
            y,
            y * self.dihedral.to_radians().tan(),
        )
    }

    /// The local geometric twist at the spanwise position `y`.
    pub fn twist_at(&self, y: f64) -> f64 {
        self.twist * y / self.span
    }

    /// Check the planform against numeric limits and the consistency rules, returning a
    /// description of every problem found.
    pub fn check(&self, limits: &PlanformLimits) -> Vec<String> {
        let mut problems = Vec::new();
        let values = [
            ("span", self.span, limits.span),
            ("root_chord", self.root_chord, limits.root_chord),
            ("taper_inner", self.taper_inner, limits.taper_inner),
            ("taper_outer", self.taper_outer, limits.taper_outer),
            ("kink_position", self.kink_position, limits.kink_position),
            ("flap_gap", self.flap_gap, limits.flap_gap),
            ("sweep", self.sweep, limits.sweep),
            ("dihedral", self.dihedral, limits.dihedral),
            ("front_spar", self.front_spar, limits.front_spar),
            ("rear_spar", self.rear_spar, limits.rear_spar),
            ("outer_flap_limit", self.outer_flap_limit, limits.outer_flap_limit),
            ("fuselage_radius", self.fuselage_radius, limits.fuselage_radius),
            ("target_cl_max", self.target_cl_max, limits.target_cl_max),
            ("twist", self.twist, limits.twist),
            ("speed", self.speed, limits.speed),
            ("max_deflection", self.max_deflection, limits.max_deflection),
        ];
        for (name, value, range) in values {
            if !range.contains(value) {
                problems.push(format!(
                    "Input parameter {} = {} is outside of the allowed limits of {}-{}",
                    name, value, range.min, range.max
                ));
            }
        }

        if self.kink_position > self.span - 1.0 {
            problems.push("Position of kink is closer than 1 m to or beyond the tip".to_string());
        }
        if self.span - self.flap_gap - self.fuselage_radius < 1.0 {
            problems.push("The wing contains less than 1 m of span available for flaps".to_string());
        }
        if self.airfoil.len() < limits.min_airfoil_points {
            problems.push(format!(
                "Airfoil has {} points, at least {} are required",
                self.airfoil.len(),
                limits.min_airfoil_points
            ));
        }
        if self.span * self.outer_flap_limit < self.kink_position + self.flap_gap + 0.5 {
            problems.push("Outer flap limit is too close to the kink".to_string());
        }
        if self.fuselage_radius >= self.kink_position {
            problems.push("Fuselage radius must be inboard of the kink".to_string());
        }
        if self.front_spar >= self.rear_spar {
            problems.push("Front spar must be ahead of the rear spar".to_string());
        }

        problems
    }

    /// Validate the planform, substituting the default planform if any problem is found.
    ///
    /// # Arguments
    ///
    /// * `limits`: the numeric limits to check against
    /// * `notifier`: receives an `InvalidPlanform` event listing the problems, if any
    ///
    /// returns: ResolvedPlanform
    pub fn resolve(self, limits: &PlanformLimits, notifier: &dyn Notifier) -> ResolvedPlanform {
        let problems = self.check(limits);
        if problems.is_empty() {
            ResolvedPlanform {
                planform: self,
                valid: true,
                problems,
            }
        } else {
            notifier.report(SizingEvent::InvalidPlanform {
                problems: problems.clone(),
            });
            ResolvedPlanform {
                planform: Planform::default(),
                valid: false,
                problems,
            }
        }
    }
}

/// The planform actually used for sizing, and whether it is the one that was requested.
#[derive(Debug, Clone)]
pub struct ResolvedPlanform {
    pub planform: Planform,
    pub valid: bool,
    pub problems: Vec<String>,
}

/// An inclusive range of allowed values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub min: f64,
    pub max: f64,
}

impl Limit {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The allowed ranges of the numeric planform inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanformLimits {
    pub span: Limit,
    pub root_chord: Limit,
    pub taper_inner: Limit,
    pub taper_outer: Limit,
    pub kink_position: Limit,
    pub flap_gap: Limit,
    pub sweep: Limit,
    pub dihedral: Limit,
    pub front_spar: Limit,
    pub rear_spar: Limit,
    pub outer_flap_limit: Limit,
    pub fuselage_radius: Limit,
    pub target_cl_max: Limit,
    pub twist: Limit,
    pub speed: Limit,
    pub max_deflection: Limit,
    pub min_airfoil_points: usize,
}

impl Default for PlanformLimits {
    fn default() -> Self {
        Self {
            span: Limit::new(2.0, 40.0),
            root_chord: Limit::new(0.5, 15.0),
            taper_inner: Limit::new(0.1, 1.0),
            taper_outer: Limit::new(0.1, 1.0),
            kink_position: Limit::new(0.5, 30.0),
            flap_gap: Limit::new(0.0, 2.0),
            sweep: Limit::new(-10.0, 50.0),
            dihedral: Limit::new(-10.0, 15.0),
            front_spar: Limit::new(0.05, 0.4),
            rear_spar: Limit::new(0.5, 0.9),
            outer_flap_limit: Limit::new(0.3, 0.95),
            fuselage_radius: Limit::new(0.2, 5.0),
            target_cl_max: Limit::new(0.5, 10.0),
            twist: Limit::new(-10.0, 5.0),
            speed: Limit::new(10.0, 300.0),
            max_deflection: Limit::new(5.0, 60.0),
            min_airfoil_points: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.0, 5.0)]
    #[test_case(2.0, 4.25)]
    #[test_case(4.0, 3.5)]
    #[test_case(8.0, 2.75)]
    #[test_case(12.0, 2.0)]
    fn chord_law(y: f64, expected: f64) {
        assert_relative_eq!(Planform::default().chord_at(y), expected, epsilon = 1e-12);
    }

    #[test]
    fn chord_is_positive_over_span() {
        let p = Planform::default();
        for i in 0..=120 {
            assert!(p.chord_at(i as f64 * 0.1) > 0.0);
        }
    }

    #[test]
    fn leading_edge_follows_sweep_and_dihedral() {
        let le = Planform::default().leading_edge_at(4.0);
        assert_relative_eq!(le.x, 4.0 * 25f64.to_radians().tan(), epsilon = 1e-12);
        assert_relative_eq!(le.z, 4.0 * 5f64.to_radians().tan(), epsilon = 1e-12);
    }

    #[test]
    fn default_is_valid() {
        assert!(Planform::default().check(&PlanformLimits::default()).is_empty());
    }

    #[test]
    fn invalid_planform_falls_back_to_default() {
        let requested = Planform {
            dihedral: 20.0,
            root_chord: 50.0,
            ..Planform::default()
        };
        let notifier = RecordingNotifier::new();
        let resolved = requested.resolve(&PlanformLimits::default(), &notifier);

        assert!(!resolved.valid);
        assert_eq!(resolved.problems.len(), 2);
        assert_eq!(resolved.planform, Planform::default());
        assert!(matches!(
            notifier.events()[0],
            SizingEvent::InvalidPlanform { .. }
        ));
    }

    #[test]
    fn outer_flap_too_close_to_kink() {
        let p = Planform {
            outer_flap_limit: 0.35,
            ..Planform::default()
        };
        let problems = p.check(&PlanformLimits::default());
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("kink"));
    }

    #[test]
    fn fuselage_must_end_inboard_of_kink() {
        let p = Planform {
            fuselage_radius: 4.5,
            ..Planform::default()
        };
        let problems = p.check(&PlanformLimits::default());
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Fuselage"));
    }

    #[test]
    fn unknown_flap_type_surfaces_on_use() {
        let p = Planform {
            flap_type: "Split".to_string(),
            ..Planform::default()
        };
        assert!(p.check(&PlanformLimits::default()).is_empty());
        assert!(p.flap_type().is_err());
    }

    #[test]
    fn limits_load_partially_from_json() {
        let limits: PlanformLimits =
            serde_json::from_str(r#"{"span": {"min": 1.0, "max": 5.0}}"#).unwrap();
        assert_relative_eq!(limits.span.max, 5.0);
        assert_eq!(limits.min_airfoil_points, 50);
    }
}

//! Closed form approximations of the design charts used to estimate flap lift increments. Angles
//! are in degrees unless noted, and `cf` is the flap chord as a fraction of the local chord.

use crate::hld::FlapType;
use std::f64::consts::PI;

/// Theoretical flap effectiveness from thin airfoil theory, the change in zero lift angle per unit
/// flap deflection.
///
/// # Examples
///
/// ```
/// use hldsize::hld::empirical::theoretical_effectiveness;
/// use approx::assert_relative_eq;
/// assert_relative_eq!(theoretical_effectiveness(1.0), 1.0, epsilon = 1e-12);
/// assert_relative_eq!(theoretical_effectiveness(0.0), 0.0, epsilon = 1e-12);
/// ```
pub fn theoretical_effectiveness(cf: f64) -> f64 {
    let theta = (2.0 * cf.clamp(0.0, 1.0) - 1.0).acos();
    1.0 - (theta - theta.sin()) / PI
}

/// Section lift increment per radian of plain flap deflection, corrected for thickness.
pub fn plain_lift_slope(cf: f64, thickness_ratio: f64) -> f64 {
    2.0 * PI * theoretical_effectiveness(cf) * (1.0 + 0.8 * thickness_ratio)
}

/// Correction of the plain flap lift increment for flow separation at large deflections.
pub fn plain_nonlinear_factor(deflection: f64, cf: f64) -> f64 {
    (1.0 - (deflection - 12.0).max(0.0) * (0.016 - 0.02 * cf)).clamp(0.3, 1.0)
}

/// Effectiveness of a slotted flap, the theoretical value reduced for deflections beyond those
/// at which the slot keeps the flow attached.
pub fn slotted_effectiveness(deflection: f64, cf: f64) -> f64 {
    theoretical_effectiveness(cf) * (1.0 - 0.012 * (deflection - 15.0).max(0.0)).clamp(0.35, 1.0)
}

/// The three dimensional flap effectiveness factor, relating the section lift increment to the
/// increment in wing maximum lift coefficient.
pub fn span_factor(cf: f64, flap_type: FlapType) -> f64 {
    let (k0, k1) = flap_type.efficiency_coefficients();
    (k0 - k1 * cf).clamp(0.5, 1.0)
}

/// The reduction of the wing lift increment with quarter chord sweep, `sweep` in radians.
pub fn sweep_factor(sweep: f64) -> f64 {
    let c = sweep.cos();
    (1.0 - 0.08 * c * c) * c.powf(0.75)
}

/// The section lift increment a flap delivers at the given deflection.
///
/// # Arguments
///
/// * `flap_type`: the flap style
/// * `cf`: the flap chord fraction
/// * `thickness_ratio`: the airfoil thickness to chord ratio
/// * `deflection`: the flap deflection in degrees
/// * `cl_alpha`: the section lift curve slope per radian
///
/// returns: f64
pub fn delivered_increment(
    flap_type: FlapType,
    cf: f64,
    thickness_ratio: f64,
    deflection: f64,
    cl_alpha: f64,
) -> f64 {
    let delta = deflection.to_radians();
    match flap_type {
        FlapType::Plain => {
            plain_lift_slope(cf, thickness_ratio) * delta * plain_nonlinear_factor(deflection, cf)
        }
        FlapType::Slotted => cl_alpha * slotted_effectiveness(deflection, cf) * delta,
        FlapType::Fowler => cl_alpha * (1.0 + cf) * slotted_effectiveness(deflection, cf) * delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::linear_space;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn effectiveness_at_quarter_chord() {
        // theta = 2pi/3 for cf = 0.25
        let theta = 2.0 * PI / 3.0;
        let expected = 1.0 - (theta - theta.sin()) / PI;
        assert_relative_eq!(theoretical_effectiveness(0.25), expected, epsilon = 1e-12);
    }

    #[test_case(FlapType::Plain)]
    #[test_case(FlapType::Slotted)]
    #[test_case(FlapType::Fowler)]
    fn increment_grows_with_flap_chord(flap_type: FlapType) {
        let values = linear_space(0.0, 1.0, 101)
            .iter()
            .map(|cf| delivered_increment(flap_type, *cf, 0.12, 45.0, 2.0 * PI))
            .collect::<Vec<_>>();

        for w in values.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn fowler_extension_adds_to_slotted() {
        let cf = 0.3;
        let slotted = delivered_increment(FlapType::Slotted, cf, 0.12, 45.0, 2.0 * PI);
        let fowler = delivered_increment(FlapType::Fowler, cf, 0.12, 45.0, 2.0 * PI);
        assert_relative_eq!(fowler / slotted, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn plain_flap_loses_effectiveness_when_deflected_far() {
        assert_relative_eq!(plain_nonlinear_factor(10.0, 0.3), 1.0);
        assert_relative_eq!(plain_nonlinear_factor(45.0, 0.3), 0.67, epsilon = 1e-12);
    }

    #[test]
    fn span_factor_is_clamped() {
        assert_relative_eq!(span_factor(0.0, FlapType::Plain), 0.95);
        assert_relative_eq!(span_factor(0.3, FlapType::Slotted), 0.94, epsilon = 1e-12);
        assert_relative_eq!(span_factor(10.0, FlapType::Fowler), 0.5);
    }

    #[test]
    fn sweep_factor_unswept() {
        assert_relative_eq!(sweep_factor(0.0), 0.92, epsilon = 1e-12);
    }
}

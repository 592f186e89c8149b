use crate::geom3::{Point3, Vector3};
use crate::hld::empirical::{delivered_increment, span_factor, sweep_factor};
use crate::hld::FlapType;
use crate::planform::Planform;
use serde::Serialize;

/// The aerodynamic inputs shared by every candidate flap configuration of one sizing run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HldInputs {
    pub flap_type: FlapType,

    /// Maximum lift coefficient of the clean wing
    pub clean_cl_max: f64,

    /// Maximum lift coefficient required with flaps deployed
    pub target_cl_max: f64,

    /// Flap deflection in degrees at which the lift increment is evaluated
    pub max_deflection: f64,

    /// The clean maximum lift coefficient is divided by this factor to account for trim
    pub trim_factor: f64,

    /// Section lift curve slope per radian
    pub cl_alpha: f64,
}

impl HldInputs {
    /// The clean maximum lift coefficient available once the wing is trimmed.
    pub fn clean_trimmed(&self) -> f64 {
        self.clean_cl_max / self.trim_factor
    }

    /// True when the trimmed clean wing already reaches the target, so no flap is needed.
    pub fn no_flap_required(&self) -> bool {
        self.clean_trimmed() >= self.target_cl_max
    }
}

/// The derived planform geometry and lift increments for one candidate flap configuration,
/// described by the hinge position as a chord fraction and the number of flap segments.
///
/// The planform quantities are for one half of the wing. Panel areas use the true panel length
/// along the dihedral while the flapped strips use the projected span.
#[derive(Debug, Clone, Serialize)]
pub struct HldGeometry {
    pub hinge: f64,
    pub flap_count: usize,

    /// Root leading edge, root trailing edge, kink leading edge, kink trailing edge, tip leading
    /// edge and tip trailing edge
    pub corners: [Point3; 6],
    pub kink_chord: f64,
    pub tip_chord: f64,
    pub area_inner: f64,
    pub area_outer: f64,
    pub reference_area: f64,

    /// Quarter chord sweep of the inner and outer panels and their area weighted average, in
    /// radians
    pub sweep_inner: f64,
    pub sweep_outer: f64,
    pub sweep_average: f64,

    /// Flapped area of the inboard strip from the fuselage to the kink
    pub sf1: f64,

    /// Flapped area of the outboard strip from the far side of the flap gap to the aileron
    pub sf2: f64,

    /// Flapped area used for this configuration, `sf1` for a single flap
    pub sf: f64,

    pub clean_trimmed: f64,
    pub dcl_trimmed: f64,
    pub k_lambda: f64,
    pub dcl_max: f64,
    pub k_factor: f64,

    /// Section lift increment required of the flap
    pub dcl_target: f64,

    /// Section lift increment the flap delivers at the maximum deflection
    pub dcl45: f64,
}

impl HldGeometry {
    /// Evaluate a candidate flap configuration.
    ///
    /// # Arguments
    ///
    /// * `planform`: the wing planform
    /// * `hinge`: the hinge position as a fraction of the local chord
    /// * `flap_count`: 1 for an inboard flap only, 2 for inboard and outboard flaps
    /// * `inputs`: the aerodynamic inputs of the sizing run
    ///
    /// returns: HldGeometry
    pub fn evaluate(planform: &Planform, hinge: f64, flap_count: usize, inputs: &HldInputs) -> Self {
        let b = planform.span;
        let k = planform.kink_position;
        let cr = planform.root_chord;
        let ck = planform.kink_chord();
        let ct = planform.tip_chord();

        let c1 = Point3::origin();
        let c2 = Point3::new(cr, 0.0, 0.0);
        let c3 = planform.leading_edge_at(k);
        let c4 = c3 + Vector3::new(ck, 0.0, 0.0);
        let c5 = planform.leading_edge_at(b);
        let c6 = c5 + Vector3::new(ct, 0.0, 0.0);

        let inner_length = (c3.y - c1.y).hypot(c3.z - c1.z);
        let outer_length = (c5.y - c3.y).hypot(c5.z - c3.z);
        let area_inner = 0.5 * (cr + ck) * inner_length;
        let area_outer = 0.5 * (ck + ct) * outer_length;
        let reference_area = area_inner + area_outer;

        let sweep_inner = ((c3.x + 0.25 * ck - 0.25 * cr) / k).atan();
        let sweep_outer = ((c5.x + 0.25 * ct - c3.x - 0.25 * ck) / (b - k)).atan();
        let sweep_average = (area_inner * sweep_inner + area_outer * sweep_outer) / reference_area;

        let fuselage = planform.fuselage_radius;
        let outer_start = k + planform.flap_gap;
        let aileron = planform.outer_flap_limit * b;
        let sf1 = 0.5 * (planform.chord_at(fuselage) + planform.chord_at(k)) * (k - fuselage);
        let sf2 = 0.5
            * (planform.chord_at(outer_start) + planform.chord_at(aileron))
            * (aileron - outer_start);
        let sf = if flap_count == 1 { sf1 } else { sf1 + sf2 };

        let cf = 1.0 - hinge;
        let clean_trimmed = inputs.clean_trimmed();
        let dcl_trimmed = 1.05 * (inputs.target_cl_max - clean_trimmed);
        let k_lambda = sweep_factor(sweep_average);
        let dcl_max = dcl_trimmed * k_lambda * reference_area / sf;
        let k_factor = span_factor(cf, inputs.flap_type);
        let dcl_target = dcl_max / k_factor;
        let dcl45 = delivered_increment(
            inputs.flap_type,
            cf,
            planform.airfoil.thickness_ratio(),
            inputs.max_deflection,
            inputs.cl_alpha,
        );

        Self {
            hinge,
            flap_count,
            corners: [c1, c2, c3, c4, c5, c6],
            kink_chord: ck,
            tip_chord: ct,
            area_inner,
            area_outer,
            reference_area,
            sweep_inner,
            sweep_outer,
            sweep_average,
            sf1,
            sf2,
            sf,
            clean_trimmed,
            dcl_trimmed,
            k_lambda,
            dcl_max,
            k_factor,
            dcl_target,
            dcl45,
        }
    }

    pub fn flap_chord_fraction(&self) -> f64 {
        1.0 - self.hinge
    }

    /// A configuration is feasible when the flap delivers at least the required increment.
    pub fn is_feasible(&self) -> bool {
        self.dcl45 >= self.dcl_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn inputs(flap_type: FlapType, clean: f64, target: f64) -> HldInputs {
        HldInputs {
            flap_type,
            clean_cl_max: clean,
            target_cl_max: target,
            max_deflection: 45.0,
            trim_factor: 1.1,
            cl_alpha: 2.0 * PI,
        }
    }

    #[test]
    fn seed_planform_areas() {
        let g = HldGeometry::evaluate(
            &Planform::default(),
            0.7,
            2,
            &inputs(FlapType::Slotted, 1.1, 2.5),
        );
        let cos_dihedral = 5f64.to_radians().cos();
        assert_relative_eq!(g.area_inner, 4.25 * 4.0 / cos_dihedral, epsilon = 1e-9);
        assert_relative_eq!(g.area_outer, 2.75 * 8.0 / cos_dihedral, epsilon = 1e-9);
        assert_relative_eq!(g.sf1, 12.1875, epsilon = 1e-9);
        assert_relative_eq!(g.sf2, 0.5 * (3.44375 + 2.45) * 5.3, epsilon = 1e-9);
        assert_relative_eq!(g.sf, g.sf1 + g.sf2, epsilon = 1e-12);
        assert!(g.sf < g.reference_area);
        assert_relative_eq!(g.corners[5].x, 12.0 * 25f64.to_radians().tan() + 2.0, epsilon = 1e-9);
    }

    #[test]
    fn single_flap_uses_inboard_strip() {
        let g = HldGeometry::evaluate(
            &Planform::default(),
            0.7,
            1,
            &inputs(FlapType::Slotted, 1.1, 2.5),
        );
        assert_relative_eq!(g.sf, g.sf1);
    }

    #[test]
    fn seed_slotted_feasibility_around_hinge() {
        let i = inputs(FlapType::Slotted, 1.1, 2.5);
        let p = Planform::default();
        assert!(HldGeometry::evaluate(&p, 0.70, 2, &i).is_feasible());
        assert!(!HldGeometry::evaluate(&p, 0.72, 2, &i).is_feasible());
    }

    #[test]
    fn delivered_increment_non_increasing_aft() {
        let p = Planform::default();
        for flap_type in [FlapType::Plain, FlapType::Slotted, FlapType::Fowler] {
            let i = inputs(flap_type, 1.1, 2.5);
            let values = (0..=100)
                .map(|h| HldGeometry::evaluate(&p, h as f64 / 100.0, 2, &i).dcl45)
                .collect::<Vec<_>>();
            for w in values.windows(2) {
                assert!(w[1] <= w[0]);
            }
        }
    }

    #[test]
    fn trimmed_clean_divides_by_trim_factor() {
        let i = inputs(FlapType::Plain, 2.2, 2.0);
        assert_relative_eq!(i.clean_trimmed(), 2.0, epsilon = 1e-12);
        assert!(i.no_flap_required());
        assert!(!inputs(FlapType::Plain, 1.1, 2.5).no_flap_required());
    }
}

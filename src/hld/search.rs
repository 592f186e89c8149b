use crate::common::round_to;
use crate::errors::SizingError;
use crate::hld::{HldGeometry, HldInputs};
use crate::notify::{Notifier, SizingEvent};
use crate::planform::Planform;
use crate::Result;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

/// Above this hinge position a two segment flap is considered too small to be worth building,
/// and a single inboard flap is tried instead.
const SINGLE_FLAP_THRESHOLD: u32 = 95;

/// The selected flap configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HingeSearchResult {
    /// Hinge position as a chord fraction, to two decimal places
    pub hinge: f64,
    pub flap_count: usize,

    /// The flapped planform area of the strips carrying flaps
    pub flapped_area: f64,

    /// The planform area of the flaps themselves, the flapped area times the flap chord fraction
    pub flap_area: f64,

    /// Lift increment delivered at the maximum deflection
    pub dcl45: f64,

    /// Lift increment required
    pub dcl_target: f64,

    /// True when a single flap was preferred but only the two segment flap is feasible
    pub marginal: bool,
}

impl HingeSearchResult {
    fn from_geometry(g: &HldGeometry, marginal: bool) -> Self {
        Self {
            hinge: round_to(g.hinge, 2),
            flap_count: g.flap_count,
            flapped_area: g.sf,
            flap_area: g.flap_chord_fraction() * g.sf,
            dcl45: g.dcl45,
            dcl_target: g.dcl_target,
            marginal,
        }
    }
}

/// The outcome of a successful search: either the clean wing is sufficient, or a flap was sized.
#[derive(Debug, Clone, PartialEq)]
pub enum FlapRequirement {
    NotRequired { clean_trimmed: f64, target: f64 },
    Sized(HingeSearchResult),
}

/// Backward scan over hinge positions for the smallest flap meeting the target maximum lift
/// coefficient. Hinge positions are taken in steps of 0.01 from 0.99 forward to the rear spar,
/// and the most aft feasible position gives the smallest flap.
pub struct HingeSearch<'a> {
    planform: &'a Planform,
    inputs: HldInputs,
    rear_spar: f64,
}

impl<'a> HingeSearch<'a> {
    pub fn new(planform: &'a Planform, inputs: HldInputs, rear_spar: f64) -> Self {
        Self {
            planform,
            inputs,
            rear_spar,
        }
    }

    pub fn inputs(&self) -> &HldInputs {
        &self.inputs
    }

    /// Candidate hinge positions in hundredths of the chord, most aft first.
    fn candidates(&self) -> Vec<u32> {
        let first = (self.rear_spar * 100.0 - 1e-9).ceil().max(0.0) as u32;
        (first..=99).rev().collect()
    }

    /// Evaluate every candidate with the given flap count and return the most aft feasible one.
    fn most_aft_feasible(&self, flap_count: usize) -> Option<HldGeometry> {
        let feasible = self
            .candidates()
            .into_par_iter()
            .map(|h| HldGeometry::evaluate(self.planform, h as f64 / 100.0, flap_count, &self.inputs))
            .filter(|g| g.is_feasible())
            .collect::<Vec<_>>();

        for g in feasible.iter() {
            trace!(
                "{} flap(s) feasible at {:.2}: dcl45 {:.4} >= {:.4}",
                flap_count,
                g.hinge,
                g.dcl45,
                g.dcl_target
            );
        }

        feasible.into_iter().max_by(|a, b| a.hinge.total_cmp(&b.hinge))
    }

    /// Run the search.
    ///
    /// Returns `FlapRequirement::NotRequired` without searching when the trimmed clean wing
    /// already meets the target, and a `SizingError::Infeasible` error when no two segment flap
    /// between the rear spar and the trailing edge meets it.
    ///
    /// # Arguments
    ///
    /// * `notifier`: receives the advisory events of the search
    ///
    /// returns: Result<FlapRequirement, Box<dyn Error, Global>>
    pub fn run(&self, notifier: &dyn Notifier) -> Result<FlapRequirement> {
        if self.inputs.no_flap_required() {
            notifier.report(SizingEvent::NoFlapRequired {
                clean_trimmed: self.inputs.clean_trimmed(),
                target: self.inputs.target_cl_max,
            });
            return Ok(FlapRequirement::NotRequired {
                clean_trimmed: self.inputs.clean_trimmed(),
                target: self.inputs.target_cl_max,
            });
        }

        let two = self
            .most_aft_feasible(2)
            .ok_or_else(|| SizingError::Infeasible {
                flap_type: self.inputs.flap_type,
                rear_spar: self.rear_spar,
                max_deflection: self.inputs.max_deflection,
            })?;
        debug!("Most aft feasible two segment flap hinge: {:.2}", two.hinge);

        let (selected, marginal) = choose(two, || self.most_aft_feasible(1));
        if marginal {
            notifier.report(SizingEvent::MarginalFlap {
                hinge: selected.hinge,
            });
        }

        debug!(
            "Selected hinge {:.2} with {} flap(s)",
            selected.hinge, selected.flap_count
        );
        Ok(FlapRequirement::Sized(HingeSearchResult::from_geometry(
            &selected, marginal,
        )))
    }
}

/// Pick between the best two segment configuration and, when that one is very far aft, the best
/// single segment configuration. Returns the selection and whether it is marginal.
fn choose(
    two: HldGeometry,
    single: impl FnOnce() -> Option<HldGeometry>,
) -> (HldGeometry, bool) {
    if (two.hinge * 100.0).round() as u32 <= SINGLE_FLAP_THRESHOLD {
        return (two, false);
    }

    match single() {
        Some(one) => (one, false),
        None => (two, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hld::FlapType;
    use crate::notify::RecordingNotifier;
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

    fn sized(r: FlapRequirement) -> HingeSearchResult {
        match r {
            FlapRequirement::Sized(result) => result,
            other => panic!("Expected a sized flap, got {:?}", other),
        }
    }

    fn geometry_at(hinge: f64, flap_count: usize) -> HldGeometry {
        HldGeometry::evaluate(
            &Planform::default(),
            hinge,
            flap_count,
            &inputs(FlapType::Slotted, 1.1, 2.5),
        )
    }

    #[test]
    fn seed_scenario() {
        let p = Planform::default();
        let search = HingeSearch::new(&p, inputs(FlapType::Slotted, 1.1, 2.5), 0.67);
        let result = sized(search.run(&RecordingNotifier::new()).unwrap());

        assert!(result.hinge > 0.67 && result.hinge < 1.0);
        assert_relative_eq!(result.hinge, 0.70, epsilon = 1e-12);
        assert_eq!(result.flap_count, 2);
        assert!(result.flapped_area > 0.0);
        assert!(result.flapped_area < HldGeometry::evaluate(&p, 0.7, 2, search.inputs()).reference_area);
        assert_relative_eq!(result.flap_area, 0.3 * result.flapped_area, epsilon = 1e-9);
        assert!(!result.marginal);
    }

    #[test]
    fn reported_hinge_is_rounded_to_hundredths() {
        let result = HingeSearchResult::from_geometry(&geometry_at(0.7000000001, 2), false);
        assert_eq!(result.hinge, 0.7);
    }

    #[test]
    fn infeasible_target() {
        let p = Planform::default();
        for flap_type in [FlapType::Plain, FlapType::Slotted, FlapType::Fowler] {
            let search = HingeSearch::new(&p, inputs(flap_type, 1.1, 10.0), 0.67);
            let err = search.run(&RecordingNotifier::new()).unwrap_err();
            let sizing = err.downcast_ref::<SizingError>().unwrap();
            assert!(matches!(sizing, SizingError::Infeasible { .. }));
            assert!(err.to_string().contains("rear spar"));
        }
    }

    #[test]
    fn no_flap_required_skips_search() {
        let p = Planform::default();
        let notifier = RecordingNotifier::new();
        let search = HingeSearch::new(&p, inputs(FlapType::Slotted, 2.5, 2.2), 0.67);
        let result = search.run(&notifier).unwrap();
        assert!(matches!(result, FlapRequirement::NotRequired { .. }));
        assert!(matches!(
            notifier.events()[0],
            SizingEvent::NoFlapRequired { .. }
        ));
    }

    #[test]
    fn small_requirement_uses_single_flap() {
        let p = Planform::default();
        let search = HingeSearch::new(&p, inputs(FlapType::Slotted, 1.5, 1.8), 0.67);
        let result = sized(search.run(&RecordingNotifier::new()).unwrap());
        assert_eq!(result.flap_count, 1);
        assert!(result.hinge <= 0.95);
        assert!(!result.marginal);
    }

    #[test]
    fn single_flap_infeasible_falls_back_marginal() {
        let p = Planform::default();
        let notifier = RecordingNotifier::new();
        let search = HingeSearch::new(&p, inputs(FlapType::Slotted, 1.1, 1.5), 0.9);
        let result = sized(search.run(&notifier).unwrap());
        assert_eq!(result.flap_count, 2);
        assert!(result.hinge > 0.95);
        assert!(result.marginal);
        assert!(notifier
            .events()
            .iter()
            .any(|e| matches!(e, SizingEvent::MarginalFlap { .. })));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let p = Planform::default();
        for flap_type in [FlapType::Plain, FlapType::Slotted, FlapType::Fowler] {
            let search = HingeSearch::new(&p, inputs(flap_type, 1.1, 2.2), 0.67);
            let a = search.run(&RecordingNotifier::new()).unwrap();
            let b = search.run(&RecordingNotifier::new()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn selected_hinge_is_most_aft_feasible() {
        let p = Planform::default();
        let i = inputs(FlapType::Fowler, 1.1, 2.5);
        let result = sized(HingeSearch::new(&p, i, 0.67).run(&RecordingNotifier::new()).unwrap());
        let next = HldGeometry::evaluate(&p, result.hinge + 0.01, result.flap_count, &i);
        assert!(!next.is_feasible());
    }

    #[test]
    fn spar_aft_of_trailing_edge_has_no_candidates() {
        let p = Planform::default();
        let search = HingeSearch::new(&p, inputs(FlapType::Slotted, 1.1, 2.5), 0.995);
        assert!(search.run(&RecordingNotifier::new()).is_err());
    }

    #[test]
    fn choose_keeps_two_flaps_forward_of_threshold() {
        let (g, marginal) = choose(geometry_at(0.9, 2), || panic!("single flap not needed"));
        assert_eq!(g.flap_count, 2);
        assert!(!marginal);
    }

    #[test]
    fn choose_prefers_single_flap_far_aft() {
        let (g, marginal) = choose(geometry_at(0.97, 2), || Some(geometry_at(0.9, 1)));
        assert_eq!(g.flap_count, 1);
        assert!(!marginal);

        let (g, marginal) = choose(geometry_at(0.97, 2), || None);
        assert_eq!(g.flap_count, 2);
        assert!(marginal);
    }
}

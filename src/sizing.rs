//! The top level sizing run. It validates the planform, finds the clean wing maximum lift
//! coefficient, searches for the smallest flap meeting the target, and builds the wing with the
//! selected flaps. The outcome is collected in a `SizingReport`, which serializes to JSON for
//! downstream reporting.

use crate::aero::{
    LiftingSurface, LiftingSurfaceSolver, OutlierRatios, SectionLiftProfile, SectionSolver,
    SectionalLiftTable, StallPoint, WingStallSolver,
};
use crate::errors::SizingError;
use crate::hld::{FlapRequirement, FlapType, HingeSearch, HingeSearchResult, HldInputs};
use crate::notify::{Notifier, SizingEvent};
use crate::planform::{Planform, PlanformLimits};
use crate::wing::{FlapLayout, WingAssembly};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info};

/// The tunable parameters of a sizing run. Every field has a default, so a partial JSON object
/// is enough to override a few of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingParams {
    /// Number of spanwise stations of the sectional lift table
    pub stations: usize,

    /// Kinematic viscosity of air, m^2/s
    pub kinematic_viscosity: f64,

    /// Speed of sound, m/s
    pub speed_of_sound: f64,

    /// Angle of attack step and upper limit of the stall sweep, degrees
    pub alpha_step: f64,
    pub max_alpha: f64,

    /// The clean maximum lift coefficient is divided by this factor to account for trim
    pub trim_factor: f64,

    /// Section lift curve slope per radian
    pub cl_alpha: f64,

    pub outliers: OutlierRatios,

    /// Whether the root station of the sectional lift table is checked for outliers
    pub correct_first_station: bool,

    /// A known clean maximum lift coefficient, which skips the sectional lift table and the stall
    /// sweep entirely
    pub clean_cl_max: Option<f64>,

    /// Spanwise overlap of the flap dividing surfaces past each end of a segment, as a fraction
    /// of the segment span
    pub overlap_fraction: f64,
}

impl Default for SizingParams {
    fn default() -> Self {
        Self {
            stations: 20,
            kinematic_viscosity: 1.5111e-5,
            speed_of_sound: 343.0,
            alpha_step: 0.5,
            max_alpha: 30.0,
            trim_factor: 1.1,
            cl_alpha: 2.0 * PI,
            outliers: OutlierRatios::default(),
            correct_first_station: true,
            clean_cl_max: None,
            overlap_fraction: 0.01,
        }
    }
}

impl SizingParams {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check that the parameters describe a run that can finish: at least one station, a
    /// positive alpha step with a finite limit, and positive physical constants.
    pub fn validate(&self) -> Result<()> {
        if self.stations == 0 {
            return Err(Box::new(SizingError::InvalidParameter {
                name: "stations",
                value: 0.0,
            }));
        }

        let positive = [
            ("alpha_step", self.alpha_step),
            ("kinematic_viscosity", self.kinematic_viscosity),
            ("speed_of_sound", self.speed_of_sound),
            ("trim_factor", self.trim_factor),
            ("cl_alpha", self.cl_alpha),
        ];
        let finite = [
            ("max_alpha", self.max_alpha),
            ("overlap_fraction", self.overlap_fraction),
        ];
        let bad = positive
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
            .or_else(|| finite.into_iter().find(|(_, v)| !v.is_finite()))
            .or_else(|| {
                (self.overlap_fraction < 0.0).then_some(("overlap_fraction", self.overlap_fraction))
            });

        match bad {
            Some((name, value)) => Err(Box::new(SizingError::InvalidParameter { name, value })),
            None => Ok(()),
        }
    }
}

/// What the sizing concluded about the flap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HldOutcome {
    /// The trimmed clean wing already reaches the target
    NoFlapRequired { clean_trimmed: f64, target: f64 },

    Sized(HingeSearchResult),

    /// No flap between the rear spar and the trailing edge reaches the target, the wing was
    /// built without flaps
    Infeasible { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    /// The planform actually used, which is the default planform if the input was invalid
    pub planform: Planform,
    pub planform_valid: bool,
    pub planform_problems: Vec<String>,

    pub flap_type: FlapType,
    pub target_cl_max: f64,

    /// Clean wing maximum lift coefficient, from the stall sweep or as supplied
    pub clean_cl_max: f64,

    /// The stall point found by the sweep, absent when the clean value was supplied
    pub stall: Option<StallPoint>,
    pub sectional_lift: Option<SectionalLiftTable>,

    /// The increment of maximum lift coefficient over the clean wing, target minus clean
    pub required_increment: f64,
    pub outcome: HldOutcome,

    /// The flap deflection the wing geometry was built with, degrees
    pub deflection: f64,

    /// The number of flaps actually cut from the wing geometry
    pub flaps_built: usize,
}

impl SizingReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The results of a sizing run: the report and the assembled wing.
#[derive(Debug, Clone)]
pub struct SizedWing {
    pub report: SizingReport,
    pub wing: WingAssembly,
}

pub struct SizingRun {
    pub planform: Planform,
    pub params: SizingParams,
    pub limits: PlanformLimits,
}

impl SizingRun {
    pub fn new(planform: Planform, params: SizingParams) -> Self {
        Self {
            planform,
            params,
            limits: PlanformLimits::default(),
        }
    }

    /// Run the sizing.
    ///
    /// An invalid planform is replaced by the default one, and an infeasible target leaves the
    /// wing unflapped; both are reported through the notifier and the run continues. An
    /// unrecognized flap type, a solver failure or a wing which does not stall end the run with
    /// an error.
    ///
    /// # Arguments
    ///
    /// * `section_solver`: the two dimensional solver for the sectional maximum lift
    /// * `surface_solver`: the three dimensional lifting surface solver
    /// * `notifier`: receives progress, advisories and recovered failures
    ///
    /// returns: Result<SizedWing, Box<dyn Error, Global>>
    pub fn run(
        &self,
        section_solver: &dyn SectionSolver,
        surface_solver: &dyn LiftingSurfaceSolver,
        notifier: &dyn Notifier,
    ) -> Result<SizedWing> {
        self.params.validate()?;
        let resolved = self.planform.clone().resolve(&self.limits, notifier);
        let planform = resolved.planform;
        let flap_type = planform.flap_type()?;

        let (clean_cl_max, stall, sectional_lift) = match self.params.clean_cl_max {
            Some(value) => {
                debug!("Using the supplied clean CLmax {:.4}", value);
                (value, None, None)
            }
            None => {
                let table = SectionLiftProfile::new(section_solver, &self.params)
                    .build(&planform, notifier)?;
                let surface = LiftingSurface::from_planform(
                    &planform,
                    table.span_fractions(),
                    planform.speed / self.params.speed_of_sound,
                );
                let stall =
                    WingStallSolver::new(surface_solver, &self.params).solve(&surface, &table)?;
                (stall.cl_max, Some(stall), Some(table))
            }
        };
        info!("Clean wing CLmax {:.4}", clean_cl_max);

        let inputs = HldInputs {
            flap_type,
            clean_cl_max,
            target_cl_max: planform.target_cl_max,
            max_deflection: planform.max_deflection,
            trim_factor: self.params.trim_factor,
            cl_alpha: self.params.cl_alpha,
        };

        let search = HingeSearch::new(&planform, inputs, planform.rear_spar);
        let outcome = match search.run(notifier) {
            Ok(FlapRequirement::NotRequired {
                clean_trimmed,
                target,
            }) => HldOutcome::NoFlapRequired {
                clean_trimmed,
                target,
            },
            Ok(FlapRequirement::Sized(result)) => HldOutcome::Sized(result),
            Err(e) => match e.downcast_ref::<SizingError>() {
                Some(SizingError::Infeasible { .. }) => {
                    notifier.report(SizingEvent::Infeasible {
                        message: e.to_string(),
                    });
                    HldOutcome::Infeasible {
                        message: e.to_string(),
                    }
                }
                _ => return Err(e),
            },
        };

        let deflection = planform.max_deflection;
        let layout = match &outcome {
            HldOutcome::Sized(result) => Some(FlapLayout {
                flap_type,
                hinge: result.hinge,
                flap_count: result.flap_count,
                deflection,
            }),
            _ => None,
        };
        let wing = WingAssembly::build(
            &planform,
            layout.as_ref(),
            self.params.overlap_fraction,
            notifier,
        )?;

        let report = SizingReport {
            flap_type,
            target_cl_max: planform.target_cl_max,
            clean_cl_max,
            stall,
            sectional_lift,
            required_increment: planform.target_cl_max - clean_cl_max,
            outcome,
            deflection,
            flaps_built: wing.flap_count(),
            planform_valid: resolved.valid,
            planform_problems: resolved.problems,
            planform,
        };

        Ok(SizedWing { report, wing })
    }
}

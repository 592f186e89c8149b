use crate::aero::{LiftingSurface, LiftingSurfaceSolver, SectionalLiftTable};
use crate::errors::SizingError;
use crate::sizing::SizingParams;
use crate::Result;
use serde::Serialize;
use tracing::{debug, trace};

/// The wing maximum lift coefficient and the angle of attack in degrees at which it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StallPoint {
    pub cl_max: f64,
    pub alpha: f64,
}

/// Finds the clean wing maximum lift coefficient by the critical section method: the angle of
/// attack is raised in fixed steps until the local lift coefficient at any station exceeds the
/// sectional maximum at that station.
pub struct WingStallSolver<'a> {
    solver: &'a dyn LiftingSurfaceSolver,
    alpha_step: f64,
    max_alpha: f64,
}

impl<'a> WingStallSolver<'a> {
    pub fn new(solver: &'a dyn LiftingSurfaceSolver, params: &SizingParams) -> Self {
        Self {
            solver,
            alpha_step: params.alpha_step,
            max_alpha: params.max_alpha,
        }
    }

    /// Sweep the angle of attack from zero until the first station stalls.
    ///
    /// # Arguments
    ///
    /// * `surface`: the wing, with local lift reported at the stations of the table
    /// * `table`: the sectional maximum lift coefficients
    ///
    /// returns: Result<StallPoint, Box<dyn Error, Global>>
    pub fn solve(&self, surface: &LiftingSurface, table: &SectionalLiftTable) -> Result<StallPoint> {
        if !(self.alpha_step.is_finite() && self.alpha_step > 0.0) {
            return Err(Box::new(SizingError::InvalidParameter {
                name: "alpha_step",
                value: self.alpha_step,
            }));
        }
        if !self.max_alpha.is_finite() {
            return Err(Box::new(SizingError::InvalidParameter {
                name: "max_alpha",
                value: self.max_alpha,
            }));
        }

        let mut step = 0;
        loop {
            let alpha = step as f64 * self.alpha_step;
            if alpha > self.max_alpha + 1e-9 {
                return Err(Box::new(SizingError::DidNotStall {
                    max_alpha: self.max_alpha,
                }));
            }

            let lift = self.solver.solve(surface, alpha)?;
            if lift.strip_cl.len() != table.len() {
                return Err(Box::new(SizingError::StationMismatch {
                    expected: table.len(),
                    found: lift.strip_cl.len(),
                }));
            }

            let stalled = lift
                .strip_cl
                .iter()
                .zip(table.samples())
                .filter(|(cl, sample)| **cl > sample.cl_max)
                .count();
            trace!(
                "alpha {:.1}: CL {:.4}, {} station(s) above sectional CLmax",
                alpha,
                lift.cl_total,
                stalled
            );

            if stalled >= 1 {
                debug!("Wing stalls at {:.1} deg with CL {:.4}", alpha, lift.cl_total);
                return Ok(StallPoint {
                    cl_max: lift.cl_total,
                    alpha,
                });
            }

            step += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aero::{LiftDistribution, LiftSample};
    use crate::planform::Planform;
    use approx::assert_relative_eq;
    use test_case::test_case;

    /// Uniform local lift of 0.1 per degree across all stations
    struct Linear {
        stations: usize,
    }

    impl LiftingSurfaceSolver for Linear {
        fn solve(&self, _surface: &LiftingSurface, alpha: f64) -> Result<LiftDistribution> {
            Ok(LiftDistribution {
                cl_total: 0.09 * alpha,
                strip_cl: vec![0.1 * alpha; self.stations],
            })
        }
    }

    fn table(values: &[f64]) -> SectionalLiftTable {
        SectionalLiftTable::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| LiftSample {
                    span_fraction: i as f64 / values.len() as f64,
                    cl_max: *v,
                })
                .collect(),
        )
    }

    fn surface() -> LiftingSurface {
        LiftingSurface::from_planform(&Planform::default(), vec![0.0, 0.25, 0.5, 0.75], 0.2)
    }

    #[test]
    fn stalls_at_first_exceedance() {
        let solver = Linear { stations: 4 };
        let stall = WingStallSolver::new(&solver, &SizingParams::default())
            .solve(&surface(), &table(&[1.6, 1.22, 1.5, 1.4]))
            .unwrap();

        // 0.1 * 12.5 = 1.25 is the first value above 1.22
        assert_relative_eq!(stall.alpha, 12.5);
        assert_relative_eq!(stall.cl_max, 0.09 * 12.5, epsilon = 1e-12);
    }

    #[test]
    fn bounded_sweep_reports_no_stall() {
        let solver = Linear { stations: 4 };
        let err = WingStallSolver::new(&solver, &SizingParams::default())
            .solve(&surface(), &table(&[10.0; 4]))
            .unwrap_err();
        let sizing = err.downcast_ref::<SizingError>().unwrap();
        assert!(matches!(sizing, SizingError::DidNotStall { .. }));
    }

    #[test_case(0.0)]
    #[test_case(-0.5)]
    #[test_case(f64::NAN)]
    fn unusable_alpha_step_is_rejected(alpha_step: f64) {
        let solver = Linear { stations: 4 };
        let params = SizingParams {
            alpha_step,
            ..SizingParams::default()
        };
        let err = WingStallSolver::new(&solver, &params)
            .solve(&surface(), &table(&[10.0; 4]))
            .unwrap_err();
        let sizing = err.downcast_ref::<SizingError>().unwrap();
        assert!(matches!(
            sizing,
            SizingError::InvalidParameter {
                name: "alpha_step",
                ..
            }
        ));
    }

    #[test]
    fn station_count_must_match() {
        let solver = Linear { stations: 3 };
        let err = WingStallSolver::new(&solver, &SizingParams::default())
            .solve(&surface(), &table(&[1.0; 4]))
            .unwrap_err();
        let sizing = err.downcast_ref::<SizingError>().unwrap();
        assert!(matches!(
            sizing,
            SizingError::StationMismatch {
                expected: 4,
                found: 3
            }
        ));
    }
}

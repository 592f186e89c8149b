//! Simple closed form approximations of the two external solvers. They let a sizing run proceed
//! end to end without the viscous section solver or the lifting surface solver, and give tests a
//! deterministic, physically plausible stand-in. Neither is a substitute for the real tools when
//! the numbers matter.

use crate::aero::{
    LiftDistribution, LiftingSurface, LiftingSurfaceSolver, SectionQuery, SectionSolver,
};
use crate::Result;
use std::f64::consts::PI;

/// Estimates the section maximum lift coefficient from the thickness and camber of the airfoil,
/// with a weak Reynolds number dependence and a compressibility reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalSectionModel {
    /// Reynolds number at which the scale correction is one
    pub reference_reynolds: f64,
}

impl Default for EmpiricalSectionModel {
    fn default() -> Self {
        Self {
            reference_reynolds: 6.0e6,
        }
    }
}

impl SectionSolver for EmpiricalSectionModel {
    fn cl_max(&self, query: &SectionQuery) -> Result<f64> {
        if query.reynolds <= 0.0 {
            return Err(format!(
                "Reynolds number must be positive, got {} at span fraction {:.3}",
                query.reynolds, query.span_fraction
            )
            .into());
        }

        let tc = query.airfoil.thickness_ratio();
        let camber = query.airfoil.max_camber();
        let base = 0.8 + 6.0 * tc + 4.0 * camber;
        let scale = (query.reynolds / self.reference_reynolds).powf(0.08);
        let compressibility = 1.0 - 0.6 * query.mach * query.mach;

        Ok(base * scale * compressibility)
    }
}

/// Lift distribution by Schrenk's approximation: the local loading is the mean of the planform
/// chord and the elliptic chord of the same area, scaled to a total lift coefficient from the
/// swept wing lift curve slope.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SchrenkStrips;

impl SchrenkStrips {
    /// Wing lift curve slope per radian from the Helmbold/DATCOM expression, using the half
    /// chord sweep.
    pub fn lift_slope(surface: &LiftingSurface) -> f64 {
        let b = surface.span();
        let aspect = 2.0 * b * b / surface.area();
        let half_chord_x = surface.tip.leading_edge.x + 0.5 * surface.tip.chord - 0.5 * surface.root.chord;
        let tan_half = half_chord_x / b;
        let beta2 = 1.0 - surface.mach * surface.mach;

        let root = (aspect * aspect * beta2 * (1.0 + tan_half * tan_half / beta2) + 4.0).sqrt();
        2.0 * PI * aspect / (2.0 + root)
    }

    /// Chord weighted mean of the twist over the report stations, in degrees.
    fn mean_twist(surface: &LiftingSurface) -> f64 {
        let (weighted, total) = surface
            .station_fractions
            .iter()
            .fold((0.0, 0.0), |(w, t), f| {
                let c = surface.chord_at(*f);
                (w + c * surface.twist_at(*f), t + c)
            });
        if total > 0.0 { weighted / total } else { 0.0 }
    }
}

impl LiftingSurfaceSolver for SchrenkStrips {
    fn solve(&self, surface: &LiftingSurface, alpha: f64) -> Result<LiftDistribution> {
        if surface.mach >= 1.0 {
            return Err("The lift curve slope approximation is only valid below Mach 1".into());
        }

        let b = surface.span();
        let area = surface.area();
        let zero_lift = -2.0 * surface.max_camber();
        let cl_total = Self::lift_slope(surface)
            * (alpha.to_radians() - zero_lift + Self::mean_twist(surface).to_radians());

        let elliptic_root = 4.0 * area / (PI * b);
        let strip_cl = surface
            .station_fractions
            .iter()
            .map(|eta| {
                let c = surface.chord_at(*eta);
                let ce = elliptic_root * (1.0 - eta * eta).max(0.0).sqrt();
                cl_total * (c + ce) / (2.0 * c)
            })
            .collect();

        Ok(LiftDistribution { cl_total, strip_cl })
    }
}

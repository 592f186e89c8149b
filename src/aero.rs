//! Clean wing aerodynamics: the spanwise table of sectional maximum lift coefficients and the
//! angle of attack sweep which finds the wing maximum lift coefficient from it.
//!
//! The two solvers these rely on are external tools. They are reached through the
//! `SectionSolver` and `LiftingSurfaceSolver` traits; `reference` has simple approximations which
//! satisfy both contracts.

pub mod reference;
mod section_lift;
mod wing_stall;

use crate::airfoil::AirfoilSection;
use crate::common::lerp;
use crate::geom2::Point2;
use crate::geom3::Point3;
use crate::planform::Planform;
use crate::Result;

pub use self::section_lift::{LiftSample, OutlierRatios, SectionLiftProfile, SectionalLiftTable};
pub use self::wing_stall::{StallPoint, WingStallSolver};

/// One query of the two dimensional section solver, a spanwise cut of the wing.
#[derive(Debug, Clone, Copy)]
pub struct SectionQuery<'a> {
    pub span_fraction: f64,
    pub chord: f64,
    pub reynolds: f64,
    pub mach: f64,
    pub airfoil: &'a AirfoilSection,
}

/// A two dimensional viscous section solver which reports the maximum lift coefficient of a
/// section.
pub trait SectionSolver: Sync {
    fn cl_max(&self, query: &SectionQuery) -> Result<f64>;
}

/// A defining station of the lifting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStation {
    pub leading_edge: Point3,
    pub chord: f64,

    /// Geometric twist in degrees
    pub twist: f64,
}

/// The description of the wing passed to the lifting surface solver.
#[derive(Debug, Clone)]
pub struct LiftingSurface {
    pub root: SurfaceStation,
    pub kink: SurfaceStation,
    pub tip: SurfaceStation,

    /// Leading edge sweep and dihedral in degrees
    pub sweep: f64,
    pub dihedral: f64,

    /// The mean camber line of the airfoil, chord-normalized
    pub camber_line: Vec<Point2>,
    pub mach: f64,

    /// Span fractions of the stations at which local lift coefficients are reported
    pub station_fractions: Vec<f64>,
}

impl LiftingSurface {
    /// Describe the planform as a lifting surface with local lift reported at the given span
    /// fractions.
    ///
    /// # Arguments
    ///
    /// * `planform`: the wing planform
    /// * `station_fractions`: the span fractions at which local lift is reported
    /// * `mach`: the free stream Mach number
    ///
    /// returns: LiftingSurface
    pub fn from_planform(planform: &Planform, station_fractions: Vec<f64>, mach: f64) -> Self {
        let station = |y: f64| SurfaceStation {
            leading_edge: planform.leading_edge_at(y),
            chord: planform.chord_at(y),
            twist: planform.twist_at(y),
        };

        Self {
            root: station(0.0),
            kink: station(planform.kink_position),
            tip: station(planform.span),
            sweep: planform.sweep,
            dihedral: planform.dihedral,
            camber_line: planform.airfoil.camber_line(21),
            mach,
            station_fractions,
        }
    }

    pub fn span(&self) -> f64 {
        self.tip.leading_edge.y - self.root.leading_edge.y
    }

    fn interpolate(&self, fraction: f64, value: impl Fn(&SurfaceStation) -> f64) -> f64 {
        let y = fraction * self.span();
        let yk = self.kink.leading_edge.y;
        if y <= yk {
            lerp(value(&self.root), value(&self.kink), y / yk)
        } else {
            lerp(
                value(&self.kink),
                value(&self.tip),
                (y - yk) / (self.tip.leading_edge.y - yk),
            )
        }
    }

    pub fn chord_at(&self, fraction: f64) -> f64 {
        self.interpolate(fraction, |s| s.chord)
    }

    pub fn twist_at(&self, fraction: f64) -> f64 {
        self.interpolate(fraction, |s| s.twist)
    }

    /// Largest height of the camber line above the chord, chord-normalized.
    pub fn max_camber(&self) -> f64 {
        self.camber_line.iter().map(|p| p.y).fold(0.0, f64::max)
    }

    /// Projected planform area of one side of the wing.
    pub fn area(&self) -> f64 {
        let inner = self.kink.leading_edge.y - self.root.leading_edge.y;
        let outer = self.tip.leading_edge.y - self.kink.leading_edge.y;
        0.5 * (self.root.chord + self.kink.chord) * inner
            + 0.5 * (self.kink.chord + self.tip.chord) * outer
    }
}

/// Total and spanwise local lift coefficients of one lifting surface case.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftDistribution {
    pub cl_total: f64,
    pub strip_cl: Vec<f64>,
}

/// A three dimensional lifting surface solver run at a fixed angle of attack in degrees.
pub trait LiftingSurfaceSolver {
    fn solve(&self, surface: &LiftingSurface, alpha: f64) -> Result<LiftDistribution>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_from_seed_planform() {
        let p = Planform::default();
        let s = LiftingSurface::from_planform(&p, vec![0.0, 0.5], 0.2);
        assert_relative_eq!(s.span(), 12.0);
        assert_relative_eq!(s.chord_at(1.0 / 3.0), 3.5, epsilon = 1e-12);
        assert_relative_eq!(s.chord_at(1.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.twist_at(0.5), -1.0, epsilon = 1e-12);
        assert_relative_eq!(s.area(), 4.25 * 4.0 + 2.75 * 8.0, epsilon = 1e-12);
    }
}

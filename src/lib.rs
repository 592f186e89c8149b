//! Stall-limited sizing of trailing edge high lift devices for swept, tapered, kinked wings.
//!
//! The crate determines the clean wing maximum lift coefficient from sectional data, searches for
//! the smallest flap (hinge location and flap count) that reaches a required maximum lift
//! coefficient, and synthesizes the deflected flap solids for each flapped wing segment.

use std::error::Error;

pub mod aero;
pub mod airfoil;
pub mod common;
mod errors;
pub mod flaps;
pub mod geom2;
pub mod geom3;
pub mod hld;
pub mod notify;
pub mod planform;
pub mod sizing;
pub mod wing;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub use self::aero::{SectionLiftProfile, StallPoint, WingStallSolver};
pub use self::airfoil::AirfoilSection;
pub use self::errors::{InvalidGeometry, SizingError};
pub use self::flaps::{FlapSection, FlapSynthesis};
pub use self::geom2::{Point2, Vector2};
pub use self::geom3::{Iso3, LoftedSolid, Point3, SectionFrame, UnitVec3, Vector3};
pub use self::hld::{FlapType, HingeSearch, HingeSearchResult, HldGeometry};
pub use self::notify::{LogNotifier, Notifier, SizingEvent};
pub use self::planform::Planform;
pub use self::sizing::{HldOutcome, SizedWing, SizingParams, SizingReport, SizingRun};
pub use self::wing::{FlapLayout, WingAssembly};

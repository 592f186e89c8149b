use crate::hld::FlapType;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures while constructing or cutting wing and flap solids.
#[derive(Debug)]
pub enum InvalidGeometry {
    NotEnoughPoints,
    GeometricOpFailed,

    /// The rulings of a dividing surface do not reach both end planes of the solid being cut,
    /// so the cut would leave a bridge of material at one end.
    SurfaceDoesNotPenetrate,

    /// Cutting a wing segment produced fewer than two fragments.
    SplitFailed {
        style: &'static str,
        fragments: usize,
    },
}

impl Display for InvalidGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGeometry::SplitFailed { style, fragments } => write!(
                f,
                "Unable to construct a {} flap from the wing geometry ({} fragment(s) after \
                 the cut). The trailing edge of the airfoil is likely unsuitable for this flap \
                 style, try a different airfoil or flap type",
                style, fragments
            ),
            InvalidGeometry::SurfaceDoesNotPenetrate => write!(
                f,
                "The dividing surface does not extend through both ends of the wing segment"
            ),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Error for InvalidGeometry {}

/// Failures of the sizing process itself, as opposed to the geometry.
#[derive(Debug)]
pub enum SizingError {
    /// The flap type name from the planform record is not one of the known styles.
    UnknownFlapType(String),

    /// No hinge location between the rear spar and the trailing edge delivers the required lift
    /// increment with two flap segments.
    Infeasible {
        flap_type: FlapType,
        rear_spar: f64,
        max_deflection: f64,
    },

    /// The angle of attack sweep reached its limit without any station exceeding its sectional
    /// maximum lift coefficient.
    DidNotStall { max_alpha: f64 },

    /// A lifting surface solver returned a different number of stations than the sectional
    /// lift table holds.
    StationMismatch { expected: usize, found: usize },

    /// A run parameter is outside the range the sizing can work with.
    InvalidParameter { name: &'static str, value: f64 },
}

impl Display for SizingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::UnknownFlapType(name) => write!(
                f,
                "Flap type '{}' not recognised, expected one of Plain, Slotted or Fowler",
                name
            ),
            SizingError::Infeasible {
                flap_type,
                rear_spar,
                max_deflection,
            } => write!(
                f,
                "With the {} flap type and rear spar at {:.2} of the chord the wing cannot attain \
                 the specified CLmax at {:.1} deg deflection. Choose a different flap type, move \
                 the rear spar forward or increase the maximum deflection angle of the flap",
                flap_type, rear_spar, max_deflection
            ),
            SizingError::DidNotStall { max_alpha } => write!(
                f,
                "No spanwise station stalled before reaching {:.1} deg angle of attack",
                max_alpha
            ),
            SizingError::StationMismatch { expected, found } => write!(
                f,
                "Lifting surface solution has {} stations, the sectional lift table has {}",
                found, expected
            ),
            SizingError::InvalidParameter { name, value } => {
                write!(f, "Sizing parameter '{}' has the unusable value {}", name, value)
            }
        }
    }
}

impl Error for SizingError {}

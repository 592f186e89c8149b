//! Three dimensional geometry: the ruled wing solids, the dividing surfaces used to cut flaps from
//! them, and the rigid transforms used to deflect those flaps.
//!
//! The wing is built in a frame with x pointing aft along the root chord, y pointing out along
//! the span, and z pointing up.

mod lofted;
mod plane3;

use parry3d_f64::na::UnitQuaternion;

pub use self::lofted::{LoftedSolid, RuledSurface, SectionFrame};
pub use self::plane3::Plane3;

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
pub type Iso3 = parry3d_f64::na::Isometry3<f64>;

/// Build the rigid transform which rotates by `angle` (radians, right-handed) about the axis
/// through `point` in the direction `axis`.
///
/// # Examples
///
/// ```
/// use hldsize::geom3::rotation_about;
/// use hldsize::{Point3, Vector3};
/// use approx::assert_relative_eq;
/// let iso = rotation_about(&Point3::new(1.0, 0.0, 0.0), &Vector3::z_axis(), std::f64::consts::PI);
/// let moved = iso * Point3::new(2.0, 0.0, 0.0);
/// assert_relative_eq!(moved, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
/// ```
pub fn rotation_about(point: &Point3, axis: &UnitVec3, angle: f64) -> Iso3 {
    Iso3::rotation_wrt_point(UnitQuaternion::from_axis_angle(axis, angle), *point)
}

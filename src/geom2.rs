//! Planar geometry used for airfoil sections and the profiles of flap dividing surfaces. Section
//! coordinates are expressed as (x, z) pairs normalized by the chord, with x running from the
//! leading edge to the trailing edge and z pointing up.

mod arc2;
pub mod polyline2;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Vector2 = parry2d_f64::na::Vector2<f64>;

pub use self::arc2::Arc2;
pub use self::polyline2::{point_in_polygon, signed_area, split_polygon};

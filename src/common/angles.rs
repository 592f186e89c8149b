//! This module contains common constructs for working with angles

use std::f64::consts::PI;

/// Enumerates the two possible directions of rotation, clockwise and counter-clockwise
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AngleDir {
    Cw,
    Ccw,
}

impl AngleDir {
    /// The direction of a turn with the given signed magnitude, counter-clockwise when positive.
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 {
            AngleDir::Cw
        } else {
            AngleDir::Ccw
        }
    }
}

/// Re-expresses an angle, specified in radians, in the range [0, 2pi].  If the angle was already
/// in the range [0, 2pi], it is returned unchanged.
///
/// # Arguments
///
/// * `angle`: The angle to re-express, in radians
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use hldsize::common::angle_to_2pi;
/// use std::f64::consts::PI;
/// use approx::assert_relative_eq;
/// let new_angle = angle_to_2pi(-PI);
/// assert_relative_eq!(new_angle, PI, epsilon = 1.0e-10);
/// ```
pub fn angle_to_2pi(angle: f64) -> f64 {
    let mut angle = angle % (2.0 * PI);
    if angle < 0.0 {
        angle += 2.0 * PI;
    }
    angle
}

/// Returns the signed angle swept when travelling from `start` to `end` in the given direction.
/// The magnitude is in [0, 2pi) and the sign matches the direction, so a counter-clockwise sweep
/// is positive and a clockwise sweep is negative.
///
/// # Arguments
///
/// * `start`: the starting angle in radians
/// * `end`: the ending angle in radians
/// * `dir`: the direction of travel
///
/// returns: f64
pub fn swept_angle(start: f64, end: f64, dir: AngleDir) -> f64 {
    match dir {
        AngleDir::Ccw => angle_to_2pi(end - start),
        AngleDir::Cw => -angle_to_2pi(start - end),
    }
}

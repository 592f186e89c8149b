mod angles;
pub mod points;

pub use angles::{angle_to_2pi, swept_angle, AngleDir};

/// Generate a vec of domain values which are linearly spaced between `start` and `end` and which
/// have a count of `count`. The first value will be `start` and the last value will be `end`.
///
/// # Arguments
///
/// * `start`: the starting value of the domain, inclusive
/// * `end`: the ending value of the domain, inclusive
/// * `count`: the total number of discrete, evenly spaced values in the domain, at least 2
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use hldsize::common::linear_space;
/// let domain = linear_space(0.0, 1.0, 3);
/// assert_eq!(domain, vec![0.0, 0.5, 1.0]);
/// ```
pub fn linear_space(start: f64, end: f64, count: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(count);
    let step = (end - start) / (count - 1) as f64;
    for i in 0..count {
        result.push(start + i as f64 * step);
    }
    result
}

/// Linear interpolation between `a` and `b`, where `f = 0` gives `a` and `f = 1` gives `b`.
pub fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a + (b - a) * f
}

/// Round a value to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_space_ends() {
        let d = linear_space(-1.0, 3.0, 5);
        assert_eq!(d.len(), 5);
        assert_relative_eq!(d[0], -1.0);
        assert_relative_eq!(d[4], 3.0);
        assert_relative_eq!(d[2], 1.0);
    }

    #[test]
    fn round_to_hundredths() {
        assert_relative_eq!(round_to(0.7000000001, 2), 0.70);
        assert_relative_eq!(round_to(0.6999999, 2), 0.70, epsilon = 1e-12);
    }
}

//! Small numeric helpers shared across the framework.

/// Rounds a value to a fixed number of decimal places.
///
/// Used for reporting only; internal contracts always carry the unrounded
/// values.
///
/// # Example
///
/// ```
/// use marasi_traits::stats::round_to;
///
/// assert_eq!(round_to(-0.8235, 2), -0.82);
/// assert_eq!(round_to(66.666, 1), 66.7);
/// ```
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Mean of the finite values in a slice, or `None` when there are none.
#[must_use]
pub fn finite_mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(0.705, 2), 0.71);
        assert_relative_eq!(round_to(-0.8249, 2), -0.82);
        assert_relative_eq!(round_to(33.333_333, 1), 33.3);
        assert_relative_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn test_finite_mean() {
        assert_eq!(finite_mean(&[]), None);
        assert_eq!(finite_mean(&[f64::NAN]), None);
        assert_relative_eq!(finite_mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
        assert_relative_eq!(finite_mean(&[1.0, f64::NAN, 3.0]).unwrap(), 2.0);
    }
}

//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Look up a value in a table of upper-bounded bands.
///
/// `bands` is a list of `[upper_bound, output]` pairs, checked in order. The
/// output of the first band whose upper bound is strictly greater than
/// `value` is returned. If no band matches `otherwise` is returned.
pub fn band_lookup<T>(bands: &[[T; 2]], value: T, otherwise: T) -> T
where
    T: Float,
{
    bands
        .iter()
        .find(|band| value < band[0])
        .map(|band| band[1])
        .unwrap_or(otherwise)
}

/// Return `true` if all values are finite (not NaN or infinite).
pub fn all_finite<T>(values: &[T]) -> bool
where
    T: Float,
{
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_band_lookup() {
        let bands = [[10.0, 1.0], [50.0, 2.0], [200.0, 3.0]];

        assert_eq!(band_lookup(&bands, 0.0, 9.0), 1.0);
        assert_eq!(band_lookup(&bands, 10.0, 9.0), 2.0);
        assert_eq!(band_lookup(&bands, 199.9, 9.0), 3.0);
        assert_eq!(band_lookup(&bands, 200.0, 9.0), 9.0);
        assert_eq!(band_lookup(&[], 5.0, 9.0), 9.0);
    }

    #[test]
    fn test_all_finite() {
        assert!(all_finite(&[0.0, -1.0, 1e300]));
        assert!(!all_finite(&[0.0, std::f64::NAN]));
        assert!(!all_finite(&[std::f64::INFINITY]));
    }
}

//! Window and difference operations on a single series.

use crate::series::SeriesError;

/// Discard the first `count` observations, keeping the suffix.
///
/// Saturating: `count >= len` yields an empty series, which downstream
/// validation rejects as too short. For `count <= len` the result is
/// exactly the length `len - count` suffix of the input.
///
/// # Examples
/// ```
/// use epifit_models::series::trim;
///
/// assert_eq!(trim(&[1, 2, 3, 4], 2), vec![3, 4]);
/// assert_eq!(trim(&[1, 2], 5), Vec::<i64>::new());
/// ```
pub fn trim(series: &[i64], count: usize) -> Vec<i64> {
    series.get(count..).unwrap_or(&[]).to_vec()
}

/// Keep at most the last `len` observations (the newest days).
pub fn suffix(series: &[i64], len: usize) -> Vec<i64> {
    let skip = series.len().saturating_sub(len);
    series[skip..].to_vec()
}

/// Derive the day-over-day delta series.
///
/// For a series of length `N >= 2` the result has length `N - 1` with
/// `result[i] = series[i + 1] - series[i]`.
///
/// # Errors
///
/// Returns [`SeriesError::TooShort`] when the series has fewer than 2
/// observations, since no transition exists to difference.
pub fn derive(series: &[i64]) -> Result<Vec<i64>, SeriesError> {
    if series.len() < 2 {
        return Err(SeriesError::TooShort {
            got: series.len(),
            need: 2,
        });
    }
    Ok(series.windows(2).map(|w| w[1] - w[0]).collect())
}

/// Drop leading zero observations.
///
/// Companion operation off the main fit path: positions the window at the
/// first recorded case.
///
/// # Errors
///
/// Returns [`SeriesError::TooShort`] when every observation is zero and
/// nothing would remain.
pub fn strip_leading_zeros(series: &[i64]) -> Result<Vec<i64>, SeriesError> {
    let start = series
        .iter()
        .position(|&v| v != 0)
        .ok_or(SeriesError::TooShort { got: 0, need: 1 })?;
    Ok(series[start..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // trim
    // ========================================

    #[test]
    fn test_trim_keeps_suffix() {
        assert_eq!(trim(&[10, 20, 30, 40], 1), vec![20, 30, 40]);
    }

    #[test]
    fn test_trim_zero_is_identity() {
        assert_eq!(trim(&[1, 2, 3], 0), vec![1, 2, 3]);
    }

    #[test]
    fn test_trim_whole_series() {
        assert_eq!(trim(&[1, 2, 3], 3), Vec::<i64>::new());
    }

    #[test]
    fn test_trim_beyond_length_saturates() {
        assert_eq!(trim(&[1, 2, 3], 10), Vec::<i64>::new());
    }

    // ========================================
    // suffix
    // ========================================

    #[test]
    fn test_suffix_keeps_newest() {
        assert_eq!(suffix(&[1, 2, 3, 4], 2), vec![3, 4]);
    }

    #[test]
    fn test_suffix_longer_than_series_is_identity() {
        assert_eq!(suffix(&[1, 2], 5), vec![1, 2]);
    }

    #[test]
    fn test_suffix_zero_is_empty() {
        assert_eq!(suffix(&[1, 2], 0), Vec::<i64>::new());
    }

    // ========================================
    // derive
    // ========================================

    #[test]
    fn test_derive_first_differences() {
        assert_eq!(derive(&[1, 2, 4, 8]).unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_derive_handles_decreases() {
        assert_eq!(derive(&[5, 3, 4]).unwrap(), vec![-2, 1]);
    }

    #[test]
    fn test_derive_too_short() {
        assert_eq!(
            derive(&[5]),
            Err(SeriesError::TooShort { got: 1, need: 2 })
        );
        assert_eq!(
            derive(&[]),
            Err(SeriesError::TooShort { got: 0, need: 2 })
        );
    }

    // ========================================
    // strip_leading_zeros
    // ========================================

    #[test]
    fn test_strip_leading_zeros() {
        assert_eq!(strip_leading_zeros(&[0, 0, 1, 2]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_strip_leading_zeros_no_zeros() {
        assert_eq!(strip_leading_zeros(&[1, 2]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_strip_leading_zeros_all_zero() {
        assert!(strip_leading_zeros(&[0, 0, 0]).is_err());
        assert!(strip_leading_zeros(&[]).is_err());
    }

    // ========================================
    // Properties
    // ========================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn series_strategy() -> impl Strategy<Value = Vec<i64>> {
            proptest::collection::vec(-1_000_000i64..1_000_000, 0..64)
        }

        proptest! {
            #[test]
            fn prop_derive_length_and_values(v in series_strategy()) {
                match derive(&v) {
                    Ok(d) => {
                        prop_assert!(v.len() >= 2);
                        prop_assert_eq!(d.len(), v.len() - 1);
                        for i in 0..d.len() {
                            prop_assert_eq!(d[i], v[i + 1] - v[i]);
                        }
                    }
                    Err(SeriesError::TooShort { got, need }) => {
                        prop_assert!(v.len() < 2);
                        prop_assert_eq!(got, v.len());
                        prop_assert_eq!(need, 2);
                    }
                }
            }

            #[test]
            fn prop_trim_is_exact_suffix(v in series_strategy(), k in 0usize..80) {
                let trimmed = trim(&v, k);
                let expected_len = v.len().saturating_sub(k);
                prop_assert_eq!(trimmed.len(), expected_len);
                prop_assert_eq!(trimmed.as_slice(), &v[v.len() - expected_len..]);
            }

            #[test]
            fn prop_suffix_never_grows(v in series_strategy(), len in 0usize..80) {
                let s = suffix(&v, len);
                prop_assert!(s.len() <= v.len());
                prop_assert!(s.len() <= len);
                prop_assert_eq!(s.as_slice(), &v[v.len() - s.len()..]);
            }
        }
    }
}

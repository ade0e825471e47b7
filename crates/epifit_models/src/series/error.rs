//! Series preprocessing error types.

use thiserror::Error;

/// Observation-series preprocessing errors.
///
/// # Variants
/// - `TooShort`: A series has too few observations for the requested
///   operation (delta derivation needs at least 2; leading-zero stripping
///   needs at least one non-zero entry)
///
/// # Examples
/// ```
/// use epifit_models::series::SeriesError;
///
/// let err = SeriesError::TooShort { got: 1, need: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "series has 1 observations, need at least 2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Too few observations remain for the requested operation.
    #[error("series has {got} observations, need at least {need}")]
    TooShort {
        /// Number of observations present.
        got: usize,
        /// Minimum number required.
        need: usize,
    },
}

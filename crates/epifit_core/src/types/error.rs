//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from the nonlinear least-squares solver

use thiserror::Error;

/// Nonlinear least-squares solver errors.
///
/// Provides structured error handling for solver operations with
/// descriptive context for each failure mode. Note that hitting the
/// iteration cap is *not* an error: the solver returns a result with
/// `converged == false` in that case, leaving the usability decision to
/// the caller.
///
/// # Variants
/// - `InvalidProblem`: The problem is malformed (empty parameter or
///   residual vector, bounds/parameter count mismatch)
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use epifit_core::types::SolverError;
///
/// let err = SolverError::InvalidProblem("empty parameter vector".to_string());
/// assert_eq!(format!("{}", err), "Invalid problem: empty parameter vector");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Problem definition is malformed.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

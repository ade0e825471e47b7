//! Nonlinear least-squares solving for parameter estimation.
//!
//! This module provides the optimization machinery used to fit model
//! parameters to observed data:
//!
//! - [`LevenbergMarquardtSolver`]: Bounded nonlinear least-squares solver
//! - [`LMConfig`]: Damping-schedule and convergence configuration
//! - [`LMResult`]: Final parameters plus a usability verdict
//! - [`ParameterBounds`]: Box bounds applied to each parameter
//!
//! ## Bounds
//!
//! Bounds are part of the solver configuration, not the residual function:
//! trial steps are projected into the feasible box before evaluation, and
//! the configured bounds can be inspected via
//! [`LevenbergMarquardtSolver::bounds()`] before solving.
//!
//! ## Differentiation
//!
//! The solver computes Jacobians by forward finite differences and only
//! requires the residual function to be evaluable at nearby points. Callers
//! that need exact derivatives can evaluate their residual bodies under
//! dual numbers (see [`crate::traits`]); the solver interface does not
//! assume either strategy.
//!
//! ## Example
//!
//! ```
//! use epifit_core::solvers::{LMConfig, LevenbergMarquardtSolver, ParameterBounds};
//!
//! // Fit y = a * exp(-b * x) to noiseless data with a = 1, b = 1
//! let x_data = [0.0, 1.0, 2.0, 3.0];
//! let y_data = [1.0_f64, (-1.0_f64).exp(), (-2.0_f64).exp(), (-3.0_f64).exp()];
//!
//! let residuals = move |p: &[f64]| -> Vec<f64> {
//!     x_data
//!         .iter()
//!         .zip(y_data.iter())
//!         .map(|(&x, &y)| p[0] * (-p[1] * x).exp() - y)
//!         .collect()
//! };
//!
//! let solver = LevenbergMarquardtSolver::new(LMConfig::default())
//!     .with_bounds(vec![ParameterBounds::non_negative(); 2]);
//! let result = solver.solve(residuals, vec![0.5, 0.5]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 1.0).abs() < 1e-4);
//! ```

mod bounds;
mod levenberg_marquardt;

// Re-export public types at module level
pub use bounds::ParameterBounds;
pub use levenberg_marquardt::{LMConfig, LMResult, LevenbergMarquardtSolver};

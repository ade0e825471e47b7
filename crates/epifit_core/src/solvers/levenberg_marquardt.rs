//! Bounded Levenberg-Marquardt nonlinear least-squares solver.
//!
//! This module provides the [`LevenbergMarquardtSolver`] for solving
//! nonlinear least-squares problems of the form:
//!
//! ```text
//! min_p ||f(p)||^2   subject to   lo <= p <= hi
//! ```
//!
//! # Algorithm
//!
//! The Levenberg-Marquardt algorithm interpolates between Gauss-Newton and
//! gradient descent:
//!
//! ```text
//! (J^T J + λI) δ = -J^T r
//! p_{n+1} = Π(p_n + δ)
//! ```
//!
//! where:
//! - `J` is the Jacobian matrix of residuals (forward finite differences)
//! - `r` is the residual vector
//! - `λ` is the damping factor (adjusted during iteration)
//! - `Π` projects the trial point into the configured parameter box
//!
//! Hitting the iteration cap is reported through `converged == false` on
//! the returned [`LMResult`] rather than as an error, so callers can decide
//! whether a best-effort solution is still usable.
//!
//! # Example
//!
//! ```
//! use epifit_core::solvers::{LMConfig, LevenbergMarquardtSolver, ParameterBounds};
//!
//! // Minimise (p[0] - 2)^2 with p[0] >= 0
//! let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 2.0] };
//!
//! let solver = LevenbergMarquardtSolver::new(LMConfig::default())
//!     .with_bounds(vec![ParameterBounds::non_negative()]);
//! let result = solver.solve(residuals, vec![10.0]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! ```

use crate::solvers::ParameterBounds;
use crate::types::SolverError;

/// Configuration for the Levenberg-Marquardt solver.
///
/// # Fields
///
/// * `tolerance` - Convergence tolerance for the residual norm
/// * `max_iterations` - Maximum number of iterations
/// * `initial_lambda` - Initial damping factor
/// * `lambda_up` - Factor to increase lambda when a step is rejected
/// * `lambda_down` - Factor to decrease lambda when a step is accepted
/// * `min_lambda` / `max_lambda` - Damping factor limits
/// * `param_tolerance` - Convergence tolerance on the projected step size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LMConfig {
    /// Convergence tolerance for the residual norm.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Factor to increase lambda on a rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on an accepted step.
    pub lambda_down: f64,
    /// Minimum damping factor.
    pub min_lambda: f64,
    /// Maximum damping factor.
    pub max_lambda: f64,
    /// Tolerance for projected-step convergence.
    pub param_tolerance: f64,
}

impl Default for LMConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            min_lambda: 1e-10,
            max_lambda: 1e10,
            param_tolerance: 1e-10,
        }
    }
}

impl LMConfig {
    /// Create a new configuration with the given tolerance and iteration cap.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }

    /// Create a fast configuration with relaxed tolerances.
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 50,
            ..Default::default()
        }
    }

    /// Create a high precision configuration.
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-14,
            max_iterations: 500,
            param_tolerance: 1e-14,
            ..Default::default()
        }
    }
}

/// Result of a Levenberg-Marquardt optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct LMResult {
    /// Final optimized parameters.
    pub params: Vec<f64>,
    /// Final residual sum of squares.
    pub residual_ss: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether convergence was achieved (the usability verdict).
    pub converged: bool,
    /// Final lambda value.
    pub final_lambda: f64,
}

impl LMResult {
    /// Create a new result.
    pub fn new(
        params: Vec<f64>,
        residual_ss: f64,
        iterations: usize,
        converged: bool,
        final_lambda: f64,
    ) -> Self {
        Self {
            params,
            residual_ss,
            iterations,
            converged,
            final_lambda,
        }
    }

    /// Get the root mean square error over `n_observations` residuals.
    pub fn rmse(&self, n_observations: usize) -> f64 {
        if n_observations == 0 {
            return 0.0;
        }
        (self.residual_ss / n_observations as f64).sqrt()
    }
}

/// Bounded Levenberg-Marquardt nonlinear least-squares solver.
///
/// The residual function is a pure map from the shared parameter vector to
/// a residual vector; the Jacobian is computed by forward finite
/// differences. Box bounds are part of the solver configuration and every
/// trial step is projected into the feasible region before evaluation, so
/// the residual function is never called with out-of-bounds parameters.
///
/// # Example
///
/// ```
/// use epifit_core::solvers::{LMConfig, LevenbergMarquardtSolver};
///
/// // Minimise (p[0] - 2)^2 + (p[1] - 3)^2
/// let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 2.0, p[1] - 3.0] };
///
/// let solver = LevenbergMarquardtSolver::with_defaults();
/// let result = solver.solve(residuals, vec![0.0, 0.0]).unwrap();
///
/// assert!(result.converged);
/// assert!((result.params[0] - 2.0).abs() < 1e-6);
/// assert!((result.params[1] - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtSolver {
    config: LMConfig,
    bounds: Vec<ParameterBounds>,
}

impl LevenbergMarquardtSolver {
    /// Create a new solver with the given configuration and no bounds.
    pub fn new(config: LMConfig) -> Self {
        Self {
            config,
            bounds: Vec::new(),
        }
    }

    /// Create a solver with default configuration and no bounds.
    pub fn with_defaults() -> Self {
        Self::new(LMConfig::default())
    }

    /// Configure box bounds, one entry per parameter.
    ///
    /// The bounds length must match the parameter count passed to
    /// [`solve`](Self::solve); a mismatch is rejected there.
    pub fn with_bounds(mut self, bounds: Vec<ParameterBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &LMConfig {
        &self.config
    }

    /// Get the configured bounds (empty when unbounded).
    pub fn bounds(&self) -> &[ParameterBounds] {
        &self.bounds
    }

    /// Solve the bounded nonlinear least-squares problem.
    ///
    /// # Arguments
    ///
    /// * `residuals` - Function computing the residual vector from parameters
    /// * `initial_params` - Initial parameter guess (projected into bounds)
    ///
    /// # Returns
    ///
    /// * `Ok(LMResult)` - Final parameters with the usability verdict
    /// * `Err(SolverError)` - If the problem definition is malformed
    pub fn solve<F>(&self, residuals: F, initial_params: Vec<f64>) -> Result<LMResult, SolverError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let n_params = initial_params.len();
        if n_params == 0 {
            return Err(SolverError::InvalidProblem(
                "empty parameter vector".to_string(),
            ));
        }
        if !self.bounds.is_empty() && self.bounds.len() != n_params {
            return Err(SolverError::InvalidProblem(format!(
                "{} bounds configured for {} parameters",
                self.bounds.len(),
                n_params
            )));
        }

        let mut params = initial_params;
        self.project(&mut params);
        let mut lambda = self.config.initial_lambda;

        let mut r = residuals(&params);
        let n_residuals = r.len();
        if n_residuals == 0 {
            return Err(SolverError::InvalidProblem(
                "empty residual vector".to_string(),
            ));
        }

        let mut ss = sum_of_squares(&r);

        for iteration in 0..self.config.max_iterations {
            if ss.sqrt() < self.config.tolerance {
                return Ok(LMResult::new(params, ss, iteration, true, lambda));
            }

            let jacobian = finite_difference_jacobian(&residuals, &params, &r);

            let delta = match solve_normal_equations(&jacobian, &r, lambda, n_params) {
                Some(d) => d,
                None => {
                    // Normal equations not positive definite; damp harder.
                    lambda = (lambda * self.config.lambda_up).min(self.config.max_lambda);
                    continue;
                }
            };

            // Trial point, projected into the feasible box.
            let mut trial: Vec<f64> = params.iter().zip(&delta).map(|(p, d)| p + d).collect();
            self.project(&mut trial);

            // Convergence on the projected step: at an active bound the raw
            // step may stay large while the feasible step is zero.
            let step_norm = trial
                .iter()
                .zip(&params)
                .map(|(t, p)| (t - p) * (t - p))
                .sum::<f64>()
                .sqrt();
            let param_norm = norm(&params).max(1.0);
            if step_norm / param_norm < self.config.param_tolerance {
                return Ok(LMResult::new(params, ss, iteration, true, lambda));
            }

            let trial_r = residuals(&trial);
            let trial_ss = sum_of_squares(&trial_r);

            if trial_ss < ss {
                params = trial;
                r = trial_r;
                ss = trial_ss;
                lambda = (lambda * self.config.lambda_down).max(self.config.min_lambda);
            } else {
                lambda = (lambda * self.config.lambda_up).min(self.config.max_lambda);
            }
        }

        // Iteration cap reached: best-effort parameters, not usable as a
        // converged solution.
        Ok(LMResult::new(
            params,
            ss,
            self.config.max_iterations,
            false,
            lambda,
        ))
    }

    /// Project a parameter vector into the configured box.
    fn project(&self, params: &mut [f64]) {
        for (p, b) in params.iter_mut().zip(&self.bounds) {
            *p = b.clamp(*p);
        }
    }
}

/// Compute the Jacobian by forward finite differences.
///
/// Returns a row-major `m x n` matrix: entry `(i, j)` is at `i * n + j`.
fn finite_difference_jacobian<F>(residuals: &F, params: &[f64], r0: &[f64]) -> Vec<f64>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    const EPS: f64 = 1e-8;

    let n = params.len();
    let m = r0.len();
    let mut jacobian = vec![0.0; m * n];

    for j in 0..n {
        let h = EPS * params[j].abs().max(1.0);

        let mut perturbed = params.to_vec();
        perturbed[j] += h;
        let r_plus = residuals(&perturbed);

        for i in 0..m.min(r_plus.len()) {
            jacobian[i * n + j] = (r_plus[i] - r0[i]) / h;
        }
    }

    jacobian
}

/// Solve the damped normal equations `(J^T J + λI) δ = -J^T r`.
///
/// `jacobian` is row-major `m x n`. Returns `None` when the damped system
/// is not positive definite.
fn solve_normal_equations(
    jacobian: &[f64],
    residuals: &[f64],
    lambda: f64,
    n: usize,
) -> Option<Vec<f64>> {
    let m = residuals.len();

    // J^T J (symmetric, n x n)
    let mut jtj = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..m {
                sum += jacobian[k * n + i] * jacobian[k * n + j];
            }
            jtj[i * n + j] = sum;
            jtj[j * n + i] = sum;
        }
    }

    // Damping on the diagonal
    for i in 0..n {
        jtj[i * n + i] += lambda;
    }

    // -J^T r (descent direction)
    let mut jtr = vec![0.0; n];
    for (i, entry) in jtr.iter_mut().enumerate() {
        let mut sum = 0.0;
        for k in 0..m {
            sum += jacobian[k * n + i] * residuals[k];
        }
        *entry = -sum;
    }

    solve_cholesky(&jtj, &jtr, n)
}

/// Solve `A x = b` for symmetric positive definite `A` (row-major `n x n`)
/// via Cholesky decomposition.
fn solve_cholesky(a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
    if n == 0 || a.len() != n * n || b.len() != n {
        return None;
    }

    // A = L L^T
    let mut l = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i * n + j];
            for k in 0..j {
                sum -= l[i * n + k] * l[j * n + k];
            }

            if i == j {
                if sum <= 0.0 {
                    return None; // Not positive definite
                }
                l[i * n + j] = sum.sqrt();
            } else {
                if l[j * n + j].abs() < 1e-30 {
                    return None;
                }
                l[i * n + j] = sum / l[j * n + j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i * n + j] * y[j];
        }
        y[i] = sum / l[i * n + i];
    }

    // Backward substitution: L^T x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j * n + i] * x[j];
        }
        x[i] = sum / l[i * n + i];
    }

    Some(x)
}

#[inline]
fn sum_of_squares(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

#[inline]
fn norm(v: &[f64]) -> f64 {
    sum_of_squares(v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // LMConfig Tests
    // ========================================

    #[test]
    fn test_config_default() {
        let config = LMConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
        assert!(config.initial_lambda > 0.0);
    }

    #[test]
    fn test_config_new() {
        let config = LMConfig::new(1e-8, 50);
        assert!((config.tolerance - 1e-8).abs() < 1e-15);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_config_fast() {
        let config = LMConfig::fast();
        assert!(config.tolerance > 1e-8);
        assert!(config.max_iterations <= 50);
    }

    #[test]
    fn test_config_high_precision() {
        let config = LMConfig::high_precision();
        assert!(config.tolerance < 1e-12);
        assert!(config.max_iterations >= 500);
    }

    // ========================================
    // LMResult Tests
    // ========================================

    #[test]
    fn test_result_rmse() {
        let result = LMResult::new(vec![1.0], 4.0, 10, true, 1e-5);
        assert!((result.rmse(4) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_result_rmse_empty() {
        let result = LMResult::new(vec![1.0], 4.0, 10, true, 1e-5);
        assert_eq!(result.rmse(0), 0.0);
    }

    // ========================================
    // Solver Tests
    // ========================================

    #[test]
    fn test_solve_simple_linear() {
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 2.0, p[1] - 3.0] };

        let solver = LevenbergMarquardtSolver::with_defaults();
        let result = solver.solve(residuals, vec![0.0, 0.0]).unwrap();

        assert!(result.converged);
        assert!((result.params[0] - 2.0).abs() < 1e-6);
        assert!((result.params[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_solve_already_optimal() {
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 5.0] };

        let solver = LevenbergMarquardtSolver::with_defaults();
        let result = solver.solve(residuals, vec![5.0]).unwrap();

        assert!(result.converged);
        assert!(result.iterations <= 1);
    }

    #[test]
    fn test_solve_rosenbrock() {
        // Rosenbrock residuals: [10(p[1] - p[0]^2), (1 - p[0])], minimum at (1, 1)
        let residuals = |p: &[f64]| -> Vec<f64> {
            vec![10.0 * (p[1] - p[0] * p[0]), 1.0 - p[0]]
        };

        let config = LMConfig {
            max_iterations: 200,
            ..Default::default()
        };
        let solver = LevenbergMarquardtSolver::new(config);
        let result = solver.solve(residuals, vec![0.0, 0.0]).unwrap();

        assert!((result.params[0] - 1.0).abs() < 0.1 || result.residual_ss < 0.01);
    }

    #[test]
    fn test_solve_exponential_fit() {
        // Fit y = a * exp(-b * x) where true a = 2.0, b = 0.5
        let x_data: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y_data: Vec<f64> = x_data.iter().map(|&x| 2.0 * (-0.5 * x).exp()).collect();

        let residuals = move |p: &[f64]| -> Vec<f64> {
            x_data
                .iter()
                .zip(y_data.iter())
                .map(|(&x, &y)| p[0] * (-p[1] * x).exp() - y)
                .collect()
        };

        let solver = LevenbergMarquardtSolver::with_defaults();
        let result = solver.solve(residuals, vec![1.0, 1.0]).unwrap();

        assert!(result.converged);
        assert!((result.params[0] - 2.0).abs() < 0.01);
        assert!((result.params[1] - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_solve_empty_params() {
        let residuals = |_p: &[f64]| -> Vec<f64> { vec![1.0] };

        let solver = LevenbergMarquardtSolver::with_defaults();
        assert!(solver.solve(residuals, vec![]).is_err());
    }

    #[test]
    fn test_solve_empty_residuals() {
        let residuals = |_p: &[f64]| -> Vec<f64> { vec![] };

        let solver = LevenbergMarquardtSolver::with_defaults();
        assert!(solver.solve(residuals, vec![1.0]).is_err());
    }

    #[test]
    fn test_solve_bounds_count_mismatch() {
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0]] };

        let solver = LevenbergMarquardtSolver::with_defaults()
            .with_bounds(vec![ParameterBounds::non_negative(); 3]);
        let result = solver.solve(residuals, vec![1.0]);

        assert!(matches!(result, Err(SolverError::InvalidProblem(_))));
    }

    #[test]
    fn test_solve_multi_dimensional() {
        // Minimise sum of (p[i] - i)^2
        let residuals = |p: &[f64]| -> Vec<f64> {
            p.iter().enumerate().map(|(i, &v)| v - i as f64).collect()
        };

        let solver = LevenbergMarquardtSolver::with_defaults();
        let result = solver.solve(residuals, vec![10.0; 4]).unwrap();

        assert!(result.converged);
        for (i, &p) in result.params.iter().enumerate() {
            assert!((p - i as f64).abs() < 1e-6);
        }
    }

    // ========================================
    // Bounds Tests
    // ========================================

    #[test]
    fn test_bounds_accessor() {
        let solver = LevenbergMarquardtSolver::with_defaults()
            .with_bounds(vec![ParameterBounds::non_negative(); 2]);

        assert_eq!(solver.bounds().len(), 2);
        for b in solver.bounds() {
            assert_eq!(b.min, 0.0);
        }
    }

    #[test]
    fn test_solve_unconstrained_optimum_outside_box() {
        // Unconstrained optimum at p[0] = -2; lower bound 0 is active.
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] + 2.0] };

        let solver = LevenbergMarquardtSolver::with_defaults()
            .with_bounds(vec![ParameterBounds::non_negative()]);
        let result = solver.solve(residuals, vec![1.0]).unwrap();

        assert!(result.converged);
        assert_eq!(result.params[0], 0.0);
    }

    #[test]
    fn test_solve_initial_point_projected() {
        // Initial guess outside the box is clamped before solving.
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 1.0] };

        let solver = LevenbergMarquardtSolver::with_defaults()
            .with_bounds(vec![ParameterBounds::non_negative()]);
        let result = solver.solve(residuals, vec![-5.0]).unwrap();

        assert!(result.converged);
        assert!((result.params[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_solve_never_leaves_box() {
        // Every evaluation must see non-negative parameters.
        let residuals = |p: &[f64]| -> Vec<f64> {
            assert!(p[0] >= 0.0, "residuals evaluated at p = {}", p[0]);
            vec![p[0] + 2.0]
        };

        let solver = LevenbergMarquardtSolver::with_defaults()
            .with_bounds(vec![ParameterBounds::non_negative()]);
        let result = solver.solve(residuals, vec![3.0]).unwrap();

        assert_eq!(result.params[0], 0.0);
    }

    // ========================================
    // Cholesky Tests
    // ========================================

    #[test]
    fn test_cholesky_simple() {
        // [[4, 2], [2, 2]] x = [8, 5] has solution x = (1.5, 1.0)
        let a = vec![4.0, 2.0, 2.0, 2.0];
        let b = vec![8.0, 5.0];

        let x = solve_cholesky(&a, &b, 2).unwrap();
        assert!((x[0] - 1.5).abs() < 1e-10);
        assert!((x[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cholesky_identity() {
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let b = vec![3.0, 4.0];

        let x = solve_cholesky(&a, &b, 2).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-10);
        assert!((x[1] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_cholesky_non_positive_definite() {
        let a = vec![-1.0, 0.0, 0.0, 1.0];
        let b = vec![1.0, 1.0];

        assert!(solve_cholesky(&a, &b, 2).is_none());
    }

    // ========================================
    // Jacobian Tests
    // ========================================

    #[test]
    fn test_jacobian_linear() {
        // f(p) = [2*p[0] + 3*p[1]] => J = [[2, 3]]
        let residuals = |p: &[f64]| -> Vec<f64> { vec![2.0 * p[0] + 3.0 * p[1]] };

        let params = vec![1.0, 1.0];
        let r0 = residuals(&params);
        let jacobian = finite_difference_jacobian(&residuals, &params, &r0);

        assert_eq!(jacobian.len(), 2);
        assert_relative_eq!(jacobian[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(jacobian[1], 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jacobian_quadratic() {
        // f(p) = [p[0]^2] => J = [[2*p[0]]]
        let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] * p[0]] };

        let params = vec![3.0];
        let r0 = residuals(&params);
        let jacobian = finite_difference_jacobian(&residuals, &params, &r0);

        assert_eq!(jacobian.len(), 1);
        assert_relative_eq!(jacobian[0], 6.0, epsilon = 1e-4);
    }

    // ========================================
    // Clone/Debug Tests
    // ========================================

    #[test]
    fn test_solver_clone() {
        let solver1 = LevenbergMarquardtSolver::with_defaults();
        let solver2 = solver1.clone();
        assert_eq!(
            solver1.config().max_iterations,
            solver2.config().max_iterations
        );
    }

    #[test]
    fn test_solver_debug() {
        let solver = LevenbergMarquardtSolver::with_defaults();
        assert!(format!("{:?}", solver).contains("LevenbergMarquardtSolver"));
    }
}

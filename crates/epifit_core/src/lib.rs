//! # epifit_core: Numeric Foundation for SIR Parameter Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! epifit_core serves as the bottom layer of the workspace, providing:
//! - Dual number type integration (`types::dual`)
//! - The numeric-genericity seam for residual evaluation (`traits`)
//! - Bounded Levenberg-Marquardt least-squares solver (`solvers`)
//! - Error types: `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other epifit_* crates, with minimal
//! external dependencies:
//! - num-dual: Dual number types, forward-mode automatic differentiation,
//!   and the `DualNum` trait used as the generic scalar seam
//! - thiserror: Structured error derivation
//!
//! ## Usage Example
//!
//! ```rust
//! use epifit_core::solvers::{LMConfig, LevenbergMarquardtSolver, ParameterBounds};
//!
//! // Minimise (p[0] - 2)^2 + (p[1] - 3)^2 subject to p >= 0
//! let residuals = |p: &[f64]| -> Vec<f64> { vec![p[0] - 2.0, p[1] - 3.0] };
//!
//! let solver = LevenbergMarquardtSolver::new(LMConfig::default())
//!     .with_bounds(vec![ParameterBounds::non_negative(); 2]);
//! let result = solver.solve(residuals, vec![0.0, 0.0]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod solvers;
pub mod traits;
pub mod types;

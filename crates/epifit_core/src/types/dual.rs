//! Dual number type integration for automatic differentiation.
//!
//! This module provides a type alias for num-dual's `Dual64` type, enabling
//! forward-mode automatic differentiation of residual evaluations for
//! verification against the solver's finite-difference gradients.
//!
//! ## Usage
//!
//! ```
//! use epifit_core::types::dual::DualNumber;
//!
//! // Seed the derivative with respect to `a`
//! let a = DualNumber::from_re(3.0).derivative();
//!
//! let result = a * a;
//!
//! assert_eq!(result.re, 9.0);   // function value
//! assert_eq!(result.eps, 6.0);  // d(a^2)/da
//! ```

/// Type alias for num-dual's `Dual64` (f64-based dual numbers).
///
/// This type supports first-order automatic differentiation with:
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative)
///
/// Residual bodies written against `T: DualNum<f64> + Copy` (see
/// [`crate::traits`]) accept this type in place of `f64`, propagating
/// derivatives with respect to whichever parameter was seeded via
/// `.derivative()`.
pub type DualNumber = num_dual::Dual64;

//! SIR residual model and parameter-estimation driver.
//!
//! This module provides the epidemiological core:
//! - [`transition_rates`]: the discretized SIR transition, generic over the
//!   scalar type
//! - [`DayState`]: per-day compartment state derived from observations,
//!   clamped against conservation violations
//! - [`SirResidualTerm`]: one immutable residual descriptor per observed
//!   day transition
//! - [`SirProblem`] / [`SirFitter`]: assembly of the bounded least-squares
//!   problem and packaging of results
//! - [`FitError`]: fit failure modes
//!
//! # Architecture
//!
//! ```text
//! CaseSeries ──align/deltas──► SirProblem ──residual closure──► LM solver
//!      │                          │ terms, bounds, initial          │
//!      ▼                          ▼                                 ▼
//!  day-0 state               SirResidualTerm[]              SirFitOutcome
//! ```
//!
//! All per-day terms share one flat `[ki, kr]` parameter vector owned by
//! the solve call; the terms themselves are immutable once constructed.

mod error;
mod fit;
mod model;
mod residual;

pub use error::FitError;
pub use fit::{SirFitConfig, SirFitOutcome, SirFitReport, SirFitter, SirParamIndex, SirProblem};
pub use model::{transition_rates, DayState};
pub use residual::SirResidualTerm;

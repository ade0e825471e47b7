//! Fit driver error types.

use epifit_core::types::SolverError;
use thiserror::Error;

use crate::series::SeriesError;

/// SIR fit failure modes.
///
/// Preprocessing problems are fatal and surface here before any solve
/// attempt. A solver run that merely fails to converge is *not* an error:
/// it is reported through
/// [`SirFitOutcome::converged`](crate::sir::SirFitOutcome) so best-effort
/// parameters remain available.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// The observation series cannot support a fit.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// The assembled problem was rejected by the solver.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

//! CLI error types.

use thiserror::Error;

use epifit_models::sir::FitError;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the command line.
///
/// Preprocessing and problem-assembly failures are fatal and exit
/// non-zero; a solver that merely fails its usability verdict is reported
/// as a warning by the command, not through this type.
#[derive(Error, Debug)]
pub enum CliError {
    /// The fit could not be attempted.
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),

    /// Result serialisation failed.
    #[error("output serialisation failed: {0}")]
    Output(#[from] serde_json::Error),
}

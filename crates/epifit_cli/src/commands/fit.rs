//! Fit command implementation.
//!
//! Preprocesses the three observed series, runs the SIR fit driver, and
//! prints the parameter estimates as a single JSON object on stdout.

use tracing::{debug, info, warn};

use epifit_models::series::CaseSeries;
use epifit_models::sir::{SirFitConfig, SirFitter};

use crate::Result;

/// Run the fit command.
pub fn run(
    confirmed: &str,
    deaths: &str,
    recovered: &str,
    population: u64,
    trim: usize,
) -> Result<()> {
    info!(population, trim, "starting SIR fit");

    let mut series = CaseSeries::parse(confirmed, deaths, recovered);
    series.trim(trim);
    series.align();

    debug!(?series.confirmed, "confirmed");
    debug!(?series.deaths, "deaths");
    debug!(?series.recovered, "recovered");

    let fitter = SirFitter::new(SirFitConfig::new(population));
    let outcome = fitter.fit(&series)?;

    debug!(
        iterations = outcome.iterations,
        residual_ss = outcome.residual_ss,
        "solver finished"
    );

    if !outcome.converged {
        warn!(
            message = outcome.message.as_deref().unwrap_or("no diagnostics"),
            "solution may be unusable; emitting best-effort estimates"
        );
    }

    println!("{}", serde_json::to_string(&outcome.report)?);
    Ok(())
}

//! Fit driver: problem assembly, solving, and result packaging.

use epifit_core::solvers::{LMConfig, LevenbergMarquardtSolver, ParameterBounds};
use serde::Serialize;

use crate::series::CaseSeries;
use crate::sir::model::DayState;
use crate::sir::residual::SirResidualTerm;
use crate::sir::FitError;

/// SIR parameter-vector indices.
///
/// Maps parameter vector positions to model parameters:
/// - `params[0]` = ki (transmission rate)
/// - `params[1]` = kr (removal rate)
#[derive(Debug, Clone, Copy)]
pub struct SirParamIndex;

impl SirParamIndex {
    /// Transmission rate index.
    pub const KI: usize = 0;
    /// Removal rate index.
    pub const KR: usize = 1;
    /// Number of fit parameters.
    pub const COUNT: usize = 2;
}

/// Configuration for the SIR fit driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirFitConfig {
    /// Total population; pins the initial susceptible count.
    pub population: u64,
    /// Starting value for both rates.
    pub initial_rate: f64,
    /// Solver configuration.
    pub lm: LMConfig,
}

impl Default for SirFitConfig {
    fn default() -> Self {
        Self {
            population: 1_000_000_000,
            initial_rate: 0.1,
            lm: LMConfig {
                max_iterations: 1000,
                ..LMConfig::default()
            },
        }
    }
}

impl SirFitConfig {
    /// Create a configuration for the given population.
    pub fn new(population: u64) -> Self {
        Self {
            population,
            ..Default::default()
        }
    }
}

/// An assembled SIR least-squares problem.
///
/// Holds the flat array of immutable per-day residual terms together with
/// the parameter bounds and initial guess, inspectable before solving.
/// Every fit parameter carries a lower bound of zero: rates cannot be
/// negative.
#[derive(Debug, Clone)]
pub struct SirProblem {
    terms: Vec<SirResidualTerm>,
    bounds: Vec<ParameterBounds>,
    initial: Vec<f64>,
    population: u64,
    i0: i64,
    r0: i64,
}

impl SirProblem {
    /// Assemble the problem from observed series.
    ///
    /// The three series are aligned to their common suffix; one residual
    /// term is built per day transition `j` from the day-`j+1` compartment
    /// state and the `j → j+1` observed deltas. The day-0 initial counts
    /// `i0`/`r0` are derived once and reported, never fit.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::Series`] when fewer than 2 aligned observations
    /// remain.
    pub fn build(series: &CaseSeries, config: &SirFitConfig) -> Result<Self, FitError> {
        let mut aligned = series.clone();
        aligned.align();
        let deltas = aligned.deltas()?;

        let population = config.population as f64;
        let terms: Vec<SirResidualTerm> = (0..deltas.len())
            .map(|j| {
                let removed = aligned.deaths[j + 1] + aligned.recovered[j + 1];
                let state = DayState::from_observed(population, aligned.confirmed[j + 1], removed);
                SirResidualTerm::from_observed(
                    state,
                    deltas.confirmed[j],
                    deltas.deaths[j],
                    deltas.recovered[j],
                )
            })
            .collect();

        let r0 = aligned.deaths[0] + aligned.recovered[0];
        let i0 = aligned.confirmed[0] - r0;

        Ok(Self {
            terms,
            bounds: vec![ParameterBounds::non_negative(); SirParamIndex::COUNT],
            initial: vec![config.initial_rate; SirParamIndex::COUNT],
            population: config.population,
            i0,
            r0,
        })
    }

    /// The per-day residual terms.
    pub fn terms(&self) -> &[SirResidualTerm] {
        &self.terms
    }

    /// The parameter bounds handed to the solver (lower bound zero each).
    pub fn bounds(&self) -> &[ParameterBounds] {
        &self.bounds
    }

    /// The initial parameter guess.
    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    /// The supplied population constant.
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Day-0 derived `(i0, r0)` initial infected/removed counts.
    pub fn day_zero(&self) -> (i64, i64) {
        (self.i0, self.r0)
    }

    /// Evaluate the full residual vector (three entries per day) at a
    /// parameter vector.
    pub fn residuals(&self, params: &[f64]) -> Vec<f64> {
        let ki = params[SirParamIndex::KI];
        let kr = params[SirParamIndex::KR];
        let mut out = Vec::with_capacity(self.terms.len() * 3);
        for term in &self.terms {
            out.extend_from_slice(&term.residuals(ki, kr));
        }
        out
    }
}

/// The packaged fit result.
///
/// Field declaration order matches the output JSON object:
/// `{"population": .., "ki": .., "kr": .., "i0": .., "r0": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SirFitReport {
    /// The population constant the susceptible pool was pinned to.
    pub population: u64,
    /// Fitted transmission rate.
    pub ki: f64,
    /// Fitted removal rate.
    pub kr: f64,
    /// Day-0 infected count, derived from the observations.
    pub i0: i64,
    /// Day-0 removed count, derived from the observations.
    pub r0: i64,
}

/// Outcome of a fit: the report plus solver diagnostics.
///
/// A non-converged solve is represented here rather than as an error:
/// `report` still carries the best-effort parameters, and `message`
/// explains the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct SirFitOutcome {
    /// The packaged parameter estimates.
    pub report: SirFitReport,
    /// Whether the solver reached a usable solution.
    pub converged: bool,
    /// Iterations performed by the solver.
    pub iterations: usize,
    /// Final residual sum of squares.
    pub residual_ss: f64,
    /// Diagnostic message for a non-converged solve.
    pub message: Option<String>,
}

/// SIR fit driver.
///
/// Assembles one residual term per observed day transition, configures the
/// bounded solver, and packages the result.
///
/// # Example
///
/// ```
/// use epifit_models::series::CaseSeries;
/// use epifit_models::sir::{SirFitConfig, SirFitter};
///
/// let series = CaseSeries::parse("1,2,4,8", "0,0,0,0", "0,0,0,1");
/// let fitter = SirFitter::new(SirFitConfig::new(100));
/// let outcome = fitter.fit(&series).unwrap();
///
/// assert!(outcome.report.ki >= 0.0);
/// assert!(outcome.report.kr >= 0.0);
/// assert_eq!(outcome.report.i0, 1);
/// assert_eq!(outcome.report.r0, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SirFitter {
    config: SirFitConfig,
}

impl SirFitter {
    /// Create a fitter with the given configuration.
    pub fn new(config: SirFitConfig) -> Self {
        Self { config }
    }

    /// Create a fitter with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SirFitConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &SirFitConfig {
        &self.config
    }

    /// Fit `(ki, kr)` to the observed series.
    ///
    /// Preprocessing failures are returned as [`FitError`]; a solve that
    /// merely fails the usability verdict is returned as a successful
    /// [`SirFitOutcome`] with `converged == false`.
    pub fn fit(&self, series: &CaseSeries) -> Result<SirFitOutcome, FitError> {
        let problem = SirProblem::build(series, &self.config)?;

        let solver = LevenbergMarquardtSolver::new(self.config.lm)
            .with_bounds(problem.bounds().to_vec());

        let terms = problem.terms().to_vec();
        let residuals = move |params: &[f64]| -> Vec<f64> {
            let ki = params[SirParamIndex::KI];
            let kr = params[SirParamIndex::KR];
            let mut out = Vec::with_capacity(terms.len() * 3);
            for term in &terms {
                out.extend_from_slice(&term.residuals(ki, kr));
            }
            out
        };

        let lm = solver.solve(residuals, problem.initial().to_vec())?;

        let (i0, r0) = problem.day_zero();
        let report = SirFitReport {
            population: problem.population(),
            ki: lm.params[SirParamIndex::KI],
            kr: lm.params[SirParamIndex::KR],
            i0,
            r0,
        };
        let message = (!lm.converged).then(|| {
            format!(
                "solver stopped after {} iterations without converging (residual_ss: {:.6e})",
                lm.iterations, lm.residual_ss
            )
        });

        Ok(SirFitOutcome {
            report,
            converged: lm.converged,
            iterations: lm.iterations,
            residual_ss: lm.residual_ss,
            message,
        })
    }
}

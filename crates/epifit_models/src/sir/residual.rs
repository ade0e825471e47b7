//! Per-day residual terms.

use epifit_core::traits::DualNum;

use crate::sir::model::{transition_rates, DayState};

/// One residual term per observed day transition.
///
/// Holds that day's fixed inputs: the compartment state the model is
/// evaluated at, and the observed deltas mapped into compartment space:
///
/// - `dr = dDeaths + dRecovered` (observed removal flow)
/// - `di = dConfirmed - dr` (observed net infected flow)
/// - `ds = -dConfirmed` (observed susceptible flow)
///
/// Terms are immutable once constructed and evaluated repeatedly by the
/// solver; the shared `(ki, kr)` parameters are passed in per evaluation
/// rather than referenced from the term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirResidualTerm {
    susceptible: f64,
    infected: f64,
    ds: f64,
    di: f64,
    dr: f64,
}

impl SirResidualTerm {
    /// Build a term from a day's compartment state and raw series deltas.
    pub fn from_observed(
        state: DayState,
        d_confirmed: i64,
        d_deaths: i64,
        d_recovered: i64,
    ) -> Self {
        let dr = (d_deaths + d_recovered) as f64;
        let di = d_confirmed as f64 - dr;
        let ds = -(d_confirmed as f64);
        Self {
            susceptible: state.susceptible,
            infected: state.infected,
            ds,
            di,
            dr,
        }
    }

    /// The susceptible count the model is evaluated at.
    pub fn susceptible(&self) -> f64 {
        self.susceptible
    }

    /// The infected count the model is evaluated at.
    pub fn infected(&self) -> f64 {
        self.infected
    }

    /// The observed `(ds, di, dr)` deltas this term compares against.
    pub fn observed_deltas(&self) -> [f64; 3] {
        [self.ds, self.di, self.dr]
    }

    /// Evaluate the signed residual vector for this day.
    ///
    /// Returns `(S' - ds, I' - di, R' - dr)`: the difference between the
    /// model-predicted transition and the observed one. Residuals are raw
    /// signed differences, keeping sign information and weighting every
    /// day's deviation linearly.
    pub fn residuals<T: DualNum<f64> + Copy>(&self, ki: T, kr: T) -> [T; 3] {
        let [s_rate, i_rate, r_rate] = transition_rates(ki, kr, self.susceptible, self.infected);
        [s_rate - self.ds, i_rate - self.di, r_rate - self.dr]
    }
}

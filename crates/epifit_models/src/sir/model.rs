//! Discretized SIR transition model.
//!
//! The SIR compartment model partitions a fixed population into
//! Susceptible, Infected, and Removed counts with transition rates `ki`
//! (transmission) and `kr` (removal):
//!
//! ```text
//! S' = -ki * S * I
//! I' =  ki * S * I - kr * I
//! R' =  kr * I
//! ```
//!
//! The per-day transition is the one-step discretization of these rates:
//! the model-predicted deltas for a day are the rates evaluated at that
//! day's compartment state.

use epifit_core::traits::DualNum;

/// One-day SIR transition rates `[S', I', R']`.
///
/// Generic over the scalar type so the same body evaluates under plain
/// `f64` and under dual numbers for derivative propagation; the fixed
/// compartment state stays `f64` while the rates `ki`/`kr` carry the
/// generic type.
///
/// # Examples
/// ```
/// use epifit_models::sir::transition_rates;
///
/// let [s_rate, i_rate, r_rate] = transition_rates(0.0_f64, 0.0, 98.0, 2.0);
/// assert_eq!([s_rate, i_rate, r_rate], [0.0, 0.0, 0.0]);
/// ```
pub fn transition_rates<T: DualNum<f64> + Copy>(ki: T, kr: T, s: f64, i: f64) -> [T; 3] {
    let si = s * i;
    let s_rate = ki * (-si);
    let i_rate = ki * si - kr * i;
    let r_rate = kr * i;
    [s_rate, i_rate, r_rate]
}

/// Compartment state for one observed day.
///
/// Derived from cumulative observations under the conservation identity
/// `S + I + R = population`:
///
/// - `removed = deaths + recovered`
/// - `infected = confirmed - removed`
/// - `susceptible = population - infected - removed`
///
/// Noisy inputs can break conservation (e.g. recoveries plus deaths
/// exceeding confirmed cases); each component saturates at zero rather
/// than going negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayState {
    /// Susceptible count.
    pub susceptible: f64,
    /// Infected count.
    pub infected: f64,
    /// Removed (deaths + recoveries) count.
    pub removed: f64,
}

impl DayState {
    /// Derive the compartment state from one day's cumulative counts.
    pub fn from_observed(population: f64, confirmed: i64, removed: i64) -> Self {
        let removed = (removed as f64).max(0.0);
        let infected = (confirmed as f64 - removed).max(0.0);
        let susceptible = (population - infected - removed).max(0.0);
        Self {
            susceptible,
            infected,
            removed,
        }
    }
}

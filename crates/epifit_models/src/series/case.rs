//! The three observed case-count series as one unit.

use crate::series::{derive, ops, parse_counts, SeriesError};

/// Cumulative confirmed/death/recovery counts, indexed by day.
///
/// Values are assumed non-decreasing in principle; this is not enforced
/// (noisy real-world exports violate it), and the model layer clamps the
/// derived compartment state instead.
///
/// # Examples
/// ```
/// use epifit_models::series::CaseSeries;
///
/// let mut series = CaseSeries::parse("1,2,4,8", "0,0,0,0", "0,0,0,1");
/// series.trim(0);
/// series.align();
///
/// let deltas = series.deltas().unwrap();
/// assert_eq!(deltas.confirmed, vec![1, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSeries {
    /// Cumulative confirmed case counts.
    pub confirmed: Vec<i64>,
    /// Cumulative death counts.
    pub deaths: Vec<i64>,
    /// Cumulative recovery counts.
    pub recovered: Vec<i64>,
}

impl CaseSeries {
    /// Create from already-parsed series.
    pub fn new(confirmed: Vec<i64>, deaths: Vec<i64>, recovered: Vec<i64>) -> Self {
        Self {
            confirmed,
            deaths,
            recovered,
        }
    }

    /// Parse three comma-separated count lists.
    ///
    /// Uses the lenient [`parse_counts`] policy: malformed tokens become 0.
    pub fn parse(confirmed: &str, deaths: &str, recovered: &str) -> Self {
        Self {
            confirmed: parse_counts(confirmed, ','),
            deaths: parse_counts(deaths, ','),
            recovered: parse_counts(recovered, ','),
        }
    }

    /// Discard the first `count` observed days from each series.
    pub fn trim(&mut self, count: usize) {
        self.confirmed = ops::trim(&self.confirmed, count);
        self.deaths = ops::trim(&self.deaths, count);
        self.recovered = ops::trim(&self.recovered, count);
    }

    /// Truncate all three series to their common minimum length, keeping
    /// the suffix (newest days) of each.
    ///
    /// This is the resolution policy for length mismatches: the fit always
    /// proceeds on the common window rather than failing.
    pub fn align(&mut self) {
        let len = self.len();
        self.confirmed = ops::suffix(&self.confirmed, len);
        self.deaths = ops::suffix(&self.deaths, len);
        self.recovered = ops::suffix(&self.recovered, len);
    }

    /// The common (minimum) length across the three series.
    pub fn len(&self) -> usize {
        self.confirmed
            .len()
            .min(self.deaths.len())
            .min(self.recovered.len())
    }

    /// Whether the common window is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Derive day-over-day deltas over the aligned common window.
    ///
    /// Operates on the common suffix of the three series, so callers that
    /// have not called [`align`](Self::align) still get consistent lengths.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::TooShort`] when fewer than 2 aligned
    /// observations remain.
    pub fn deltas(&self) -> Result<CaseDeltas, SeriesError> {
        let len = self.len();
        if len < 2 {
            return Err(SeriesError::TooShort { got: len, need: 2 });
        }
        Ok(CaseDeltas {
            confirmed: derive(&ops::suffix(&self.confirmed, len))?,
            deaths: derive(&ops::suffix(&self.deaths, len))?,
            recovered: derive(&ops::suffix(&self.recovered, len))?,
        })
    }
}

/// Day-over-day deltas of the three case-count series.
///
/// Computed once from a [`CaseSeries`]; each delta series is one shorter
/// than its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDeltas {
    /// Daily new confirmed cases.
    pub confirmed: Vec<i64>,
    /// Daily new deaths.
    pub deaths: Vec<i64>,
    /// Daily new recoveries.
    pub recovered: Vec<i64>,
}

impl CaseDeltas {
    /// Number of day transitions covered.
    pub fn len(&self) -> usize {
        self.confirmed.len()
    }

    /// Whether no transitions are covered.
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }
}

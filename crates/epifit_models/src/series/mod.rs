//! Observation-series preprocessing.
//!
//! This module turns raw delimiter-separated count lists into aligned,
//! trimmed cumulative series and their day-over-day deltas:
//!
//! - [`parse_counts`]: lenient integer-list parsing
//! - [`trim`], [`suffix`], [`derive`], [`strip_leading_zeros`]: window and
//!   difference operations on a single series
//! - [`CaseSeries`] / [`CaseDeltas`]: the three observed series
//!   (confirmed, deaths, recovered) as one unit
//! - [`SeriesError`]: preprocessing failure modes
//!
//! All operations are pure; series are computed once during preprocessing
//! and immutable afterwards.

mod case;
mod error;
mod ops;
mod parse;

pub use case::{CaseDeltas, CaseSeries};
pub use error::SeriesError;
pub use ops::{derive, strip_leading_zeros, suffix, trim};
pub use parse::parse_counts;

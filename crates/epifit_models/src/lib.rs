//! # Epifit Models (L2: Domain Logic)
//!
//! Case-count series preprocessing and SIR parameter estimation.
//!
//! This crate provides:
//! - Series preprocessing: lenient parsing, trimming, suffix alignment,
//!   day-over-day delta derivation (`series`)
//! - The discretized SIR transition model and per-day residual terms (`sir`)
//! - The fit driver assembling a bounded least-squares problem and
//!   packaging results (`sir::fit`)
//!
//! ## Design Principles
//!
//! - **Immutable residual descriptors**: one flat array of per-day terms,
//!   all sharing a single parameter vector owned by the solver call
//! - **Generic residual bodies**: the SIR formulas evaluate under `f64`
//!   and under dual numbers through one `DualNum<f64>` bound
//! - **Explicit configuration structs** passed into entry points; no
//!   process-wide state

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod series;
pub mod sir;

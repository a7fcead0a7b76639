//! Missing value imputation.
//!
//! The source format marks unrecorded measurements with a sentinel that the
//! projector has already turned into nulls. Imputation fills those nulls in
//! a fixed whitelist of columns with a frozen per-column statistic.

mod statistical;

pub use statistical::{ImputationTable, MeanImputer};

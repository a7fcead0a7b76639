//! Row deduplication.
//!
//! Removes rows that are exact duplicates across every column (features and
//! target), keeping the first occurrence in encounter order. No partial or
//! fuzzy matching.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Exact-duplicate row removal with stable output order.
pub struct Deduplicator;

impl Deduplicator {
    /// Drop duplicate rows, keeping the first occurrence of each.
    ///
    /// Returns the deduplicated frame and the number of rows removed.
    /// Surviving rows keep their relative order.
    pub fn dedup(&self, df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - df.height();

        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            debug!("Removed {} duplicate rows ({:.1}%)", removed, pct);
        } else {
            debug!("No duplicate rows found");
        }

        Ok((df, removed))
    }
}

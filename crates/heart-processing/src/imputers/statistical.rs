//! Rounded-mean imputation.
//!
//! The fill statistic for each whitelisted column is the rounded arithmetic
//! mean of its non-missing values, computed once before any filling happens
//! and frozen for the lifetime of the run. The statistic depends only on the
//! multiset of non-missing values, so it is independent of row order and
//! re-running the imputer on an already-filled frame is a no-op.

use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Frozen mapping from column name to its fill statistic.
///
/// Ordered so that iteration (and serialized reports) are deterministic.
pub type ImputationTable = BTreeMap<String, f64>;

/// Mean imputation for the whitelisted numeric columns.
pub struct MeanImputer;

impl MeanImputer {
    /// Compute the imputation table for the given columns.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::ColumnNotFound`] when a whitelisted
    /// column is absent and [`PreprocessingError::NoValidValues`] when it
    /// holds no non-missing values to average.
    pub fn fit(df: &DataFrame, columns: &[String]) -> Result<ImputationTable> {
        let mut table = ImputationTable::new();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PreprocessingError::ColumnNotFound(col_name.clone()))?;
            let series = column.as_materialized_series();
            let mean = series
                .mean()
                .ok_or_else(|| PreprocessingError::NoValidValues(col_name.clone()))?;
            table.insert(col_name.clone(), mean.round());
        }

        debug!("Imputation table: {:?}", table);
        Ok(table)
    }

    /// Fill every null in the table's columns with the frozen statistic.
    ///
    /// Columns outside the table are left untouched even if they contain
    /// nulls. The input frame is not mutated.
    pub fn transform(df: &DataFrame, table: &ImputationTable) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, fill_value) in table {
            let column = result
                .column(col_name)
                .map_err(|_| PreprocessingError::ColumnNotFound(col_name.clone()))?;
            let series = column.as_materialized_series().clone();
            Self::fill_with_value(&mut result, col_name, *fill_value, &series)?;
        }

        Ok(result)
    }

    /// Fit the table and apply it in one step.
    pub fn fit_transform(df: &DataFrame, columns: &[String]) -> Result<(DataFrame, ImputationTable)> {
        let table = Self::fit(df, columns)?;
        let filled = Self::transform(df, &table)?;
        Ok((filled, table))
    }

    /// Fill a numeric column's nulls with a specific value.
    fn fill_with_value(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: f64,
        series: &Series,
    ) -> Result<()> {
        let mask = series.is_null();
        let mut result_vec = Vec::with_capacity(series.len());

        for i in 0..series.len() {
            if mask.get(i).unwrap_or(false) {
                result_vec.push(Some(fill_value));
            } else {
                let val = series.get(i)?;
                result_vec.push(Some(val.try_extract::<f64>()?));
            }
        }

        let filled = Series::new(col_name.into(), result_vec);
        df.replace(col_name, filled)?;

        debug!("Filled '{}' with rounded mean: {}", col_name, fill_value);
        Ok(())
    }
}

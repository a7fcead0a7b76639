//! Feature projection: raw token columns -> modeling schema.
//!
//! Selects the 14 mapped positions out of the 76-wide raw frame, renames
//! them, marks sentinel values as missing, and discards the three named
//! columns the downstream model does not use. The input frame is never
//! mutated; projection always produces a new frame.

use crate::config::PipelineConfig;
use crate::error::{PreprocessingError, Result};
use crate::schema;
use polars::prelude::*;
use tracing::{debug, info};

/// Projects raw fixed-width records onto the modeling schema.
pub struct FeatureProjector {
    sentinel: f64,
}

impl FeatureProjector {
    /// Create a projector with an explicit missing-value sentinel.
    pub fn new(sentinel: f64) -> Self {
        Self { sentinel }
    }

    /// Create a projector from a pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.sentinel)
    }

    /// Project a raw frame onto the named feature schema.
    ///
    /// Output columns follow the selection-list order: the ten feature
    /// columns (Float64) followed by `target` (Int64). The sentinel is
    /// replaced by null in every column, the target included.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::ColumnNotFound`] when a required raw
    /// column is absent.
    pub fn project(&self, raw: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(schema::RAW_SELECTION.len());

        for (raw_idx, name) in schema::RAW_SELECTION {
            let raw_name = schema::raw_column_name(raw_idx);
            let column = raw
                .column(&raw_name)
                .map_err(|_| PreprocessingError::ColumnNotFound(raw_name.clone()))?;
            let series = column.as_materialized_series().cast(&DataType::Float64)?;
            let values = series.f64()?;

            if name == schema::TARGET_COLUMN {
                // The sentinel marks unrecorded labels too; they must not
                // survive as a phantom class.
                let labels: Vec<Option<i64>> = values
                    .into_iter()
                    .map(|v| v.filter(|v| *v != self.sentinel).map(|v| v as i64))
                    .collect();
                columns.push(Column::new(name.into(), labels));
            } else {
                let with_nulls: Vec<Option<f64>> = values
                    .into_iter()
                    .map(|v| v.filter(|v| *v != self.sentinel))
                    .collect();
                columns.push(Column::new(name.into(), with_nulls));
            }
        }

        let named = DataFrame::new(columns)?;
        debug!("Selected {} named columns", named.width());

        let dropped: Vec<PlSmallStr> = schema::DROPPED_COLUMNS
            .iter()
            .map(|s| (*s).into())
            .collect();
        let projected = named.drop_many(dropped);

        info!(
            "Projected frame shape: {:?} ({} features + target)",
            projected.shape(),
            projected.width() - 1
        );
        Ok(projected)
    }
}

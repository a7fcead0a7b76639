//! Synthetic minority oversampling (SMOTE).
//!
//! Corrects class imbalance in the label column by appending synthesized
//! rows until every class matches the majority class count. A synthesized
//! row is an interpolation `seed + t * (neighbor - seed)` between a random
//! member of the minority class and one of its k nearest same-class
//! neighbors, with t drawn from [0, 1).
//!
//! Original rows are never altered or removed; synthesized rows are appended
//! after them. Under a fixed seed the output is bitwise reproducible: each
//! class draws from an RNG stream derived from (seed, class), so results do
//! not depend on the order in which classes are processed.

mod neighbors;

pub use neighbors::NeighborIndex;

use crate::config::PipelineConfig;
use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Class balancer using nearest-neighbor interpolation.
pub struct SmoteBalancer {
    k_neighbors: usize,
    seed: u64,
}

impl SmoteBalancer {
    /// Create a balancer with an explicit neighbor count and RNG seed.
    pub fn new(k_neighbors: usize, seed: u64) -> Self {
        Self {
            k_neighbors: k_neighbors.max(1),
            seed,
        }
    }

    /// Create a balancer from a pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.smote_neighbors, config.seed)
    }

    /// Oversample minority classes until every class count equals the
    /// majority class count.
    ///
    /// Distances are computed over the numeric feature columns (every column
    /// except `target_col`). The returned frame starts with the input rows,
    /// unmodified, followed by the synthesized rows.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::InsufficientSamples`] when a class that
    /// needs synthesis has fewer than 2 members, and
    /// [`PreprocessingError::ColumnNotFound`] /
    /// [`PreprocessingError::NoValidValues`] for schema problems.
    pub fn fit_resample(&self, df: &DataFrame, target_col: &str) -> Result<DataFrame> {
        let labels = extract_labels(df, target_col)?;
        let feature_names: Vec<String> = df
            .get_column_names()
            .iter()
            .filter(|name| name.as_str() != target_col)
            .map(|name| name.to_string())
            .collect();
        let rows = extract_feature_rows(df, &feature_names)?;

        let mut class_indices: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (row_idx, &label) in labels.iter().enumerate() {
            class_indices.entry(label).or_default().push(row_idx);
        }

        let majority = class_indices
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        debug!(
            "Class distribution before balancing: {:?}",
            class_counts(df, target_col)?
        );

        let mut synth_rows: Vec<Vec<f64>> = Vec::new();
        let mut synth_labels: Vec<i64> = Vec::new();

        for (&class, member_indices) in &class_indices {
            let deficit = majority - member_indices.len();
            if deficit == 0 {
                continue;
            }

            if member_indices.len() < 2 {
                return Err(PreprocessingError::InsufficientSamples {
                    class,
                    count: member_indices.len(),
                });
            }

            let class_rows: Vec<Vec<f64>> = member_indices
                .iter()
                .map(|&idx| rows[idx].clone())
                .collect();
            let k = self.k_neighbors.min(class_rows.len() - 1);
            let index = NeighborIndex::build(&class_rows, k);

            // One RNG stream per (seed, class): reproducibility is governed
            // by the seed and class alone, not by processing order.
            let mut rng = StdRng::seed_from_u64(self.class_stream_seed(class));

            for _ in 0..deficit {
                let base = rng.gen_range(0..class_rows.len());
                let candidates = index.of(base);
                let neighbor = candidates[rng.gen_range(0..candidates.len())];
                let t: f64 = rng.gen_range(0.0..1.0);

                let row: Vec<f64> = class_rows[base]
                    .iter()
                    .zip(class_rows[neighbor].iter())
                    .map(|(seed_v, nb_v)| seed_v + t * (nb_v - seed_v))
                    .collect();
                synth_rows.push(row);
                synth_labels.push(class);
            }

            debug!("Synthesized {} rows for class {} (k={})", deficit, class, k);
        }

        if synth_rows.is_empty() {
            info!("Classes already balanced; nothing to synthesize");
            return Ok(df.clone());
        }

        let synth = build_frame(df, target_col, &synth_rows, &synth_labels)?;
        let balanced = df.vstack(&synth)?;

        info!(
            "Balanced dataset: {} original + {} synthesized rows",
            df.height(),
            synth_rows.len()
        );
        Ok(balanced)
    }

    /// Derive the per-class RNG stream seed.
    fn class_stream_seed(&self, class: i64) -> u64 {
        self.seed ^ (class as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Count rows per class label, in ascending label order.
pub fn class_counts(df: &DataFrame, target_col: &str) -> Result<BTreeMap<i64, usize>> {
    let labels = extract_labels(df, target_col)?;
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }
    Ok(counts)
}

fn extract_labels(df: &DataFrame, target_col: &str) -> Result<Vec<i64>> {
    let column = df
        .column(target_col)
        .map_err(|_| PreprocessingError::ColumnNotFound(target_col.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::Int64)?;
    series
        .i64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| PreprocessingError::NoValidValues(target_col.to_string())))
        .collect()
}

fn extract_feature_rows(df: &DataFrame, feature_names: &[String]) -> Result<Vec<Vec<f64>>> {
    let mut columns = Vec::with_capacity(feature_names.len());
    for name in feature_names {
        let column = df
            .column(name)
            .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
        let series = column.as_materialized_series().cast(&DataType::Float64)?;
        let values: Vec<f64> = series
            .f64()?
            .into_iter()
            .map(|v| v.ok_or_else(|| PreprocessingError::NoValidValues(name.clone())))
            .collect::<Result<_>>()?;
        columns.push(values);
    }

    let n_rows = df.height();
    Ok((0..n_rows)
        .map(|row_idx| columns.iter().map(|col| col[row_idx]).collect())
        .collect())
}

/// Assemble synthesized rows into a frame with the same schema and column
/// order as `df`, so the two can be stacked.
///
/// Feature values in `rows` follow the order of the non-target columns of
/// `df`, the same order `extract_feature_rows` produced them in.
fn build_frame(
    df: &DataFrame,
    target_col: &str,
    rows: &[Vec<f64>],
    labels: &[i64],
) -> Result<DataFrame> {
    let mut feature_idx = 0;
    let columns: Vec<Column> = df
        .get_column_names()
        .iter()
        .map(|name| {
            if name.as_str() == target_col {
                Column::new(target_col.into(), labels.to_vec())
            } else {
                let values: Vec<f64> = rows.iter().map(|row| row[feature_idx]).collect();
                feature_idx += 1;
                Column::new(name.as_str().into(), values)
            }
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

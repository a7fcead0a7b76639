use crate::imputers::ImputationTable;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the pipeline produced: the balanced dataset plus run metadata.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Balanced dataset: feature columns plus `target`. Immutable from the
    /// caller's point of view; every stage produced a fresh frame.
    pub data: DataFrame,
    /// Run metadata for reporting.
    pub summary: PipelineSummary,
}

/// Human-readable summary of what the pipeline did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Fixed-width records accepted by the parser.
    pub records_parsed: usize,
    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,
    /// Rows surviving deduplication.
    pub rows_after_dedup: usize,
    /// Rows appended by the class balancer.
    pub rows_synthesized: usize,
    /// Rows in the final balanced dataset.
    pub rows_total: usize,

    /// Per-class row counts before balancing.
    pub class_counts_before: BTreeMap<i64, usize>,
    /// Per-class row counts after balancing.
    pub class_counts_after: BTreeMap<i64, usize>,

    /// The frozen fill statistics used for imputation.
    pub imputation_table: ImputationTable,

    /// Ordered list of actions taken during the run.
    pub processing_steps: Vec<String>,
}

impl PipelineSummary {
    /// Record an action taken during the run.
    pub fn add_step(&mut self, step: impl Into<String>) {
        self.processing_steps.push(step.into());
    }
}

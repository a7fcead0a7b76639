//! Configuration types for the preprocessing pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::schema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the preprocessing pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use heart_processing::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .seed(42)
///     .smote_neighbors(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of physical lines that make up one logical record.
    /// Default: 10
    pub lines_per_record: usize,

    /// Number of numeric tokens in a valid record. Records with any other
    /// token count terminate parsing.
    /// Default: 76
    pub record_width: usize,

    /// Numeric literal standing in for "value not recorded".
    /// Default: -9.0
    pub sentinel: f64,

    /// Columns eligible for mean imputation. Columns outside this whitelist
    /// are left untouched even if they contain missing values.
    /// Default: trestbps, chol, fbs, restecg, thalach, exang
    pub impute_columns: Vec<String>,

    /// Number of nearest neighbors considered when synthesizing
    /// minority-class rows. Capped at class size - 1 per class.
    /// Default: 5
    pub smote_neighbors: usize,

    /// Seed for the oversampling RNG. Runs with the same seed on the same
    /// input produce bitwise-identical synthesized rows.
    /// Default: 42
    pub seed: u64,

    /// Output directory for the exported dataset and reports.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Custom output file name (without extension).
    /// If None, uses "balanced_dataset".
    /// Default: None
    pub output_name: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lines_per_record: schema::LINES_PER_RECORD,
            record_width: schema::RECORD_WIDTH,
            sentinel: schema::MISSING_SENTINEL,
            impute_columns: schema::IMPUTED_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            smote_neighbors: 5,
            seed: 42,
            output_dir: PathBuf::from("output"),
            output_name: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.lines_per_record == 0 {
            return Err(ConfigValidationError::InvalidRecordLayout {
                field: "lines_per_record".to_string(),
                value: self.lines_per_record,
            });
        }

        if self.record_width == 0 {
            return Err(ConfigValidationError::InvalidRecordLayout {
                field: "record_width".to_string(),
                value: self.record_width,
            });
        }

        if !self.sentinel.is_finite() {
            return Err(ConfigValidationError::InvalidSentinel(self.sentinel));
        }

        if self.smote_neighbors == 0 {
            return Err(ConfigValidationError::InvalidSmoteNeighbors(
                self.smote_neighbors,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid record layout for '{field}': {value} (must be at least 1)")]
    InvalidRecordLayout { field: String, value: usize },

    #[error("Invalid missing-value sentinel: {0} (must be finite)")]
    InvalidSentinel(f64),

    #[error("Invalid SMOTE neighbors: {0} (must be at least 1)")]
    InvalidSmoteNeighbors(usize),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    lines_per_record: Option<usize>,
    record_width: Option<usize>,
    sentinel: Option<f64>,
    impute_columns: Option<Vec<String>>,
    smote_neighbors: Option<usize>,
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
}

impl PipelineConfigBuilder {
    /// Set the number of physical lines per logical record.
    pub fn lines_per_record(mut self, lines: usize) -> Self {
        self.lines_per_record = Some(lines);
        self
    }

    /// Set the number of tokens in a valid record.
    pub fn record_width(mut self, width: usize) -> Self {
        self.record_width = Some(width);
        self
    }

    /// Set the numeric sentinel that marks a missing value.
    pub fn sentinel(mut self, sentinel: f64) -> Self {
        self.sentinel = Some(sentinel);
        self
    }

    /// Set the whitelist of columns eligible for mean imputation.
    pub fn impute_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.impute_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of neighbors for minority oversampling.
    pub fn smote_neighbors(mut self, k: usize) -> Self {
        self.smote_neighbors = Some(k);
        self
    }

    /// Set the RNG seed for reproducible oversampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the output directory for exported data and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom output file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();

        let config = PipelineConfig {
            lines_per_record: self.lines_per_record.unwrap_or(defaults.lines_per_record),
            record_width: self.record_width.unwrap_or(defaults.record_width),
            sentinel: self.sentinel.unwrap_or(defaults.sentinel),
            impute_columns: self.impute_columns.unwrap_or(defaults.impute_columns),
            smote_neighbors: self.smote_neighbors.unwrap_or(defaults.smote_neighbors),
            seed: self.seed.unwrap_or(defaults.seed),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name,
        };

        config.validate()?;
        Ok(config)
    }
}

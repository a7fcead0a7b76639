//! The main preprocessing pipeline.
//!
//! Stages run strictly forward, each consuming one frame and producing a new
//! one: parse -> project -> impute -> dedup -> balance. No stage mutates its
//! input, and nothing the pipeline holds is shared mutable state, so a
//! `Pipeline` value can be reused across runs and moved between threads.

use crate::balancer::{class_counts, SmoteBalancer};
use crate::cleaner::Deduplicator;
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::error::{Result, ResultExt};
use crate::imputers::MeanImputer;
use crate::parser::RecordParser;
use crate::projector::FeatureProjector;
use crate::schema;
use crate::types::{PipelineOutcome, PipelineSummary};
use std::time::Instant;
use tracing::info;

/// The record ingestion, cleaning, and class-balancing pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use heart_processing::{Pipeline, PipelineConfig};
///
/// let pipeline = Pipeline::builder()
///     .config(PipelineConfig::builder().seed(42).build()?)
///     .build()?;
///
/// let outcome = pipeline.process(&std::fs::read_to_string("hungarian.data")?)?;
/// println!("{} balanced rows", outcome.data.height());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    parser: RecordParser,
    projector: FeatureProjector,
    cleaner: Deduplicator,
    balancer: SmoteBalancer,
}

// The pipeline is reused by CLI and test harnesses that may move it into a
// worker thread.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over raw input text.
    ///
    /// Returns the balanced dataset together with a run summary. All error
    /// conditions (empty input, schema problems, insufficient class members)
    /// surface as distinguishable [`crate::PreprocessingError`] variants;
    /// nothing is retried.
    pub fn process(&self, text: &str) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        let mut summary = PipelineSummary::default();

        info!("Step 1: Parsing fixed-width records...");
        let raw = self.parser.parse_frame(text)?;
        summary.records_parsed = raw.height();
        summary.add_step(format!(
            "Parsed {} records of {} tokens",
            raw.height(),
            self.config.record_width
        ));

        info!("Step 2: Projecting onto the modeling schema...");
        let projected = self
            .projector
            .project(&raw)
            .context("During feature projection")?;
        summary.add_step(format!(
            "Selected {} feature columns + target, sentinel {} mapped to missing",
            projected.width() - 1,
            self.config.sentinel
        ));

        info!("Step 3: Imputing missing values...");
        let (imputed, table) = MeanImputer::fit_transform(&projected, &self.config.impute_columns)
            .context("During mean imputation")?;
        for (col, fill) in &table {
            summary.add_step(format!("Filled '{}' with rounded mean: {}", col, fill));
        }
        summary.imputation_table = table;

        info!("Step 4: Removing duplicate rows...");
        let (deduped, removed) = self.cleaner.dedup(imputed)?;
        summary.duplicates_removed = removed;
        summary.rows_after_dedup = deduped.height();
        summary.add_step(format!("Removed {} duplicate rows", removed));

        info!("Step 5: Balancing class distribution...");
        summary.class_counts_before = class_counts(&deduped, schema::TARGET_COLUMN)?;
        let balanced = self
            .balancer
            .fit_resample(&deduped, schema::TARGET_COLUMN)?;
        summary.class_counts_after = class_counts(&balanced, schema::TARGET_COLUMN)?;
        summary.rows_synthesized = balanced.height() - deduped.height();
        summary.rows_total = balanced.height();
        summary.add_step(format!(
            "Synthesized {} minority-class rows (seed {})",
            summary.rows_synthesized, self.config.seed
        ));

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Pipeline complete: {} rows in {}ms",
            summary.rows_total, summary.duration_ms
        );

        Ok(PipelineOutcome {
            data: balanced,
            summary,
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let parser = RecordParser::from_config(&config);
        let projector = FeatureProjector::from_config(&config);
        let balancer = SmoteBalancer::from_config(&config);

        Ok(Pipeline {
            config,
            parser,
            projector,
            cleaner: Deduplicator,
            balancer,
        })
    }
}

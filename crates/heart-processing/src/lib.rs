//! Heart Disease Data Preprocessing Pipeline
//!
//! A deterministic preprocessing library for fixed-width clinical records,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! This library turns raw multi-line clinical data files into a clean,
//! class-balanced modeling dataset:
//!
//! - **Record Parsing**: Fixed-width records spanning multiple physical
//!   lines, tokenized and validated by token count
//! - **Feature Projection**: Selection and renaming of the modeling columns,
//!   with the missing-value sentinel mapped to nulls
//! - **Imputation**: Rounded-mean fill for a fixed whitelist of columns
//! - **Deduplication**: Exact duplicate removal, first occurrence kept
//! - **Class Balancing**: SMOTE oversampling until every class matches the
//!   majority count, bitwise reproducible under a fixed seed
//! - **Classification**: An opaque classifier collaborator loaded from a
//!   persisted artifact, used to score the balanced dataset
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use heart_processing::{Pipeline, PipelineConfig, ReportGenerator};
//! use std::path::PathBuf;
//!
//! let config = PipelineConfig::builder()
//!     .seed(42)
//!     .smote_neighbors(5)
//!     .build()?;
//!
//! let pipeline = Pipeline::builder().config(config).build()?;
//!
//! let text = std::fs::read_to_string("hungarian.data")?;
//! let mut outcome = pipeline.process(&text)?;
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"), None);
//! let path = generator.write_dataset(&mut outcome.data)?;
//!
//! println!("Balanced dataset written to {}", path.display());
//! for step in &outcome.summary.processing_steps {
//!     println!("  - {}", step);
//! }
//! ```
//!
//! # Determinism
//!
//! Every stage is deterministic. The only randomness in the pipeline is the
//! oversampling RNG, which is seeded from [`PipelineConfig::seed`]; two runs
//! with the same seed over the same input produce byte-identical output.

pub mod balancer;
pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod parser;
pub mod pipeline;
pub mod projector;
pub mod reporting;
pub mod schema;
pub mod types;

// Re-exports for convenient access
pub use balancer::{NeighborIndex, SmoteBalancer, class_counts};
pub use classifier::{CentroidClassifier, Classifier, accuracy};
pub use cleaner::Deduplicator;
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use imputers::{ImputationTable, MeanImputer};
pub use parser::RecordParser;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use projector::FeatureProjector;
pub use reporting::{ReportGenerator, RunReport};
pub use types::{PipelineOutcome, PipelineSummary};

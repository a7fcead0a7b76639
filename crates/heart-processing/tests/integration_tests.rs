//! Integration tests for the heart disease preprocessing pipeline.
//!
//! These tests exercise end-to-end behavior over synthetic fixed-width input
//! rendered in the real 10-line / 76-token layout.

use heart_processing::{
    CentroidClassifier, Pipeline, PipelineConfig, PreprocessingError, ReportGenerator, RunReport,
    schema,
};
use polars::prelude::*;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

/// Render one 76-token record over 10 physical lines. The 14 selected raw
/// positions carry the given values (in selection order); all other tokens
/// are zero.
fn render_record(values: &[f64; 14]) -> String {
    let mut tokens = vec!["0".to_string(); schema::RECORD_WIDTH];
    for (pos, (raw_idx, _)) in schema::RAW_SELECTION.iter().enumerate() {
        tokens[*raw_idx] = format!("{}", values[pos]);
    }
    tokens
        .chunks(8)
        .map(|chunk| chunk.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dataset(rows: &[[f64; 14]]) -> String {
    rows.iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n")
}

//  age  sex  cp  trestbps  chol  fbs  restecg  thalach  exang  oldpeak
//  slope  ca  thal  target
fn record(age: f64, trestbps: f64, chol: f64, thalach: f64, target: f64) -> [f64; 14] {
    [
        age, 1.0, 4.0, trestbps, chol, 0.0, 1.0, thalach, 0.0, 1.0, 2.0, 0.0, 6.0, target,
    ]
}

/// A dataset with 8 class-0 rows, 4 class-1 rows, one exact duplicate and
/// one sentinel value per whitelisted column usage.
fn synthetic_dataset() -> Vec<[f64; 14]> {
    vec![
        record(63.0, 140.0, 260.0, 112.0, 0.0),
        record(63.0, 140.0, 260.0, 112.0, 0.0), // exact duplicate
        record(44.0, -9.0, 210.0, 150.0, 0.0),  // trestbps missing
        record(52.0, 130.0, -9.0, 140.0, 0.0),  // chol missing
        record(48.0, 120.0, 230.0, 160.0, 0.0),
        record(55.0, 135.0, 250.0, 145.0, 0.0),
        record(41.0, 125.0, 200.0, 168.0, 0.0),
        record(59.0, 150.0, 270.0, 130.0, 0.0),
        record(46.0, 128.0, 215.0, 155.0, 0.0),
        record(58.0, 145.0, 280.0, -9.0, 1.0), // thalach missing
        record(61.0, 155.0, 300.0, 120.0, 1.0),
        record(66.0, 160.0, 310.0, 110.0, 1.0),
        record(57.0, 148.0, 290.0, 125.0, 1.0),
    ]
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("heart_processing_it_{}", name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_synthetic_dataset() {
    let text = render_dataset(&synthetic_dataset());

    let outcome = Pipeline::builder()
        .build()
        .unwrap()
        .process(&text)
        .expect("pipeline should complete successfully");

    let summary = &outcome.summary;
    assert_eq!(summary.records_parsed, 13);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.rows_after_dedup, 12);

    // 8 class-0 vs 4 class-1 rows: four synthesized, 16 total.
    assert_eq!(summary.rows_synthesized, 4);
    assert_eq!(summary.rows_total, 16);
    assert_eq!(summary.class_counts_after[&0], 8);
    assert_eq!(summary.class_counts_after[&1], 8);

    // Shape: 10 features + target.
    assert_eq!(outcome.data.width(), 11);
    assert_eq!(outcome.data.height(), 16);

    // No missing values survive imputation of the whitelisted columns.
    for name in schema::IMPUTED_COLUMNS {
        assert_eq!(outcome.data.column(name).unwrap().null_count(), 0);
    }
}

#[test]
fn test_pipeline_deterministic_across_instances() {
    let text = render_dataset(&synthetic_dataset());

    let a = Pipeline::builder()
        .config(PipelineConfig::builder().seed(7).build().unwrap())
        .build()
        .unwrap()
        .process(&text)
        .unwrap();
    let b = Pipeline::builder()
        .config(PipelineConfig::builder().seed(7).build().unwrap())
        .build()
        .unwrap()
        .process(&text)
        .unwrap();

    assert!(a.data.equals(&b.data));
    assert_eq!(a.summary.imputation_table, b.summary.imputation_table);
}

#[test]
fn test_pipeline_trailing_partial_record_is_ignored() {
    let mut text = render_dataset(&synthetic_dataset());
    text.push_str("\n63 1 4 140\n");

    let outcome = Pipeline::builder().build().unwrap().process(&text).unwrap();
    assert_eq!(outcome.summary.records_parsed, 13);
}

#[test]
fn test_pipeline_empty_input_fails_with_empty_input_error() {
    let result = Pipeline::builder().build().unwrap().process("\n  \n");
    assert!(matches!(
        result.unwrap_err(),
        PreprocessingError::EmptyInput
    ));
}

// ============================================================================
// Export and Reporting Tests
// ============================================================================

#[test]
fn test_dataset_export_roundtrip() {
    let text = render_dataset(&synthetic_dataset());
    let mut outcome = Pipeline::builder().build().unwrap().process(&text).unwrap();

    let dir = temp_dir("export");
    let generator = ReportGenerator::new(dir.clone(), None);
    let path = generator.write_dataset(&mut outcome.data).unwrap();

    let reread = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file");

    assert_eq!(reread.shape(), outcome.data.shape());
    let names: Vec<&str> = reread
        .get_column_names()
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(names.last(), Some(&"target"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_run_report_written_as_json() {
    let text = render_dataset(&synthetic_dataset());
    let outcome = Pipeline::builder().build().unwrap().process(&text).unwrap();

    let dir = temp_dir("report");
    let generator = ReportGenerator::new(dir.clone(), None);

    let report = RunReport::new("synthetic.data", outcome.summary);
    let path = generator.write_report(&report, "synthetic").unwrap();

    let parsed: RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.input_file, "synthetic.data");
    assert_eq!(parsed.summary.rows_total, 16);

    fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Classifier Collaborator Tests
// ============================================================================

#[test]
fn test_classifier_scores_balanced_dataset() {
    let text = render_dataset(&synthetic_dataset());
    let outcome = Pipeline::builder().build().unwrap().process(&text).unwrap();

    // A two-centroid model over the full feature set; centroids are rough
    // per-class feature means of the synthetic data.
    let artifact = serde_json::json!({
        "feature_names": schema::FEATURE_COLUMNS,
        "classes": [0, 1],
        "centroids": [
            [52.0, 1.0, 4.0, 133.0, 230.0, 0.0, 1.0, 148.0, 0.0, 1.0],
            [60.0, 1.0, 4.0, 152.0, 295.0, 0.0, 1.0, 120.0, 0.0, 1.0],
        ],
    });

    let dir = temp_dir("classifier");
    let path = dir.join("model.json");
    fs::write(&path, artifact.to_string()).unwrap();

    let model = CentroidClassifier::load(&path).unwrap();
    let predictions = model.predict_frame(&outcome.data).unwrap();
    assert_eq!(predictions.len(), outcome.data.height());
    assert!(predictions.iter().all(|p| *p == 0 || *p == 1));

    fs::remove_dir_all(&dir).ok();
}

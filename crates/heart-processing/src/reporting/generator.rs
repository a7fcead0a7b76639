use crate::error::Result;
use crate::types::PipelineSummary;
use chrono::Utc;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Run report merging pipeline results with run metadata.
///
/// Use this for both JSON output (`--json`) and file writing
/// (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated (RFC 3339, UTC).
    pub generated_at: String,
    /// Path to the input file.
    pub input_file: String,
    /// Path to the exported dataset (if written).
    pub output_file: Option<String>,
    /// Summary of processing actions and results.
    pub summary: PipelineSummary,
    /// Classifier accuracy over the balanced dataset, when a model artifact
    /// was supplied.
    pub model_accuracy: Option<f64>,
}

impl RunReport {
    /// Build a report for one completed run.
    pub fn new(input_file: impl Into<String>, summary: PipelineSummary) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            input_file: input_file.into(),
            output_file: None,
            summary,
            model_accuracy: None,
        }
    }
}

/// Writes the balanced dataset and run reports under an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Export the balanced dataset as CSV.
    ///
    /// The file is named `<output_name>.csv`, defaulting to
    /// `balanced_dataset.csv`. Returns the path written.
    pub fn write_dataset(&self, df: &mut DataFrame) -> Result<PathBuf> {
        let file_name = self
            .output_name
            .clone()
            .unwrap_or_else(|| "balanced_dataset".to_string());

        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{}.csv", file_name));
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Write a run report as pretty-printed JSON next to the dataset.
    ///
    /// The file is named `<base>_report.json`. Returns the path written.
    pub fn write_report(&self, report: &RunReport, base: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let report_path = self.output_dir.join(format!("{}_report.json", base));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_output_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("heart_processing_{}", name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_dataset_default_name() {
        let dir = temp_output_dir("write_dataset");
        let generator = ReportGenerator::new(dir.clone(), None);

        let mut df = df![
            "age" => [54.0, 61.0],
            "target" => [0i64, 1],
        ]
        .unwrap();

        let path = generator.write_dataset(&mut df).unwrap();
        assert_eq!(path.file_name().unwrap(), "balanced_dataset.csv");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("age,target\n"));
        assert_eq!(contents.lines().count(), 3);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_dataset_custom_name() {
        let dir = temp_output_dir("write_dataset_named");
        let generator = ReportGenerator::new(dir.clone(), Some("hungarian".to_string()));

        let mut df = df!["age" => [54.0]].unwrap();
        let path = generator.write_dataset(&mut df).unwrap();
        assert_eq!(path.file_name().unwrap(), "hungarian.csv");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_report_roundtrip() {
        let dir = temp_output_dir("write_report");
        let generator = ReportGenerator::new(dir.clone(), None);

        let mut summary = PipelineSummary::default();
        summary.records_parsed = 294;
        summary.add_step("Parsed 294 records of 76 tokens");

        let mut report = RunReport::new("hungarian.data", summary);
        report.model_accuracy = Some(0.875);

        let path = generator.write_report(&report, "hungarian").unwrap();
        assert_eq!(path.file_name().unwrap(), "hungarian_report.json");

        let parsed: RunReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.input_file, "hungarian.data");
        assert_eq!(parsed.summary.records_parsed, 294);
        assert_eq!(parsed.model_accuracy, Some(0.875));

        fs::remove_dir_all(&dir).ok();
    }
}

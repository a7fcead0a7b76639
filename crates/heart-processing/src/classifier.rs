//! The downstream classifier collaborator.
//!
//! The pipeline treats the trained model as an opaque function from a
//! feature vector to a diagnostic class label, loaded once from a persisted
//! artifact at startup. Any deserialization or shape problem surfaces
//! immediately as [`PreprocessingError::ArtifactLoad`]; there is no partial
//! operation.

use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// An opaque `predict(features) -> label` function.
pub trait Classifier: Send + Sync {
    /// Predict the class label for one ordered feature vector.
    fn predict(&self, features: &[f64]) -> Result<i64>;
}

/// Nearest-centroid classifier deserialized from a JSON artifact.
///
/// The artifact stores one centroid per class over a fixed, ordered feature
/// list; prediction returns the class of the closest centroid by Euclidean
/// distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidClassifier {
    feature_names: Vec<String>,
    classes: Vec<i64>,
    centroids: Vec<Vec<f64>>,
}

impl CentroidClassifier {
    /// Load and validate a classifier artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::ArtifactLoad`] for any read, parse, or
    /// shape failure.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact_error = |reason: String| PreprocessingError::ArtifactLoad {
            path: path.display().to_string(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| artifact_error(e.to_string()))?;
        let model: CentroidClassifier =
            serde_json::from_str(&raw).map_err(|e| artifact_error(e.to_string()))?;

        if model.classes.is_empty() {
            return Err(artifact_error("artifact defines no classes".to_string()));
        }
        if model.classes.len() != model.centroids.len() {
            return Err(artifact_error(format!(
                "{} classes but {} centroids",
                model.classes.len(),
                model.centroids.len()
            )));
        }
        if model
            .centroids
            .iter()
            .any(|c| c.len() != model.feature_names.len())
        {
            return Err(artifact_error(format!(
                "centroid arity does not match the {} declared features",
                model.feature_names.len()
            )));
        }

        info!(
            "Loaded classifier artifact: {} classes over {} features",
            model.classes.len(),
            model.feature_names.len()
        );
        Ok(model)
    }

    /// The ordered feature columns this model expects.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Predict a label for every row of a frame holding the model's feature
    /// columns.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<i64>> {
        let mut columns = Vec::with_capacity(self.feature_names.len());
        for name in &self.feature_names {
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

        (0..df.height())
            .map(|row_idx| {
                let features: Vec<f64> = columns.iter().map(|col| col[row_idx]).collect();
                self.predict(&features)
            })
            .collect()
    }
}

impl Classifier for CentroidClassifier {
    fn predict(&self, features: &[f64]) -> Result<i64> {
        if features.len() != self.feature_names.len() {
            return Err(PreprocessingError::InvalidConfig(format!(
                "expected {} features, got {}",
                self.feature_names.len(),
                features.len()
            )));
        }

        let mut best_class = self.classes[0];
        let mut best_distance = f64::INFINITY;
        for (class, centroid) in self.classes.iter().zip(self.centroids.iter()) {
            let distance: f64 = centroid
                .iter()
                .zip(features.iter())
                .map(|(c, f)| (c - f) * (c - f))
                .sum();
            if distance < best_distance {
                best_distance = distance;
                best_class = *class;
            }
        }

        Ok(best_class)
    }
}

/// Fraction of predictions matching the reference labels.
pub fn accuracy(predictions: &[i64], labels: &[i64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let hits = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(p, l)| p == l)
        .count();
    hits as f64 / predictions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_model() -> CentroidClassifier {
        CentroidClassifier {
            feature_names: vec!["age".to_string(), "chol".to_string()],
            classes: vec![0, 1],
            centroids: vec![vec![40.0, 200.0], vec![65.0, 280.0]],
        }
    }

    fn write_artifact(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_predict_nearest_centroid() {
        let model = sample_model();
        assert_eq!(model.predict(&[42.0, 210.0]).unwrap(), 0);
        assert_eq!(model.predict(&[63.0, 270.0]).unwrap(), 1);
    }

    #[test]
    fn test_predict_wrong_arity_is_error() {
        let model = sample_model();
        assert!(model.predict(&[42.0]).is_err());
    }

    #[test]
    fn test_load_roundtrip() {
        let path = write_artifact(
            "heart_processing_model_ok.json",
            &serde_json::to_string(&sample_model()).unwrap(),
        );
        let model = CentroidClassifier::load(&path).unwrap();
        assert_eq!(model.feature_names(), &["age", "chol"]);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_is_artifact_error() {
        let result = CentroidClassifier::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(
            result.unwrap_err(),
            PreprocessingError::ArtifactLoad { .. }
        ));
    }

    #[test]
    fn test_load_malformed_json_is_artifact_error() {
        let path = write_artifact("heart_processing_model_bad.json", "{ not json");
        let result = CentroidClassifier::load(&path);
        assert!(matches!(
            result.unwrap_err(),
            PreprocessingError::ArtifactLoad { .. }
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_shape_mismatch_is_artifact_error() {
        let broken = r#"{
            "feature_names": ["age", "chol"],
            "classes": [0, 1],
            "centroids": [[40.0, 200.0]]
        }"#;
        let path = write_artifact("heart_processing_model_shape.json", broken);
        let result = CentroidClassifier::load(&path);
        assert!(matches!(
            result.unwrap_err(),
            PreprocessingError::ArtifactLoad { .. }
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_predict_frame() {
        let model = sample_model();
        let df = df![
            "age" => [42.0, 63.0],
            "chol" => [210.0, 270.0],
            "target" => [0i64, 1],
        ]
        .unwrap();

        let predictions = model.predict_frame(&df).unwrap();
        assert_eq!(predictions, vec![0, 1]);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}

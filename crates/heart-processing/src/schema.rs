//! Fixed layout of the Hungarian heart disease source format and the
//! modeling schema derived from it.
//!
//! The raw format packs one logical record into 10 physical lines holding 76
//! whitespace-delimited numeric tokens. Only 14 of those positions carry
//! fields the downstream model knows about; three of them are named but
//! discarded again after selection.

/// Physical lines per logical record in the source file.
pub const LINES_PER_RECORD: usize = 10;

/// Numeric tokens per valid record.
pub const RECORD_WIDTH: usize = 76;

/// Numeric literal standing in for "value not recorded".
pub const MISSING_SENTINEL: f64 = -9.0;

/// Raw 0-indexed token position -> semantic name, in selection order.
///
/// Position 0 is a running record index and position 75 a layout artifact;
/// neither is selected. Selection order, not raw position order, defines the
/// column order of the projected dataset.
pub const RAW_SELECTION: [(usize, &str); 14] = [
    (2, "age"),
    (3, "sex"),
    (8, "cp"),
    (9, "trestbps"),
    (11, "chol"),
    (15, "fbs"),
    (18, "restecg"),
    (31, "thalach"),
    (37, "exang"),
    (39, "oldpeak"),
    (40, "slope"),
    (43, "ca"),
    (50, "thal"),
    (57, "target"),
];

/// Named columns discarded after selection; not used by the model.
pub const DROPPED_COLUMNS: [&str; 3] = ["ca", "slope", "thal"];

/// Feature columns of the modeling schema, in dataset order.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
];

/// Label column holding the diagnostic severity class (0..=4).
pub const TARGET_COLUMN: &str = "target";

/// Columns known to contain missing values in this format; the historical
/// imputation whitelist.
pub const IMPUTED_COLUMNS: [&str; 6] = ["trestbps", "chol", "fbs", "restecg", "thalach", "exang"];

/// Name of the raw column at a given token position (`c0`..`c75`).
pub fn raw_column_name(index: usize) -> String {
    format!("c{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_covers_schema() {
        for feature in FEATURE_COLUMNS {
            assert!(RAW_SELECTION.iter().any(|(_, name)| *name == feature));
        }
        assert!(RAW_SELECTION.iter().any(|(_, name)| *name == TARGET_COLUMN));
    }

    #[test]
    fn test_dropped_columns_are_selected_first() {
        // The three discarded fields are part of the raw selection; dropping
        // them is a projection step, not a parsing one.
        for dropped in DROPPED_COLUMNS {
            assert!(RAW_SELECTION.iter().any(|(_, name)| *name == dropped));
        }
    }

    #[test]
    fn test_imputed_columns_are_features() {
        for col in IMPUTED_COLUMNS {
            assert!(FEATURE_COLUMNS.contains(&col));
        }
    }

    #[test]
    fn test_selection_indices_in_bounds() {
        for (idx, _) in RAW_SELECTION {
            assert!(idx < RECORD_WIDTH);
        }
    }
}

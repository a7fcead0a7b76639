//! Fixed-width record parsing.
//!
//! The source file packs one logical record into a fixed number of physical
//! lines. Joining a chunk of lines and re-splitting on whitespace yields the
//! record's tokens; the first chunk whose token count differs from the
//! expected width marks the natural end of valid data. That boundary is a
//! terminal condition of the produced sequence, never an error.

use crate::config::PipelineConfig;
use crate::error::{PreprocessingError, Result};
use crate::schema;
use polars::prelude::*;
use tracing::{debug, info};

/// Parser for the fixed-width clinical record format.
pub struct RecordParser {
    lines_per_record: usize,
    record_width: usize,
}

impl RecordParser {
    /// Create a parser with an explicit record layout.
    pub fn new(lines_per_record: usize, record_width: usize) -> Self {
        Self {
            lines_per_record,
            record_width,
        }
    }

    /// Create a parser from a pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.lines_per_record, config.record_width)
    }

    /// Lazily yield token records from pre-split input lines.
    ///
    /// The sequence is finite and short-circuiting: it ends at the first
    /// chunk whose token count differs from the record width. Empty input
    /// yields an empty sequence.
    pub fn records<'a>(&self, lines: &'a [&'a str]) -> impl Iterator<Item = Vec<&'a str>> + 'a {
        let width = self.record_width;
        lines
            .chunks(self.lines_per_record)
            .map(|chunk| {
                chunk
                    .iter()
                    .flat_map(|line| line.split_whitespace())
                    .collect::<Vec<&str>>()
            })
            .take_while(move |tokens| tokens.len() == width)
    }

    /// Parse raw text into a DataFrame of Float64 columns `c0`..`c{W-1}`.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::EmptyInput`] when the input holds no
    /// tokens at all, and [`PreprocessingError::Format`] when a token inside
    /// an accepted record is not numeric.
    pub fn parse_frame(&self, text: &str) -> Result<DataFrame> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();

        if lines.iter().all(|line| line.split_whitespace().count() == 0) {
            return Err(PreprocessingError::EmptyInput);
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (record_idx, tokens) in self.records(&lines).enumerate() {
            let mut row = Vec::with_capacity(self.record_width);
            for (token_idx, token) in tokens.iter().enumerate() {
                let value =
                    token
                        .parse::<f64>()
                        .map_err(|_| PreprocessingError::Format {
                            record: record_idx,
                            token: token_idx,
                            value: token.to_string(),
                        })?;
                row.push(value);
            }
            rows.push(row);
        }

        debug!(
            "Parsed {} records of width {} from {} lines",
            rows.len(),
            self.record_width,
            lines.len()
        );

        let columns: Vec<Column> = (0..self.record_width)
            .map(|col_idx| {
                let values: Vec<f64> = rows.iter().map(|row| row[col_idx]).collect();
                Column::new(schema::raw_column_name(col_idx).into(), values)
            })
            .collect();

        let df = DataFrame::new(columns)?;
        info!("Raw frame shape: {:?}", df.shape());
        Ok(df)
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(schema::LINES_PER_RECORD, schema::RECORD_WIDTH)
    }
}

//! Report generation module.
//!
//! This module provides functionality for exporting the balanced dataset
//! and writing run reports.
//!
//! # Run Reports
//!
//! Use [`RunReport`] for unified report output suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode

mod generator;

pub use generator::{ReportGenerator, RunReport};

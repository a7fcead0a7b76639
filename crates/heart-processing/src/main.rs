//! CLI entry point for the heart disease preprocessing pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use heart_processing::{
    CentroidClassifier, Pipeline, PipelineConfig, PipelineOutcome, PreprocessingError,
    ReportGenerator, RunReport, accuracy, schema,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Heart Disease Data Preprocessing Pipeline",
    long_about = "Parses fixed-width clinical records, imputes missing values,\n\
                  removes duplicates, and balances class counts with SMOTE.\n\n\
                  EXAMPLES:\n  \
                  # Basic usage\n  \
                  heart-processing -i hungarian.data\n\n  \
                  # Custom output location and seed\n  \
                  heart-processing -i hungarian.data -o results/ --seed 7\n\n  \
                  # Score the balanced dataset with a trained model\n  \
                  heart-processing -i hungarian.data --model model.json\n\n  \
                  # Machine-readable output\n  \
                  heart-processing -i hungarian.data --json | jq .summary.rows_total"
)]
struct Args {
    /// Path to the fixed-width data file to process
    #[arg(short, long)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = "./output")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses "balanced_dataset"
    #[arg(long)]
    output_name: Option<String>,

    /// Path to a trained classifier artifact (JSON)
    ///
    /// When given, the balanced dataset is scored and the accuracy is
    /// included in the report
    #[arg(short, long)]
    model: Option<String>,

    /// Seed for the oversampling RNG
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of nearest neighbors for SMOTE
    #[arg(long, default_value = "5")]
    neighbors: usize,

    /// Numeric sentinel that marks a missing value
    #[arg(long, default_value = "-9.0", allow_hyphen_values = true)]
    sentinel: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    if !Path::new(&args.output).exists() {
        std::fs::create_dir_all(&args.output)?;
        info!("Created output directory: {}", args.output);
    }

    let mut config_builder = PipelineConfig::builder()
        .seed(args.seed)
        .smote_neighbors(args.neighbors)
        .sentinel(args.sentinel)
        .output_dir(&args.output);

    if let Some(ref name) = args.output_name {
        config_builder = config_builder.output_name(name.clone());
    }

    let config = config_builder.build()?;
    let pipeline = Pipeline::builder().config(config).build()?;

    info!("{}", "=".repeat(80));
    info!("Starting preprocessing pipeline...");
    info!("{}", "=".repeat(80));

    info!("Loading data from: {}", args.input);
    let text = std::fs::read_to_string(&args.input)?;

    match pipeline.process(&text) {
        Ok(outcome) => handle_pipeline_output(outcome, &args),
        Err(e) => {
            error!("Pipeline failed [{}]: {}", e.error_code(), e);
            Err(anyhow!("Pipeline failed: {}", e))
        }
    }
}

/// Handle pipeline output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
fn handle_pipeline_output(mut outcome: PipelineOutcome, args: &Args) -> Result<()> {
    let model_accuracy = match args.model {
        Some(ref model_path) => Some(score_dataset(model_path, &outcome)?),
        None => None,
    };

    let generator = ReportGenerator::new(PathBuf::from(&args.output), args.output_name.clone());
    let output_path = generator.write_dataset(&mut outcome.data)?;

    let mut report = RunReport::new(args.input.clone(), outcome.summary);
    report.output_file = Some(output_path.display().to_string());
    report.model_accuracy = model_accuracy;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = generator.write_report(&report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Load a classifier artifact and score the balanced dataset against its own
/// labels.
fn score_dataset(model_path: &str, outcome: &PipelineOutcome) -> Result<f64> {
    let model = CentroidClassifier::load(Path::new(model_path))?;
    let predictions = model.predict_frame(&outcome.data)?;

    let labels: Vec<i64> = outcome
        .data
        .column(schema::TARGET_COLUMN)?
        .as_materialized_series()
        .i64()?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                PreprocessingError::NoValidValues(schema::TARGET_COLUMN.to_string())
            })
        })
        .collect::<Result<_, _>>()?;

    let acc = accuracy(&predictions, &labels);
    info!("Model accuracy on balanced dataset: {:.1}%", acc * 100.0);
    Ok(acc)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the preprocessing results.
///
/// This is the default output when `--json` is not specified. It uses
/// `println!` intentionally: this is the primary CLI result, visible
/// regardless of log level.
fn print_human_readable_summary(report: &RunReport) {
    let summary = &report.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("PREPROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Input:  {} ({} records)", report.input_file, summary.records_parsed);
    if let Some(ref output_file) = report.output_file {
        println!("Output: {} ({} rows)", output_file, summary.rows_total);
    }
    println!();

    println!("Processing Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} parsed -> {} after dedup -> {} after balancing",
        summary.records_parsed, summary.rows_after_dedup, summary.rows_total
    );
    println!("  Duplicates removed: {}", summary.duplicates_removed);
    println!("  Rows synthesized: {}", summary.rows_synthesized);
    println!();

    if !summary.class_counts_after.is_empty() {
        println!("Class Distribution:");
        for (class, after) in &summary.class_counts_after {
            let before = summary.class_counts_before.get(class).copied().unwrap_or(0);
            println!("  class {}: {} -> {}", class, before, after);
        }
        println!();
    }

    if !summary.imputation_table.is_empty() {
        println!("Imputed Values:");
        for (column, fill) in &summary.imputation_table {
            println!("  {}: {}", column, fill);
        }
        println!();
    }

    if let Some(acc) = report.model_accuracy {
        println!("Model Accuracy: {:.1}%", acc * 100.0);
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}

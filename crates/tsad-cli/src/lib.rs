// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! `tsad` command line: scores a predicted label file against ground truth
//! and prints every metric family as JSON.

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsad_core::{AnomalyRange, BiasType, Label};
use tsad_eval::{
    evaluate, DelaySign, EvaluationConfig, EvaluationReport, PointMetrics, RangeScores, SoftScore,
};

mod error;

pub use error::{CliError, CliResult};

#[derive(Debug, Parser)]
#[command(name = "tsad")]
#[command(about = "Range-aware scoring for time-series anomaly detection", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score predicted labels against ground-truth labels
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
struct EvalArgs {
    /// JSON label file: an array of 0/1/-1 or {"labels": [...]}
    #[arg(long)]
    ground_truth: PathBuf,

    /// JSON label file in the same format as the ground truth
    #[arg(long)]
    predictions: PathBuf,

    /// JSON evaluation config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    detection_range: Option<usize>,

    #[arg(long)]
    alpha: Option<f64>,

    #[arg(long, value_enum)]
    bias: Option<BiasArg>,

    /// Average absolute instead of signed delay offsets
    #[arg(long)]
    absolute: bool,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BiasArg {
    Flat,
    Front,
    Back,
    Middle,
}

impl From<BiasArg> for BiasType {
    fn from(value: BiasArg) -> Self {
        match value {
            BiasArg::Flat => Self::Flat,
            BiasArg::Front => Self::Front,
            BiasArg::Back => Self::Back,
            BiasArg::Middle => Self::Middle,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelDocument {
    Bare(Vec<Label>),
    Wrapped { labels: Vec<Label> },
}

#[derive(Serialize)]
struct EvalOutput {
    command: &'static str,
    n: usize,
    unscored: usize,
    config: EvaluationConfig,
    true_ranges: Vec<AnomalyRange>,
    predicted_ranges: Vec<AnomalyRange>,
    point: PointMetrics,
    soft: SoftOutput,
    range: RangeScores,
    delay: DelayOutput,
}

#[derive(Serialize)]
struct SoftOutput {
    detection_range: usize,
    precision: SoftScore,
    recall: SoftScore,
    f1: f64,
    redundant_detections: usize,
}

/// Infinite delays have no JSON number form and are written as `null`.
#[derive(Serialize)]
struct DelayOutput {
    sign: DelaySign,
    ctt: Option<f64>,
    ttc: Option<f64>,
}

impl From<EvaluationReport> for EvalOutput {
    fn from(report: EvaluationReport) -> Self {
        Self {
            command: "eval",
            n: report.n,
            unscored: report.unscored,
            config: report.config,
            true_ranges: report.true_ranges,
            predicted_ranges: report.predicted_ranges,
            point: report.point,
            soft: SoftOutput {
                detection_range: report.config.detection_range,
                precision: report.soft_precision,
                recall: report.soft_recall,
                f1: report.soft_f1,
                redundant_detections: report.redundant_detections,
            },
            range: report.range,
            delay: DelayOutput {
                sign: report.config.delay_sign,
                ctt: report.ctt.is_finite().then_some(report.ctt),
                ttc: report.ttc.is_finite().then_some(report.ttc),
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err
                .print()
                .map_err(|source| CliError::io("failed to print help", source));
        }
        Err(err) => return Err(CliError::invalid_input(err.to_string().trim_end())),
    };

    init_tracing(cli.verbose);
    match cli.command {
        Command::Eval(args) => handle_eval(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}

fn handle_eval(args: EvalArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;
    let y_true = load_labels(&args.ground_truth)?;
    let y_pred = load_labels(&args.predictions)?;

    let report = evaluate(&y_true, &y_pred, &config)?;
    tracing::info!(
        n = report.n,
        unscored = report.unscored,
        soft_f1 = report.soft_f1,
        range_f1 = report.range.f1,
        "evaluation complete"
    );

    write_json_output(&EvalOutput::from(report), args.output.as_deref())
}

fn resolve_config(args: &EvalArgs) -> CliResult<EvaluationConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => EvaluationConfig::default(),
    };

    if let Some(detection_range) = args.detection_range {
        config.detection_range = detection_range;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(bias) = args.bias {
        config.bias = bias.into();
    }
    if args.absolute {
        config.delay_sign = DelaySign::Absolute;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved evaluation config");
    Ok(config)
}

fn load_config(path: &Path) -> CliResult<EvaluationConfig> {
    let raw = read_file(path)?;
    serde_json::from_str(&raw)
        .map_err(|source| CliError::json(format!("invalid config in '{}'", path.display()), source))
}

fn load_labels(path: &Path) -> CliResult<Vec<Label>> {
    let raw = read_file(path)?;
    let labels = parse_label_document(&raw)
        .map_err(|source| CliError::json(format!("invalid labels in '{}'", path.display()), source))?;
    tracing::info!(path = %path.display(), n = labels.len(), "loaded labels");
    Ok(labels)
}

fn parse_label_document(raw: &str) -> Result<Vec<Label>, serde_json::Error> {
    Ok(match serde_json::from_str(raw)? {
        LabelDocument::Bare(labels) | LabelDocument::Wrapped { labels } => labels,
    })
}

fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path)
        .map_err(|source| CliError::io(format!("failed to read '{}'", path.display()), source))
}

fn write_json_output<T: Serialize>(payload: &T, output_path: Option<&Path>) -> CliResult<()> {
    let encoded = serde_json::to_string_pretty(payload)
        .map_err(|source| CliError::json("failed to serialize JSON output", source))?;

    if let Some(path) = output_path {
        fs::write(path, format!("{encoded}\n"))
            .map_err(|source| CliError::io(format!("failed to write '{}'", path.display()), source))
    } else {
        println!("{encoded}");
        Ok(())
    }
}

/// Prints `{"error": {"code", "message"}}` to stderr.
pub fn emit_structured_error(err: &CliError) {
    let envelope = ErrorEnvelope {
        error: ErrorPayload {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!(
            "{{\"error\":{{\"code\":\"{}\",\"message\":\"{}\"}}}}",
            err.code(),
            err
        ),
    }
}

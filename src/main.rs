//! Scroll Intent CLI
//!
//! Replays recorded wheel events through the classifier.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scroll_intent::{
    config::{ClassifierOptions, Config, OutputFormat},
    stats::VerdictLog,
    stream::{classify_event, reject},
    ClassifiedEvent, ClassifierError, IntentClassifier, VERSION,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scroll-intent")]
#[command(version = VERSION)]
#[command(about = "Tell intentional wheel events from inertial scrolling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify wheel events read as JSON lines
    Classify {
        /// File to read events from (stdin if omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output format (defaults to the configured one)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print verdict statistics when done
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Show configuration
    Config {
        /// Persist the given thresholds to the config file
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

/// Threshold overrides shared by all commands.
#[derive(Args, Debug, Default)]
struct ThresholdArgs {
    /// Minimum delta magnitude for an event to count at all
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Gap in milliseconds that starts a new gesture
    #[arg(long)]
    delay: Option<f64>,

    /// Magnitude above which non-decaying deltas stay intentional
    #[arg(long)]
    high_velocity: Option<f64>,

    /// Length of a strictly increasing run judged intentional
    #[arg(long, allow_negative_numbers = true)]
    increasing_deltas: Option<i64>,
}

impl From<&ThresholdArgs> for ClassifierOptions {
    fn from(args: &ThresholdArgs) -> Self {
        Self {
            sensitivity: args.sensitivity,
            delay: args.delay,
            high_velocity: args.high_velocity,
            increasing_deltas_threshold: args.increasing_deltas,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            input,
            format,
            stats,
            thresholds,
        } => cmd_classify(input, format, stats, &thresholds),
        Commands::Config { save, thresholds } => cmd_config(save, &thresholds),
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load config, using defaults: {e}");
            Config::default()
        }
    }
}

fn cmd_classify(
    input: Option<PathBuf>,
    format: Option<OutputFormat>,
    show_stats: bool,
    thresholds: &ThresholdArgs,
) -> Result<()> {
    let config = load_config();
    let classifier_config = config.classifier_config(&ClassifierOptions::from(thresholds));
    let format = format.unwrap_or(config.output_format);

    info!(?classifier_config, "Starting classification");

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Could not open {path:?}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut classifier = IntentClassifier::with_config(classifier_config);
    let log = VerdictLog::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if format == OutputFormat::Table {
        writeln!(out, "{}", table_header())?;
    }

    let mut sequence = 0u64;
    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let classified = classify_line(&mut classifier, &log, sequence, &line);
        sequence += 1;

        match format {
            OutputFormat::Table => writeln!(out, "{}", table_row(&classified))?,
            OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(&classified)?)?,
        }
    }

    if show_stats {
        writeln!(out)?;
        writeln!(out, "{}", log.summary())?;
    }

    Ok(())
}

/// A line that is not JSON is reported like any other invalid event.
fn classify_line(
    classifier: &mut IntentClassifier,
    log: &VerdictLog,
    sequence: u64,
    line: &str,
) -> ClassifiedEvent {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => classify_event(classifier, log, sequence, &value),
        Err(e) => {
            let error = ClassifierError::InvalidEvent(format!("not JSON: {e}"));
            reject(log, sequence, error)
        }
    }
}

fn table_header() -> String {
    format!(
        "{:>5}  {:<11}  {:>7}  {:>7}  {:>7}  {:>10}  {}",
        "#", "intent", "deltaX", "deltaY", "deltaZ", "timeStamp", "reason"
    )
}

/// Rejected input keeps its row, with blank deltas and the error as reason.
fn table_row(classified: &ClassifiedEvent) -> String {
    let [delta_x, delta_y, delta_z, time_stamp] = classified
        .event
        .map(|e| [e.delta_x, e.delta_y, e.delta_z, e.time_stamp].map(rounded))
        .unwrap_or_default();
    let (intent, reason) = match &classified.outcome {
        Ok(verdict) if verdict.intentional => ("intentional", verdict.reason.to_string()),
        Ok(verdict) => ("inertia", verdict.reason.to_string()),
        Err(e) => ("invalid", e.to_string()),
    };
    format!(
        "{:>5}  {:<11}  {:>7}  {:>7}  {:>7}  {:>10}  {}",
        classified.sequence, intent, delta_x, delta_y, delta_z, time_stamp, reason
    )
}

fn rounded(value: f64) -> String {
    format!("{}", value.round())
}

fn cmd_config(save: bool, thresholds: &ThresholdArgs) -> Result<()> {
    let mut config = load_config();
    let overrides = ClassifierOptions::from(thresholds);

    if save {
        config.classifier = config.classifier.merge(&overrides);
        config.save().context("Error saving config")?;
        println!("Saved configuration to {:?}", Config::config_path());
        println!();
    }

    let resolved = config.classifier_config(&overrides);

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!("Output format: {:?}", config.output_format);
    println!();
    println!("Classifier thresholds:");
    println!("  Sensitivity: {}", resolved.sensitivity);
    println!("  Delay: {}ms", resolved.delay);
    println!("  High velocity: {}", resolved.high_velocity);
    println!(
        "  Increasing deltas threshold: {}",
        resolved.increasing_deltas_threshold
    );

    Ok(())
}

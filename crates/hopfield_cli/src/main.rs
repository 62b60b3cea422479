pub mod config;
pub mod patterns;
pub mod report;

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use hopfield_core::{recall_all_with, HopfieldError, HopfieldNetwork, RecallConfig};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use tracing::{error, info};

use crate::config::{Config, OutputFormat};
use crate::report::{render_recall, render_weights, WeightsReport};

#[derive(Parser)]
#[command(name = "hopfield")]
#[command(about = "Hopfield associative memory - recover stored patterns from damaged inputs")]
struct Cli {
    #[command(flatten)]
    recall: RecallConfig,

    /// TOML config file (default: ~/.hopfield/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Require exact equality even if the config file sets a tolerance
    #[arg(long, conflicts_with = "tolerance")]
    exact: bool,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places in text reports
    #[arg(long)]
    precision: Option<usize>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the built-in damaged digits
    Demo,
    /// Recover patterns read from a JSON file
    Recall {
        /// JSON array of equal-length number arrays
        input: PathBuf,
    },
    /// Print the weight matrix and per-pattern energies
    Weights {
        /// JSON array of equal-length number arrays
        input: PathBuf,
    },
}

/// Flags given on the command line win over the config file. `--exact`
/// clears any tolerance the file sets.
fn merge_recall(
    file: RecallConfig,
    cli: RecallConfig,
    exact: bool,
    matches: &ArgMatches,
) -> RecallConfig {
    let explicit = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);
    RecallConfig {
        epochs: if explicit("epochs") { cli.epochs } else { file.epochs },
        max_iterations: if explicit("max_iterations") {
            cli.max_iterations
        } else {
            file.max_iterations
        },
        tolerance: if exact {
            None
        } else {
            cli.tolerance.or(file.tolerance)
        },
    }
}

fn init_logging(json: bool, level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("logging disabled: {}", e);
    }
}

fn run_recall(
    raw: &[Vec<f64>],
    recall: &RecallConfig,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    info!(
        patterns = raw.len(),
        epochs = recall.epochs,
        max_iterations = recall.max_iterations,
        tolerance = ?recall.tolerance,
        "Recalling patterns"
    );
    let start = Instant::now();
    let report = recall_all_with(raw, recall)?;
    info!(
        dim = report.dim,
        duration_secs = start.elapsed().as_secs_f64(),
        "Recall complete"
    );
    print!("{}", render_recall(&report, format, precision)?);
    Ok(())
}

fn run_weights(
    raw: &[Vec<f64>],
    recall: &RecallConfig,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    let network = HopfieldNetwork::train(raw, *recall)?;
    let report = WeightsReport::new(&network, raw)?;
    info!(dim = report.dim, "Weight matrix built");
    print!("{}", render_weights(&report, format, precision)?);
    Ok(())
}

fn report_failure(e: &anyhow::Error) {
    match e.downcast_ref::<HopfieldError>() {
        Some(err) => error!(
            kind = err.kind(),
            pattern = ?err.pattern_index(),
            error = %err,
            "Recall failed"
        ),
        None => {
            let chain = format!("{:#}", e);
            error!(error = %chain, "Fatal Error")
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let file_config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(cli.json_logs, "info");
            report_failure(&e);
            std::process::exit(1);
        }
    };

    init_logging(cli.json_logs || file_config.log.json, &file_config.log.level);
    if cli.config.is_none() && !Config::default_path().exists() {
        info!(path = %Config::default_path().display(), "No config file, using defaults");
    }

    let recall = merge_recall(file_config.recall, cli.recall, cli.exact, &matches);
    let format = cli.format.unwrap_or(file_config.output.format);
    let precision = cli.precision.unwrap_or(file_config.output.precision);

    let result = match cli.command {
        Commands::Demo => run_recall(&patterns::demo_patterns(), &recall, format, precision),
        Commands::Recall { input } => patterns::load_patterns(&input)
            .and_then(|raw| run_recall(&raw, &recall, format, precision)),
        Commands::Weights { input } => patterns::load_patterns(&input)
            .and_then(|raw| run_weights(&raw, &recall, format, precision)),
    };

    if let Err(e) = result {
        report_failure(&e);
        std::process::exit(1);
    }
}

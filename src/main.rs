use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polysolve::record::RecordOptions;
use polysolve::report::{render_json, render_text};
use polysolve::solver::{
    SolverConfig, VerificationModel, DEFAULT_DEVIATION_THRESHOLD, DEFAULT_TOLERANCE,
};
use polysolve::{decoder, process_batch, Base};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "polysolve",
    about = "Recover the constant term of a quadratic from base-encoded samples"
)]
struct Cli {
    /// Log solver internals (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one or more test-case records; each file is an independent case.
    Solve {
        /// Record files (JSON with "keys" and indexed base/value entries).
        #[arg(default_values = ["test_case_1.json", "test_case_2.json"])]
        files: Vec<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Determinant magnitude below which the system is treated as singular.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Deviation above which a point is flagged during verification.
        #[arg(long, default_value_t = DEFAULT_DEVIATION_THRESHOLD)]
        deviation_threshold: f64,
        /// Model that verification checks points against.
        #[arg(long, value_enum, default_value_t = VerifyAgainst::Simple)]
        verify_against: VerifyAgainst,
        /// Ignore entries whose index exceeds this value.
        #[arg(long)]
        max_index: Option<u32>,
    },
    /// Decode a single value from the given base.
    Decode {
        /// Digit string.
        value: String,
        /// Radix (2-36).
        #[arg(long)]
        base: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VerifyAgainst {
    /// f(x) = x² + c
    Simple,
    /// The coefficients actually solved.
    Solved,
}

impl From<VerifyAgainst> for VerificationModel {
    fn from(value: VerifyAgainst) -> Self {
        match value {
            VerifyAgainst::Simple => VerificationModel::AssumedSimple,
            VerifyAgainst::Solved => VerificationModel::Solved,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            files,
            format,
            tolerance,
            deviation_threshold,
            verify_against,
            max_index,
        } => {
            let config = SolverConfig::default()
                .with_tolerance(tolerance)
                .with_deviation_threshold(deviation_threshold)
                .with_verification(verify_against.into());
            run_solve(files, format, &RecordOptions { max_index }, &config)?
        }
        Commands::Decode { value, base } => run_decode(&value, &base)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_solve(
    files: Vec<PathBuf>,
    format: Format,
    options: &RecordOptions,
    config: &SolverConfig,
) -> Result<()> {
    let mut failures = 0usize;

    for (path, outcome) in process_batch(&files, options, config) {
        println!("=== {} ===", path.display());
        match outcome {
            Ok(report) => {
                let rendered = match format {
                    Format::Text => render_text(&report),
                    Format::Json => render_json(&report),
                }
                .with_context(|| format!("failed to render {}", path.display()))?;
                print!("{rendered}");
                if matches!(format, Format::Json) {
                    println!();
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("error: {}: {err}", path.display());
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} cases failed", files.len());
    }
    Ok(())
}

fn run_decode(value: &str, base: &str) -> Result<()> {
    let base: Base = base
        .parse()
        .with_context(|| format!("invalid base '{base}'"))?;
    let decoded = decoder::decode_in(value, base)
        .with_context(|| format!("failed to decode '{value}' in base {base}"))?;
    println!("{decoded}");
    Ok(())
}

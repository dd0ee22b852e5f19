#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

//! `connectz-gen`: writes a large game that never produces a winner.

use clap::Parser;
use connectz::Dimensions;
use connectz::generator::{GeneratorError, write_game};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Generate a Connect-N game file for performance runs.
#[derive(Parser, Debug)]
#[command(name = "connectz-gen", version)]
struct Cli {
    #[arg(long, default_value_t = 1_000)]
    columns: usize,

    #[arg(long, default_value_t = 1_000)]
    rows: usize,

    /// Must be at least 3.
    #[arg(long, default_value_t = 1_000)]
    line_length: usize,

    /// Output file. Writes to stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<usize, GeneratorError> {
    let dimensions = Dimensions::new(cli.columns, cli.rows, cli.line_length);
    match &cli.output {
        Some(path) => write_game(BufWriter::new(File::create(path)?), dimensions),
        None => write_game(BufWriter::new(io::stdout().lock()), dimensions),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(count) => {
            info!(moves = count, output = ?cli.output, "game written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "cannot generate game");
            ExitCode::FAILURE
        }
    }
}

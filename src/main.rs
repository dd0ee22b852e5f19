//! `connectz`: prints the outcome code of Connect-N game files.

use clap::Parser;
use connectz::{Axis, evaluate_path, evaluate_path_with_game, render};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Decide Connect-N games.
///
/// Prints one code per file: 0 draw, 1 player 1 wins, 2 player 2 wins,
/// 3 incomplete, 4 illegal continue, 5 illegal row, 6 illegal column,
/// 7 illegal game, 8 invalid file, 9 file error.
#[derive(Parser, Debug)]
#[command(name = "connectz", version)]
struct Cli {
    /// Game files: dimensions `columns rows line_length` on the first line,
    /// then one 1-based column per move.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the final board and the run lengths to stderr (single file only).
    #[arg(long)]
    render: bool,

    /// Log debug output to stderr. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let [file] = cli.files.as_slice() {
        let (outcome, game) = evaluate_path_with_game(file);
        println!("{outcome}");

        if cli.render {
            match game {
                Some(game) => {
                    eprint!("{}", render::board(&game));
                    for axis in Axis::ALL {
                        eprintln!("\n{axis:?}:");
                        eprint!("{}", render::runs(&game, axis));
                    }
                }
                None => debug!("nothing to render"),
            }
        }
        return;
    }

    info!(files = cli.files.len(), "evaluating in parallel");
    let outcomes = cli
        .files
        .par_iter()
        .map(|file| evaluate_path(file))
        .collect::<Vec<_>>();

    for (file, outcome) in cli.files.iter().zip(outcomes) {
        println!("{}: {outcome}", file.display());
    }
}

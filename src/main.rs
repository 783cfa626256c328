//! @dose
//! purpose: This is the CLI entry point for martian. It parses command-line arguments using
//!     clap, sets up logging, determines the root directory, and dispatches to the
//!     appropriate command handler (translate or syllables).
//!
//! when-editing:
//!     - !All command handlers are imported from the martian crate
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is always executed per invocation
//!     - The process exits with 0 on success, 1 on any error
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules
//!
//! gotchas:
//!     - RUST_LOG overrides the level chosen by -v

use anyhow::Context;
use clap::Parser;
use martian::cli::{Cli, Commands};
use martian::commands::{run_syllables, run_translate};
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Translate(args) => run_translate(&args, &root),
        Commands::Syllables(args) => run_syllables(&args),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

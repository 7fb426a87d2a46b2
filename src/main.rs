//! Command-line entry point.
//!
//! Thin wrapper over the library pipeline: parses flags, initializes
//! logging, and supplies the interactive overwrite prompt. All configuration
//! is passed explicitly into [`subsort::run`].

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use subsort::{
    AssumeYes, DiscoveryMode, DistributeOutcome, OverwriteGate, RunSummary, SortConfig, SortError,
};

/// Sorts bulk-downloaded submission files into per-group, per-attempt folders.
#[derive(Debug, Parser)]
#[command(name = "subsort", version, about)]
struct Cli {
    /// Directory where the original files are stored [default: working directory]
    #[arg(short, long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Directory where files will be sorted into [default: ./sorted]
    #[arg(short, long, value_name = "DIR")]
    destination: Option<PathBuf>,

    /// Walk the source directory recursively instead of listing it flat
    #[arg(short, long)]
    recursive: bool,

    /// Overwrite a pre-existing destination without prompting
    #[arg(short = 'y', long)]
    yes: bool,

    /// Display verbose sorting information
    #[arg(short, long)]
    verbose: bool,
}

/// Interactive yes/no gate on stdin. Only `y` or `Y` proceeds.
struct PromptGate;

impl OverwriteGate for PromptGate {
    fn confirm_overwrite(&mut self, destination: &Path) -> bool {
        print!(
            "The destination folder {} already exists. \"y\" to continue, anything else to cancel: ",
            destination.display()
        );
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y")
    }
}

fn build_config(cli: &Cli) -> Result<SortConfig, SortError> {
    let mut config = SortConfig::from_cwd()?;
    if let Some(source) = &cli.source {
        config = config.with_source(source.clone());
    }
    if let Some(destination) = &cli.destination {
        config = config.with_destination(destination.clone());
    }
    if cli.recursive {
        config = config.with_discovery(DiscoveryMode::Recursive);
    }
    Ok(config)
}

fn execute(cli: &Cli) -> Result<RunSummary, SortError> {
    let config = build_config(cli)?;
    tracing::debug!(
        "sorting {} into {}",
        config.source.display(),
        config.destination.display()
    );

    if cli.yes {
        subsort::run(&config, &mut AssumeYes)
    } else {
        subsort::run(&config, &mut PromptGate)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "subsort=debug"
    } else {
        "subsort=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match execute(&cli) {
        Ok(summary) => {
            if matches!(summary.outcome, DistributeOutcome::Aborted) {
                println!("Cancelled, nothing was changed.");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

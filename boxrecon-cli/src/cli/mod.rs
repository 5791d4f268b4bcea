//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;

#[derive(Debug, Parser)]
#[command(
    name = "boxrecon-cli",
    about = "Reconcile self-storage delinquency reports",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the weekly block/unblock reconciliation over a set of reports
    Reconcile(ReconcileArgs),
    /// Show the unit and report date extracted from each input filename
    Inspect(InspectArgs),
}

#[derive(Debug, clap::Args)]
pub struct ReconcileArgs {
    /// Report files and/or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Override the minimum delinquency days threshold
    #[arg(long)]
    pub min_days: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the rendered result to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Report files and/or directories containing them
    pub inputs: Vec<PathBuf>,

    /// Resolve a unit name directly instead of (or besides) filenames
    #[arg(long)]
    pub lookup: Option<String>,
}

/// Output format for reconciliation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

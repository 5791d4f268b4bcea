use anyhow::Result;
use clap::Parser;
use env_logger::Env;

mod cli;
mod config;
mod recon;
mod scratch;

use crate::cli::{Cli, Commands};
use crate::config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Reconcile(args) => cli::commands::handle_reconcile_command(args, &config),
        Commands::Inspect(args) => cli::commands::handle_inspect_command(args, &config),
    }
}

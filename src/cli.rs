use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scorecard",
    version,
    about = "Session-gated leadership scorecard dashboard"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard until terminated
    Serve(ServeCommand),
    /// Validate configuration and dataset invariants, then exit
    Check(CheckCommand),
}

#[derive(Args)]
pub struct ServeCommand {
    /// Listen port (overrides PORT and the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to scorecard.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckCommand {
    /// Path to scorecard.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}

//! docnav CLI - documentation sidebar checker.
//!
//! Provides commands for:
//! - `check`: Validate `docnav.toml`
//! - `routes`: Print the flattened routing table
//! - `resolve`: Look up a content slug in the sidebar
//! - `watch`: Revalidate on every config change

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, RoutesArgs, WatchArgs};
use output::Output;

/// docnav - documentation sidebar checker.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (reload and timing logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate site metadata and sidebar.
    Check(CheckArgs),
    /// Print the flattened routing table.
    Routes(RoutesArgs),
    /// Show where a content slug sits in the sidebar.
    Resolve(ResolveArgs),
    /// Revalidate whenever the config file changes.
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! Headless driver for the auto-battler skill system.
//!
//! Run with: `skill-cli run --data <dir> --scenario <name>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{List, Run};

/// Run and inspect skill scenarios
#[derive(Parser)]
#[command(name = "skill-cli")]
#[command(about = "Headless runner for skill scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Simulate a scenario and print a summary
    Run(Run),

    /// List abilities and scenarios in a data directory
    List(List),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
    }
}

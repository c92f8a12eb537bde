mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowlab", about = "Optical flow between grayscale frames")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate flow between two image files
    Estimate(commands::estimate::EstimateArgs),
    /// Estimate flow over consecutive frames of an image sequence
    Sequence(commands::sequence::SequenceArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Estimate(args) => commands::estimate::run(args),
        Commands::Sequence(args) => commands::sequence::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

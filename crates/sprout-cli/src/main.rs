mod commands;
mod progress;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprout", about = "Plant growth analysis from before/after photographs")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the green HSV range of a photograph
    Bounds(commands::bounds::BoundsArgs),
    /// Segment the plant and save the mask
    Segment(commands::segment::SegmentArgs),
    /// Extract growth metrics from one photograph
    Metrics(commands::metrics::MetricsArgs),
    /// Score the growth between two photographs
    Compare(commands::compare::CompareArgs),
    /// Print or save the default analysis config
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

    let config = || commands::load_config(cli.config.as_deref());
    match &cli.command {
        Commands::Bounds(args) => commands::bounds::run(args, &config()?),
        Commands::Segment(args) => commands::segment::run(args, &config()?),
        Commands::Metrics(args) => commands::metrics::run(args, &config()?),
        Commands::Compare(args) => commands::compare::run(args, &config()?),
        Commands::Config(args) => commands::config::run(args),
    }
}

mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "weedcount", about = "Reference-square calibration and weed counting")]
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
    /// Compute the one-foot reference box for an image height
    BoxSize(commands::box_size::BoxSizeArgs),
    /// Replay taps on a photo and report the plant count
    Count(commands::count::CountArgs),
    /// Show image dimensions and its reference box
    Info(commands::info::InfoArgs),
    /// Print the default settings as TOML
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
        Commands::BoxSize(args) => commands::box_size::run(args),
        Commands::Count(args) => commands::count::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

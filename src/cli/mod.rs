//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod bin;
pub mod config;
pub mod distance;
pub mod plot;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Distance, grid binning and bin heatmaps for lat/long coordinates
#[derive(Parser)]
#[command(name = "latlong")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Great-circle distance between two points, in km
    Distance(distance::DistanceArgs),

    /// Grid cell identifier for a point
    Bin(bin::BinArgs),

    /// Render a density heatmap from bin identifiers
    Plot(plot::PlotArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),
}

/// Logs go to stderr so command output stays clean on stdout
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    // Initialize logging
    init_tracing(default_level);

    match cli.command {
        Commands::Distance(args) => distance::run(args),
        Commands::Bin(args) => bin::run(args),
        Commands::Plot(args) => plot::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args).await,
    }
}

//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod nearby;
pub mod score;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Tourist safety monitoring service
#[derive(Parser)]
#[command(name = "tourist-safety")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Score the safety of a location
    Score(score::ScoreArgs),

    /// List attractions near a location
    Nearby(nearby::NearbyArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show status of a running server
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Score(args) => score::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Install the log subscriber; `RUST_LOG` overrides `default_level`
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod generate;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// Random real-world location generator
#[derive(Parser)]
#[command(name = "roam-point")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate validated random locations
    Generate(generate::GenerateArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show dataset and oracle status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

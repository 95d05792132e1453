//! Redpen CLI — the main entry point.
//!
//! Commands:
//! - `relay`     — Start the HTTP relay server
//! - `transform` — Run one transform against a document file
//! - `onboard`   — Initialize config directory
//! - `status`    — Show configuration and provider health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "redpen",
    about = "Redpen — AI text-transform assistant for documents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay server
    Relay {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one transform against a document file
    Transform(commands::transform::TransformArgs),

    /// Initialize configuration
    Onboard,

    /// Show configuration and provider health
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Relay { port } => commands::relay::run(port).await?,
        Commands::Transform(args) => commands::transform::run(args).await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}

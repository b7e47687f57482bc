//! Periscan CLI — the main entry point.
//!
//! Commands:
//! - `chat` — Talk to the assistant (single message or interactive)
//! - `scan` — Run a network sweep and print the snapshot
//! - `run`  — Full device mode: sweep + radio scanner + interactive chat

use clap::{Parser, Subcommand};

mod commands;
mod netif;

#[derive(Parser)]
#[command(
    name = "periscan",
    about = "Periscan — handheld ambient scanner with a conversational assistant",
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
    /// Talk to the assistant about what the device has seen
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Sweep the local subnet and print discovered hosts
    Scan,

    /// Full device mode: scanners in the background, chat in the foreground
    Run,
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
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Scan => commands::scan::run().await?,
        Commands::Run => commands::run::run().await?,
    }

    Ok(())
}

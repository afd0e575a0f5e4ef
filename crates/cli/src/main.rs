//! Summit CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a starter config file
//! - `serve`   — Start the HTTP gateway
//! - `chat`    — Interactive or single-message coaching session
//! - `profile` — Inspect a stored user profile

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "summit",
    about = "Summit — conversational coaching backend",
    version
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
    /// Write a starter configuration file
    Onboard,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Talk to the coach
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// User id for profile continuity
        #[arg(short, long, default_value = "anonymous")]
        user: String,
    },

    /// Show a stored user profile
    Profile {
        /// User id to inspect
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run()?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Chat { message, user } => commands::chat::run(message, user).await?,
        Commands::Profile { user } => commands::profile::run(&user)?,
    }

    Ok(())
}

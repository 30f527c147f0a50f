//! formstore CLI - form-to-database recorder
//!
//! Entry point for the `formstore` command:
//! - `serve`: run the HTTP form server
//! - `init-db`: create the records table (optionally with sample rows)
//!
//! A `.env` file in the current directory is loaded before anything else;
//! variables already set in the environment take precedence.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "formstore",
    author,
    version,
    about = "Record three-field form submissions in MySQL and list them"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (form, submit, listing)
    Serve(commands::serve::ServeArgs),
    /// Create the records table in the configured database
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // dotenvy doesn't overwrite existing vars
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match dotenv {
        Ok(path) => info!("Loaded configuration from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }

    Ok(())
}

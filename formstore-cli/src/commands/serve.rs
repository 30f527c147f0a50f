//! HTTP server command
//!
//! Runs the form server against MySQL, or against process memory with
//! `--in-memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use formstore_server::{
    run_server, AppConfig, MemoryRecordStore, MySqlRecordStore, RecordStore, ServerConfig,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 0.0.0.0 on $PORT, or 0.0.0.0:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Create the records table before serving
    #[arg(long)]
    pub init_schema: bool,

    /// Keep records in process memory instead of the database
    #[arg(long, conflicts_with = "init_schema")]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::debug!(db = ?config.db, "configuration loaded");

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set, flash cookies are signed with the default key");
    }

    let store: Arc<dyn RecordStore> = if args.in_memory {
        tracing::warn!("Using in-memory storage, records are lost on exit");
        Arc::new(MemoryRecordStore::new())
    } else {
        let store = MySqlRecordStore::from_config(&config.db);
        if args.init_schema {
            super::init_db::bootstrap(&store, false).await?;
        }
        tracing::info!(
            host = %config.db.host,
            database = %config.db.database,
            "Using MySQL storage"
        );
        Arc::new(store)
    };

    let mut server_config = ServerConfig::from(&config);
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }

    tracing::info!("Starting formstore server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

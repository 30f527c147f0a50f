//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use formstore_server::db::{self, DbError};
use formstore_server::{AppConfig, MySqlRecordStore};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Insert two sample records if the table is empty
    #[arg(long)]
    pub seed: bool,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let store = MySqlRecordStore::from_config(&config.db);

    bootstrap(&store, args.seed).await?;
    println!("Database setup complete");
    Ok(())
}

/// Create the records table, optionally seeding sample rows.
pub async fn bootstrap(store: &MySqlRecordStore, seed: bool) -> Result<()> {
    let mut conn = store
        .connect()
        .await
        .context("Failed to connect to database")?;

    let result = async {
        db::ensure_schema(&mut conn).await?;
        if seed {
            db::seed_samples(&mut conn).await?;
        }
        Ok::<_, DbError>(())
    }
    .await;

    db::release(conn).await;
    result.context("Failed to initialize database schema")
}

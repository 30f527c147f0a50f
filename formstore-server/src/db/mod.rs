//! Database access: connection provisioning and schema bootstrap

pub mod error;
pub mod provisioner;
pub mod schema;

pub use error::DbError;
pub use provisioner::{Connector, MySqlConnector, Provisioner, MAX_ATTEMPTS, RETRY_DELAY};
pub use schema::{ensure_schema, seed_samples};

use sqlx::mysql::MySqlConnection;
use sqlx::Connection;

/// Close a connection, logging rather than propagating a failed close.
pub async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close database connection");
    } else {
        tracing::debug!("database connection closed");
    }
}

//! formstore-server: form-to-database recorder
//!
//! Renders a three-field HTML form, stores each submission as a row in
//! MySQL, and lists stored rows. Every storage operation opens its own
//! connection through a provisioner that retries a fixed number of times.

pub mod config;
pub mod db;
pub mod flash;
pub mod http;
pub mod records;

pub use config::{AppConfig, ConfigError, DbConfig};
pub use db::DbError;
pub use http::{run_server, ServerConfig};
pub use records::{MemoryRecordStore, MySqlRecordStore, NewRecord, Record, RecordStore};

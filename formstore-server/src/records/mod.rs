//! Record storage
//!
//! A record is three opaque text fields plus a storage-assigned id.
//! Records are created on form submission and never updated or deleted.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::DbError;

pub use memory::MemoryRecordStore;
pub use mysql::MySqlRecordStore;

/// Stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Record {
    pub id: i64,
    pub field1: String,
    pub field2: String,
    pub field3: String,
}

/// Record as submitted; a missing form field is `None` and is stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
}

impl NewRecord {
    pub fn new(
        field1: impl Into<String>,
        field2: impl Into<String>,
        field3: impl Into<String>,
    ) -> Self {
        Self {
            field1: Some(field1.into()),
            field2: Some(field2.into()),
            field3: Some(field3.into()),
        }
    }
}

/// Inserts and lists records.
///
/// Each call acquires and releases its own connection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store one record atomically: all three fields or nothing.
    async fn insert(&self, record: &NewRecord) -> Result<(), DbError>;

    /// All stored records in storage order. Empty storage yields an empty vec.
    async fn list_all(&self) -> Result<Vec<Record>, DbError>;
}

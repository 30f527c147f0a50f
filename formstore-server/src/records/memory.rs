//! In-process record store
//!
//! Enforces the bootstrap schema's column rules: ids are assigned
//! sequentially, a missing field is a NOT NULL violation, and a value longer
//! than the column limit is rejected.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{NewRecord, Record, RecordStore};
use crate::db::schema::FIELD_MAX_CHARS;
use crate::db::{DbError, MAX_ATTEMPTS};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
    unavailable: bool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose database can never be reached.
    pub fn unavailable() -> Self {
        Self {
            records: Mutex::default(),
            unavailable: true,
        }
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable {
            return Err(DbError::Connection {
                attempts: MAX_ATTEMPTS,
                source: sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            });
        }
        Ok(())
    }
}

fn column_value(value: &Option<String>, column: &str) -> Result<String, DbError> {
    let value = value
        .clone()
        .ok_or_else(|| DbError::Query(sqlx::Error::Protocol(format!("Column '{column}' cannot be null"))))?;

    if value.chars().count() > FIELD_MAX_CHARS {
        return Err(DbError::Query(sqlx::Error::Protocol(format!(
            "Data too long for column '{column}' at row 1"
        ))));
    }
    Ok(value)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: &NewRecord) -> Result<(), DbError> {
        self.check_available()?;

        // Validate every column before touching storage
        let field1 = column_value(&record.field1, "field1")?;
        let field2 = column_value(&record.field2, "field2")?;
        let field3 = column_value(&record.field3, "field3")?;

        let mut records = self.records.lock().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        records.push(Record {
            id,
            field1,
            field2,
            field3,
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Record>, DbError> {
        self.check_available()?;
        Ok(self.records.lock().await.clone())
    }
}

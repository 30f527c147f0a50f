//! MySQL-backed record store

use async_trait::async_trait;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tokio::time::Instant;

use super::{NewRecord, Record, RecordStore};
use crate::config::DbConfig;
use crate::db::{self, DbError, MySqlConnector, Provisioner};

const INSERT_RECORD: &str = "INSERT INTO user_data (field1, field2, field3) VALUES (?, ?, ?)";

// Identifier widened to BIGINT; NULL text columns read back as empty strings.
const SELECT_RECORDS: &str = r#"
    SELECT CAST(id AS SIGNED) AS id,
           COALESCE(field1, '') AS field1,
           COALESCE(field2, '') AS field2,
           COALESCE(field3, '') AS field3
    FROM user_data
"#;

/// Record store opening one MySQL connection per operation
#[derive(Debug, Clone)]
pub struct MySqlRecordStore {
    provisioner: Provisioner<MySqlConnector>,
}

impl MySqlRecordStore {
    pub fn new(provisioner: Provisioner<MySqlConnector>) -> Self {
        Self { provisioner }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(Provisioner::new(MySqlConnector::new(config.connect_options())))
    }

    /// Acquire a connection through the retrying provisioner.
    pub async fn connect(&self) -> Result<MySqlConnection, DbError> {
        self.provisioner.acquire().await
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    async fn insert(&self, record: &NewRecord) -> Result<(), DbError> {
        // Duration includes connection acquisition
        let started = Instant::now();
        let mut conn = self.connect().await?;
        let result = insert_record(&mut conn, record).await;
        db::release(conn).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(rows_affected) => tracing::info!(
                action = "insert_user_data",
                duration_ms,
                rows_affected,
                "query succeeded"
            ),
            Err(e) => tracing::error!(
                action = "insert_user_data",
                duration_ms,
                error = %e,
                "query failed"
            ),
        }
        result.map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<Record>, DbError> {
        let started = Instant::now();
        let mut conn = self.connect().await?;
        let result = select_records(&mut conn).await;
        db::release(conn).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(records) => tracing::info!(
                action = "select_user_data",
                duration_ms,
                rows_returned = records.len(),
                "query succeeded"
            ),
            Err(e) => tracing::error!(
                action = "select_user_data",
                duration_ms,
                error = %e,
                "query failed"
            ),
        }
        result
    }
}

/// Insert one record in its own transaction, returning rows affected.
async fn insert_record(conn: &mut MySqlConnection, record: &NewRecord) -> Result<u64, DbError> {
    // Uncommitted on any error: the dropped transaction rolls back.
    let mut tx = conn.begin().await?;

    let result = sqlx::query(INSERT_RECORD)
        .bind(record.field1.as_deref())
        .bind(record.field2.as_deref())
        .bind(record.field3.as_deref())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected())
}

async fn select_records(conn: &mut MySqlConnection) -> Result<Vec<Record>, DbError> {
    let records = sqlx::query_as::<_, Record>(SELECT_RECORDS)
        .fetch_all(&mut *conn)
        .await?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::{MAX_ATTEMPTS, RETRY_DELAY};

    /// Nothing listens on port 1, so every connect is refused immediately.
    fn unreachable_store() -> MySqlRecordStore {
        MySqlRecordStore::from_config(&DbConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..DbConfig::default()
        })
    }

    fn assert_exhausted(err: DbError) {
        match err {
            DbError::Connection { attempts, .. } => assert_eq!(attempts, MAX_ATTEMPTS),
            other => panic!("expected connection failure, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_host_insert_gives_up_after_all_attempts() {
        let store = unreachable_store();
        let started = Instant::now();

        let err = store.insert(&NewRecord::new("a", "b", "c")).await.unwrap_err();

        assert_exhausted(err);
        let elapsed = started.elapsed();
        assert!(elapsed >= RETRY_DELAY * (MAX_ATTEMPTS - 1), "elapsed {elapsed:?}");
        assert!(elapsed < RETRY_DELAY * MAX_ATTEMPTS, "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_host_list_gives_up_after_all_attempts() {
        let store = unreachable_store();
        let started = Instant::now();

        let err = store.list_all().await.unwrap_err();

        assert_exhausted(err);
        let elapsed = started.elapsed();
        assert!(elapsed >= RETRY_DELAY * (MAX_ATTEMPTS - 1), "elapsed {elapsed:?}");
        assert!(elapsed < RETRY_DELAY * MAX_ATTEMPTS, "elapsed {elapsed:?}");
    }

    // Integration tests require a real database
    // Run with: DB_HOST=... DB_USER=... DB_NAME=... cargo test -p formstore-server -- --ignored

    fn store_from_env() -> MySqlRecordStore {
        let config = crate::config::AppConfig::from_env().expect("invalid config");
        MySqlRecordStore::from_config(&config.db)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_list_round_trips_fields() {
        let store = store_from_env();
        let mut conn = store.connect().await.expect("connect failed");
        db::ensure_schema(&mut conn).await.expect("schema failed");
        db::release(conn).await;

        let marker = format!("marker-{}", std::process::id());
        store
            .insert(&NewRecord::new(marker.as_str(), "b", "c"))
            .await
            .expect("insert failed");

        let records = store.list_all().await.expect("list failed");
        let found = records
            .iter()
            .find(|r| r.field1 == marker)
            .expect("inserted record missing");
        assert_eq!(found.field2, "b");
        assert_eq!(found.field3, "c");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn rejected_insert_stores_nothing() {
        let store = store_from_env();
        let before = store.list_all().await.expect("list failed").len();

        // NOT NULL columns reject the missing field
        let partial = NewRecord {
            field1: Some("x".into()),
            field2: None,
            field3: Some("z".into()),
        };
        let err = store.insert(&partial).await.unwrap_err();
        assert!(matches!(err, DbError::Query(_)));

        let after = store.list_all().await.expect("list failed").len();
        assert_eq!(before, after);
    }
}

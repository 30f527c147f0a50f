//! Table bootstrap for the record store
//!
//! A single idempotent CREATE TABLE; there is no migration history.

use sqlx::mysql::MySqlConnection;

use super::DbError;

pub const TABLE: &str = "user_data";

/// Character limit of each text column (`VARCHAR(255)`).
pub const FIELD_MAX_CHARS: usize = 255;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS user_data (
        id INT NOT NULL AUTO_INCREMENT,
        field1 VARCHAR(255) NOT NULL,
        field2 VARCHAR(255) NOT NULL,
        field3 VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (id)
    )
"#;

const SAMPLE_ROWS: [(&str, &str, &str); 2] = [
    ("Example 1", "Sample value", "Test"),
    ("Example 2", "Additional value", "Sample text"),
];

/// Create the records table if it does not exist.
pub async fn ensure_schema(conn: &mut MySqlConnection) -> Result<(), DbError> {
    tracing::info!(table = TABLE, "ensuring table exists");
    sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
    Ok(())
}

/// Insert the sample rows when the table is empty.
///
/// Returns the number of rows inserted.
pub async fn seed_samples(conn: &mut MySqlConnection) -> Result<u64, DbError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_data")
        .fetch_one(&mut *conn)
        .await?;

    if count > 0 {
        tracing::info!(existing = count, "table already has rows, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for (field1, field2, field3) in SAMPLE_ROWS {
        let result = sqlx::query("INSERT INTO user_data (field1, field2, field3) VALUES (?, ?, ?)")
            .bind(field1)
            .bind(field2)
            .bind(field3)
            .execute(&mut *conn)
            .await?;
        inserted += result.rows_affected();
    }

    tracing::info!(inserted, "sample rows inserted");
    Ok(inserted)
}

//! Storage error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Every connection attempt failed
    #[error("could not connect to database after {attempts} attempts: {source}")]
    Connection {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// Insert or select failed; never retried
    #[error("{0}")]
    Query(#[from] sqlx::Error),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

//! Connection provisioning with bounded retry
//!
//! Each storage operation opens its own connection. A failed attempt is
//! retried after a fixed delay, up to a fixed number of attempts:
//! - no exponential backoff
//! - no jitter
//! - no delay after the final attempt

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use super::DbError;

/// Total connection attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 10;

/// Delay between consecutive attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Opens a single connection.
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Send;

    async fn connect(&self) -> Result<Self::Conn, sqlx::Error>;
}

/// Connects to MySQL with fixed credentials.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Conn = MySqlConnection;

    async fn connect(&self) -> Result<MySqlConnection, sqlx::Error> {
        MySqlConnection::connect_with(&self.options).await
    }
}

/// Acquires connections, retrying failed attempts.
#[derive(Debug, Clone)]
pub struct Provisioner<C> {
    connector: C,
}

impl<C: Connector> Provisioner<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Open a connection.
    ///
    /// Returns the first successful connection, or [`DbError::Connection`]
    /// with the last error once [`MAX_ATTEMPTS`] attempts have failed.
    pub async fn acquire(&self) -> Result<C::Conn, DbError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.connector.connect().await {
                Ok(conn) => {
                    tracing::info!(attempt, "connected to database");
                    return Ok(conn);
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        attempt,
                        max_attempts = MAX_ATTEMPTS,
                        error = %e,
                        "database connection attempt failed"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    tracing::error!(
                        attempt,
                        max_attempts = MAX_ATTEMPTS,
                        error = %e,
                        "all database connection attempts failed"
                    );
                    return Err(DbError::Connection {
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// Fails until `succeed_on` attempts have been made, recording when each
    /// attempt happened.
    struct ScriptedConnector {
        succeed_on: Option<u32>,
        attempts: Arc<Mutex<Vec<Instant>>>,
    }

    impl ScriptedConnector {
        fn new(succeed_on: Option<u32>) -> (Self, Arc<Mutex<Vec<Instant>>>) {
            let attempts = Arc::new(Mutex::new(Vec::new()));
            let connector = Self {
                succeed_on,
                attempts: attempts.clone(),
            };
            (connector, attempts)
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        type Conn = u32;

        async fn connect(&self) -> Result<u32, sqlx::Error> {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(Instant::now());
            let n = attempts.len() as u32;

            match self.succeed_on {
                Some(target) if n >= target => Ok(n),
                _ => Err(sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_does_not_sleep() {
        let (connector, attempts) = ScriptedConnector::new(Some(1));
        let start = Instant::now();

        let conn = Provisioner::new(connector).acquire().await.unwrap();

        assert_eq!(conn, 1);
        assert_eq!(attempts.lock().unwrap().len(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_connector_recovers() {
        let (connector, attempts) = ScriptedConnector::new(Some(4));
        let start = Instant::now();

        let conn = Provisioner::new(connector).acquire().await.unwrap();

        assert_eq!(conn, 4);
        assert_eq!(attempts.lock().unwrap().len(), 4);
        assert_eq!(start.elapsed(), RETRY_DELAY * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_database_fails_after_exactly_ten_attempts() {
        let (connector, attempts) = ScriptedConnector::new(None);
        let start = Instant::now();

        let err = Provisioner::new(connector).acquire().await.unwrap_err();

        match err {
            DbError::Connection { attempts, .. } => assert_eq!(attempts, MAX_ATTEMPTS),
            other => panic!("expected connection failure, got {other:?}"),
        }

        let attempts = attempts.lock().unwrap();
        assert_eq!(attempts.len(), MAX_ATTEMPTS as usize);
        for pair in attempts.windows(2) {
            assert_eq!(pair[1] - pair[0], RETRY_DELAY);
        }
        // No sleep after the last attempt
        assert_eq!(start.elapsed(), RETRY_DELAY * (MAX_ATTEMPTS - 1));
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_last_attempt_is_returned() {
        let (connector, attempts) = ScriptedConnector::new(Some(MAX_ATTEMPTS));

        let conn = Provisioner::new(connector).acquire().await.unwrap();

        assert_eq!(conn, MAX_ATTEMPTS);
        assert_eq!(attempts.lock().unwrap().len(), MAX_ATTEMPTS as usize);
    }
}

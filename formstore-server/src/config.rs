//! Application configuration loaded once at startup
//!
//! Configuration is read from environment variables:
//! - `DB_HOST`: database host (default: localhost)
//! - `DB_PORT`: database port (default: 3306)
//! - `DB_USER`: database user (default: root)
//! - `DB_PASSWORD`: database password (default: empty)
//! - `DB_NAME`: database name (default: webapp_db)
//! - `SECRET_KEY`: key used to sign flash cookies (default: default_secret_key)
//! - `PORT`: HTTP port, bound on all interfaces (default: 5000)

use std::fmt;
use std::net::SocketAddr;

use sqlx::mysql::MySqlConnectOptions;

pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' is not a valid port")]
    InvalidPort { var: &'static str, value: String },
}

/// Database credentials
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

// Keep the password out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "webapp_db".to_string(),
        }
    }
}

/// Immutable application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub secret_key: String,
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db: DbConfig::default(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

impl AppConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let db_defaults = defaults.db;

        let db = DbConfig {
            host: lookup("DB_HOST").unwrap_or(db_defaults.host),
            port: parse_port(&lookup, "DB_PORT")?.unwrap_or(db_defaults.port),
            user: lookup("DB_USER").unwrap_or(db_defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(db_defaults.password),
            database: lookup("DB_NAME").unwrap_or(db_defaults.database),
        };

        let port = parse_port(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            db,
            secret_key: lookup("SECRET_KEY").unwrap_or(defaults.secret_key),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parse_port<F>(lookup: &F, var: &'static str) -> Result<Option<u16>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidPort { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.db.host, "localhost");
        assert_eq!(config.db.port, 3306);
        assert_eq!(config.db.user, "root");
        assert_eq!(config.db.password, "");
        assert_eq!(config.db.database, "webapp_db");
        assert!(config.uses_default_secret());
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 5000)));
    }

    #[test]
    fn env_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "4000"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "forms"),
            ("SECRET_KEY", "s3cret"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.db.host, "db.internal");
        assert_eq!(config.db.port, 4000);
        assert_eq!(config.db.user, "app");
        assert_eq!(config.db.password, "hunter2");
        assert_eq!(config.db.database, "forms");
        assert!(!config.uses_default_secret());
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { var: "PORT", .. }));
    }

    #[test]
    fn debug_redacts_password() {
        let db = DbConfig {
            password: "hunter2".to_string(),
            ..DbConfig::default()
        };
        let rendered = format!("{:?}", db);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}

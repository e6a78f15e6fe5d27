/**
 * Server Configuration
 *
 * Configuration is read from an optional TOML file, then overridden by
 * environment variables.
 *
 * # Configuration Sources
 *
 * 1. Built-in defaults (in-memory database, port 3000, spacing 4096)
 * 2. TOML file at `ORDERING_CONFIG`, or `<config dir>/spaced-list/config.toml`
 *    when that file exists
 * 3. Environment: `DATABASE_URL`, `SERVER_PORT`, `DATABASE_MAX_CONNECTIONS`,
 *    `ORDERING_SPACING`
 *
 * # Example file
 *
 * ```toml
 * database_url = "sqlite://data/lists.db"
 * port = 8080
 *
 * [ordering]
 * spacing = 4096
 * min_slots = 500
 * max_slots = 1000
 * ```
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::{ConfigError, ListConfig};

/// Default database: private in-memory SQLite
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "ORDERING_CONFIG";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub port: u16,
    /// Pool size. SQLite has a single writer, so more connections only help
    /// readers.
    pub max_connections: u32,
    /// Spacing and bounds for every ordered list
    pub ordering: ListConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: 1,
            ordering: ListConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load defaults, then the config file if any, then the environment
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::config_path() {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading configuration file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        let config = config.with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the configuration file, if one should be read
    ///
    /// An explicit `ORDERING_CONFIG` is always returned, so a missing file is
    /// reported. The per-user default is only used when it exists.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("spaced-list").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Apply environment variable overrides
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(port) = env_number("SERVER_PORT")? {
            self.port = port;
        }
        if let Some(max_connections) = env_number("DATABASE_MAX_CONNECTIONS")? {
            self.max_connections = max_connections;
        }
        if let Some(spacing) = env_number("ORDERING_SPACING")? {
            self.ordering.spacing = spacing;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections",
                reason: "must be at least 1".to_string(),
            });
        }
        self.ordering.validate()
    }

    /// Whether the database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn env_number<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}

/// Open the connection pool and bring the schema up to date
///
/// An in-memory database exists only as long as its connection, so the pool
/// is pinned to a single connection that never expires.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!(url = %config.database_url, "Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await?
    };

    tracing::info!("Database connection pool created successfully");

    crate::backend::schema::init_schema(&pool).await?;

    Ok(pool)
}

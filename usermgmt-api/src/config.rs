/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://database.sqlite)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `LOG_DIR`: Directory for the log file (default: .)
/// - `LOG_FILE`: Log file name (default: app.log)
/// - `RUST_LOG`: Log filter (default: info for this service)
///
/// # Example
///
/// ```no_run
/// use usermgmt_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory the log file is written to
    pub directory: PathBuf,

    /// Log file name inside `directory`
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite://database.sqlite".to_string(),
                max_connections: 5,
            },
            logging: LoggingConfig {
                directory: PathBuf::from("."),
                file_name: "app.log".to_string(),
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// Every variable is optional; missing ones fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or the pool
    /// size is zero.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let api_port = match env::var("API_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("API_PORT must be a valid port: {}", e))?,
            Err(_) => defaults.api.port,
        };

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database.url);
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(max) => max
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a number: {}", e))?,
            Err(_) => defaults.database.max_connections,
        };

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.logging.directory);
        let log_file = env::var("LOG_FILE").unwrap_or(defaults.logging.file_name);

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            logging: LoggingConfig {
                directory: log_dir,
                file_name: log_file,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> usermgmt_shared::db::pool::DatabaseConfig {
        usermgmt_shared::db::pool::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}

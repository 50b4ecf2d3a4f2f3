use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plain `DB_*` variables from older deployments, mapped onto the
/// `database` section. They win over file and `RECIPE_FINDER__*` values.
const LEGACY_DB_ENV: [(&str, &str); 5] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Recipe store configuration
    pub database: DatabaseConfig,

    /// Search defaults and limits
    #[serde(default)]
    pub search: SearchSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/local.toml".to_string());

        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: RECIPE_FINDER_)
            .add_source(
                config::Environment::with_prefix("RECIPE_FINDER")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_DB_ENV {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce a broken query or empty pages
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !is_plain_identifier(&self.database.table) {
            return Err(config::ConfigError::Message(format!(
                "database.table must be a plain identifier, got '{}'",
                self.database.table
            )));
        }

        if self.search.default_page_size == 0 {
            return Err(config::ConfigError::Message(
                "search.default_page_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            search: SearchSettings::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Table names end up in the query text, so only `[A-Za-z_][A-Za-z0-9_]*` is allowed.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend type
    #[serde(default)]
    pub backend: StoreBackend,

    /// MySQL host
    #[serde(default = "default_db_host")]
    pub host: String,

    /// MySQL port
    #[serde(default = "default_db_port")]
    pub port: u16,

    /// MySQL user
    #[serde(default = "default_db_user")]
    pub user: String,

    /// MySQL password
    #[serde(default)]
    pub password: String,

    /// Database (schema) name
    #[serde(default = "default_db_name")]
    pub name: String,

    /// Table holding the recipe records
    #[serde(default = "default_table")]
    pub table: String,

    /// Number of pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Connection acquire timeout (seconds)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// JSON file of recipes loaded into the in-memory backend
    pub seed_path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
            table: default_table(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Mysql,
    Memory,
}

/// Paging defaults applied by the search endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Page size used when the request omits `pageSize`
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            prometheus_enabled: true,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "root".to_string()
}

fn default_db_name() -> String {
    "recipes".to_string()
}

fn default_table() -> String {
    "info".to_string()
}

fn default_pool_size() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_page_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_port(), 5000);
        assert_eq!(default_db_port(), 3306);
        assert_eq!(default_table(), "info");
        assert_eq!(default_page_size(), 10);
        assert!(default_true());
    }

    #[test]
    fn test_store_backend() {
        assert_eq!(StoreBackend::default(), StoreBackend::Mysql);
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.table, "info");
        assert_eq!(config.database.pool_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_table_name_must_be_identifier() {
        let mut config = Config::default();
        config.database.table = "info; DROP TABLE info".to_string();
        assert!(config.validate().is_err());

        config.database.table = "recipes_2024".to_string();
        assert!(config.validate().is_ok());

        config.database.table = "1recipes".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_page_size_validated() {
        let mut config = Config::default();
        config.search.default_page_size = 0;
        assert!(config.validate().is_err());

        config.search.default_page_size = 500;
        assert!(config.validate().is_ok());
    }
}

//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Per-client rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Petty cash ledger behaviour.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://ledgerly.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration as read from config sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    24
}

/// Token bucket settings for the per-client rate limiter.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Tokens replenished per second.
    #[serde(default = "default_per_second")]
    pub per_second: u32,
    /// Bucket capacity.
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// How often idle client entries are evicted.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Key clients by the first `X-Forwarded-For` entry. Only enable behind a
    /// proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: default_per_second(),
            burst: default_burst(),
            sweep_interval_secs: default_sweep_interval_secs(),
            trust_forwarded_for: false,
        }
    }
}

fn default_per_second() -> u32 {
    100
}

fn default_burst() -> u32 {
    200
}

fn default_sweep_interval_secs() -> u64 {
    60
}

/// Petty cash ledger settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// Serialize "read balance, insert debit" behind a process-wide lock.
    #[serde(default)]
    pub serialize_debits: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("LEDGERLY__JWT__SECRET", Some("env-secret")),
                ("LEDGERLY__SERVER__PORT", Some("9090")),
                ("LEDGERLY__LEDGER__SERIALIZE_DEBITS", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.jwt.token_ttl_hours, 24);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert!(config.ledger.serialize_debits);
                assert_eq!(config.rate_limit.per_second, 100);
                assert_eq!(config.rate_limit.burst, 200);
                assert!(!config.rate_limit.trust_forwarded_for);
            },
        );
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        temp_env::with_var_unset("LEDGERLY__JWT__SECRET", || {
            assert!(AppConfig::load().is_err());
        });
    }
}

//! Application configuration management.
//!
//! Sources, lowest priority first:
//! 1. `DATABASE_URL` / `JWT_SECRET` environment variables (conventional names)
//! 2. `config/default.toml`
//! 3. `config/{RUN_MODE}.toml`
//! 4. `TALLY__SECTION__KEY` environment variables

use serde::Deserialize;

use crate::types::UpdatePolicy;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Expense behaviour switches.
    #[serde(default)]
    pub expenses: ExpensesConfig,
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
    3000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a connection before giving up.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    604_800 // 7 days
}

/// Expense behaviour switches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpensesConfig {
    /// How partial updates decide which fields were provided.
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database.url", url)?;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.set_default("jwt.secret", secret)?;
        }

        let config = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns the `host:port` the server should bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEARED: [(&str, Option<&str>); 4] = [
        ("DATABASE_URL", None),
        ("JWT_SECRET", None),
        ("TALLY__DATABASE__URL", None),
        ("TALLY__JWT__SECRET", None),
    ];

    #[test]
    fn test_load_from_prefixed_env() {
        temp_env::with_vars(
            [
                ("TALLY__DATABASE__URL", Some("postgres://localhost/tally")),
                ("TALLY__JWT__SECRET", Some("s3cret")),
                ("TALLY__SERVER__PORT", Some("9000")),
                ("DATABASE_URL", None),
                ("JWT_SECRET", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/tally");
                assert_eq!(config.jwt.secret, "s3cret");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.expiry_secs, 604_800);
                assert_eq!(config.expenses.update_policy, UpdatePolicy::Presence);
            },
        );
    }

    #[test]
    fn test_conventional_env_names_are_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://fallback/tally")),
                ("JWT_SECRET", Some("plain")),
                ("TALLY__DATABASE__URL", None),
                ("TALLY__JWT__SECRET", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://fallback/tally");
                assert_eq!(config.jwt.secret, "plain");
                assert_eq!(config.bind_address(), "0.0.0.0:3000");
            },
        );
    }

    #[test]
    fn test_prefixed_env_wins_over_conventional_name() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://fallback/tally")),
                ("TALLY__DATABASE__URL", Some("postgres://primary/tally")),
                ("JWT_SECRET", Some("plain")),
                ("TALLY__JWT__SECRET", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://primary/tally");
            },
        );
    }

    #[test]
    fn test_legacy_update_policy_from_env() {
        temp_env::with_vars(
            [
                ("TALLY__DATABASE__URL", Some("postgres://localhost/tally")),
                ("TALLY__JWT__SECRET", Some("s3cret")),
                ("TALLY__EXPENSES__UPDATE_POLICY", Some("legacy_truthy")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.expenses.update_policy, UpdatePolicy::LegacyTruthy);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(CLEARED, || {
            assert!(AppConfig::load().is_err());
        });
    }
}

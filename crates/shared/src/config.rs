//! Application configuration management.
//!
//! Values are layered from `config/default`, `config/{RUN_MODE}` and
//! `NUMO__*` environment variables (e.g. `NUMO__DATABASE__URL`).

use serde::Deserialize;

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
    /// Natural-language entry configuration.
    #[serde(default)]
    pub numochat: NumoChatConfig,
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
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expiry_secs: default_access_token_expiry(),
            refresh_token_expiry_secs: default_refresh_token_expiry(),
        }
    }
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// Settings for the language-model command interpreter behind NumoChat.
#[derive(Debug, Clone, Deserialize)]
pub struct NumoChatConfig {
    /// API key. NumoChat requests fail with an external-service error when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_numochat_base_url")]
    pub base_url: String,
    /// Chat model name.
    #[serde(default = "default_numochat_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_numochat_timeout")]
    pub timeout_secs: u64,
}

impl Default for NumoChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_numochat_base_url(),
            model: default_numochat_model(),
            timeout_secs: default_numochat_timeout(),
        }
    }
}

fn default_numochat_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_numochat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_numochat_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NUMO").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns the `host:port` pair the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(
            [
                ("NUMO__DATABASE__URL", Some("sqlite::memory:")),
                ("NUMO__JWT__SECRET", Some("env-secret")),
                ("NUMO__NUMOCHAT__MODEL", None::<&str>),
                ("NUMO__NUMOCHAT__API_KEY", None),
            ],
            || {
                let config = AppConfig::load().unwrap();

                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.secret, "env-secret");
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
                assert_eq!(config.jwt.refresh_token_expiry_secs, 604_800);
                assert_eq!(config.numochat.model, "gpt-4o-mini");
                assert!(config.numochat.api_key.is_none());
                assert_eq!(config.bind_address(), "0.0.0.0:8080");
            },
        );
    }

    #[test]
    fn test_numochat_section_overrides() {
        temp_env::with_vars(
            [
                ("NUMO__DATABASE__URL", Some("sqlite::memory:")),
                ("NUMO__JWT__SECRET", Some("env-secret")),
                ("NUMO__NUMOCHAT__API_KEY", Some("sk-test")),
                ("NUMO__NUMOCHAT__MODEL", Some("local-model")),
            ],
            || {
                let config = AppConfig::load().unwrap();

                assert_eq!(config.numochat.api_key.as_deref(), Some("sk-test"));
                assert_eq!(config.numochat.model, "local-model");
                assert_eq!(config.numochat.base_url, "https://api.openai.com/v1");
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("NUMO__DATABASE__URL", None::<&str>),
                ("NUMO__JWT__SECRET", Some("env-secret")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}

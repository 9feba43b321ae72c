//! Configuration module for the dealership service.

use serde::Deserialize;
use std::path::Path;

use crate::{DealershipError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/dealership.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key (required).
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_EXPIRY_SECS: u64 = 365 * 24 * 60 * 60;

fn default_token_expiry() -> u64 {
    3600 // 1 hour
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_secs: default_token_expiry(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/dealership.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Install and bootstrap configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallConfig {
    /// Whether the public `/install` seed route is mounted.
    #[serde(default)]
    pub enabled: bool,
    /// Name of the administrator created at startup.
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
    /// Email of the administrator created at startup.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Password of the administrator created at startup.
    ///
    /// No administrator is bootstrapped while this is empty.
    #[serde(default)]
    pub admin_password: String,
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            admin_name: default_admin_name(),
            admin_email: default_admin_email(),
            admin_password: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Install configuration.
    #[serde(default)]
    pub install: InstallConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DealershipError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DealershipError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DEALERSHIP_JWT_SECRET`: Override the JWT secret key
    /// - `JWT_SECRET`: Same, used when `DEALERSHIP_JWT_SECRET` is unset
    /// - `PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) {
        let secret = ["DEALERSHIP_JWT_SECRET", "JWT_SECRET"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        if let Some(secret) = secret {
            self.auth.jwt_secret = secret;
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is not set or the token lifetime is
    /// zero or longer than [`MAX_TOKEN_EXPIRY_SECS`].
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(DealershipError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the DEALERSHIP_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.auth.token_expiry_secs == 0 {
            return Err(DealershipError::Config(
                "token_expiry_secs must be greater than zero".to_string(),
            ));
        }
        if self.auth.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            return Err(DealershipError::Config(format!(
                "token_expiry_secs must be at most {MAX_TOKEN_EXPIRY_SECS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();
        for (k, v) in vars {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
        f();
        for (k, v) in saved {
            match v {
                Some(v) => std::env::set_var(&k, v),
                None => std::env::remove_var(&k),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.path, "data/dealership.db");

        assert!(config.auth.jwt_secret.is_empty());
        assert_eq!(config.auth.token_expiry_secs, 3600);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/dealership.log");

        assert!(!config.install.enabled);
        assert_eq!(config.install.admin_email, "admin@example.com");
        assert!(config.install.admin_password.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[database]
path = "custom/db.sqlite"

[auth]
jwt_secret = "test-secret-key"
token_expiry_secs = 600

[logging]
level = "debug"
file = "custom/logs/app.log"

[install]
enabled = true
admin_name = "Root"
admin_email = "root@example.com"
admin_password = "rootpassword"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.auth.jwt_secret, "test-secret-key");
        assert_eq!(config.auth.token_expiry_secs, 600);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert!(config.install.enabled);
        assert_eq!(config.install.admin_name, "Root");
        assert_eq!(config.install.admin_email, "root@example.com");
        assert_eq!(config.install.admin_password, "rootpassword");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 4000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.token_expiry_secs, 3600);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(DealershipError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(DealershipError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_prefers_dealership_secret() {
        with_env(
            &[
                ("DEALERSHIP_JWT_SECRET", Some("primary")),
                ("JWT_SECRET", Some("fallback")),
                ("PORT", None),
            ],
            || {
                let mut config = Config::default();
                config.apply_env_overrides();
                assert_eq!(config.auth.jwt_secret, "primary");
            },
        );
    }

    #[test]
    fn test_apply_env_overrides_fallback_secret() {
        with_env(
            &[
                ("DEALERSHIP_JWT_SECRET", None),
                ("JWT_SECRET", Some("fallback")),
                ("PORT", Some("9090")),
            ],
            || {
                let mut config = Config::default();
                config.apply_env_overrides();
                assert_eq!(config.auth.jwt_secret, "fallback");
                assert_eq!(config.server.port, 9090);
            },
        );
    }

    #[test]
    fn test_apply_env_overrides_empty_value() {
        with_env(
            &[
                ("DEALERSHIP_JWT_SECRET", Some("")),
                ("JWT_SECRET", None),
                ("PORT", Some("not-a-port")),
            ],
            || {
                let mut config = Config::default();
                config.auth.jwt_secret = "original-secret".to_string();
                config.apply_env_overrides();
                assert_eq!(config.auth.jwt_secret, "original-secret");
                assert_eq!(config.server.port, 3000);
            },
        );
    }

    #[test]
    fn test_validate_missing_secret() {
        let config = Config::default();

        let result = config.validate();
        assert!(matches!(result, Err(DealershipError::Config(ref msg)) if msg.contains("jwt_secret")));
    }

    #[test]
    fn test_validate_zero_expiry() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config.auth.token_expiry_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_expiry_upper_bound() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();

        config.auth.token_expiry_secs = MAX_TOKEN_EXPIRY_SECS;
        assert!(config.validate().is_ok());

        config.auth.token_expiry_secs = u64::MAX;
        assert!(matches!(config.validate(), Err(DealershipError::Config(_))));
    }

    #[test]
    fn test_validate_with_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }
}

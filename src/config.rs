//! Application configuration.
//!
//! Settings are read from the environment once at startup into an immutable
//! [`AppConfig`] value that is shared with every component through the
//! application state. Components never read the environment themselves.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Immutable process-wide settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Human-readable application name, shown on rendered pages.
    pub app_name: String,
    /// Public base URL of the application, used to derive the OAuth callback.
    pub app_url: String,
    /// Session-signing secret. Reserved for signed-cookie use; sessions are
    /// currently opaque database-backed tokens.
    pub secret_key: String,
    /// Debug mode. Disables the `Secure` attribute on the session cookie.
    pub debug: bool,
    /// Database connection string; scheme selects the backend.
    pub database_url: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    /// Root directory of the key-addressed file store.
    pub storage_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to development
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_name: env_or("APP_NAME", "Rust App"),
            app_url: env_or("APP_URL", "http://localhost:8000"),
            secret_key: env_or(
                "SECRET_KEY",
                "dev-secret-key-change-in-production-must-be-32-chars",
            ),
            debug: parse_bool("DEBUG")?,
            database_url: env_or("DATABASE_URL", "sqlite://data.db"),
            google_client_id: env_or("GOOGLE_CLIENT_ID", ""),
            google_client_secret: env_or("GOOGLE_CLIENT_SECRET", ""),
            storage_path: PathBuf::from(env_or("STORAGE_PATH", "./uploads")),
            log_level: env_or("LOG_LEVEL", "info"),
        })
    }

    /// OAuth callback URL derived from the public application URL.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.app_url.trim_end_matches('/'))
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str) -> Result<bool, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(false),
        Ok(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: key.to_string(),
                value,
            }),
        },
    }
}

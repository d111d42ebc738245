//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://database.sqlite"
//! export BASE_URL="https://s.example.com"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite location (default: `sqlite://database.sqlite`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public origin used to build `shortUrl` in responses
//! - `WARNING_PAGE_URL` - Warning interstitial endpoint (default: `/warning`).
//!   The page is not served here; a relative path needs a proxy routing it to
//!   the frontend, otherwise set an absolute URL
//! - `CODE_GENERATION_ATTEMPTS` - Generated-code attempts before giving up (default: 2, min: 2)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_BUSY_TIMEOUT` - SQLite busy timeout in seconds (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::application::services::short_url_service::MIN_GENERATION_ATTEMPTS;
use crate::infrastructure::persistence::SqliteSettings;
use crate::state::LinkSettings;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.sqlite";
const MAX_GENERATION_ATTEMPTS: usize = 100;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub base_url: Option<String>,
    pub warning_page_url: String,
    pub code_generation_attempts: usize,
    pub log_level: String,
    pub log_format: String,

    // ── SQLite pool settings ────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Seconds a connection waits on a locked database (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").ok().filter(|v| !v.is_empty());
        let warning_page_url =
            env::var("WARNING_PAGE_URL").unwrap_or_else(|_| "/warning".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let code_generation_attempts =
            parse_var("CODE_GENERATION_ATTEMPTS")?.unwrap_or(MIN_GENERATION_ATTEMPTS);
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5);
        let db_busy_timeout = parse_var("DB_BUSY_TIMEOUT")?.unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            warning_page_url,
            code_generation_attempts,
            log_level,
            log_format,
            db_max_connections,
            db_busy_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is not a `sqlite:` URL
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an absolute HTTP(S) URL
    /// - `warning_page_url` is empty
    /// - `code_generation_attempts` is outside 2..=100
    /// - `log_format` is not `text` or `json`
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if self.warning_page_url.trim().is_empty() {
            anyhow::bail!("WARNING_PAGE_URL must not be empty");
        }

        if self.code_generation_attempts < MIN_GENERATION_ATTEMPTS
            || self.code_generation_attempts > MAX_GENERATION_ATTEMPTS
        {
            anyhow::bail!(
                "CODE_GENERATION_ATTEMPTS must be between {} and {}, got {}",
                MIN_GENERATION_ATTEMPTS,
                MAX_GENERATION_ATTEMPTS,
                self.code_generation_attempts
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_busy_timeout == 0 {
            anyhow::bail!("DB_BUSY_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Pool settings for the SQLite repository.
    pub fn sqlite_settings(&self) -> SqliteSettings {
        SqliteSettings {
            max_connections: self.db_max_connections,
            busy_timeout: Duration::from_secs(self.db_busy_timeout),
        }
    }

    /// Public URL settings shared with handlers.
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            base_url: self.base_url.clone(),
            warning_page_url: self.warning_page_url.clone(),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!(
            "  Base URL: {}",
            self.base_url.as_deref().unwrap_or("(not set)")
        );
        tracing::info!("  Warning page: {}", self.warning_page_url);
        tracing::info!(
            "  Code generation attempts: {}",
            self.code_generation_attempts
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an optional numeric environment variable.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite://database.sqlite".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: None,
            warning_page_url: "/warning".to_string(),
            code_generation_attempts: 2,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 5,
            db_busy_timeout: 5,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());
        config.database_url = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());

        config.base_url = Some("s.example.com".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("https://s.example.com".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generation_attempts_bounds() {
        let mut config = valid_config();

        config.code_generation_attempts = 1;
        assert!(config.validate().is_err());

        config.code_generation_attempts = 100;
        assert!(config.validate().is_ok());

        config.code_generation_attempts = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_settings_must_be_positive() {
        let mut config = valid_config();
        config.db_max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.db_busy_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("BASE_URL");
            env::remove_var("WARNING_PAGE_URL");
            env::remove_var("CODE_GENERATION_ATTEMPTS");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.warning_page_url, "/warning");
        assert_eq!(config.code_generation_attempts, 2);
        assert!(config.base_url.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BASE_URL", "https://s.example.com");
            env::set_var("WARNING_PAGE_URL", "https://app.example.com/warning");
            env::set_var("CODE_GENERATION_ATTEMPTS", "5");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://s.example.com"));
        assert_eq!(config.warning_page_url, "https://app.example.com/warning");
        assert_eq!(config.code_generation_attempts, 5);

        // Cleanup
        unsafe {
            env::remove_var("BASE_URL");
            env::remove_var("WARNING_PAGE_URL");
            env::remove_var("CODE_GENERATION_ATTEMPTS");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_number() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DB_MAX_CONNECTIONS", "many");
        }

        let result = Config::from_env();
        assert!(result.is_err());

        unsafe {
            env::remove_var("DB_MAX_CONNECTIONS");
        }
    }

    #[test]
    #[serial]
    fn test_empty_base_url_is_unset() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BASE_URL", "");
        }

        let config = Config::from_env().unwrap();
        assert!(config.base_url.is_none());

        unsafe {
            env::remove_var("BASE_URL");
        }
    }
}

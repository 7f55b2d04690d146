//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// JWT secret key for signing tokens.
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds (default: 12 hours).
    pub token_lifetime_secs: i64,

    /// SMTP settings for low-stock alerts. None disables the notifier
    /// transport entirely; stock events are then dropped silently.
    pub smtp: Option<SmtpConfig>,
}

/// SMTP transport settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address.
    pub from: String,
    /// Alert recipient address.
    pub recipient: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/stockroom.db".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                // In production this MUST be set via environment variable
                .unwrap_or_else(|_| "stockroom-dev-secret-change-in-production".to_string()),

            token_lifetime_secs: env::var("TOKEN_LIFETIME_SECS")
                .unwrap_or_else(|_| "43200".to_string()) // 12 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_LIFETIME_SECS".to_string()))?,

            smtp: Self::load_smtp()?,
        };

        Ok(config)
    }

    /// SMTP is configured only when SMTP_HOST is present; everything else
    /// has a usable default.
    fn load_smtp() -> Result<Option<SmtpConfig>, ConfigError> {
        let host = match env::var("SMTP_HOST") {
            Ok(host) if !host.trim().is_empty() => host,
            _ => return Ok(None),
        };

        let username = env::var("SMTP_USER").ok();
        let from = env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@stockroom.local".to_string());
        let recipient = env::var("ALERT_RECIPIENT")
            .ok()
            .or_else(|| username.clone())
            .unwrap_or_else(|| from.clone());

        Ok(Some(SmtpConfig {
            host,
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SMTP_PORT".to_string()))?,
            username,
            password: env::var("SMTP_PASS").ok(),
            from,
            recipient,
        }))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

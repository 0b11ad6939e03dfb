//! Configuration module
//!
//! Loads configuration from environment variables once at startup.

use std::env;

use secrecy::{ExposeSecret, SecretString};

/// Upper bound for TRANSACTION_WINDOW_DAYS (about a century)
pub const MAX_TRANSACTION_WINDOW_DAYS: i64 = 36_500;

/// Default Pluggy API endpoint
pub const DEFAULT_PLUGGY_BASE_URL: &str = "https://api.pluggy.ai";

/// Pluggy API credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: SecretString,
    client_secret: SecretString,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: SecretString::from(client_id.into()),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    pub fn client_id(&self) -> &str {
        self.client_id.expose_secret()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    /// Both values are set and non-blank
    pub fn is_complete(&self) -> bool {
        !self.client_id().trim().is_empty() && !self.client_secret().trim().is_empty()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Pluggy client credentials
    pub credentials: Credentials,

    /// Pluggy API base URL
    pub pluggy_base_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Page size for account/transaction listings
    pub page_size: u32,

    /// Upper bound on pages fetched per listing
    pub max_pages: usize,

    /// Transactions are fetched for the last N days (0 = no window)
    pub transaction_window_days: i64,

    /// Browser origins allowed to call the API
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };

        let client_id = required("PLUGGY_CLIENT_ID")?;
        let client_secret = required("PLUGGY_CLIENT_SECRET")?;

        let pluggy_base_url = lookup("PLUGGY_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PLUGGY_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let page_size: u32 = lookup("PLUGGY_PAGE_SIZE")
            .unwrap_or_else(|| "500".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PLUGGY_PAGE_SIZE"))?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue("PLUGGY_PAGE_SIZE"));
        }

        let max_pages: usize = lookup("PLUGGY_MAX_PAGES")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PLUGGY_MAX_PAGES"))?;
        if max_pages == 0 {
            return Err(ConfigError::InvalidValue("PLUGGY_MAX_PAGES"));
        }

        let transaction_window_days: i64 = lookup("TRANSACTION_WINDOW_DAYS")
            .unwrap_or_else(|| "90".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TRANSACTION_WINDOW_DAYS"))?;
        if !(0..=MAX_TRANSACTION_WINDOW_DAYS).contains(&transaction_window_days) {
            return Err(ConfigError::InvalidValue("TRANSACTION_WINDOW_DAYS"));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            credentials: Credentials::new(client_id, client_secret),
            pluggy_base_url,
            host,
            port,
            environment,
            page_size,
            max_pages,
            transaction_window_days,
            cors_allowed_origins,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

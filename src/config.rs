//! Server configuration loaded from environment variables.

use thiserror::Error;
use tracing::warn;

const DEFAULT_JWT_SECRET: &str = "game-scores-development-secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_EXPIRATION_HOURS: i64 = 24;
/// Ten years
pub const MAX_TOKEN_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be an integer between 1 and {max}, got {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        max: i64,
    },
}

/// Credentials for the admin account created at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// PostgreSQL connection string. In-memory storage is used when absent.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_expiration_hours: i64,
    /// Address to bind the HTTP server.
    pub bind_addr: String,
    pub admin: Option<AdminSeed>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let token_expiration_hours = match var("TOKEN_EXPIRATION_HOURS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(hours) if (1..=MAX_TOKEN_EXPIRATION_HOURS).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "TOKEN_EXPIRATION_HOURS",
                        value: raw,
                        max: MAX_TOKEN_EXPIRATION_HOURS,
                    })
                }
            },
            None => DEFAULT_TOKEN_EXPIRATION_HOURS,
        };

        let admin = var("ADMIN_PASSWORD").map(|password| AdminSeed {
            username: var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            email: var("ADMIN_EMAIL").unwrap_or_else(|| "admin@example.com".to_string()),
            password,
        });

        Ok(Self {
            database_url: var("DATABASE_URL"),
            jwt_secret,
            token_expiration_hours,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            admin,
        })
    }
}

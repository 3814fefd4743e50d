//! Configuration module for the portfolio backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key guarding the admin routes; `None` leaves them open
    pub admin_key: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Bulk-insert the bundled dataset at startup
    pub seed_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let admin_key = env::var("PORTFOLIO_ADMIN_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let db_path = env::var("PORTFOLIO_DB_PATH")
            .unwrap_or_else(|_| "./data/portfolio.sqlite".to_string())
            .into();

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid PORTFOLIO_BIND_ADDR: {}", e)))?;

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_on_start = env::var("PORTFOLIO_SEED_ON_START")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            admin_key,
            db_path,
            bind_addr,
            log_level,
            seed_on_start,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

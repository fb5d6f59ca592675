//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret used to sign and verify session cookies
    pub session_secret: String,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        // An empty secret would make the gate reject every protected
        // request, so treat it the same as an absent one.
        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => return Err(anyhow::anyhow!("SESSION_SECRET is required")),
        };

        let config = Self {
            session_secret,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "elevea=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

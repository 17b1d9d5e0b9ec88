//! Configuration management for the auth gateway
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)

use anyhow::{Context, Result};
use std::env;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub auth: AuthSettings,
}

impl Settings {
    /// Load settings from environment variables, with `.env` support in
    /// development builds.
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            server: ServerSettings::from_env()?,
            backend: BackendSettings::from_env()?,
            auth: AuthSettings::from_env()?,
        })
    }
}

/// gRPC server configuration
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "50051".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// Identity backend connection settings
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Base URL of the loginsrv instance, e.g. "http://loginsrv:8080".
    pub base_url: String,
    /// Per-round-trip HTTP timeout.
    pub timeout_secs: u64,
}

impl BackendSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env::var("AUTH_BACKEND_URL").context("AUTH_BACKEND_URL must be set")?,
            timeout_secs: env::var("AUTH_BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid AUTH_BACKEND_TIMEOUT_SECS")?,
        })
    }
}

/// Authorization gate settings
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Method-name substrings that bypass the gate entirely.
    pub exempt_methods: Vec<String>,
    /// Validate every admitted token against the backend instead of
    /// trusting its presence in call metadata.
    pub validate_every_call: bool,
}

impl AuthSettings {
    fn from_env() -> Result<Self> {
        let exempt_str =
            env::var("AUTH_EXEMPT_METHODS").unwrap_or_else(|_| "AttemptLogin".to_string());
        let exempt_methods = exempt_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            exempt_methods,
            validate_every_call: env::var("AUTH_VALIDATE_EVERY_CALL")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("Invalid AUTH_VALIDATE_EVERY_CALL")?,
        })
    }
}

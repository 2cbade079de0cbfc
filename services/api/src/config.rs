//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use healthtrack_core::MissingCoordinatePolicy;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub facilities_path: PathBuf,
    pub missing_coordinates: MissingCoordinatePolicy,
    /// Artificial delay in front of every data-source call; zero disables it.
    pub simulated_latency: Duration,
    pub cors_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            facilities_path: PathBuf::from("./data/facilities.json"),
            missing_coordinates: MissingCoordinatePolicy::default(),
            simulated_latency: Duration::ZERO,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset keys fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        // --- Data Source Settings ---
        let facilities_path = lookup("FACILITIES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.facilities_path);

        let missing_coordinates = match lookup("MISSING_COORDINATES") {
            Some(raw) => raw.parse::<MissingCoordinatePolicy>().map_err(|e| {
                ConfigError::InvalidValue("MISSING_COORDINATES".to_string(), e.to_string())
            })?,
            None => defaults.missing_coordinates,
        };

        let simulated_latency = match lookup("SIMULATED_LATENCY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidValue("SIMULATED_LATENCY_MS".to_string(), e.to_string())
                })?,
            None => defaults.simulated_latency,
        };

        Ok(Self {
            bind_address,
            log_level,
            facilities_path,
            missing_coordinates,
            simulated_latency,
            cors_origin,
        })
    }
}

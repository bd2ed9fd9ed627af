//! Service configuration.
//!
//! `AppConfig` comes from environment variables (a `.env` file is loaded by
//! `main` through dotenvy). `SharedPricingConfig` holds the live pricing
//! configuration: readers take an `Arc` snapshot, reloads validate a whole new
//! config and swap it in one step.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::{info, warn};

use crate::pricing::error::ConfigValidationError;
use crate::pricing::PricingConfig;

pub const PRICING_CONFIG_PATH: &str = "PRICING_CONFIG_PATH";

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Failed to read pricing config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),

    #[error("No pricing config file configured; reload unavailable")]
    NoSource,
}

/// Service settings from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub pricing_config_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: e.to_string(),
            })?,
            Err(_) => 8080,
        };
        let pricing_config_path = env::var(PRICING_CONFIG_PATH)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            pricing_config_path,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and validate a pricing config file
pub fn load_pricing_config(path: &Path) -> Result<PricingConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PricingConfig::from_json(&raw)?)
}

/// Live pricing configuration shared by every request
#[derive(Debug)]
pub struct SharedPricingConfig {
    current: RwLock<Arc<PricingConfig>>,
    source: Option<PathBuf>,
}

impl SharedPricingConfig {
    /// Wrap a config that has no backing file; `reload` is unavailable.
    pub fn fixed(config: PricingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
            source: None,
        })
    }

    /// Load from `source`, or fall back to the built-in defaults.
    pub fn load(source: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match &source {
            Some(path) => {
                let config = load_pricing_config(path)?;
                info!(
                    "Loaded pricing config {} from {}",
                    config.version,
                    path.display()
                );
                config
            }
            None => {
                let config = PricingConfig::default();
                info!("Using built-in pricing config {}", config.version);
                config
            }
        };
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
            source,
        })
    }

    pub fn snapshot(&self) -> Arc<PricingConfig> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a complete replacement config.
    pub fn replace(&self, config: PricingConfig) -> Result<Arc<PricingConfig>, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&config);
        Ok(config)
    }

    /// Re-read the backing file. The current config stays live on failure.
    pub fn reload(&self) -> Result<Arc<PricingConfig>, ConfigError> {
        let path = self.source.as_deref().ok_or(ConfigError::NoSource)?;
        let config = load_pricing_config(path).map_err(|e| {
            warn!("Pricing config reload failed, keeping current config: {}", e);
            e
        })?;
        let config = self.replace(config)?;
        info!("Reloaded pricing config {} from {}", config.version, path.display());
        Ok(config)
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::reference::{ReferenceError, ReferenceTables};

/// Application-level constants
pub const APP_NAME: &str = "Report Explainer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listen address when EXPLAINER_ADDR is unset.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

pub const ADDR_ENV: &str = "EXPLAINER_ADDR";
pub const RESOURCES_DIR_ENV: &str = "EXPLAINER_RESOURCES_DIR";

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "report_explainer_lib=info,report_explainer=info,tower_http=warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid listen address {0}: {1}")]
    InvalidAddr(String, String),

    #[error("Resources directory does not exist: {0}")]
    MissingResourcesDir(String),
}

/// Runtime configuration for the explainer server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory with replacement reference tables. Bundled tables when unset.
    pub resources_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `EXPLAINER_ADDR` and `EXPLAINER_RESOURCES_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(ADDR_ENV).ok(),
            std::env::var(RESOURCES_DIR_ENV).ok(),
        )
    }

    /// Build from raw values; empty strings count as unset.
    pub fn from_values(
        addr: Option<String>,
        resources_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr_str = addr
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_str
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidAddr(addr_str.clone(), e.to_string()))?;

        let resources_dir = match resources_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => {
                let path = PathBuf::from(dir);
                if !path.is_dir() {
                    return Err(ConfigError::MissingResourcesDir(path.display().to_string()));
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            addr,
            resources_dir,
        })
    }

    /// Load the reference tables this configuration points at.
    pub fn load_tables(&self) -> Result<ReferenceTables, ReferenceError> {
        match &self.resources_dir {
            Some(dir) => ReferenceTables::load(dir),
            None => ReferenceTables::bundled(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            resources_dir: None,
        }
    }
}

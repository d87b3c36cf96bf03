//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments / environment variables (merged by the binary)
//! 2. TOML config file
//! 3. Built-in defaults
//!
//! Upstream credentials have no default. A missing username, API key or URL is
//! reported as [`Error::Config`] so the server can refuse to start.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::view::VisibilityFilter;
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Config file layout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub bind: Option<IpAddr>,
    pub upstream: UpstreamSection,
    pub visibility: Option<VisibilityFilter>,
}

/// `[upstream]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    pub url: Option<String>,
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        info!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Parse a config file if it exists; a missing file yields defaults
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind: Option<IpAddr>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Upstream price-list API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub url: String,
    pub username: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub visibility: VisibilityFilter,
}

impl ServiceConfig {
    /// Merge overrides over the file config over defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Result<Self> {
        let upstream = file.upstream;

        let mut missing = Vec::new();
        let url = non_empty(overrides.url.or(upstream.url));
        let username = non_empty(overrides.username.or(upstream.username));
        let api_key = non_empty(overrides.api_key.or(upstream.api_key));
        if url.is_none() {
            missing.push("upstream URL (PRICELIST_URL)");
        }
        if username.is_none() {
            missing.push("upstream username (PRICELIST_USERNAME)");
        }
        if api_key.is_none() {
            missing.push("upstream API key (PRICELIST_API_KEY)");
        }
        let (Some(url), Some(username), Some(api_key)) = (url, username, api_key) else {
            return Err(Error::Config(format!("missing {}", missing.join(", "))));
        };

        let timeout_secs = overrides
            .timeout_secs
            .or(upstream.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("upstream timeout must be at least 1 second".to_string()));
        }

        Ok(Self {
            bind: overrides
                .bind
                .or(file.bind)
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            upstream: UpstreamConfig {
                url,
                username,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            visibility: file.visibility.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

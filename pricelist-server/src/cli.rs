//! Command-line arguments for pricelist-server

use clap::Parser;
use pricelist_common::config::ConfigOverrides;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments for pricelist-server
#[derive(Parser, Debug)]
#[command(name = "pricelist-server")]
#[command(about = "Grouped voucher price list proxy")]
#[command(version)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, env = "PRICELIST_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "PRICELIST_BIND")]
    pub bind: Option<IpAddr>,

    /// Upstream price-list endpoint
    #[arg(long, env = "PRICELIST_URL")]
    pub url: Option<String>,

    /// Upstream account username
    #[arg(long, env = "PRICELIST_USERNAME")]
    pub username: Option<String>,

    /// Upstream API key
    #[arg(long, env = "PRICELIST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "PRICELIST_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// TOML config file
    #[arg(short, long, env = "PRICELIST_CONFIG", default_value = "pricelist.toml")]
    pub config: PathBuf,
}

impl ServerArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            bind: self.bind,
            url: self.url.clone(),
            username: self.username.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

use crate::constants::{
    COMMAND_TIMEOUT_SECS, DATA_TIMEOUT_SECS, DEFAULT_BANNER, DEFAULT_CHUNK_SIZE,
    DEFAULT_DATA_PORT, DEFAULT_LISTEN_PORT,
};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub data_port: u16,
    pub pasv_address: Option<Ipv4Addr>, // Advertised in 227 replies, falls back to the control socket address
    pub root_dir: PathBuf,
    pub chunk_size: usize,
    pub command_timeout_secs: u64,
    pub data_timeout_secs: u64,
    pub banner: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("0.0.0.0"),
            listen_port: DEFAULT_LISTEN_PORT,
            data_port: DEFAULT_DATA_PORT,
            pasv_address: None,
            root_dir: PathBuf::from("."),
            chunk_size: DEFAULT_CHUNK_SIZE,
            command_timeout_secs: COMMAND_TIMEOUT_SECS,
            data_timeout_secs: DATA_TIMEOUT_SECS,
            banner: String::from(DEFAULT_BANNER),
        }
    }
}

impl ServerConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn data_timeout(&self) -> Duration {
        Duration::from_secs(self.data_timeout_secs)
    }

    /// Chunk size used by the transfer loop, never zero.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        Ok(config)
    }

    pub fn log(&self) {
        info!("  Listen Address: {}", self.server.listen_address);
        info!("  Listen Port: {}", self.server.listen_port);
        info!("  Data Port: {}", self.server.data_port);
        match self.server.pasv_address {
            Some(addr) => info!("  PASV Address: {}", addr),
            None => info!("  PASV Address: <control connection address>"),
        }
        info!("  Root Directory: {}", self.server.root_dir.display());
        info!("  Chunk Size: {} bytes", self.server.chunk_size());
        info!(
            "  Timeouts: command {}s, data {}s",
            self.server.command_timeout_secs, self.server.data_timeout_secs
        );
    }
}

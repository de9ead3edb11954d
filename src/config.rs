use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Address the service listens on when none is configured.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3002));

/// Directory that receives one artifact per persisted book.
pub const DEFAULT_STORAGE_DIR: &str = "Books";

/// Delay before each title is appended to a listing (milliseconds).
pub const DEFAULT_LIST_ITEM_DELAY_MS: u64 = 500;

/// Upper bound of the random startup delay of each persistence task (milliseconds).
pub const DEFAULT_PERSIST_START_JITTER_MS: u64 = 1000;

/// Top-level configuration for the library service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Socket address of the HTTP listener.
    pub listen_addr: SocketAddr,
    /// Directory used for persisted book artifacts.
    pub storage_dir: PathBuf,
    pub list_item_delay_ms: u64,
    pub persist_start_jitter_ms: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            list_item_delay_ms: DEFAULT_LIST_ITEM_DELAY_MS,
            persist_start_jitter_ms: DEFAULT_PERSIST_START_JITTER_MS,
        }
    }
}

impl LibraryConfig {
    pub fn from_yaml(conf_str: &str) -> Result<Self> {
        let conf: LibraryConfig =
            serde_yaml::from_str(conf_str).context("unable to parse yaml config")?;
        debug!("loaded config: {:?}", conf);
        Ok(conf)
    }

    pub fn load_from_yaml(path: &Path) -> Result<Self> {
        let conf_str = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Self::from_yaml(&conf_str)
    }

    pub fn list_item_delay(&self) -> Duration {
        Duration::from_millis(self.list_item_delay_ms)
    }

    pub fn persist_start_jitter(&self) -> Duration {
        Duration::from_millis(self.persist_start_jitter_ms)
    }
}

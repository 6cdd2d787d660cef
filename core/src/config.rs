//! Server configuration.
//!
//! Every field is optional in the config file and falls back to the
//! defaults below, which match a bare local install.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_SAVE_DIR: &str = "static/saves";
pub const DEFAULT_VOTE_LIMIT: usize = 3;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr:  String,
    pub save_dir:   PathBuf,
    /// Master seed for reproducible draws. None draws from OS entropy.
    pub seed:       Option<u64>,
    /// How many recent snapshots the vote page shows.
    pub vote_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr:  DEFAULT_BIND_ADDR.to_string(),
            save_dir:   PathBuf::from(DEFAULT_SAVE_DIR),
            seed:       None,
            vote_limit: DEFAULT_VOTE_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load from a JSON file at `path`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json_str(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
    }

    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

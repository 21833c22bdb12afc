use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use booktrack_client::{ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "booktrack.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Directory holding the durable session record.
    pub state_dir: PathBuf,
    pub log: LogDestination,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_dir: PathBuf::from(".booktrack"),
            log: LogDestination::default(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Reads the config file.
///
/// An explicit path must exist. Without one, a missing `booktrack.ron`
/// means defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };

    let config = parse(&content).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

pub fn parse(content: &str) -> Result<AppConfig, ron::error::SpannedError> {
    ron::from_str(content)
}

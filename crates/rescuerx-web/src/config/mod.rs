//! Configuration loading for RescueRx.
//! Reads rescuerx.toml from the current directory or the path in RESCUERX_CONFIG.

use rescuerx_common::error::{RescueError, Result};
use rescuerx_report::{DirSource, DocumentSource, HttpSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const CONFIG_ENV: &str = "RESCUERX_CONFIG";
pub const BIND_ENV: &str = "RESCUERX_BIND";
pub const DEFAULT_CONFIG_PATH: &str = "rescuerx.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RescueConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File this config was read from; `None` when running on defaults.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Dir,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_source")]
    pub source: SourceKind,
    /// Directory path for `dir`, base URL for `http`.
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_source()       -> SourceKind { SourceKind::Dir }
fn default_root()         -> String     { "./public/data".to_string() }
fn default_timeout_secs() -> u64        { 15 }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            root: default_root(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl DataConfig {
    /// Build the document backend this section describes.
    pub fn build_source(&self) -> Result<Arc<dyn DocumentSource>> {
        if self.root.trim().is_empty() {
            return Err(RescueError::Config("data.root must not be empty".into()));
        }
        let source: Arc<dyn DocumentSource> = match self.source {
            SourceKind::Dir => Arc::new(DirSource::new(&self.root)),
            SourceKind::Http => Arc::new(HttpSource::new(
                &self.root,
                Duration::from_secs(self.request_timeout_secs),
            )?),
        };
        Ok(source)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_bind()       -> String { "127.0.0.1:3001".to_string() }
fn default_static_dir() -> String { "./static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "rescuerx=debug,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

mod tests;

impl RescueConfig {
    /// Load configuration from rescuerx.toml.
    /// Checks RESCUERX_CONFIG first, then the current directory. A missing
    /// file gives the defaults (see [`Self::loaded_from`]); RESCUERX_BIND
    /// overrides the bind address.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let config = Self::load_from(&path)?;
        Ok(config.with_bind_override(std::env::var(BIND_ENV).ok()))
    }

    /// Log where the config came from. Call once tracing is up.
    pub fn log_origin(&self) {
        match &self.loaded_from {
            Some(path) => tracing::info!("Configuration loaded from {}", path.display()),
            None => tracing::warn!(
                "No config file found. Using defaults; copy rescuerx.example.toml to rescuerx.toml to change them."
            ),
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_bind_override(mut self, bind: Option<String>) -> Self {
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.server.bind = bind;
        }
        self
    }
}

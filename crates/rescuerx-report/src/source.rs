//! Where pipeline documents come from.
//!
//! A source resolves a path relative to the data root
//! (`glioblastoma/evidence/summary.json`, `manifest.json`) to parsed JSON.
//! Backends:
//! - [`HttpSource`]   a static file server (the staged `public/data` folder)
//! - [`DirSource`]    a local directory
//! - [`MemorySource`] in-memory documents for tests and embedding

use async_trait::async_trait;
use rescuerx_common::error::{RescueError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Common interface for document backends.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and parse one document. A document that does not exist is
    /// [`RescueError::MissingDocument`].
    async fn fetch(&self, path: &str) -> Result<Value>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Reject absolute paths and `..` so a document path cannot leave the root.
fn checked_relative(path: &str) -> Result<&Path> {
    let p = Path::new(path);
    let escapes = p
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(RescueError::InvalidDiseaseId(path.to_string()));
    }
    Ok(p)
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let mut base = Url::parse(base_url)
            .map_err(|e| RescueError::Config(format!("invalid data URL {base_url:?}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rescuerx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch(&self, path: &str) -> Result<Value> {
        checked_relative(path)?;
        let url = self
            .base
            .join(path)
            .map_err(|_| RescueError::InvalidDiseaseId(path.to_string()))?;

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            debug!(status = %resp.status(), "document not served");
            return Err(RescueError::MissingDocument(path.to_string()));
        }
        Ok(resp.json::<Value>().await?)
    }

    fn describe(&self) -> String {
        format!("http {}", self.base)
    }
}

// ── Local directory ──────────────────────────────────────────────────────────

pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for DirSource {
    #[instrument(skip(self))]
    async fn fetch(&self, path: &str) -> Result<Value> {
        let full = self.root.join(checked_relative(path)?);
        let bytes = match tokio::fs::read(&full).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RescueError::MissingDocument(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        format!("dir {}", self.root.display())
    }
}

// ── In-memory ────────────────────────────────────────────────────────────────

/// Documents keyed by path.
#[derive(Default, Clone)]
pub struct MemorySource {
    docs: HashMap<String, Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with(mut self, path: &str, doc: Value) -> Self {
        self.docs.insert(path.to_string(), doc);
        self
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.docs
            .get(path)
            .cloned()
            .ok_or_else(|| RescueError::MissingDocument(path.to_string()))
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.docs.len())
    }
}

//! Metadata sources backed by the published BIDS schema: over HTTP or from
//! a local copy. Both degrade to an empty catalog on any failure.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use bids2nf_docs_core::contract::MetadataSource;
use bids2nf_docs_core::metadata::MetadataCatalog;

pub struct HttpMetadataSource {
    client: Client,
    url: String,
}

impl HttpMetadataSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpMetadataSource {
            client,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> Result<MetadataCatalog> {
        info!(url = %self.url, "Fetching BIDS schema metadata");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned status {}", self.url, status);
        }
        let document: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("{} did not return JSON", self.url))?;
        Ok(MetadataCatalog::from_json(&document))
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch_catalog(&self) -> MetadataCatalog {
        match self.fetch().await {
            Ok(catalog) => {
                info!(records = catalog.len(), "Fetched BIDS schema metadata");
                catalog
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not fetch BIDS schema metadata; continuing without it");
                MetadataCatalog::new()
            }
        }
    }
}

/// Reads the BIDS schema JSON from disk.
pub struct FileMetadataSource {
    path: PathBuf,
}

impl FileMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileMetadataSource { path: path.into() }
    }

    fn read(&self) -> Result<MetadataCatalog> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let document: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(MetadataCatalog::from_json(&document))
    }
}

#[async_trait]
impl MetadataSource for FileMetadataSource {
    async fn fetch_catalog(&self) -> MetadataCatalog {
        match self.read() {
            Ok(catalog) => {
                info!(path = %self.path.display(), records = catalog.len(), "Loaded metadata file");
                catalog
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Could not load metadata file; continuing without it");
                MetadataCatalog::new()
            }
        }
    }
}

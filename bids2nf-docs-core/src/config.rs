use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Presentation settings for one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub title: String,
    pub intro: String,
    /// Schema file name quoted in the footer.
    pub source_name: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        DocumentOptions {
            title: "Supported BIDS Suffixes".to_string(),
            intro: "This page documents the BIDS suffixes supported by bids2nf, grouped by how their files are organized.".to_string(),
            source_name: "bids2nf.yaml".to_string(),
        }
    }
}

impl DocumentOptions {
    pub fn trace_loaded(&self) {
        info!(
            title = %self.title,
            source_name = %self.source_name,
            "Loaded DocumentOptions"
        );
        debug!(?self, "DocumentOptions loaded (full debug)");
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

/// Environment variable that overrides the configured metadata URL.
pub const METADATA_URL_ENV: &str = "BIDS2NF_DOCS_METADATA_URL";

pub const DEFAULT_METADATA_URL: &str =
    "https://bids-specification.readthedocs.io/en/stable/schema.json";

/// Settings for the `generate` command. Every field has a default, so an
/// empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub schema: PathBuf,
    pub output: PathBuf,
    pub title: Option<String>,
    pub metadata: MetadataConfig,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            schema: PathBuf::from("bids2nf.yaml"),
            output: PathBuf::from("docs/supported.md"),
            title: None,
            metadata: MetadataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub url: String,
    /// Local schema JSON, used instead of `url` when set.
    pub file: Option<PathBuf>,
    pub offline: bool,
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        MetadataConfig {
            url: DEFAULT_METADATA_URL.to_string(),
            file: None,
            offline: false,
            timeout_secs: 10,
        }
    }
}

impl DocsConfig {
    /// Applies `BIDS2NF_DOCS_METADATA_URL` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = std::env::var(METADATA_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            info!(url = %url, "Metadata URL taken from {}", METADATA_URL_ENV);
            self.metadata.url = url;
        }
        self
    }
}

/// Loads a YAML settings file for the `generate` command.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DocsConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty; using defaults");
        return Ok(DocsConfig::default());
    }

    let config: DocsConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    info!(
        schema = %config.schema.display(),
        output = %config.output.display(),
        offline = config.metadata.offline,
        "Config loaded successfully"
    );
    Ok(config)
}

use std::path::{Path, PathBuf};

use tracing::debug;

use bids2nf_docs_core::contract::ExampleSource;
use bids2nf_docs_core::error::ExampleDataError;

/// Loads `example_output` files relative to the schema's directory.
/// `.yaml` and `.yml` files parse as YAML, anything else as JSON.
#[derive(Debug, Clone)]
pub struct FsExampleSource {
    base_dir: PathBuf,
}

impl FsExampleSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FsExampleSource {
            base_dir: base_dir.into(),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl ExampleSource for FsExampleSource {
    fn load(&self, path: &Path) -> Result<serde_json::Value, ExampleDataError> {
        let full = self.base_dir.join(path);
        if !full.is_file() {
            return Err(ExampleDataError::NotFound { path: full });
        }
        let text = std::fs::read_to_string(&full).map_err(|source| ExampleDataError::Io {
            path: full.clone(),
            source,
        })?;
        debug!(path = %full.display(), bytes = text.len(), "Read example data");

        let parsed = if is_yaml(&full) {
            serde_yaml::from_str::<serde_json::Value>(&text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<serde_json::Value>(&text).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ExampleDataError::Parse {
            path: full,
            message,
        })
    }
}

//! # contract: seams to the engine's external collaborators
//!
//! The engine reads two optional data sources it does not own:
//! - a metadata catalog (display names and descriptions per suffix), usually
//!   fetched over the network by the CLI
//! - side files of real example values referenced by `example_output`
//!
//! Both are read-only and both may be absent. Implementations never hand the
//! engine a fetch-level error for metadata: a failed fetch is an empty
//! catalog. Example loading does return errors, which the fallback resolver
//! turns into placeholders.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; `MockMetadataSource` and
//!   `MockExampleSource` are exported under the `test-export-mocks` feature.
//! - [`StaticMetadata`], [`NoExamples`] and [`InMemoryExamples`] cover
//!   offline runs and fixtures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ExampleDataError;
use crate::metadata::MetadataCatalog;

/// Provider of the external metadata catalog.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Returns the catalog, or an empty one if it cannot be obtained.
    async fn fetch_catalog(&self) -> MetadataCatalog;
}

/// Loader for `example_output` side files.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait ExampleSource {
    /// Loads and parses the file at `path`.
    fn load(&self, path: &Path) -> Result<serde_json::Value, ExampleDataError>;
}

/// A catalog known up front (offline runs, local metadata files, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata(pub MetadataCatalog);

#[async_trait]
impl MetadataSource for StaticMetadata {
    async fn fetch_catalog(&self) -> MetadataCatalog {
        self.0.clone()
    }
}

/// Every example lookup reports a missing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExamples;

impl ExampleSource for NoExamples {
    fn load(&self, path: &Path) -> Result<serde_json::Value, ExampleDataError> {
        Err(ExampleDataError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Example files held in memory, keyed by the path entries reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExamples {
    files: BTreeMap<PathBuf, serde_json::Value>,
}

impl InMemoryExamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, document: serde_json::Value) -> Self {
        self.files.insert(path.into(), document);
        self
    }
}

impl ExampleSource for InMemoryExamples {
    fn load(&self, path: &Path) -> Result<serde_json::Value, ExampleDataError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ExampleDataError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

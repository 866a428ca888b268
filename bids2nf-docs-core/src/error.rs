//! Error types for the documentation engine.
//!
//! Only a schema that cannot be read at all is fatal. Everything else the
//! engine touches (metadata, example data) is optional and degrades to a
//! placeholder instead of surfacing one of these errors to the user.

use std::path::PathBuf;

/// Failure to turn schema text into a [`crate::schema::Schema`].
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The text is not valid YAML.
    #[error("failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its top level is not a mapping of entries.
    #[error("schema top level must be a mapping of suffix names to definitions")]
    NotAMapping,

    /// A top-level key is not a string.
    #[error("schema key {0:?} is not a string")]
    InvalidKey(String),

    /// An entry's known fields have the wrong shape.
    #[error("invalid definition for suffix '{name}': {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to load a side file of example values.
///
/// The fallback resolver swallows these; they exist so the reason can be
/// logged and reported.
#[derive(Debug, thiserror::Error)]
pub enum ExampleDataError {
    #[error("example data file {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read example data {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse example data {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

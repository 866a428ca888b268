//! First tier of the example fallback: real sample values.
//!
//! [`resolve_example`] answers one question per entry: is there a sample
//! record for this name? Every failure on the way (no `example_output`,
//! missing file, unreadable or malformed file, name absent) ends in a value
//! the example synthesizer treats as "use placeholders". Load failures are
//! kept apart as [`Resolution::Error`] so they can be logged and counted.

use tracing::{debug, warn};

use crate::contract::ExampleSource;
use crate::schema::SuffixEntry;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The side file parsed and holds a record for the entry.
    Found(serde_json::Value),
    /// No side file configured, or it has no record for the entry.
    NotFound,
    /// The side file could not be loaded or parsed.
    Error(String),
}

impl Resolution {
    pub fn record(&self) -> Option<&serde_json::Value> {
        match self {
            Resolution::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resolution::Error(_))
    }
}

pub fn resolve_example(name: &str, entry: &SuffixEntry, source: &dyn ExampleSource) -> Resolution {
    let Some(path) = entry.example_output.as_deref() else {
        return Resolution::NotFound;
    };
    match source.load(path) {
        Ok(document) => match document.get(name) {
            Some(record) if !record.is_null() => {
                debug!(entry = %name, path = %path.display(), "Using sample values from example data");
                Resolution::Found(record.clone())
            }
            _ => {
                debug!(entry = %name, path = %path.display(), "Example data has no record for entry");
                Resolution::NotFound
            }
        },
        Err(e) => {
            warn!(entry = %name, path = %path.display(), error = %e, "Example data unavailable; using placeholders");
            Resolution::Error(e.to_string())
        }
    }
}

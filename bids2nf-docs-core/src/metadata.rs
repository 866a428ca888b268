//! External descriptive metadata and the precedence rule that merges it
//! with an entry's own description.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Display name and description published for one suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Suffix name to metadata record. Empty when nothing could be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataCatalog(BTreeMap<String, MetadataRecord>);

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, record: MetadataRecord) {
        self.0.insert(name.into(), record);
    }

    pub fn get(&self, name: &str) -> Option<&MetadataRecord> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a catalog out of a JSON document.
    ///
    /// Accepts the published BIDS schema layout (`objects.suffixes.<key>`
    /// with a `value` field naming the suffix) or a flat mapping from name
    /// to record. Records that are not objects are ignored.
    pub fn from_json(document: &serde_json::Value) -> Self {
        let table = document
            .pointer("/objects/suffixes")
            .unwrap_or(document)
            .as_object();
        let mut catalog = MetadataCatalog::new();
        let Some(table) = table else {
            debug!("Metadata document is not an object; using an empty catalog");
            return catalog;
        };
        for (key, raw) in table {
            if !raw.is_object() {
                continue;
            }
            let name = raw
                .get("value")
                .and_then(|v| v.as_str())
                .unwrap_or(key)
                .to_string();
            match serde_json::from_value::<MetadataRecord>(raw.clone()) {
                Ok(record) => catalog.insert(name, record),
                Err(e) => debug!(suffix = %key, error = %e, "Skipping malformed metadata record"),
            }
        }
        catalog
    }
}

impl<S: Into<String>> FromIterator<(S, MetadataRecord)> for MetadataCatalog {
    fn from_iter<I: IntoIterator<Item = (S, MetadataRecord)>>(iter: I) -> Self {
        MetadataCatalog(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Where the effective description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    External,
    Configured,
    Missing,
}

/// The metadata a card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub source: DescriptionSource,
}

impl Enrichment {
    /// The display name, only when it says something the name does not.
    pub fn distinct_display_name(&self) -> Option<&str> {
        (self.display_name != self.name).then_some(self.display_name.as_str())
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// A non-empty external description wins over the configured one; the
/// display name falls back to `name`.
pub fn enrich(catalog: &MetadataCatalog, name: &str, own_description: Option<&str>) -> Enrichment {
    let record = catalog.get(name);
    let display_name = record
        .and_then(|r| non_empty(r.display_name.as_deref()))
        .unwrap_or(name)
        .to_string();

    let external = record.and_then(|r| non_empty(r.description.as_deref()));
    let (description, source) = match (external, non_empty(own_description)) {
        (Some(text), _) => (Some(text.to_string()), DescriptionSource::External),
        (None, Some(text)) => (Some(text.to_string()), DescriptionSource::Configured),
        (None, None) => (None, DescriptionSource::Missing),
    };

    Enrichment {
        name: name.to_string(),
        display_name,
        description,
        source,
    }
}

//! Data model for the bids2nf suffix configuration.
//!
//! The schema is a YAML mapping from suffix name to definition. Every
//! definition carries one shape field (`plain_set`, `named_set`,
//! `sequential_set`, `mixed_set` or the `maps_to` alias) plus optional
//! orthogonal fields such as `note` and `example_output`.
//!
//! Declaration order matters everywhere: it drives card order in the
//! rendered document and role order inside named and mixed sets, so every
//! mapping here is kept as an ordered list of pairs.

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::SchemaError;

/// Primary file kind every data bundle carries.
pub const PRIMARY_KIND: &str = "nii";
/// Sidecar metadata kind.
pub const SIDECAR_KIND: &str = "json";

/// A string-keyed mapping that remembers declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping with string keys")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(OrderedMap::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// Deserializes a shape field so that its mere presence counts, even when
/// the YAML value is empty (`plain_set:` with nothing after it).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?.unwrap_or_default()))
}

/// A role (named set) or group (mixed set) descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoleDescriptor {
    #[serde(default)]
    pub description: Option<String>,
    /// Every other key, in declaration order.
    #[serde(flatten)]
    pub properties: OrderedMap<serde_yaml::Value>,
}

impl RoleDescriptor {
    /// Extra file kinds declared for this role via an `additional_extensions`
    /// property. Accepts a list or a single string.
    pub fn additional_extensions(&self) -> Vec<String> {
        match self.properties.get("additional_extensions") {
            Some(serde_yaml::Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(serde_yaml::Value::String(single)) => vec![single.clone()],
            _ => Vec::new(),
        }
    }

    /// `key: value` pairs for the structural table, `None` when empty.
    pub fn properties_summary(&self) -> Option<String> {
        if self.properties.is_empty() {
            return None;
        }
        Some(
            self.properties
                .iter()
                .map(|(k, v)| format!("{k}: {}", display_value(v)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlainSet {
    pub description: Option<String>,
    pub additional_extensions: Vec<String>,
    /// Other suffixes whose outputs feed this one.
    #[serde(alias = "include_cross_modal")]
    pub cross_modal: Vec<String>,
}

/// How two organizing entities combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Nested: one list per value of the first entity.
    #[default]
    #[serde(alias = "nested", alias = "sequential")]
    Hierarchical,
    /// Concatenated into one list.
    Flat,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hierarchical => f.write_str("hierarchical"),
            Order::Flat => f.write_str("flat"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SequentialSet {
    pub by_entity: Option<String>,
    pub by_entities: Vec<String>,
    pub order: Order,
}

/// The organizing dimension(s) of a sequential set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Organization<'a> {
    Single(&'a str),
    Pair {
        outer: &'a str,
        inner: &'a str,
        order: Order,
    },
}

/// Dimension name used when a sequential set declares no entity at all.
pub const DEFAULT_DIMENSION: &str = "index";

impl SequentialSet {
    /// `by_entity` wins over `by_entities`; only the first two entities of
    /// `by_entities` organize the diagram.
    pub fn organization(&self) -> Organization<'_> {
        if let Some(entity) = self.by_entity.as_deref() {
            return Organization::Single(entity);
        }
        match self.by_entities.as_slice() {
            [] => Organization::Single(DEFAULT_DIMENSION),
            [only] => Organization::Single(only.as_str()),
            [outer, inner, rest @ ..] => {
                if !rest.is_empty() {
                    debug!(
                        ignored = rest.len(),
                        "Sequential set declares more than two entities; using the first two"
                    );
                }
                Organization::Pair {
                    outer: outer.as_str(),
                    inner: inner.as_str(),
                    order: self.order,
                }
            }
        }
    }
}

fn default_named_dimension() -> String {
    "group".to_string()
}

fn default_sequential_dimension() -> String {
    DEFAULT_DIMENSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MixedSet {
    #[serde(default = "default_named_dimension")]
    pub named_dimension: String,
    #[serde(default = "default_sequential_dimension")]
    pub sequential_dimension: String,
    #[serde(default)]
    pub named_groups: OrderedMap<RoleDescriptor>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for MixedSet {
    fn default() -> Self {
        MixedSet {
            named_dimension: default_named_dimension(),
            sequential_dimension: default_sequential_dimension(),
            named_groups: OrderedMap::new(),
            required: Vec::new(),
        }
    }
}

/// One suffix definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuffixEntry {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub maps_to: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub plain_set: Option<PlainSet>,
    #[serde(default, deserialize_with = "present")]
    pub named_set: Option<OrderedMap<RoleDescriptor>>,
    #[serde(default, deserialize_with = "present")]
    pub sequential_set: Option<SequentialSet>,
    #[serde(default, deserialize_with = "present")]
    pub mixed_set: Option<MixedSet>,
    /// Extra file kinds carried by an alias entry.
    #[serde(default)]
    pub additional_extensions: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub example_output: Option<PathBuf>,
}

impl SuffixEntry {
    /// The entry's configured description: the top-level field, else the
    /// plain set's.
    pub fn own_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or_else(|| self.plain_set.as_ref()?.description.as_deref())
            .filter(|d| !d.trim().is_empty())
    }

    /// Required role or group names from the top level and the mixed set,
    /// deduplicated in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        let nested = self.mixed_set.iter().flat_map(|m| m.required.iter());
        let mut names: Vec<&str> = Vec::new();
        for name in self.required.iter().chain(nested) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}

/// The whole configuration, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, SuffixEntry)>,
}

impl Schema {
    /// Parses schema text. Entry order follows the document.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let root: serde_yaml::Value = serde_yaml::from_str(text)?;
        let mapping = match root {
            serde_yaml::Value::Mapping(mapping) => mapping,
            serde_yaml::Value::Null => {
                warn!("Schema document is empty");
                serde_yaml::Mapping::new()
            }
            _ => return Err(SchemaError::NotAMapping),
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = match key {
                serde_yaml::Value::String(name) => name,
                other => return Err(SchemaError::InvalidKey(format!("{other:?}"))),
            };
            let entry = if value.is_null() {
                SuffixEntry::default()
            } else {
                serde_yaml::from_value(value).map_err(|source| SchemaError::InvalidEntry {
                    name: name.clone(),
                    source,
                })?
            };
            entries.push((name, entry));
        }
        info!(entries = entries.len(), "Parsed suffix schema");
        Ok(Schema { entries })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SuffixEntry)>,
        S: Into<String>,
    {
        Schema {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &SuffixEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&SuffixEntry> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders a YAML scalar or collection the way it reads in the source file.
pub fn display_value(value: &serde_yaml::Value) -> String {
    use serde_yaml::Value;
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => format!(
            "[{}]",
            items.iter().map(display_value).collect::<Vec<_>>().join(", ")
        ),
        Value::Mapping(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", display_value(k), display_value(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Value::Tagged(tagged) => display_value(&tagged.value),
    }
}

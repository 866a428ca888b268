//! Variant classification and the shape view every renderer dispatches on.
//!
//! [`classify`] assigns a suffix definition exactly one [`Variant`] by testing
//! shape fields in a fixed priority order. [`resolve`] then turns the
//! definition into a [`Shape`], the single tagged union the diagram, example
//! and table renderers switch on. Alias entries never get a shape of their
//! own: they borrow the structured shape they point at, or render as a
//! plain bundle when there is nothing to borrow.

use tracing::{debug, warn};

use crate::schema::{
    MixedSet, OrderedMap, PlainSet, RoleDescriptor, Schema, SequentialSet, SuffixEntry,
};

/// Structural shape of a suffix definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Plain,
    Named,
    Sequential,
    Mixed,
    Special,
}

impl Variant {
    /// Section order of the rendered document.
    pub const SECTION_ORDER: [Variant; 5] = [
        Variant::Plain,
        Variant::Named,
        Variant::Sequential,
        Variant::Mixed,
        Variant::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Named => "named",
            Variant::Sequential => "sequential",
            Variant::Mixed => "mixed",
            Variant::Special => "special",
        }
    }

    pub fn section_title(&self) -> &'static str {
        match self {
            Variant::Plain => "Plain Sets",
            Variant::Named => "Named Sets",
            Variant::Sequential => "Sequential Sets",
            Variant::Mixed => "Mixed Sets",
            Variant::Special => "Special Sets",
        }
    }

    /// One-sentence description printed under the section heading.
    pub fn description(&self) -> &'static str {
        match self {
            Variant::Plain => "Plain sets bundle a primary data file with its JSON sidecar and any additional file extensions.",
            Variant::Named => "Named sets define specific collections of files with predefined names and properties.",
            Variant::Sequential => "Sequential sets define collections of files organized by one or two BIDS entities.",
            Variant::Mixed => "Mixed sets combine named groups, each of which varies along a sequential dimension.",
            Variant::Special => "Special sets are aliases that map onto another suffix definition and inherit its structure.",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns the variant tag. Priority: `maps_to`, `plain_set`, `named_set`,
/// `sequential_set`, `mixed_set`; the first field present wins. `None` means
/// the entry matches no shape and is left out of the document.
pub fn classify(entry: &SuffixEntry) -> Option<Variant> {
    if entry.maps_to.is_some() {
        Some(Variant::Special)
    } else if entry.plain_set.is_some() {
        Some(Variant::Plain)
    } else if entry.named_set.is_some() {
        Some(Variant::Named)
    } else if entry.sequential_set.is_some() {
        Some(Variant::Sequential)
    } else if entry.mixed_set.is_some() {
        Some(Variant::Mixed)
    } else {
        None
    }
}

/// Plain bundle: primary, optional sidecar, extra kinds, cross-modal inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainView<'a> {
    pub extensions: &'a [String],
    pub cross_modal: &'a [String],
}

impl<'a> PlainView<'a> {
    fn of(set: &'a PlainSet) -> Self {
        PlainView {
            extensions: &set.additional_extensions,
            cross_modal: &set.cross_modal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedView<'a> {
    pub roles: &'a OrderedMap<RoleDescriptor>,
    /// Required names that exist among the roles.
    pub required: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixedView<'a> {
    pub set: &'a MixedSet,
    /// Required names that exist among the groups.
    pub required: Vec<&'a str>,
}

/// What a renderer draws. Every variant maps onto one of these four.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    Plain(PlainView<'a>),
    Named(NamedView<'a>),
    Sequential(&'a SequentialSet),
    Mixed(MixedView<'a>),
}

impl Shape<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Plain(_) => "plain",
            Shape::Named(_) => "named",
            Shape::Sequential(_) => "sequential",
            Shape::Mixed(_) => "mixed",
        }
    }
}

/// Alias details of a special entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias<'a> {
    pub target: &'a str,
    /// Whether the target exists in the schema.
    pub target_found: bool,
    pub extensions: &'a [String],
}

/// A classified entry ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub variant: Variant,
    pub shape: Shape<'a>,
    pub alias: Option<Alias<'a>>,
}

/// Classifies `entry` and builds its rendering shape. Returns `None` for
/// entries the classifier cannot place.
pub fn resolve<'a>(name: &str, entry: &'a SuffixEntry, schema: &'a Schema) -> Option<Resolved<'a>> {
    let variant = classify(entry)?;
    let resolved = match variant {
        Variant::Special => {
            let target = entry.maps_to.as_deref().unwrap_or_default();
            let shape = delegate_shape(name, entry, schema).unwrap_or_else(|| {
                debug!(entry = %name, target = %target, "Alias has no structured shape to borrow; rendering as plain");
                Shape::Plain(PlainView {
                    extensions: &entry.additional_extensions,
                    cross_modal: &[],
                })
            });
            Resolved {
                variant,
                shape,
                alias: Some(Alias {
                    target,
                    target_found: schema.get(target).is_some(),
                    extensions: &entry.additional_extensions,
                }),
            }
        }
        Variant::Plain => Resolved {
            variant,
            shape: Shape::Plain(PlainView::of(entry.plain_set.as_ref()?)),
            alias: None,
        },
        _ => Resolved {
            variant,
            shape: structured_shape(name, entry)?,
            alias: None,
        },
    };
    Some(resolved)
}

/// The named, sequential or mixed shape an entry carries, in that priority.
fn structured_shape<'a>(name: &str, entry: &'a SuffixEntry) -> Option<Shape<'a>> {
    if let Some(roles) = entry.named_set.as_ref() {
        let required = known_required(name, entry, |n| roles.contains_key(n));
        return Some(Shape::Named(NamedView { roles, required }));
    }
    if let Some(set) = entry.sequential_set.as_ref() {
        return Some(Shape::Sequential(set));
    }
    if let Some(set) = entry.mixed_set.as_ref() {
        let required = known_required(name, entry, |n| set.named_groups.contains_key(n));
        return Some(Shape::Mixed(MixedView { set, required }));
    }
    None
}

/// Required names filtered to those the entry defines; dangling references
/// are skipped.
fn known_required<'a>(
    name: &str,
    entry: &'a SuffixEntry,
    exists: impl Fn(&str) -> bool,
) -> Vec<&'a str> {
    entry
        .required_names()
        .into_iter()
        .filter(|required| {
            let known = exists(required);
            if !known {
                warn!(entry = %name, required = %required, "Required name is not defined in the set; skipping it");
            }
            known
        })
        .collect()
}

/// Follows an alias to a structured shape: the alias's own co-existing shape
/// field first, then the chain of `maps_to` targets.
fn delegate_shape<'a>(name: &str, entry: &'a SuffixEntry, schema: &'a Schema) -> Option<Shape<'a>> {
    if let Some(shape) = structured_shape(name, entry) {
        return Some(shape);
    }
    let mut visited: Vec<&str> = vec![name];
    let mut current = entry;
    while let Some(target) = current.maps_to.as_deref() {
        if visited.contains(&target) {
            warn!(entry = %name, target = %target, "Alias chain loops back on itself");
            return None;
        }
        visited.push(target);
        current = match schema.get(target) {
            Some(next) => next,
            None => {
                warn!(entry = %name, target = %target, "Alias target is not defined in the schema");
                return None;
            }
        };
        if let Some(shape) = structured_shape(target, current) {
            return Some(shape);
        }
    }
    None
}

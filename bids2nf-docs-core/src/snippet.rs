//! Access-path examples: Groovy statements showing how a pipeline reaches
//! each file of an entry in the `bids_files` channel map.
//!
//! With a sample record every statement that reads a value carries it as a
//! trailing comment. Without one the same statements are emitted against the
//! configured roles, kinds and placeholder indices `0` and `1`. The block is
//! never empty.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::schema::{Order, Organization, SequentialSet, PRIMARY_KIND, SIDECAR_KIND};
use crate::variant::{MixedView, NamedView, PlainView, Shape};

/// Channel map the statements read from.
pub const RECEIVER: &str = "bids_files";

/// Ordered statements for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleBlock {
    pub statements: Vec<String>,
    /// Whether sample values were used.
    pub from_sample: bool,
}

impl ExampleBlock {
    pub fn render(&self) -> String {
        let mut out = self.statements.join("\n");
        out.push('\n');
        out
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("identifier pattern is valid"))
}

/// Groovy variable name from path segments.
fn variable(parts: &[&str]) -> String {
    identifier_pattern()
        .replace_all(&parts.join("_"), "_")
        .into_owned()
}

fn accessor(name: &str, path: &[&str]) -> String {
    let mut out = format!("{RECEIVER}['{name}']");
    for segment in path {
        out.push_str(&format!("['{segment}']"));
    }
    out
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `def <var> = <expr>`, with the sample value as a comment when known.
fn statement(var: &str, expr: &str, sample: Option<String>) -> String {
    match sample {
        Some(value) => format!("def {var} = {expr}  // {value}"),
        None => format!("def {var} = {expr}"),
    }
}

/// Keys of a sample object, primary kind first, sidecar second.
fn ordered_kinds(record: &serde_json::Map<String, Value>) -> Vec<&str> {
    let mut kinds: Vec<&str> = [PRIMARY_KIND, SIDECAR_KIND]
        .into_iter()
        .filter(|k| record.contains_key(*k))
        .collect();
    kinds.extend(
        record
            .keys()
            .map(String::as_str)
            .filter(|k| *k != PRIMARY_KIND && *k != SIDECAR_KIND),
    );
    kinds
}

/// The list-valued kind a sequence is read through: the primary kind when
/// present, else the first kind holding a list.
fn sequence_kind(record: &serde_json::Map<String, Value>) -> Option<(&str, &Vec<Value>)> {
    if let Some(Value::Array(items)) = record.get(PRIMARY_KIND) {
        return Some((PRIMARY_KIND, items));
    }
    record.iter().find_map(|(k, v)| match v {
        Value::Array(items) => Some((k.as_str(), items)),
        _ => None,
    })
}

/// Builds the example block for an entry's shape, using `sample` when it is
/// the entry's record from real example data.
pub fn build_examples(name: &str, shape: &Shape<'_>, sample: Option<&Value>) -> ExampleBlock {
    let (mut statements, from_sample) = match shape {
        Shape::Plain(view) => plain_examples(name, view, sample),
        Shape::Named(view) => named_examples(name, view, sample),
        Shape::Sequential(set) => sequential_examples(name, set, sample),
        Shape::Mixed(view) => mixed_examples(name, view, sample),
    };
    if statements.is_empty() {
        statements.push(statement(&variable(&[name]), &accessor(name, &[]), None));
    }
    ExampleBlock {
        statements,
        from_sample,
    }
}

/// One direct access per kind of an object record, each with its value.
fn kind_statements(name: &str, record: &serde_json::Map<String, Value>) -> Vec<String> {
    ordered_kinds(record)
        .into_iter()
        .map(|kind| {
            statement(
                &variable(&[name, kind]),
                &accessor(name, &[kind]),
                record.get(kind).map(literal),
            )
        })
        .collect()
}

/// Access to the whole entry, carrying a scalar record's value.
fn entry_statement(name: &str, value: &Value) -> String {
    statement(&variable(&[name]), &accessor(name, &[]), Some(literal(value)))
}

fn plain_examples(name: &str, view: &PlainView<'_>, sample: Option<&Value>) -> (Vec<String>, bool) {
    match sample {
        Some(Value::Object(record)) if !record.is_empty() => {
            return (kind_statements(name, record), true);
        }
        Some(Value::Object(_)) | Some(Value::Null) | None => {}
        Some(scalar) => return (vec![entry_statement(name, scalar)], true),
    }
    let kinds = [PRIMARY_KIND, SIDECAR_KIND]
        .into_iter()
        .chain(view.extensions.iter().map(String::as_str));
    let statements = kinds
        .map(|kind| statement(&variable(&[name, kind]), &accessor(name, &[kind]), None))
        .collect();
    (statements, false)
}

fn named_examples(name: &str, view: &NamedView<'_>, sample: Option<&Value>) -> (Vec<String>, bool) {
    let record = sample.and_then(Value::as_object);
    let mut used_sample = false;
    let mut statements = Vec::new();
    for role in view.roles.keys() {
        let role_record = record
            .and_then(|r| r.get(role))
            .and_then(Value::as_object);
        for kind in [PRIMARY_KIND, SIDECAR_KIND] {
            let value = role_record.and_then(|r| r.get(kind)).map(literal);
            used_sample |= value.is_some();
            statements.push(statement(
                &variable(&[name, role, kind]),
                &accessor(name, &[role, kind]),
                value,
            ));
        }
    }
    (statements, used_sample)
}

fn suffixed_variable(prefix: &[&str], suffix: &str) -> String {
    let mut parts: Vec<&str> = prefix.to_vec();
    parts.push(suffix);
    variable(&parts)
}

/// Count, first and (when it exists) second item of one sequence.
fn sequence_statements(
    prefix: &[&str],
    expr: &str,
    items: Option<&Vec<Value>>,
) -> Vec<String> {
    let var = |suffix: &str| suffixed_variable(prefix, suffix);
    let mut out = vec![statement(
        &var("count"),
        &format!("{expr}.size()"),
        items.map(|i| i.len().to_string()),
    )];
    match items {
        Some(items) => {
            if let Some(first) = items.first() {
                out.push(statement(&var("first"), &format!("{expr}[0]"), Some(literal(first))));
            }
            if let Some(second) = items.get(1) {
                out.push(statement(&var("second"), &format!("{expr}[1]"), Some(literal(second))));
            }
        }
        None => {
            out.push(statement(&var("first"), &format!("{expr}[0]"), None));
            out.push(statement(&var("second"), &format!("{expr}[1]"), None));
        }
    }
    out
}

fn sequential_examples(
    name: &str,
    set: &SequentialSet,
    sample: Option<&Value>,
) -> (Vec<String>, bool) {
    let (expr, items) = match sample {
        Some(Value::Object(record)) => match sequence_kind(record) {
            Some((kind, items)) => (accessor(name, &[kind]), Some(items)),
            None if !record.is_empty() => return (kind_statements(name, record), true),
            None => (accessor(name, &[PRIMARY_KIND]), None),
        },
        Some(Value::Array(items)) => (accessor(name, &[]), Some(items)),
        Some(Value::Null) | None => (accessor(name, &[PRIMARY_KIND]), None),
        Some(scalar) => return (vec![entry_statement(name, scalar)], true),
    };

    let statements = match set.organization() {
        Organization::Single(_) => sequence_statements(&[name], &expr, items),
        Organization::Pair {
            outer,
            inner,
            order: Order::Flat,
        } => {
            let dimension = format!("{outer}_{inner}");
            sequence_statements(&[name, dimension.as_str()], &expr, items)
        }
        Organization::Pair {
            outer,
            inner,
            order: Order::Hierarchical,
        } => nested_statements(name, outer, inner, &expr, items),
    };
    (statements, items.is_some())
}

/// Outer count, inner count at index 0, and the first item.
fn nested_statements(
    name: &str,
    outer: &str,
    inner: &str,
    expr: &str,
    items: Option<&Vec<Value>>,
) -> Vec<String> {
    let mut out = vec![statement(
        &variable(&[name, outer, "count"]),
        &format!("{expr}.size()"),
        items.map(|i| i.len().to_string()),
    )];
    let first_bucket = match items {
        Some(items) => match items.first() {
            Some(Value::Array(bucket)) => Some(bucket),
            Some(single) => {
                out.push(statement(
                    &variable(&[name, "first"]),
                    &format!("{expr}[0]"),
                    Some(literal(single)),
                ));
                return out;
            }
            None => return out,
        },
        None => None,
    };
    out.push(statement(
        &variable(&[name, inner, "count"]),
        &format!("{expr}[0].size()"),
        first_bucket.map(|b| b.len().to_string()),
    ));
    match first_bucket {
        Some(bucket) => {
            if let Some(first) = bucket.first() {
                out.push(statement(
                    &variable(&[name, "first"]),
                    &format!("{expr}[0][0]"),
                    Some(literal(first)),
                ));
            }
        }
        None => out.push(statement(
            &variable(&[name, "first"]),
            &format!("{expr}[0][0]"),
            None,
        )),
    }
    out
}

fn mixed_examples(name: &str, view: &MixedView<'_>, sample: Option<&Value>) -> (Vec<String>, bool) {
    let record = sample.and_then(Value::as_object);
    let mut used_sample = false;
    let mut statements = Vec::new();
    for group in view.set.named_groups.keys() {
        let group_value = record.and_then(|r| r.get(group)).filter(|v| !v.is_null());
        let (path, value): (Vec<&str>, Option<&Value>) = match group_value {
            Some(Value::Object(kinds)) => match kinds.get(PRIMARY_KIND) {
                Some(v) => (vec![group, PRIMARY_KIND], Some(v)),
                None => match kinds.iter().next() {
                    Some((k, v)) => (vec![group, k.as_str()], Some(v)),
                    None => (vec![group, PRIMARY_KIND], None),
                },
            },
            Some(other) => (vec![group], Some(other)),
            None => (vec![group, PRIMARY_KIND], None),
        };
        let expr = accessor(name, &path);
        match value {
            Some(Value::Array(items)) => {
                used_sample = true;
                statements.extend(sequence_statements(&[name, group], &expr, Some(items)));
            }
            Some(single) => {
                used_sample = true;
                let mut parts = vec![name];
                parts.extend(path.iter().copied());
                statements.push(statement(&variable(&parts), &expr, Some(literal(single))));
            }
            None => statements.extend(sequence_statements(&[name, group], &expr, None)),
        }
    }
    (statements, used_sample)
}

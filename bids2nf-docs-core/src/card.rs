//! One documentation card per suffix: summary, metadata, diagram,
//! structural table, access examples and note.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::contract::ExampleSource;
use crate::diagram::{build_diagram, Diagram};
use crate::fallback::{resolve_example, Resolution};
use crate::metadata::{enrich, Enrichment, MetadataCatalog};
use crate::schema::{
    Organization, OrderedMap, RoleDescriptor, Schema, SuffixEntry, PRIMARY_KIND,
    SIDECAR_KIND,
};
use crate::snippet::{build_examples, ExampleBlock};
use crate::variant::{resolve, Alias, PlainView, Resolved, Shape, Variant};

/// A row of the role/group table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub description: String,
    pub properties: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// First column heading: `Role` or `Group`.
    pub key_heading: &'static str,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub variant: Variant,
    /// `(label, value)` summary lines.
    pub summary: Vec<(String, String)>,
    pub enrichment: Enrichment,
    pub diagram: Diagram,
    pub table: Option<Table>,
    pub examples: ExampleBlock,
    pub note: Option<String>,
    pub resolution: Resolution,
}

fn anchor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9_-]+").expect("anchor pattern is valid"))
}

/// Markdown heading anchor for an entry name.
pub fn anchor(name: &str) -> String {
    anchor_pattern()
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

fn code_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(|s| format!("`{}`", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Builds the card for one entry, or `None` when the classifier cannot
/// place it.
pub fn build_card(
    name: &str,
    entry: &SuffixEntry,
    schema: &Schema,
    catalog: &MetadataCatalog,
    examples: &dyn ExampleSource,
) -> Option<Card> {
    let resolved = resolve(name, entry, schema)?;
    let enrichment = enrich(catalog, name, entry.own_description());
    let diagram = build_diagram(name, &resolved.shape);
    let resolution = resolve_example(name, entry, examples);
    let example_block = build_examples(name, &resolved.shape, resolution.record());
    debug!(
        entry = %name,
        variant = %resolved.variant,
        statements = example_block.statements.len(),
        from_sample = example_block.from_sample,
        "Assembled card"
    );

    Some(Card {
        name: name.to_string(),
        variant: resolved.variant,
        summary: summary(&resolved),
        enrichment,
        diagram,
        table: table(&resolved.shape),
        examples: example_block,
        note: entry.note.clone().filter(|n| !n.trim().is_empty()),
        resolution,
    })
}

fn summary(resolved: &Resolved<'_>) -> Vec<(String, String)> {
    if let Some(alias) = &resolved.alias {
        return alias_summary(alias, &resolved.shape);
    }
    shape_summary(&resolved.shape)
}

fn alias_summary(alias: &Alias<'_>, shape: &Shape<'_>) -> Vec<(String, String)> {
    let target = if alias.target_found {
        format!("[{}](#{})", alias.target, anchor(alias.target))
    } else {
        format!("`{}` (not defined in this configuration)", alias.target)
    };
    let mut lines = vec![("Maps to".to_string(), target)];
    if !alias.extensions.is_empty() {
        lines.push((
            "Additional extensions".to_string(),
            code_list(alias.extensions),
        ));
    }
    lines.push(("Renders as".to_string(), format!("{} set", shape.kind())));
    lines
}

fn plain_kinds<'a>(view: &PlainView<'a>) -> Vec<&'a str> {
    let mut kinds = vec![PRIMARY_KIND, SIDECAR_KIND];
    kinds.extend(view.extensions.iter().map(String::as_str));
    kinds
}

fn shape_summary(shape: &Shape<'_>) -> Vec<(String, String)> {
    match shape {
        Shape::Plain(view) => {
            let mut lines = vec![("Extensions".to_string(), code_list(&plain_kinds(view)))];
            if !view.cross_modal.is_empty() {
                lines.push((
                    "Cross-modal inputs".to_string(),
                    code_list(view.cross_modal),
                ));
            }
            lines
        }
        Shape::Named(view) => vec![("Required files".to_string(), code_list(&view.required))],
        Shape::Sequential(set) => match set.organization() {
            Organization::Single(entity) => {
                vec![("Organized by entity".to_string(), format!("`{entity}`"))]
            }
            Organization::Pair {
                outer,
                inner,
                order,
            } => vec![(
                "Organized by entities".to_string(),
                format!("`{outer}`, `{inner}` ({order} order)"),
            )],
        },
        Shape::Mixed(view) => vec![
            (
                "Dimensions".to_string(),
                format!(
                    "`{}` (named) x `{}` (sequential)",
                    view.set.named_dimension, view.set.sequential_dimension
                ),
            ),
            ("Required groups".to_string(), code_list(&view.required)),
        ],
    }
}

fn rows(items: &OrderedMap<RoleDescriptor>, required: &[&str]) -> Vec<TableRow> {
    items
        .iter()
        .map(|(key, descriptor)| TableRow {
            name: key.to_string(),
            description: descriptor
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            properties: descriptor
                .properties_summary()
                .unwrap_or_else(|| "None".to_string()),
            required: required.contains(&key),
        })
        .collect()
}

fn table(shape: &Shape<'_>) -> Option<Table> {
    match shape {
        Shape::Named(view) => Some(Table {
            key_heading: "Role",
            rows: rows(view.roles, &view.required),
        }),
        Shape::Mixed(view) => Some(Table {
            key_heading: "Group",
            rows: rows(&view.set.named_groups, &view.required),
        }),
        Shape::Plain(_) | Shape::Sequential(_) => None,
    }
}

impl Card {
    /// Markdown for this card, ending with a blank line.
    pub fn render(&self) -> String {
        let mut out = format!("### {}\n\n", self.name);

        for (label, value) in &self.summary {
            out.push_str(&format!("- **{label}:** {value}\n"));
        }
        out.push('\n');

        if let Some(display_name) = self.enrichment.distinct_display_name() {
            out.push_str(&format!("**Display name:** {display_name}\n\n"));
        }
        if let Some(description) = &self.enrichment.description {
            out.push_str(description);
            out.push_str("\n\n");
        }

        out.push_str("```mermaid\n");
        out.push_str(&self.diagram.to_mermaid());
        out.push_str("```\n\n");

        if let Some(table) = &self.table {
            out.push_str(&format!(
                "| {} | Description | Properties |\n|------|-------------|------------|\n",
                table.key_heading
            ));
            for row in &table.rows {
                let name = if row.required {
                    format!("**{}** (required)", table_cell(&row.name))
                } else {
                    table_cell(&row.name)
                };
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    name,
                    table_cell(&row.description),
                    table_cell(&row.properties)
                ));
            }
            out.push('\n');
        }

        out.push_str("**Example access**\n\n```groovy\n");
        out.push_str(&self.examples.render());
        out.push_str("```\n\n");

        if let Some(note) = &self.note {
            let quoted = note
                .trim_end()
                .lines()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("> **Note:** {line}")
                    } else {
                        format!("> {line}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            out.push_str(&quoted);
            out.push_str("\n\n");
        }
        out
    }
}


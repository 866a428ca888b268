//! Document assembly: cards grouped into fixed-order sections, a shared
//! legend and a footer.
//!
//! Output is a pure function of the schema order, the metadata catalog and
//! the example data, so two runs over the same inputs are byte-identical.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::card::{build_card, Card};
use crate::config::DocumentOptions;
use crate::contract::ExampleSource;
use crate::fallback::Resolution;
use crate::metadata::MetadataCatalog;
use crate::schema::Schema;
use crate::variant::Variant;

/// What happened while rendering, for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Cards rendered per variant.
    pub cards: BTreeMap<Variant, usize>,
    /// Entries the classifier could not place, in schema order.
    pub skipped: Vec<String>,
    /// Entries whose example data failed to load.
    pub example_errors: Vec<String>,
    /// Entries whose examples use real sample values.
    pub sampled: Vec<String>,
}

impl RenderReport {
    pub fn total_cards(&self) -> usize {
        self.cards.values().sum()
    }

    pub fn cards_for(&self, variant: Variant) -> usize {
        self.cards.get(&variant).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub markdown: String,
    pub report: RenderReport,
}

/// The shared legend explaining diagram and example conventions.
pub fn legend() -> String {
    let mut out = String::from("## Legend\n\n");
    out.push_str("| Element | Meaning |\n|---------|---------|\n");
    out.push_str("| Solid arrow (`-->`) | Structurally required relationship |\n");
    out.push_str("| Dashed arrow (`-.->`) | Optional relationship: optional file kind or extra extension |\n");
    out.push_str("| Thick arrow (`==>`) | Cross-modal dependency: another suffix's files feed this one |\n");
    out.push_str("| `main` style | The suffix being documented |\n");
    out.push_str("| `group` style | Collections, roles, groups, dimensions and index positions |\n");
    out.push_str("| `file` style | Files always present (`nii` data, `json` sidecar) |\n");
    out.push_str("| `optional` style (dashed outline) | Files that may be absent |\n");
    out.push_str("| `required` style (bold red outline) | Roles or groups listed as required |\n");
    out.push_str("| `crossmodal` style | Cross-modal inputs |\n");
    out.push_str("| `...` node | Further index positions follow the same pattern |\n\n");
    out.push_str("Example blocks read from the `bids_files` map emitted for each grouping. ");
    out.push_str("Values in trailing comments come from real example data; blocks without them show the generic access pattern.\n");
    out
}

/// Renders every classifiable entry of `schema` into one Markdown document.
pub fn render_document(
    schema: &Schema,
    catalog: &MetadataCatalog,
    examples: &dyn ExampleSource,
    options: &DocumentOptions,
) -> RenderedDocument {
    let mut report = RenderReport::default();
    let mut cards: Vec<Card> = Vec::with_capacity(schema.len());

    for (name, entry) in schema.entries() {
        match build_card(name, entry, schema, catalog, examples) {
            Some(card) => {
                if card.examples.from_sample {
                    report.sampled.push(name.to_string());
                }
                if let Resolution::Error(_) = card.resolution {
                    report.example_errors.push(name.to_string());
                }
                *report.cards.entry(card.variant).or_insert(0) += 1;
                cards.push(card);
            }
            None => {
                warn!(entry = %name, "Suffix matches no known set shape; leaving it out of the document");
                report.skipped.push(name.to_string());
            }
        }
    }

    let mut out = format!("# {}\n\n{}\n\n", options.title, options.intro);
    for variant in Variant::SECTION_ORDER {
        let section: Vec<&Card> = cards.iter().filter(|c| c.variant == variant).collect();
        if section.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "## {}\n\n{}\n\n",
            variant.section_title(),
            variant.description()
        ));
        for card in section {
            out.push_str(&card.render());
        }
    }
    out.push_str(&legend());
    out.push_str(&format!(
        "\n---\n\n*This documentation is automatically generated from `{}`.*\n",
        options.source_name
    ));

    info!(
        cards = report.total_cards(),
        skipped = report.skipped.len(),
        example_errors = report.example_errors.len(),
        "Rendered document"
    );
    RenderedDocument {
        markdown: out,
        report,
    }
}

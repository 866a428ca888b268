//! Top-level pipeline: metadata lookup, then document rendering.
//!
//! The only suspend point is the metadata fetch. Everything after it is a
//! synchronous pass over the schema in declaration order.
//!
//! # Error Handling
//! Nothing here fails. A missing catalog renders without enrichment,
//! missing example data renders placeholders, unclassifiable entries are
//! reported in [`RenderReport::skipped`](crate::document::RenderReport).

use tracing::info;

use crate::config::DocumentOptions;
use crate::contract::{ExampleSource, MetadataSource};
use crate::document::{render_document, RenderedDocument};
use crate::schema::Schema;

pub async fn generate<M, E>(
    schema: &Schema,
    metadata: &M,
    examples: &E,
    options: &DocumentOptions,
) -> RenderedDocument
where
    M: MetadataSource + ?Sized,
    E: ExampleSource,
{
    info!(entries = schema.len(), "[GENERATE] Starting documentation generation");
    options.trace_loaded();

    let catalog = metadata.fetch_catalog().await;
    if catalog.is_empty() {
        info!("[GENERATE] No external metadata available; using configured descriptions only");
    } else {
        info!(records = catalog.len(), "[GENERATE] Fetched external metadata");
    }

    let document = render_document(schema, &catalog, examples, options);
    info!(
        cards = document.report.total_cards(),
        bytes = document.markdown.len(),
        "[GENERATE] Documentation generated"
    );
    document
}

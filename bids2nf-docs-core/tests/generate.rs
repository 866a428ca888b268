// End-to-end pipeline with a mocked metadata source.

use bids2nf_docs_core::config::DocumentOptions;
use bids2nf_docs_core::contract::{MockMetadataSource, NoExamples, StaticMetadata};
use bids2nf_docs_core::generate::generate;
use bids2nf_docs_core::metadata::{MetadataCatalog, MetadataRecord};
use bids2nf_docs_core::schema::Schema;

const SCHEMA: &str = "T1w:\n  plain_set:\n    description: \"Configured\"\nT2w:\n  plain_set: {}\n";

#[tokio::test]
async fn test_generate_fetches_metadata_once() {
    let schema = Schema::from_yaml_str(SCHEMA).expect("schema parses");
    let mut metadata = MockMetadataSource::new();
    metadata.expect_fetch_catalog().times(1).returning(|| {
        vec![(
            "T2w",
            MetadataRecord {
                display_name: Some("T2-weighted image".to_string()),
                description: Some("From the catalog".to_string()),
            },
        )]
        .into_iter()
        .collect()
    });

    let doc = generate(&schema, &metadata, &NoExamples, &DocumentOptions::default()).await;
    assert_eq!(doc.report.total_cards(), 2);
    assert!(doc.markdown.contains("Configured\n"));
    assert!(doc.markdown.contains("**Display name:** T2-weighted image\n"));
    assert!(doc.markdown.contains("From the catalog\n"));
}

#[tokio::test]
async fn test_generate_with_empty_catalog_still_renders() {
    let schema = Schema::from_yaml_str(SCHEMA).expect("schema parses");
    let metadata = StaticMetadata(MetadataCatalog::new());
    let doc = generate(&schema, &metadata, &NoExamples, &DocumentOptions::default()).await;
    assert!(doc.markdown.contains("### T1w"));
    assert!(doc.markdown.contains("### T2w"));
    assert!(!doc.markdown.contains("Display name"));
}

// Metadata catalog parsing and description precedence.

use bids2nf_docs_core::metadata::{enrich, DescriptionSource, MetadataCatalog, MetadataRecord};
use serde_json::json;

fn record(display_name: Option<&str>, description: Option<&str>) -> MetadataRecord {
    MetadataRecord {
        display_name: display_name.map(str::to_string),
        description: description.map(str::to_string),
    }
}

#[test]
fn test_catalog_from_published_schema_layout() {
    let document = json!({
        "objects": {
            "suffixes": {
                "T1weighted": {
                    "value": "T1w",
                    "display_name": "T1-weighted image",
                    "description": "In arbitrary units (arbitrary).",
                    "unit": "arbitrary"
                },
                "bold": {
                    "display_name": "Blood-Oxygen-Level Dependent image"
                },
                "broken": 3
            }
        }
    });
    let catalog = MetadataCatalog::from_json(&document);
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("T1w").and_then(|r| r.display_name.as_deref()),
        Some("T1-weighted image")
    );
    assert!(catalog.get("T1weighted").is_none());
    assert!(catalog.get("bold").is_some());
}

#[test]
fn test_catalog_from_flat_mapping_and_garbage() {
    let flat = json!({"T2w": {"description": "T2-weighted"}});
    assert_eq!(MetadataCatalog::from_json(&flat).len(), 1);
    assert!(MetadataCatalog::from_json(&json!([1, 2, 3])).is_empty());
}

struct TestCase {
    name: &'static str,
    external: Option<MetadataRecord>,
    own: Option<&'static str>,
    expected_description: Option<&'static str>,
    expected_source: DescriptionSource,
    expected_display: &'static str,
}

#[test]
fn test_enrich_precedence_table_driven() {
    let cases = vec![
        TestCase {
            name: "external description wins",
            external: Some(record(Some("T1-weighted image"), Some("External text"))),
            own: Some("Configured text"),
            expected_description: Some("External text"),
            expected_source: DescriptionSource::External,
            expected_display: "T1-weighted image",
        },
        TestCase {
            name: "blank external falls back to configured",
            external: Some(record(None, Some("   "))),
            own: Some("Configured text"),
            expected_description: Some("Configured text"),
            expected_source: DescriptionSource::Configured,
            expected_display: "T1w",
        },
        TestCase {
            name: "no record uses configured",
            external: None,
            own: Some("Configured text"),
            expected_description: Some("Configured text"),
            expected_source: DescriptionSource::Configured,
            expected_display: "T1w",
        },
        TestCase {
            name: "nothing anywhere",
            external: None,
            own: None,
            expected_description: None,
            expected_source: DescriptionSource::Missing,
            expected_display: "T1w",
        },
    ];

    for case in cases {
        let mut catalog = MetadataCatalog::new();
        if let Some(rec) = case.external {
            catalog.insert("T1w", rec);
        }
        let enrichment = enrich(&catalog, "T1w", case.own);
        assert_eq!(enrichment.description.as_deref(), case.expected_description, "{}", case.name);
        assert_eq!(enrichment.source, case.expected_source, "{}", case.name);
        assert_eq!(enrichment.display_name, case.expected_display, "{}", case.name);
    }
}

#[test]
fn test_distinct_display_name_only_when_different() {
    let catalog: MetadataCatalog = vec![("T1w", record(Some("T1w"), None))].into_iter().collect();
    assert_eq!(enrich(&catalog, "T1w", None).distinct_display_name(), None);

    let catalog: MetadataCatalog = vec![("T1w", record(Some("T1-weighted image"), None))]
        .into_iter()
        .collect();
    assert_eq!(
        enrich(&catalog, "T1w", None).distinct_display_name(),
        Some("T1-weighted image")
    );
}

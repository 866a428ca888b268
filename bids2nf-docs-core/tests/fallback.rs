// Example data resolution: found, not found and load errors.

use std::path::PathBuf;

use bids2nf_docs_core::contract::{InMemoryExamples, MockExampleSource, NoExamples};
use bids2nf_docs_core::error::ExampleDataError;
use bids2nf_docs_core::fallback::{resolve_example, Resolution};
use bids2nf_docs_core::schema::SuffixEntry;
use serde_json::json;

fn entry_with_examples(path: &str) -> SuffixEntry {
    SuffixEntry {
        example_output: Some(PathBuf::from(path)),
        ..SuffixEntry::default()
    }
}

#[test]
fn test_no_example_output_never_loads() {
    let mut source = MockExampleSource::new();
    source.expect_load().times(0);
    let resolution = resolve_example("T1w", &SuffixEntry::default(), &source);
    assert_eq!(resolution, Resolution::NotFound);
}

#[test]
fn test_record_found_for_entry() {
    let mut source = MockExampleSource::new();
    source
        .expect_load()
        .withf(|path| path.to_str() == Some("tests/data/t1w.json"))
        .times(1)
        .returning(|_| Ok(json!({"T1w": {"nii": "sub-01_T1w.nii"}})));

    let resolution = resolve_example("T1w", &entry_with_examples("tests/data/t1w.json"), &source);
    assert_eq!(resolution, Resolution::Found(json!({"nii": "sub-01_T1w.nii"})));
    assert_eq!(resolution.record(), Some(&json!({"nii": "sub-01_T1w.nii"})));
}

#[test]
fn test_missing_or_null_record_is_not_found() {
    let source = InMemoryExamples::new()
        .with_file("out.json", json!({"other": {"nii": "x"}, "T2w": null}));
    for name in ["T1w", "T2w"] {
        let resolution = resolve_example(name, &entry_with_examples("out.json"), &source);
        assert_eq!(resolution, Resolution::NotFound, "entry {}", name);
    }
}

#[test]
fn test_load_failures_are_errors() {
    let resolution = resolve_example("T1w", &entry_with_examples("absent.json"), &NoExamples);
    assert!(resolution.is_error());
    assert!(resolution.record().is_none());

    let mut source = MockExampleSource::new();
    source.expect_load().returning(|path| {
        Err(ExampleDataError::Parse {
            path: path.to_path_buf(),
            message: "expected value at line 1 column 1".to_string(),
        })
    });
    match resolve_example("T1w", &entry_with_examples("broken.json"), &source) {
        Resolution::Error(message) => assert!(message.contains("broken.json"), "{}", message),
        other => panic!("expected error, got {:?}", other),
    }
}

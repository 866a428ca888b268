// Access-path examples with and without sample data.

use bids2nf_docs_core::schema::Schema;
use bids2nf_docs_core::snippet::{build_examples, ExampleBlock};
use bids2nf_docs_core::variant::resolve;
use serde_json::{json, Value};

fn examples_for(yaml: &str, name: &str, sample: Option<Value>) -> ExampleBlock {
    let schema = Schema::from_yaml_str(yaml).expect("schema parses");
    let entry = schema.get(name).expect("entry exists");
    let resolved = resolve(name, entry, &schema).expect("entry classifies");
    build_examples(name, &resolved.shape, sample.as_ref())
}

#[test]
fn test_plain_without_sample_lists_every_kind() {
    let block = examples_for("X:\n  plain_set:\n    additional_extensions: [bval]\n", "X", None);
    assert_eq!(
        block.statements,
        vec![
            "def X_nii = bids_files['X']['nii']",
            "def X_json = bids_files['X']['json']",
            "def X_bval = bids_files['X']['bval']",
        ]
    );
    assert!(!block.from_sample);
    assert!(block.render().ends_with("['bval']\n"));
}

#[test]
fn test_plain_with_sample_values() {
    let sample = json!({"nii": "sub-01_T1w.nii.gz", "json": "sub-01_T1w.json"});
    let block = examples_for("T1w:\n  plain_set: {}\n", "T1w", Some(sample));
    assert_eq!(
        block.statements,
        vec![
            "def T1w_nii = bids_files['T1w']['nii']  // sub-01_T1w.nii.gz",
            "def T1w_json = bids_files['T1w']['json']  // sub-01_T1w.json",
        ]
    );
    assert!(block.from_sample);
}

#[test]
fn test_hierarchical_sample_three_by_two() {
    let yaml = "VFA:\n  sequential_set:\n    by_entities: [echo, flip]\n    order: hierarchical\n";
    let sample = json!({"nii": [["a1", "a2"], ["b1", "b2"], ["c1", "c2"]]});
    let block = examples_for(yaml, "VFA", Some(sample));
    assert_eq!(
        block.statements,
        vec![
            "def VFA_echo_count = bids_files['VFA']['nii'].size()  // 3",
            "def VFA_flip_count = bids_files['VFA']['nii'][0].size()  // 2",
            "def VFA_first = bids_files['VFA']['nii'][0][0]  // a1",
        ]
    );
    assert!(block.from_sample);
}

#[test]
fn test_single_sequence_without_sample() {
    let block = examples_for("MEGRE:\n  sequential_set:\n    by_entity: echo\n", "MEGRE", None);
    assert_eq!(
        block.statements,
        vec![
            "def MEGRE_count = bids_files['MEGRE']['nii'].size()",
            "def MEGRE_first = bids_files['MEGRE']['nii'][0]",
            "def MEGRE_second = bids_files['MEGRE']['nii'][1]",
        ]
    );
}

#[test]
fn test_single_sequence_with_one_item_omits_second() {
    let sample = json!({"nii": ["e1.nii"]});
    let block = examples_for("MEGRE:\n  sequential_set:\n    by_entity: echo\n", "MEGRE", Some(sample));
    assert_eq!(
        block.statements,
        vec![
            "def MEGRE_count = bids_files['MEGRE']['nii'].size()  // 1",
            "def MEGRE_first = bids_files['MEGRE']['nii'][0]  // e1.nii",
        ]
    );
}

#[test]
fn test_named_partial_sample() {
    let yaml = r#"
MPM:
  named_set:
    mag:
      description: "Magnitude"
    phase:
      description: "Phase"
"#;
    let sample = json!({"mag": {"nii": "m.nii", "json": "m.json"}});
    let block = examples_for(yaml, "MPM", Some(sample));
    assert_eq!(
        block.statements,
        vec![
            "def MPM_mag_nii = bids_files['MPM']['mag']['nii']  // m.nii",
            "def MPM_mag_json = bids_files['MPM']['mag']['json']  // m.json",
            "def MPM_phase_nii = bids_files['MPM']['phase']['nii']",
            "def MPM_phase_json = bids_files['MPM']['phase']['json']",
        ]
    );
    assert!(block.from_sample);
}

#[test]
fn test_mixed_without_sample() {
    let yaml = r#"
MTS:
  mixed_set:
    named_groups:
      MTw:
        description: "MT-weighted"
"#;
    let block = examples_for(yaml, "MTS", None);
    assert_eq!(
        block.statements,
        vec![
            "def MTS_MTw_count = bids_files['MTS']['MTw']['nii'].size()",
            "def MTS_MTw_first = bids_files['MTS']['MTw']['nii'][0]",
            "def MTS_MTw_second = bids_files['MTS']['MTw']['nii'][1]",
        ]
    );
}

#[test]
fn test_empty_named_set_falls_back_to_entry_access() {
    let block = examples_for("odd-name:\n  named_set: {}\n", "odd-name", None);
    assert_eq!(block.statements, vec!["def odd_name = bids_files['odd-name']"]);
}

#[test]
fn test_sequence_record_with_single_values_reads_each_kind() {
    let sample = json!({"nii": "sub-01_echo-1.nii.gz", "json": "sub-01_echo-1.json"});
    let block = examples_for("MEGRE:\n  sequential_set:\n    by_entity: echo\n", "MEGRE", Some(sample));
    assert_eq!(
        block.statements,
        vec![
            "def MEGRE_nii = bids_files['MEGRE']['nii']  // sub-01_echo-1.nii.gz",
            "def MEGRE_json = bids_files['MEGRE']['json']  // sub-01_echo-1.json",
        ]
    );
    assert!(block.from_sample);
}

#[test]
fn test_plain_scalar_record_reads_whole_entry() {
    let block = examples_for("T1w:\n  plain_set: {}\n", "T1w", Some(json!("sub-01_T1w.nii.gz")));
    assert_eq!(
        block.statements,
        vec!["def T1w = bids_files['T1w']  // sub-01_T1w.nii.gz"]
    );
    assert!(block.from_sample);
}

const SAMPLED_SCHEMA: &str = r#"
MTS:
  mixed_set:
    named_groups:
      MTw:
        description: "MT-weighted"
      PDw:
        description: "PD-weighted"
VFA:
  sequential_set:
    by_entities: [echo, flip]
    order: flat
MEGRE:
  sequential_set:
    by_entity: echo
TB1EPI:
  maps_to: MEGRE
B0map:
  maps_to: fieldmap
  additional_extensions: [bvec]
"#;

struct TestCase {
    name: &'static str,
    entry: &'static str,
    sample: Option<Value>,
    expected: Vec<&'static str>,
    from_sample: bool,
}

#[test]
fn test_sampled_examples_table_driven() {
    let cases = vec![
        TestCase {
            name: "mixed groups with a list and a single value",
            entry: "MTS",
            sample: Some(json!({"MTw": {"nii": ["m1", "m2", "m3"]}, "PDw": {"nii": "p.nii"}})),
            expected: vec![
                "def MTS_MTw_count = bids_files['MTS']['MTw']['nii'].size()  // 3",
                "def MTS_MTw_first = bids_files['MTS']['MTw']['nii'][0]  // m1",
                "def MTS_MTw_second = bids_files['MTS']['MTw']['nii'][1]  // m2",
                "def MTS_PDw_nii = bids_files['MTS']['PDw']['nii']  // p.nii",
            ],
            from_sample: true,
        },
        TestCase {
            name: "flat pair with sample",
            entry: "VFA",
            sample: Some(json!({"nii": ["a", "b", "c", "d"]})),
            expected: vec![
                "def VFA_echo_flip_count = bids_files['VFA']['nii'].size()  // 4",
                "def VFA_echo_flip_first = bids_files['VFA']['nii'][0]  // a",
                "def VFA_echo_flip_second = bids_files['VFA']['nii'][1]  // b",
            ],
            from_sample: true,
        },
        TestCase {
            name: "alias borrows the target sequence",
            entry: "TB1EPI",
            sample: Some(json!({"nii": ["x1", "x2"]})),
            expected: vec![
                "def TB1EPI_count = bids_files['TB1EPI']['nii'].size()  // 2",
                "def TB1EPI_first = bids_files['TB1EPI']['nii'][0]  // x1",
                "def TB1EPI_second = bids_files['TB1EPI']['nii'][1]  // x2",
            ],
            from_sample: true,
        },
        TestCase {
            name: "alias without a structured target renders plain",
            entry: "B0map",
            sample: None,
            expected: vec![
                "def B0map_nii = bids_files['B0map']['nii']",
                "def B0map_json = bids_files['B0map']['json']",
                "def B0map_bvec = bids_files['B0map']['bvec']",
            ],
            from_sample: false,
        },
    ];

    for case in cases {
        let block = examples_for(SAMPLED_SCHEMA, case.entry, case.sample);
        assert_eq!(block.statements, case.expected, "{}", case.name);
        assert_eq!(block.from_sample, case.from_sample, "{}", case.name);
    }
}

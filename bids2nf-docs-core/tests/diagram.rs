// Diagram structure per shape and Mermaid rendering.

use std::collections::HashSet;

use bids2nf_docs_core::diagram::{build_diagram, Diagram, EdgeKind, StyleClass};
use bids2nf_docs_core::schema::Schema;
use bids2nf_docs_core::variant::resolve;

fn diagram_for(yaml: &str, name: &str) -> Diagram {
    let schema = Schema::from_yaml_str(yaml).expect("schema parses");
    let entry = schema.get(name).expect("entry exists");
    let resolved = resolve(name, entry, &schema).expect("entry classifies");
    build_diagram(name, &resolved.shape)
}

fn assert_unique_ids(diagram: &Diagram) {
    let ids: HashSet<String> = diagram.nodes.iter().map(|n| n.id.to_string()).collect();
    assert_eq!(ids.len(), diagram.nodes.len(), "node ids must be unique");
}

#[test]
fn test_plain_with_one_extra_extension() {
    let diagram = diagram_for("X:\n  plain_set:\n    additional_extensions: [bval]\n", "X");

    assert_eq!(diagram.nodes_with_class(StyleClass::Main).count(), 1);
    assert_eq!(diagram.count_edges(EdgeKind::Solid), 1);
    assert_eq!(diagram.count_edges(EdgeKind::Dashed), 2);
    assert_eq!(diagram.count_edges(EdgeKind::Thick), 0);

    let expected = "graph TD\n    A[\"X\"]\n    B[\"nii\"]\n    C[\"json\"]\n    D[\"bval\"]\n    A --> B\n    A -.-> C\n    A -.-> D\n";
    let mermaid = diagram.to_mermaid();
    assert!(mermaid.starts_with(expected), "unexpected mermaid:\n{}", mermaid);
    assert!(mermaid.contains("    class A main\n"));
    assert!(mermaid.contains("    class B file\n"));
    assert!(mermaid.contains("    class C,D optional\n"));
    assert!(!mermaid.contains("classDef group"));
}

#[test]
fn test_class_definitions_follow_fixed_order() {
    let mermaid = diagram_for("X:\n  plain_set:\n    additional_extensions: [bval]\n", "X").to_mermaid();
    let main = mermaid.find("classDef main").expect("main class");
    let file = mermaid.find("classDef file").expect("file class");
    let optional = mermaid.find("classDef optional").expect("optional class");
    assert!(main < file && file < optional);
}

#[test]
fn test_plain_cross_modal_input_uses_thick_edge() {
    let diagram = diagram_for("X:\n  plain_set:\n    cross_modal: [T1w]\n", "X");
    assert_eq!(diagram.count_edges(EdgeKind::Thick), 1);
    let input = diagram.node_labelled("T1w").expect("cross-modal node");
    assert_eq!(input.class, StyleClass::CrossModal);
    assert!(diagram.to_mermaid().contains(&format!("    {} ==> A\n", input.id)));
    assert_eq!(diagram.nodes.len(), 6);
    assert_unique_ids(&diagram);
}

#[test]
fn test_named_roles_mark_required() {
    let yaml = r#"
MPM:
  named_set:
    mag:
      description: "Magnitude"
    phase:
      description: "Phase"
      additional_extensions: [tsv]
  required: [mag]
"#;
    let diagram = diagram_for(yaml, "MPM");
    assert_eq!(diagram.node_labelled("mag").expect("mag").class, StyleClass::Required);
    assert_eq!(diagram.node_labelled("phase").expect("phase").class, StyleClass::Group);
    assert_eq!(diagram.count_edges(EdgeKind::Solid), 7);
    assert_eq!(diagram.count_edges(EdgeKind::Dashed), 1);
    assert_eq!(diagram.nodes.len(), 9);
    assert_unique_ids(&diagram);
}

#[test]
fn test_sequential_single_entity() {
    let diagram = diagram_for("MEGRE:\n  sequential_set:\n    by_entity: echo\n", "MEGRE");
    for label in ["sequential set", "by echo", "echo-1", "echo-2", "..."] {
        assert!(diagram.node_labelled(label).is_some(), "missing {}", label);
    }
    assert_eq!(diagram.count_edges(EdgeKind::Solid), 11);
    assert_eq!(diagram.count_edges(EdgeKind::Dashed), 0);
    assert_unique_ids(&diagram);
}

#[test]
fn test_sequential_hierarchical_pair() {
    let yaml = "VFA:\n  sequential_set:\n    by_entities: [echo, flip]\n";
    let diagram = diagram_for(yaml, "VFA");
    assert!(diagram.node_labelled("by echo, then flip").is_some());
    assert_eq!(diagram.nodes.iter().filter(|n| n.label == "flip-1").count(), 2);
    assert_eq!(diagram.nodes.len(), 17);
    assert_unique_ids(&diagram);
}

#[test]
fn test_sequential_flat_pair() {
    let yaml = "VFA:\n  sequential_set:\n    by_entities: [echo, flip]\n    order: flat\n";
    let diagram = diagram_for(yaml, "VFA");
    assert!(diagram.node_labelled("by echo x flip (flat)").is_some());
    assert!(diagram.node_labelled("echo-1 flip-2").is_some());
    assert_eq!(diagram.nodes.len(), 15);
}

#[test]
fn test_mixed_groups_and_dimensions() {
    let yaml = r#"
MTS:
  mixed_set:
    named_dimension: acq
    sequential_dimension: flip
    named_groups:
      MTw:
        description: "MT-weighted"
      PDw:
        description: "PD-weighted"
    required: [MTw]
"#;
    let diagram = diagram_for(yaml, "MTS");
    assert!(diagram.node_labelled("named: acq").is_some());
    assert!(diagram.node_labelled("sequential: flip").is_some());
    assert_eq!(diagram.node_labelled("MTw").expect("MTw").class, StyleClass::Required);
    assert_eq!(diagram.node_labelled("PDw").expect("PDw").class, StyleClass::Group);
    assert_eq!(diagram.nodes.len(), 20);
    assert_unique_ids(&diagram);
}

#[test]
fn test_diagrams_are_deterministic() {
    let yaml = "VFA:\n  sequential_set:\n    by_entities: [echo, flip]\n";
    assert_eq!(diagram_for(yaml, "VFA").to_mermaid(), diagram_for(yaml, "VFA").to_mermaid());
}

#[test]
fn test_labels_escape_quotes() {
    let diagram = diagram_for("'a\"b':\n  plain_set: {}\n", "a\"b");
    assert!(diagram.to_mermaid().contains("A[\"a#quot;b\"]"));
}

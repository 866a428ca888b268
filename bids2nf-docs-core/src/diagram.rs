//! Structural diagrams, one builder per shape, rendered as Mermaid.
//!
//! Edge semantics are shared by every builder:
//! - solid (`-->`): structurally required relationship
//! - dashed (`-.->`): optional file kind or extra extension
//! - thick (`==>`): cross-modal input feeding a plain entry

use tracing::debug;

use crate::node_ids::{
    allocate_mixed, allocate_named, allocate_plain, allocate_sequential, FileNodes, IndexNode,
    NodeAllocator, NodeId, SequentialForm,
};
use crate::schema::{Order, Organization, SequentialSet, PRIMARY_KIND, SIDECAR_KIND};
use crate::variant::{MixedView, NamedView, PlainView, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Solid,
    Dashed,
    Thick,
}

impl EdgeKind {
    fn arrow(&self) -> &'static str {
        match self {
            EdgeKind::Solid => "-->",
            EdgeKind::Dashed => "-.->",
            EdgeKind::Thick => "==>",
        }
    }
}

/// Style classes, declared in this order in every diagram that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleClass {
    Main,
    Group,
    File,
    Optional,
    Required,
    CrossModal,
}

impl StyleClass {
    pub const ALL: [StyleClass; 6] = [
        StyleClass::Main,
        StyleClass::Group,
        StyleClass::File,
        StyleClass::Optional,
        StyleClass::Required,
        StyleClass::CrossModal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StyleClass::Main => "main",
            StyleClass::Group => "group",
            StyleClass::File => "file",
            StyleClass::Optional => "optional",
            StyleClass::Required => "required",
            StyleClass::CrossModal => "crossmodal",
        }
    }

    fn definition(&self) -> &'static str {
        match self {
            StyleClass::Main => "fill:#e1f5fe,stroke:#01579b,stroke-width:2px",
            StyleClass::Group => "fill:#f3e5f5,stroke:#4a148c",
            StyleClass::File => "fill:#e8f5e9,stroke:#1b5e20",
            StyleClass::Optional => "fill:#fafafa,stroke:#9e9e9e,stroke-dasharray:5 5",
            StyleClass::Required => "fill:#ffebee,stroke:#c62828,stroke-width:3px",
            StyleClass::CrossModal => "fill:#fff3e0,stroke:#e65100,stroke-width:2px",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub class: StyleClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

/// A directed graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    fn node(&mut self, id: NodeId, label: impl Into<String>, class: StyleClass) {
        self.nodes.push(Node {
            id,
            label: label.into(),
            class,
        });
    }

    fn edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) {
        self.edges.push(Edge { from, to, kind });
    }

    pub fn count_edges(&self, kind: EdgeKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }

    pub fn nodes_with_class(&self, class: StyleClass) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.class == class)
    }

    pub fn node_labelled(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Mermaid `graph TD` text.
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");
        for node in &self.nodes {
            out.push_str(&format!("    {}[\"{}\"]\n", node.id, escape_label(&node.label)));
        }
        for edge in &self.edges {
            out.push_str(&format!("    {} {} {}\n", edge.from, edge.kind.arrow(), edge.to));
        }
        for class in StyleClass::ALL {
            let members: Vec<String> = self
                .nodes_with_class(class)
                .map(|n| n.id.to_string())
                .collect();
            if members.is_empty() {
                continue;
            }
            out.push_str(&format!("    classDef {} {}\n", class.name(), class.definition()));
            out.push_str(&format!("    class {} {}\n", members.join(","), class.name()));
        }
        out
    }
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

/// Builds the diagram for an entry's shape. Node ids start at `A` for every
/// diagram.
pub fn build_diagram(name: &str, shape: &Shape<'_>) -> Diagram {
    let diagram = match shape {
        Shape::Plain(view) => plain_diagram(name, view),
        Shape::Named(view) => named_diagram(name, view),
        Shape::Sequential(set) => sequential_diagram(name, set),
        Shape::Mixed(view) => mixed_diagram(name, view),
    };
    debug!(
        entry = %name,
        shape = shape.kind(),
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        "Built diagram"
    );
    diagram
}

fn plain_diagram(name: &str, view: &PlainView<'_>) -> Diagram {
    let (layout, _) = allocate_plain(
        NodeAllocator::new(),
        view.extensions.len(),
        view.cross_modal.len(),
    );
    let mut d = Diagram::default();
    d.node(layout.main, name, StyleClass::Main);
    d.node(layout.files.primary, PRIMARY_KIND, StyleClass::File);
    d.node(layout.files.sidecar, SIDECAR_KIND, StyleClass::Optional);
    d.edge(layout.main, layout.files.primary, EdgeKind::Solid);
    d.edge(layout.main, layout.files.sidecar, EdgeKind::Dashed);
    for (id, ext) in layout.extras.iter().zip(view.extensions) {
        d.node(*id, ext.as_str(), StyleClass::Optional);
        d.edge(layout.main, *id, EdgeKind::Dashed);
    }
    for (nodes, input) in layout.cross_modal.iter().zip(view.cross_modal) {
        d.node(nodes.node, input.as_str(), StyleClass::CrossModal);
        d.edge(nodes.node, layout.main, EdgeKind::Thick);
        d.node(nodes.files.primary, PRIMARY_KIND, StyleClass::File);
        d.node(nodes.files.sidecar, SIDECAR_KIND, StyleClass::Optional);
        d.edge(nodes.node, nodes.files.primary, EdgeKind::Solid);
        d.edge(nodes.node, nodes.files.sidecar, EdgeKind::Dashed);
    }
    d
}

fn role_class(required: &[&str], role: &str) -> StyleClass {
    if required.contains(&role) {
        StyleClass::Required
    } else {
        StyleClass::Group
    }
}

/// Primary and sidecar under `parent`, both required.
fn required_files(d: &mut Diagram, parent: NodeId, files: &FileNodes) {
    d.node(files.primary, PRIMARY_KIND, StyleClass::File);
    d.node(files.sidecar, SIDECAR_KIND, StyleClass::File);
    d.edge(parent, files.primary, EdgeKind::Solid);
    d.edge(parent, files.sidecar, EdgeKind::Solid);
}

fn named_diagram(name: &str, view: &NamedView<'_>) -> Diagram {
    let extras: Vec<Vec<String>> = view
        .roles
        .iter()
        .map(|(_, role)| role.additional_extensions())
        .collect();
    let counts: Vec<usize> = extras.iter().map(Vec::len).collect();
    let (layout, _) = allocate_named(NodeAllocator::new(), &counts);

    let mut d = Diagram::default();
    d.node(layout.main, name, StyleClass::Main);
    d.node(layout.groups, "named set", StyleClass::Group);
    d.edge(layout.main, layout.groups, EdgeKind::Solid);
    for ((nodes, (role, _)), kinds) in layout.roles.iter().zip(view.roles.iter()).zip(&extras) {
        d.node(nodes.role, role, role_class(&view.required, role));
        d.edge(layout.groups, nodes.role, EdgeKind::Solid);
        required_files(&mut d, nodes.role, &nodes.files);
        for (id, ext) in nodes.extras.iter().zip(kinds) {
            d.node(*id, ext.as_str(), StyleClass::Optional);
            d.edge(nodes.role, *id, EdgeKind::Dashed);
        }
    }
    d
}

/// Draws index nodes under `parent`, recursing into nested positions.
fn index_nodes(d: &mut Diagram, parent: NodeId, indices: &[IndexNode], labels: &[String], inner: &[String]) {
    for (index, label) in indices.iter().zip(labels) {
        d.node(index.id, label.as_str(), StyleClass::Group);
        d.edge(parent, index.id, EdgeKind::Solid);
        if let Some(files) = &index.files {
            required_files(d, index.id, files);
        }
        if !index.children.is_empty() {
            index_nodes(d, index.id, &index.children, inner, &[]);
        }
    }
}

fn position(entity: &str, n: usize) -> String {
    format!("{entity}-{n}")
}

fn sequential_diagram(name: &str, set: &SequentialSet) -> Diagram {
    let organization = set.organization();
    let form = match organization {
        Organization::Single(_) => SequentialForm::Single,
        Organization::Pair {
            order: Order::Hierarchical,
            ..
        } => SequentialForm::Nested,
        Organization::Pair {
            order: Order::Flat, ..
        } => SequentialForm::Flat,
    };
    let (layout, _) = allocate_sequential(NodeAllocator::new(), form);

    let (dimension, labels, inner) = match organization {
        Organization::Single(entity) => (
            format!("by {entity}"),
            vec![position(entity, 1), position(entity, 2), "...".to_string()],
            Vec::new(),
        ),
        Organization::Pair {
            outer,
            inner,
            order: Order::Hierarchical,
        } => (
            format!("by {outer}, then {inner}"),
            vec![position(outer, 1), position(outer, 2)],
            vec![position(inner, 1), position(inner, 2)],
        ),
        Organization::Pair {
            outer,
            inner,
            order: Order::Flat,
        } => (
            format!("by {outer} x {inner} (flat)"),
            vec![
                format!("{} {}", position(outer, 1), position(inner, 1)),
                format!("{} {}", position(outer, 1), position(inner, 2)),
                format!("{} {}", position(outer, 2), position(inner, 1)),
                "...".to_string(),
            ],
            Vec::new(),
        ),
    };

    let mut d = Diagram::default();
    d.node(layout.main, name, StyleClass::Main);
    d.node(layout.collection, "sequential set", StyleClass::Group);
    d.node(layout.dimension, dimension, StyleClass::Group);
    d.edge(layout.main, layout.collection, EdgeKind::Solid);
    d.edge(layout.collection, layout.dimension, EdgeKind::Solid);
    index_nodes(&mut d, layout.dimension, &layout.indices, &labels, &inner);
    d
}

fn mixed_diagram(name: &str, view: &MixedView<'_>) -> Diagram {
    let set = view.set;
    let extras: Vec<Vec<String>> = set
        .named_groups
        .iter()
        .map(|(_, group)| group.additional_extensions())
        .collect();
    let counts: Vec<usize> = extras.iter().map(Vec::len).collect();
    let (layout, _) = allocate_mixed(NodeAllocator::new(), &counts);

    let mut d = Diagram::default();
    d.node(layout.main, name, StyleClass::Main);
    d.node(layout.collection, "mixed set", StyleClass::Group);
    d.node(
        layout.named_dimension,
        format!("named: {}", set.named_dimension),
        StyleClass::Group,
    );
    d.node(
        layout.sequential_dimension,
        format!("sequential: {}", set.sequential_dimension),
        StyleClass::Group,
    );
    d.edge(layout.main, layout.collection, EdgeKind::Solid);
    d.edge(layout.collection, layout.named_dimension, EdgeKind::Solid);
    d.edge(layout.collection, layout.sequential_dimension, EdgeKind::Solid);

    let labels = vec![
        position(&set.sequential_dimension, 1),
        position(&set.sequential_dimension, 2),
    ];
    for ((nodes, (group, _)), kinds) in layout
        .groups
        .iter()
        .zip(set.named_groups.iter())
        .zip(&extras)
    {
        d.node(nodes.group, group, role_class(&view.required, group));
        d.edge(layout.named_dimension, nodes.group, EdgeKind::Solid);
        d.node(nodes.sequence, "sequential files", StyleClass::Group);
        d.edge(nodes.group, nodes.sequence, EdgeKind::Solid);
        index_nodes(&mut d, nodes.sequence, &nodes.indices, &labels, &[]);
        for (id, ext) in nodes.extras.iter().zip(kinds) {
            d.node(*id, ext.as_str(), StyleClass::Optional);
            d.edge(nodes.group, *id, EdgeKind::Dashed);
        }
    }
    d
}

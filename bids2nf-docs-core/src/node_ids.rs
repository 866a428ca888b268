//! Node identifier allocation for diagrams.
//!
//! A [`NodeAllocator`] is a plain counter passed by value: every `take`
//! hands back the id and the allocator to use next, so a diagram builder
//! threads it through explicitly and two runs over the same structure
//! always produce the same ids.
//!
//! The `allocate_*` functions map a variant's structural counts to the full
//! set of ids its diagram needs. Strides are fixed per variant; variable
//! parts (extra extensions per role or group, cross-modal inputs) shift
//! everything allocated after them.

use std::fmt;

/// A symbolic node id, printed as bijective base-26 letters (`A`, `Z`,
/// `AA`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = u64::from(self.0) + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        f.write_str(&String::from_utf8_lossy(&letters))
    }
}

/// Monotonic id counter seeded per diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeAllocator {
    next: u32,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(next: u32) -> Self {
        NodeAllocator { next }
    }

    /// The id the next `take` returns.
    pub fn next_free(&self) -> u32 {
        self.next
    }

    #[must_use]
    pub fn take(self) -> (NodeId, NodeAllocator) {
        (NodeId(self.next), NodeAllocator { next: self.next + 1 })
    }

    #[must_use]
    pub fn take_n(self, n: usize) -> (Vec<NodeId>, NodeAllocator) {
        let mut alloc = self;
        let mut ids = Vec::with_capacity(n);
        for _ in 0..n {
            let (id, rest) = alloc.take();
            ids.push(id);
            alloc = rest;
        }
        (ids, alloc)
    }
}

/// Primary and sidecar file nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNodes {
    pub primary: NodeId,
    pub sidecar: NodeId,
}

fn allocate_files(alloc: NodeAllocator) -> (FileNodes, NodeAllocator) {
    let (primary, alloc) = alloc.take();
    let (sidecar, alloc) = alloc.take();
    (FileNodes { primary, sidecar }, alloc)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossModalNodes {
    pub node: NodeId,
    pub files: FileNodes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainLayout {
    pub main: NodeId,
    pub files: FileNodes,
    pub extras: Vec<NodeId>,
    pub cross_modal: Vec<CrossModalNodes>,
}

/// Stride: main, primary, sidecar, one per extra kind, then three per
/// cross-modal input.
pub fn allocate_plain(
    alloc: NodeAllocator,
    extra_kinds: usize,
    cross_modal: usize,
) -> (PlainLayout, NodeAllocator) {
    let (main, alloc) = alloc.take();
    let (files, alloc) = allocate_files(alloc);
    let (extras, mut alloc) = alloc.take_n(extra_kinds);
    let mut inputs = Vec::with_capacity(cross_modal);
    for _ in 0..cross_modal {
        let (node, rest) = alloc.take();
        let (files, rest) = allocate_files(rest);
        inputs.push(CrossModalNodes { node, files });
        alloc = rest;
    }
    (
        PlainLayout {
            main,
            files,
            extras,
            cross_modal: inputs,
        },
        alloc,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleNodes {
    pub role: NodeId,
    pub files: FileNodes,
    pub extras: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLayout {
    pub main: NodeId,
    pub groups: NodeId,
    pub roles: Vec<RoleNodes>,
}

/// Stride: main, groups, then per role `3 + extras_per_role[i]`.
pub fn allocate_named(
    alloc: NodeAllocator,
    extras_per_role: &[usize],
) -> (NamedLayout, NodeAllocator) {
    let (main, alloc) = alloc.take();
    let (groups, mut alloc) = alloc.take();
    let mut roles = Vec::with_capacity(extras_per_role.len());
    for &extra in extras_per_role {
        let (role, rest) = alloc.take();
        let (files, rest) = allocate_files(rest);
        let (extras, rest) = rest.take_n(extra);
        roles.push(RoleNodes { role, files, extras });
        alloc = rest;
    }
    (NamedLayout { main, groups, roles }, alloc)
}

/// One index position in a sequence. Leaves carry file nodes, inner
/// positions of a nested sequence carry children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNode {
    pub id: NodeId,
    pub files: Option<FileNodes>,
    pub children: Vec<IndexNode>,
}

fn allocate_leaf(alloc: NodeAllocator) -> (IndexNode, NodeAllocator) {
    let (id, alloc) = alloc.take();
    let (files, alloc) = allocate_files(alloc);
    (
        IndexNode {
            id,
            files: Some(files),
            children: Vec::new(),
        },
        alloc,
    )
}

fn allocate_leaves(alloc: NodeAllocator, count: usize) -> (Vec<IndexNode>, NodeAllocator) {
    let mut alloc = alloc;
    let mut leaves = Vec::with_capacity(count);
    for _ in 0..count {
        let (leaf, rest) = allocate_leaf(alloc);
        leaves.push(leaf);
        alloc = rest;
    }
    (leaves, alloc)
}

/// Representative positions drawn per sequence.
pub const REPRESENTATIVE_INDICES: usize = 2;

/// How a sequential diagram lays out its indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequentialForm {
    /// Two indices plus an ellipsis.
    Single,
    /// Two outer indices, each with two inner indices.
    Nested,
    /// Three flattened index pairs plus an ellipsis.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialLayout {
    pub main: NodeId,
    pub collection: NodeId,
    pub dimension: NodeId,
    pub indices: Vec<IndexNode>,
}

pub fn allocate_sequential(
    alloc: NodeAllocator,
    form: SequentialForm,
) -> (SequentialLayout, NodeAllocator) {
    let (main, alloc) = alloc.take();
    let (collection, alloc) = alloc.take();
    let (dimension, alloc) = alloc.take();
    let (indices, alloc) = match form {
        SequentialForm::Single => allocate_leaves(alloc, REPRESENTATIVE_INDICES + 1),
        SequentialForm::Flat => allocate_leaves(alloc, REPRESENTATIVE_INDICES * 2),
        SequentialForm::Nested => {
            let mut alloc = alloc;
            let mut outer = Vec::with_capacity(REPRESENTATIVE_INDICES);
            for _ in 0..REPRESENTATIVE_INDICES {
                let (id, rest) = alloc.take();
                let (children, rest) = allocate_leaves(rest, REPRESENTATIVE_INDICES);
                outer.push(IndexNode {
                    id,
                    files: None,
                    children,
                });
                alloc = rest;
            }
            (outer, alloc)
        }
    };
    (
        SequentialLayout {
            main,
            collection,
            dimension,
            indices,
        },
        alloc,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNodes {
    pub group: NodeId,
    pub sequence: NodeId,
    pub indices: Vec<IndexNode>,
    pub extras: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedLayout {
    pub main: NodeId,
    pub collection: NodeId,
    pub named_dimension: NodeId,
    pub sequential_dimension: NodeId,
    pub groups: Vec<GroupNodes>,
}

/// Stride: four fixed nodes, then per group `8 + extras_per_group[i]`.
pub fn allocate_mixed(
    alloc: NodeAllocator,
    extras_per_group: &[usize],
) -> (MixedLayout, NodeAllocator) {
    let (main, alloc) = alloc.take();
    let (collection, alloc) = alloc.take();
    let (named_dimension, alloc) = alloc.take();
    let (sequential_dimension, mut alloc) = alloc.take();
    let mut groups = Vec::with_capacity(extras_per_group.len());
    for &extra in extras_per_group {
        let (group, rest) = alloc.take();
        let (sequence, rest) = rest.take();
        let (indices, rest) = allocate_leaves(rest, REPRESENTATIVE_INDICES);
        let (extras, rest) = rest.take_n(extra);
        groups.push(GroupNodes {
            group,
            sequence,
            indices,
            extras,
        });
        alloc = rest;
    }
    (
        MixedLayout {
            main,
            collection,
            named_dimension,
            sequential_dimension,
            groups,
        },
        alloc,
    )
}

//! Hierarchy Builder
//!
//! Links the flat set of parsed descriptors into one rooted tree using only
//! the child -> parent pointers. Records arrive in arbitrary order, so a
//! child may be seen long before its parent, and some parents are never
//! seen at all.
//!
//! The build runs in phases:
//! 1. cycle check over the raw parent pointers (fatal),
//! 2. direct pass: top-level nodes go under the root, nodes with a known
//!    collection parent become pending, everything else is an orphan,
//! 3. fixed point: attach any pending node whose parent is attached until a
//!    sweep makes no progress,
//! 4. orphans go directly under the trash bucket. A node still pending after
//!    the fixed point descends from an orphan and is an orphan too.

use crate::error::HierarchyError;
use crate::metadata::{NodeDescriptor, NodeMeta};
use crate::store::NodeDescriptorStore;
use crate::tree::node::{CollectionNode, Node, Tree};
use crate::types::{NodeId, ROOT_ID, TRASH_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Hierarchy build options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Attach records flagged `deleted` under trash instead of their parent
    #[serde(default)]
    pub route_deleted_to_trash: bool,
}

/// Where a descriptor's parent pointer leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentRef {
    Root,
    Trash,
    Node(usize),
    Unresolved,
}

/// Parent -> children attachment lists, indexed by slot.
///
/// Slots `0..n` are store positions; `n` is the root and `n + 1` the trash.
struct Links {
    children: Vec<Vec<usize>>,
    attached: Vec<bool>,
    /// Store positions in attachment order; a parent always precedes its children.
    order: Vec<usize>,
}

impl Links {
    fn new(node_count: usize) -> Self {
        let mut attached = vec![false; node_count + 2];
        attached[node_count] = true;
        attached[node_count + 1] = true;
        Self {
            children: vec![Vec::new(); node_count + 2],
            attached,
            order: Vec::with_capacity(node_count),
        }
    }

    fn root(&self) -> usize {
        self.children.len() - 2
    }

    fn trash(&self) -> usize {
        self.children.len() - 1
    }

    fn attach(&mut self, child: usize, parent: usize) {
        self.children[parent].push(child);
        self.attached[child] = true;
        self.order.push(child);
    }
}

/// Hierarchy builder
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    options: BuildOptions,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the tree for every descriptor in `store`.
    ///
    /// Every stored node is reachable from the returned root exactly once.
    /// The store is only read; building twice yields identical trees.
    pub fn build<S>(&self, store: &S) -> Result<Tree, HierarchyError>
    where
        S: NodeDescriptorStore + ?Sized,
    {
        let descriptors: Vec<&NodeDescriptor> = store.all().collect();
        let positions: HashMap<&str, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id(), i))
            .collect();
        let parents: Vec<ParentRef> = descriptors
            .iter()
            .map(|d| resolve_parent(d, &positions))
            .collect();

        detect_cycles(&descriptors, &parents)?;

        let mut links = Links::new(descriptors.len());
        let mut pending: Vec<(usize, usize)> = Vec::new();
        let mut orphans: Vec<usize> = Vec::new();

        for (i, descriptor) in descriptors.iter().enumerate() {
            if self.options.route_deleted_to_trash && descriptor.meta.is_deleted {
                let trash = links.trash();
                links.attach(i, trash);
                continue;
            }
            match parents[i] {
                ParentRef::Root => {
                    let root = links.root();
                    links.attach(i, root);
                }
                ParentRef::Trash => {
                    let trash = links.trash();
                    links.attach(i, trash);
                }
                ParentRef::Node(p) if descriptors[p].is_collection() => pending.push((i, p)),
                ParentRef::Node(p) => {
                    warn!(
                        id = %descriptor.id(),
                        parent = %descriptors[p].id(),
                        "Parent is a document, treating node as orphan"
                    );
                    orphans.push(i);
                }
                ParentRef::Unresolved => {
                    warn!(
                        id = %descriptor.id(),
                        parent = ?descriptor.parent_id(),
                        "Parent not found, treating node as orphan"
                    );
                    orphans.push(i);
                }
            }
        }
        debug!(
            pending = pending.len(),
            orphans = orphans.len(),
            "Direct pass complete"
        );

        let unresolved = attach_to_fixed_point(&mut links, pending);
        debug!(unresolved = unresolved.len(), "Fixed point reached");

        for (child, parent) in unresolved {
            warn!(
                id = %descriptors[child].id(),
                parent = %descriptors[parent].id(),
                "Parent is itself an orphan, treating node as orphan"
            );
            orphans.push(child);
        }
        orphans.sort_unstable();

        let trash = links.trash();
        for &i in &orphans {
            links.attach(i, trash);
        }

        let root = assemble(&links, &descriptors);

        let orphan_ids: Vec<NodeId> = orphans
            .iter()
            .map(|&i| descriptors[i].id().to_string())
            .collect();
        info!(
            nodes = descriptors.len(),
            orphans = orphan_ids.len(),
            "Hierarchy built"
        );
        Ok(Tree::new(root, orphan_ids))
    }
}

fn resolve_parent(descriptor: &NodeDescriptor, positions: &HashMap<&str, usize>) -> ParentRef {
    match descriptor.parent_id() {
        None | Some(ROOT_ID) => ParentRef::Root,
        Some(TRASH_ID) => ParentRef::Trash,
        Some(parent) => positions
            .get(parent)
            .map_or(ParentRef::Unresolved, |&p| ParentRef::Node(p)),
    }
}

/// Follow each parent chain once; a chain that reaches a node already on it
/// is a cycle. Nodes on finished chains are never walked again.
fn detect_cycles(
    descriptors: &[&NodeDescriptor],
    parents: &[ParentRef],
) -> Result<(), HierarchyError> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnChain,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; parents.len()];
    for start in 0..parents.len() {
        let mut chain: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match marks[i] {
                Mark::Done => break,
                Mark::OnChain => {
                    let from = chain.iter().position(|&c| c == i).unwrap_or(0);
                    let mut ids: Vec<NodeId> = chain[from..]
                        .iter()
                        .map(|&c| descriptors[c].id().to_string())
                        .collect();
                    ids.push(descriptors[i].id().to_string());
                    return Err(HierarchyError::CycleDetected { chain: ids });
                }
                Mark::Unvisited => {
                    marks[i] = Mark::OnChain;
                    chain.push(i);
                    current = match parents[i] {
                        ParentRef::Node(p) => Some(p),
                        _ => None,
                    };
                }
            }
        }
        for i in chain {
            marks[i] = Mark::Done;
        }
    }
    Ok(())
}

/// Sweep `pending` (child, parent) pairs in order, attaching every child
/// whose parent is already attached, until a sweep attaches nothing.
/// Returns the pairs that could not be attached.
fn attach_to_fixed_point(links: &mut Links, mut pending: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::with_capacity(before);
        for (child, parent) in pending {
            if links.attached[parent] {
                links.attach(child, parent);
            } else {
                waiting.push((child, parent));
            }
        }
        pending = waiting;
        if pending.len() == before {
            break;
        }
    }
    pending
}

/// Materialise the tree bottom-up in reverse attachment order, so every
/// child is built before its parent and no recursion is needed.
fn assemble(links: &Links, descriptors: &[&NodeDescriptor]) -> CollectionNode {
    let mut built: Vec<Option<Node>> = vec![None; descriptors.len()];
    let take_children = |built: &mut Vec<Option<Node>>, slot: usize| -> Vec<Node> {
        links.children[slot]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect()
    };

    for &i in links.order.iter().rev() {
        let mut node = Node::from_descriptor(descriptors[i].clone());
        if let Node::Collection(collection) = &mut node {
            collection.children = take_children(&mut built, i);
        }
        built[i] = Some(node);
    }

    let mut root = CollectionNode::new(NodeMeta::synthetic(ROOT_ID, "/"));
    root.children = take_children(&mut built, links.root());
    let mut trash = CollectionNode::new(NodeMeta::synthetic(TRASH_ID, "trash"));
    trash.children = take_children(&mut built, links.trash());
    root.add_child(Node::Collection(trash));
    root
}

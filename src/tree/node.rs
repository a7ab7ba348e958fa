//! Built tree node types

use crate::metadata::{DescriptorKind, NodeDescriptor, NodeMeta};
use crate::tree::walker::TreeWalker;
use crate::types::{NodeId, TRASH_ID};
use serde::Serialize;

/// Document (leaf) node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub last_opened_page: u64,
}

impl DocumentNode {
    pub fn new(meta: NodeMeta) -> Self {
        Self {
            meta,
            last_opened_page: 0,
        }
    }
}

/// Collection (folder) node. Children keep the order they were attached in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub children: Vec<Node>,
}

impl CollectionNode {
    pub fn new(meta: NodeMeta) -> Self {
        Self {
            meta,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Document(DocumentNode),
    Collection(CollectionNode),
}

impl Node {
    /// Turn a parsed descriptor into a childless tree node.
    pub fn from_descriptor(descriptor: NodeDescriptor) -> Self {
        match descriptor.kind {
            DescriptorKind::Document { last_opened_page } => Node::Document(DocumentNode {
                meta: descriptor.meta,
                last_opened_page,
            }),
            DescriptorKind::Collection => Node::Collection(CollectionNode::new(descriptor.meta)),
        }
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Node::Document(doc) => &doc.meta,
            Node::Collection(col) => &col.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn display_name(&self) -> &str {
        &self.meta().display_name
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Node::Collection(_))
    }

    /// Children in attachment order; empty for documents.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(_) => &[],
            Node::Collection(col) => &col.children,
        }
    }

    /// Pre-order walk starting at this node (depth 0).
    pub fn walk(&self) -> TreeWalker<'_> {
        TreeWalker::new(self)
    }
}

/// Result of one hierarchy build: the synthetic root plus the identifiers
/// that were routed to trash because their parent could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    root: Node,
    orphans: Vec<NodeId>,
}

impl Tree {
    pub(crate) fn new(root: CollectionNode, orphans: Vec<NodeId>) -> Self {
        Self {
            root: Node::Collection(root),
            orphans,
        }
    }

    /// The synthetic root collection.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The synthetic trash bucket, always a direct child of the root.
    pub fn trash(&self) -> Option<&Node> {
        self.root.children().iter().find(|c| c.id() == TRASH_ID)
    }

    /// Nodes whose parent reference could not be resolved, in attachment order.
    pub fn orphans(&self) -> &[NodeId] {
        &self.orphans
    }

    pub fn walk(&self) -> TreeWalker<'_> {
        self.root.walk()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.walk().map(|(node, _)| node).find(|node| node.id() == id)
    }

    /// Nodes from the root down to `id`, both ends included.
    pub fn path_to(&self, id: &str) -> Option<Vec<&Node>> {
        let mut path: Vec<&Node> = Vec::new();
        for (node, depth) in self.walk() {
            path.truncate(depth);
            path.push(node);
            if node.id() == id {
                return Some(path);
            }
        }
        None
    }
}

impl Drop for Tree {
    // Unlink nodes onto a heap stack so deep hierarchies do not recurse on drop.
    fn drop(&mut self) {
        let mut stack: Vec<Node> = match &mut self.root {
            Node::Collection(root) => std::mem::take(&mut root.children),
            Node::Document(_) => Vec::new(),
        };
        while let Some(mut node) = stack.pop() {
            if let Node::Collection(collection) = &mut node {
                stack.append(&mut collection.children);
            }
        }
    }
}

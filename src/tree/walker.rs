//! Tree Walker
//!
//! Lazy pre-order, depth-first traversal yielding `(node, depth)` pairs.
//! The walker only borrows the tree; each call to `walk` starts over.

use crate::tree::node::Node;

/// Pre-order iterator over a built tree
#[derive(Debug, Clone)]
pub struct TreeWalker<'a> {
    stack: Vec<(&'a Node, usize)>,
    max_depth: Option<usize>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(start: &'a Node) -> Self {
        Self {
            stack: vec![(start, 0)],
            max_depth: None,
        }
    }

    /// Stop descending below `depth`; the start node is depth 0.
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        let descend = self.max_depth.map_or(true, |max| depth < max);
        if descend {
            // reversed so the first child is popped first
            self.stack
                .extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NodeMeta;
    use crate::tree::node::{CollectionNode, DocumentNode};

    fn doc(id: &str) -> Node {
        Node::Document(DocumentNode::new(NodeMeta::synthetic(id, id)))
    }

    fn sample() -> Node {
        let mut inner = CollectionNode::new(NodeMeta::synthetic("inner", "inner"));
        inner.add_child(doc("d2"));
        let mut root = CollectionNode::new(NodeMeta::synthetic("root", "/"));
        root.add_child(doc("d1"));
        root.add_child(Node::Collection(inner));
        root.add_child(doc("d3"));
        Node::Collection(root)
    }

    #[test]
    fn test_pre_order_with_depths() {
        let root = sample();
        let visited: Vec<(&str, usize)> = root.walk().map(|(n, d)| (n.id(), d)).collect();
        assert_eq!(
            visited,
            vec![("root", 0), ("d1", 1), ("inner", 1), ("d2", 2), ("d3", 1)]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let root = sample();
        let first: Vec<(&str, usize)> = root.walk().map(|(n, d)| (n.id(), d)).collect();
        let second: Vec<(&str, usize)> = root.walk().map(|(n, d)| (n.id(), d)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let root = sample();
        let ids: Vec<&str> = root
            .walk()
            .with_max_depth(Some(1))
            .map(|(n, _)| n.id())
            .collect();
        assert_eq!(ids, vec!["root", "d1", "inner", "d3"]);
    }

    #[test]
    fn test_walk_from_document_yields_single_node() {
        let leaf = doc("only");
        assert_eq!(leaf.walk().count(), 1);
    }
}

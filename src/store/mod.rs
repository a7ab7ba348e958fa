//! Node Store
//!
//! Identifier-keyed storage for parsed node descriptors. Populated once per
//! reconstruction pass by the scanner, then read by the hierarchy builder.

use crate::error::StorageError;
use crate::metadata::NodeDescriptor;
use crate::types::is_reserved_id;
use std::collections::HashMap;

/// Node descriptor store interface
pub trait NodeDescriptorStore {
    /// Add a descriptor. Duplicate and reserved identifiers are rejected.
    fn insert(&mut self, node: NodeDescriptor) -> Result<(), StorageError>;

    /// Look up a descriptor. Absence is a normal outcome, not an error.
    fn get(&self, id: &str) -> Option<&NodeDescriptor>;

    /// All descriptors in insertion order. Every call starts a fresh traversal.
    fn all(&self) -> Box<dyn Iterator<Item = &NodeDescriptor> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store: a vector for insertion order plus an id index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNodeStore {
    nodes: Vec<NodeDescriptor>,
    index: HashMap<String, usize>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeDescriptorStore for InMemoryNodeStore {
    fn insert(&mut self, node: NodeDescriptor) -> Result<(), StorageError> {
        let id = node.id().to_string();
        if is_reserved_id(&id) {
            return Err(StorageError::ReservedIdentifier(id));
        }
        if self.index.contains_key(&id) {
            return Err(StorageError::DuplicateIdentifier(id));
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    fn all(&self) -> Box<dyn Iterator<Item = &NodeDescriptor> + '_> {
        Box::new(self.nodes.iter())
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

//! Node descriptor types produced by the parser and held by the node store.

use crate::types::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields shared by documents and collections.
///
/// `last_modified` keeps millisecond precision, which is all the sidecar
/// format carries. Synthetic collections have no timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub id: NodeId,
    pub display_name: String,
    pub version: i64,
    pub last_modified: Option<DateTime<Utc>>,
    /// `None` means the node sits directly under the root.
    pub parent_id: Option<NodeId>,
    pub is_deleted: bool,
    pub is_pinned: bool,
    pub is_synced: bool,
    pub metadata_modified: bool,
    pub is_modified: bool,
}

impl NodeMeta {
    /// Metadata for a builder-owned collection (root, trash).
    pub fn synthetic(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            version: -1,
            last_modified: None,
            parent_id: None,
            is_deleted: false,
            is_pinned: false,
            is_synced: true,
            metadata_modified: false,
            is_modified: false,
        }
    }
}

/// Variant-specific part of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DescriptorKind {
    Document { last_opened_page: u64 },
    Collection,
}

/// One parsed sidecar record, before it is linked into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub meta: NodeMeta,
    pub kind: DescriptorKind,
}

impl NodeDescriptor {
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.meta.parent_id.as_deref()
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, DescriptorKind::Collection)
    }
}

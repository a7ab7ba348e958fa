//! Error types for parsing, storage, hierarchy building and the CLI surface.

use crate::types::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Per-record failures. These never abort a scan; they are collected and
/// reported next to the tree that could still be built.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: NodeId, reason: String },

    #[error("failed to read metadata file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MetadataError {
    pub fn malformed(id: impl Into<NodeId>, reason: impl Into<String>) -> Self {
        MetadataError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Node store failures. Both are fatal to a reconstruction pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("duplicate node identifier: {0}")]
    DuplicateIdentifier(NodeId),

    #[error("identifier is reserved for synthetic collections: {0}")]
    ReservedIdentifier(NodeId),
}

/// Hierarchy builder failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("parent cycle detected: {}", chain.join(" -> "))]
    CycleDetected { chain: Vec<NodeId> },
}

/// Umbrella error for library entry points and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

//! Metadata sidecar records
//!
//! Every document or collection on the device is described by one JSON
//! sidecar file named after the node's identifier. This module decodes those
//! records into typed descriptors and scans a directory of them.

pub mod parser;
pub mod record;
pub mod scan;

pub use parser::{parse_record, COLLECTION_TYPE, DOCUMENT_TYPE};
pub use record::{DescriptorKind, NodeDescriptor, NodeMeta};
pub use scan::{scan_directory, ScanConfig, ScanOutcome};

//! One reconstruction pass: scan a sidecar directory, fill a fresh store,
//! build the hierarchy.
//!
//! Malformed records are reported next to the tree built from the rest.
//! Duplicate identifiers and parent cycles abort the pass.

use crate::error::{ApiError, MetadataError};
use crate::metadata::{scan_directory, ScanConfig};
use crate::store::{InMemoryNodeStore, NodeDescriptorStore};
use crate::tree::{BuildOptions, HierarchyBuilder, Tree};
use std::path::Path;
use tracing::{info, info_span};

/// Output of a reconstruction pass
#[derive(Debug)]
pub struct Reconstruction {
    pub tree: Tree,
    pub store: InMemoryNodeStore,
    pub failures: Vec<MetadataError>,
}

/// Reconstruct the document hierarchy stored in `dir`.
pub fn reconstruct(
    dir: &Path,
    scan: &ScanConfig,
    build: &BuildOptions,
) -> Result<Reconstruction, ApiError> {
    let span = info_span!("reconstruct", dir = %dir.display());
    let _guard = span.enter();

    let outcome = scan_directory(dir, scan)?;
    let tree = HierarchyBuilder::with_options(build.clone()).build(&outcome.store)?;
    info!(
        records = outcome.store.len(),
        failures = outcome.failures.len(),
        "Reconstruction complete"
    );

    Ok(Reconstruction {
        tree,
        store: outcome.store,
        failures: outcome.failures,
    })
}

//! Directory scan: one pass over a flat directory of sidecar files.

use crate::error::{ApiError, MetadataError};
use crate::metadata::parser::parse_record;
use crate::store::{InMemoryNodeStore, NodeDescriptorStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

fn default_extension() -> String {
    "metadata".to_string()
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extension of sidecar files (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

/// Result of scanning a directory: the populated store plus every record
/// that could not be read or decoded.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub store: InMemoryNodeStore,
    pub failures: Vec<MetadataError>,
}

/// Scan `dir` for sidecar files and parse each one into a fresh store.
///
/// Entries are visited in file-name order so repeated scans insert in the
/// same order. Unreadable or malformed records are collected, not fatal.
/// A duplicate or reserved identifier aborts the scan.
pub fn scan_directory(dir: &Path, config: &ScanConfig) -> Result<ScanOutcome, ApiError> {
    std::fs::read_dir(dir).map_err(|source| ApiError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut outcome = ScanOutcome::default();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ApiError::Io {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(config.extension.as_str()) {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            let lossy = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            warn!(path = ?path, "Skipping sidecar file with non UTF-8 name");
            outcome.failures.push(MetadataError::malformed(
                lossy,
                "file name is not valid UTF-8",
            ));
            continue;
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(source) => {
                warn!(path = ?path, error = %source, "Failed to read sidecar file");
                outcome.failures.push(MetadataError::Read {
                    path: path.to_path_buf(),
                    source,
                });
                continue;
            }
        };

        match parse_record(id, &contents) {
            Ok(descriptor) => {
                debug!(id = %id, name = %descriptor.meta.display_name, "Parsed sidecar record");
                outcome.store.insert(descriptor)?;
            }
            Err(err) => {
                warn!(id = %id, error = %err, "Skipping malformed sidecar record");
                outcome.failures.push(err);
            }
        }
    }

    Ok(outcome)
}

//! Sidecar record decoding.
//!
//! The identifier never comes from the record body: callers pass the one
//! derived from the file name.

use crate::error::MetadataError;
use crate::metadata::record::{DescriptorKind, NodeDescriptor, NodeMeta};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Discriminator value of document records.
pub const DOCUMENT_TYPE: &str = "DocumentType";

/// Discriminator value of collection (folder) records.
pub const COLLECTION_TYPE: &str = "CollectionType";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    visible_name: String,
    version: i64,
    last_modified: RawTimestamp,
    deleted: bool,
    pinned: bool,
    synced: bool,
    #[serde(rename = "metadatamodified")]
    metadata_modified: bool,
    modified: bool,
    parent: String,
    last_opened_page: Option<u64>,
}

/// The device writes `lastModified` as a quoted integer; bare integers are
/// accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    fn to_datetime(&self) -> Result<DateTime<Utc>, String> {
        let millis = match self {
            RawTimestamp::Millis(ms) => *ms,
            RawTimestamp::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("lastModified {:?} is not an integer: {}", text, e))?,
        };
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| format!("lastModified {} is out of range", millis))
    }
}

/// Decode one sidecar record into a descriptor.
///
/// Fails with `MalformedRecord` when the JSON is invalid, a required field is
/// missing, the discriminator is absent or unknown, or `lastModified` is not
/// an integer.
pub fn parse_record(id: &str, contents: &str) -> Result<NodeDescriptor, MetadataError> {
    let raw: RawRecord =
        serde_json::from_str(contents).map_err(|e| MetadataError::malformed(id, e.to_string()))?;

    let kind = match raw.kind.as_deref() {
        Some(DOCUMENT_TYPE) => {
            let page = raw.last_opened_page.ok_or_else(|| {
                MetadataError::malformed(id, "missing field `lastOpenedPage`")
            })?;
            DescriptorKind::Document {
                last_opened_page: page,
            }
        }
        Some(COLLECTION_TYPE) => DescriptorKind::Collection,
        Some(other) => {
            return Err(MetadataError::malformed(
                id,
                format!("unknown record type {:?}", other),
            ))
        }
        None => return Err(MetadataError::malformed(id, "missing field `type`")),
    };

    let last_modified = raw
        .last_modified
        .to_datetime()
        .map_err(|reason| MetadataError::malformed(id, reason))?;

    let parent_id = if raw.parent.is_empty() {
        None
    } else {
        Some(raw.parent)
    };

    Ok(NodeDescriptor {
        meta: NodeMeta {
            id: id.to_string(),
            display_name: raw.visible_name,
            version: raw.version,
            last_modified: Some(last_modified),
            parent_id,
            is_deleted: raw.deleted,
            is_pinned: raw.pinned,
            is_synced: raw.synced,
            metadata_modified: raw.metadata_modified,
            is_modified: raw.modified,
        },
        kind,
    })
}

use std::fs;
use std::path::Path;

/// Write a collection sidecar file.
pub fn write_collection(dir: &Path, id: &str, name: &str, parent: &str) {
    let body = format!(
        r#"{{
    "deleted": false,
    "lastModified": "1600000000000",
    "metadatamodified": false,
    "modified": false,
    "parent": "{parent}",
    "pinned": false,
    "synced": true,
    "type": "CollectionType",
    "version": 1,
    "visibleName": "{name}"
}}"#
    );
    fs::write(dir.join(format!("{id}.metadata")), body).unwrap();
}

/// Write a document sidecar file.
pub fn write_document(dir: &Path, id: &str, name: &str, parent: &str) {
    let body = format!(
        r#"{{
    "deleted": false,
    "lastModified": "1612345678901",
    "lastOpenedPage": 4,
    "metadatamodified": false,
    "modified": false,
    "parent": "{parent}",
    "pinned": false,
    "synced": true,
    "type": "DocumentType",
    "version": 7,
    "visibleName": "{name}"
}}"#
    );
    fs::write(dir.join(format!("{id}.metadata")), body).unwrap();
}

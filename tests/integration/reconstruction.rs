use std::fs;

use remass::error::{ApiError, HierarchyError, MetadataError};
use remass::metadata::ScanConfig;
use remass::reconstruct;
use remass::tree::BuildOptions;
use tempfile::TempDir;

use super::support::{write_collection, write_document};

fn outline(reconstruction: &remass::Reconstruction) -> Vec<(String, usize)> {
    reconstruction
        .tree
        .walk()
        .map(|(node, depth)| (node.id().to_string(), depth))
        .collect()
}

#[test]
fn nested_library_is_rebuilt_with_trash_last() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    // file names sort as: a-doc, b-folder, c-folder, d-doc
    write_document(dir, "a-doc", "Sketch", "c-folder");
    write_collection(dir, "b-folder", "Work", "");
    write_collection(dir, "c-folder", "Meetings", "b-folder");
    write_document(dir, "d-doc", "Shopping", "");
    fs::write(dir.join("a-doc.content"), "{}").unwrap();

    let result = reconstruct(dir, &ScanConfig::default(), &BuildOptions::default()).unwrap();
    assert!(result.failures.is_empty());
    let expected: Vec<(String, usize)> = vec![
        ("root".into(), 0),
        ("b-folder".into(), 1),
        ("c-folder".into(), 2),
        ("a-doc".into(), 3),
        ("d-doc".into(), 1),
        ("trash".into(), 1),
    ];
    assert_eq!(outline(&result), expected);

    let doc = result.tree.find("a-doc").unwrap();
    assert_eq!(doc.display_name(), "Sketch");
    assert_eq!(
        doc.meta().last_modified.unwrap().timestamp_millis(),
        1_612_345_678_901
    );
}

#[test]
fn malformed_record_is_reported_and_rest_is_built() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write_collection(dir, "folder", "Work", "");
    write_document(dir, "doc", "Plan", "folder");
    fs::write(
        dir.join("broken.metadata"),
        r#"{"visibleName": "No type", "parent": ""}"#,
    )
    .unwrap();

    let result = reconstruct(dir, &ScanConfig::default(), &BuildOptions::default()).unwrap();
    assert_eq!(result.failures.len(), 1);
    assert!(matches!(
        &result.failures[0],
        MetadataError::MalformedRecord { id, .. } if id == "broken"
    ));
    assert!(result.tree.find("doc").is_some());
    assert!(result.tree.find("broken").is_none());
}

#[test]
fn missing_parent_lands_in_trash() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write_document(dir, "stray", "Old notes", "deleted-folder-id");

    let result = reconstruct(dir, &ScanConfig::default(), &BuildOptions::default()).unwrap();
    let trash = result.tree.trash().unwrap();
    assert_eq!(trash.children().len(), 1);
    assert_eq!(trash.children()[0].id(), "stray");
    assert_eq!(result.tree.orphans(), &["stray".to_string()]);
}

#[test]
fn parent_cycle_aborts_the_pass() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write_collection(dir, "X", "x", "Y");
    write_collection(dir, "Y", "y", "X");

    let err = reconstruct(dir, &ScanConfig::default(), &BuildOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Hierarchy(HierarchyError::CycleDetected { .. })
    ));
}

#[test]
fn custom_extension_is_honoured() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write_collection(dir, "folder", "Work", "");
    fs::rename(dir.join("folder.metadata"), dir.join("folder.meta")).unwrap();

    let scan = ScanConfig {
        extension: "meta".to_string(),
    };
    let result = reconstruct(dir, &scan, &BuildOptions::default()).unwrap();
    assert!(result.tree.find("folder").is_some());
}

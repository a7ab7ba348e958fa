use remass::config::RemassConfig;
use remass::error::ApiError;
use remass::tooling::cli::{CliContext, Commands};
use tempfile::TempDir;

use super::support::{write_collection, write_document};

fn context(temp: &TempDir) -> CliContext {
    let dir = temp.path();
    write_collection(dir, "folder", "Work", "");
    write_document(dir, "doc", "Plan", "folder");
    write_document(dir, "stray", "Lost", "gone");
    CliContext::with_config(dir.to_path_buf(), RemassConfig::default())
}

#[test]
fn tree_json_contract_has_nested_children() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Tree {
            format: "json".to_string(),
            max_depth: None,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["id"], "root");
    let children = parsed["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["id"], "folder");
    assert_eq!(children[0]["children"][0]["id"], "doc");
    assert_eq!(children[1]["id"], "trash");
    assert_eq!(children[1]["children"][0]["id"], "stray");
}

#[test]
fn summary_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Summary {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["documents"], 2);
    assert_eq!(parsed["collections"], 1);
    assert_eq!(parsed["in_trash"], 1);
    assert!(parsed["orphans"].as_array().is_some());
    assert!(parsed["failures"].as_array().unwrap().is_empty());
}

#[test]
fn show_reports_path_and_unknown_ids() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let output = ctx
        .execute(&Commands::Show {
            id: "doc".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["path"], serde_json::json!(["root", "folder", "doc"]));
    assert_eq!(parsed["node"]["display_name"], "Plan");

    let err = ctx
        .execute(&Commands::Show {
            id: "nope".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::NodeNotFound(_)));
}

#[test]
fn tree_text_respects_max_depth() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Tree {
            format: "text".to_string(),
            max_depth: Some(1),
        })
        .unwrap();
    assert!(output.contains("DIR folder"));
    assert!(!output.contains("Plan"));
}

//! Render reconstructed trees and summaries as text or JSON.

use crate::error::{ApiError, MetadataError};
use crate::reconstruct::Reconstruction;
use crate::tree::{Node, Tree};
use crate::types::TRASH_ID;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Indented outline, four spaces per level: `name [DIR] id`.
pub fn format_tree_text(tree: &Tree, max_depth: Option<usize>, color: bool) -> String {
    let mut out = String::new();
    for (node, depth) in tree.walk().with_max_depth(max_depth) {
        let indent = " ".repeat(depth * 4);
        let line = if node.is_collection() {
            let name = if color {
                format!("{}", node.display_name().blue().bold())
            } else {
                node.display_name().to_string()
            };
            format!("{}{} DIR {}", indent, name, node.id())
        } else {
            format!("{}{} {}", indent, node.display_name(), node.id())
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Nested JSON rendering of the whole tree.
pub fn format_tree_json(tree: &Tree) -> Result<String, ApiError> {
    serde_json::to_string_pretty(tree.root())
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize tree: {}", e)))
}

/// One malformed or unreadable record.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub id: String,
    pub reason: String,
}

impl From<&MetadataError> for FailureEntry {
    fn from(err: &MetadataError) -> Self {
        match err {
            MetadataError::MalformedRecord { id, reason } => Self {
                id: id.clone(),
                reason: reason.clone(),
            },
            MetadataError::Read { path, source } => Self {
                id: path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                reason: source.to_string(),
            },
        }
    }
}

/// Counts over a reconstructed tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub documents: usize,
    pub collections: usize,
    pub top_level: usize,
    pub in_trash: usize,
    pub deleted_flagged: usize,
    pub orphans: Vec<String>,
    pub failures: Vec<FailureEntry>,
}

impl TreeSummary {
    pub fn from_reconstruction(reconstruction: &Reconstruction) -> Self {
        let tree = &reconstruction.tree;
        let mut documents = 0;
        let mut collections = 0;
        let mut deleted_flagged = 0;
        // skip the synthetic root and trash
        for (node, _) in tree.walk().skip(1) {
            if node.id() == TRASH_ID {
                continue;
            }
            match node {
                Node::Document(_) => documents += 1,
                Node::Collection(_) => collections += 1,
            }
            if node.meta().is_deleted {
                deleted_flagged += 1;
            }
        }
        let in_trash = tree
            .trash()
            .map(|trash| trash.walk().count() - 1)
            .unwrap_or(0);
        let top_level = tree
            .root()
            .children()
            .iter()
            .filter(|c| c.id() != TRASH_ID)
            .count();

        Self {
            documents,
            collections,
            top_level,
            in_trash,
            deleted_flagged,
            orphans: tree.orphans().to_vec(),
            failures: reconstruction.failures.iter().map(FailureEntry::from).collect(),
        }
    }
}

/// Summary as human-readable text.
pub fn format_summary_text(summary: &TreeSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Library")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Kind", "Count"]);
    table.add_row(vec!["Documents".to_string(), summary.documents.to_string()]);
    table.add_row(vec!["Collections".to_string(), summary.collections.to_string()]);
    table.add_row(vec!["Top level".to_string(), summary.top_level.to_string()]);
    table.add_row(vec!["In trash".to_string(), summary.in_trash.to_string()]);
    table.add_row(vec!["Flagged deleted".to_string(), summary.deleted_flagged.to_string()]);
    table.add_row(vec!["Orphans".to_string(), summary.orphans.len().to_string()]);
    out.push_str(&format!("{}\n\n", table));

    if !summary.failures.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Unreadable records")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Id", "Reason"]);
        for failure in &summary.failures {
            table.add_row(vec![failure.id.clone(), failure.reason.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// One node's metadata plus its location in the tree.
pub fn format_node_text(path: &[&Node]) -> String {
    let Some(node) = path.last() else {
        return String::new();
    };
    let meta = node.meta();
    let location: Vec<&str> = path.iter().map(|n| n.display_name()).collect();

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Id".to_string(), meta.id.clone()]);
    table.add_row(vec!["Name".to_string(), meta.display_name.clone()]);
    table.add_row(vec![
        "Kind".to_string(),
        if node.is_collection() { "collection" } else { "document" }.to_string(),
    ]);
    table.add_row(vec!["Path".to_string(), location.join(" / ")]);
    table.add_row(vec!["Version".to_string(), meta.version.to_string()]);
    table.add_row(vec![
        "Last modified".to_string(),
        meta.last_modified
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    if let Node::Document(doc) = *node {
        table.add_row(vec![
            "Last opened page".to_string(),
            doc.last_opened_page.to_string(),
        ]);
    }
    table.add_row(vec![
        "Flags".to_string(),
        format!(
            "deleted={} pinned={} synced={} modified={} metadatamodified={}",
            meta.is_deleted, meta.is_pinned, meta.is_synced, meta.is_modified, meta.metadata_modified
        ),
    ]);
    format!("{}\n", table)
}

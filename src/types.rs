//! Core types shared by the metadata parser, node store and hierarchy builder.

/// NodeId: opaque identifier of a document or collection, taken from the
/// sidecar file name (usually a UUID).
pub type NodeId = String;

/// Identifier of the synthetic root collection.
pub const ROOT_ID: &str = "root";

/// Identifier of the synthetic trash bucket.
pub const TRASH_ID: &str = "trash";

/// Returns true for identifiers owned by the builder rather than by records.
pub fn is_reserved_id(id: &str) -> bool {
    id == ROOT_ID || id == TRASH_ID
}

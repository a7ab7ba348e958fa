//! Document hierarchy: built tree types, the hierarchy builder and the walker.

pub mod builder;
pub mod node;
pub mod walker;

pub use builder::{BuildOptions, HierarchyBuilder};
pub use node::{CollectionNode, DocumentNode, Node, Tree};
pub use walker::TreeWalker;

//! Remass: document hierarchy reconstruction
//!
//! Rebuilds the folder/document tree of a note-taking tablet from the flat
//! directory of JSON metadata sidecar files it stores, one per node.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod metadata;
pub mod reconstruct;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::ApiError;
pub use reconstruct::{reconstruct, Reconstruction};

//! Virtual file tree
//!
//! Represents the workspace as a mutable tree of files and folders addressed
//! by normalized slash-delimited paths, with insertion-ordered children.

pub mod node;
pub mod path;
pub mod store;

pub use node::{FileNode, FolderNode, Node};
pub use store::{NodeRef, Tree};

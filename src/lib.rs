//! Atelier: In-Memory Coding Workspace Core
//!
//! A virtual project tree of files and folders addressed by slash-delimited
//! paths, kept in lockstep with a flat id-indexed file index, and reconciled
//! bidirectionally with a remote repository host.

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod remote;
pub mod tree;
pub mod types;
pub mod views;
pub mod workspace;

pub use error::{RemoteError, WorkspaceError};
pub use index::{FileIndex, FileRecord};
pub use tree::{FileNode, FolderNode, Node, NodeRef, Tree};
pub use types::{Language, NodeId};
pub use workspace::{SharedWorkspace, Workspace};

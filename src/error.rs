//! Error types for the workspace core.

use crate::types::NodeId;
use thiserror::Error;

/// Structural errors raised by the path model, tree store, file index, and
/// workspace mutation API.
///
/// Every variant is surfaced synchronously to the immediate caller; nothing
/// in the core is fatal to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Parent folder not found: {0}")]
    ParentNotFound(String),

    #[error("Path already occupied: {0}")]
    PathCollision(String),

    #[error("No node at path: {0}")]
    NotFound(String),

    #[error("File not found in index: {0}")]
    FileNotFound(NodeId),

    #[error("The root folder cannot be removed")]
    RootRemoval,

    #[error("File index out of lockstep with tree: {0}")]
    IndexMismatch(String),
}

/// Errors raised by the remote host bridge.
///
/// `Conflict` is per-file (optimistic-concurrency precondition rejected) and
/// is never retried automatically; the remaining variants are transport or
/// auth level and are retryable by the caller.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote rejected revision precondition for {path}")]
    Conflict { path: String },

    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    #[error("Remote authentication failed: {0}")]
    AuthFailed(String),

    #[error("Remote rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Malformed remote response: {0}")]
    BadResponse(String),
}

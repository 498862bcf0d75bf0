//! Remote host bridge
//!
//! Unified interface to a remote source-control host's file-listing API.
//! The core only needs three operations: list a directory, fetch one file's
//! content, and write one file back with an optimistic-concurrency
//! precondition. Transfer encoding (base64 on GitHub) is the client's
//! concern, not the sync layer's.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod github;
pub mod sync;

pub use github::{GitHubClient, Repository};
pub use sync::{
    fetch_workspace, pull, push_all, push_file, FetchedWorkspace, PushOutcome, PushReport,
    PushStatus, LOAD_FAILURE_SENTINEL,
};

/// Coordinates of a remote repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RemoteLocation {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

/// Kind of a remote directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a remote directory listing.
///
/// `path` is the host-side repository-relative path (no leading slash);
/// `revision` is the host's opaque version token for the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub path: String,
    pub kind: EntryKind,
    pub revision: String,
    pub size: Option<u64>,
}

/// Payload for a remote file write.
#[derive(Debug, Clone)]
pub struct WritePayload<'a> {
    pub content: &'a str,
    /// Precondition token: present for an update, absent for a create.
    pub revision: Option<&'a str>,
    pub message: &'a str,
}

/// Read/write file-listing contract a remote host client must provide.
#[async_trait]
pub trait RemoteHost: Send + Sync {
    /// List the entries of one directory (`""` for the repository root).
    async fn list_directory(
        &self,
        location: &RemoteLocation,
        path: &str,
    ) -> Result<Vec<RemoteEntry>, RemoteError>;

    /// Fetch one file's decoded content.
    async fn get_file_content(
        &self,
        location: &RemoteLocation,
        path: &str,
    ) -> Result<String, RemoteError>;

    /// Create or update one file; returns the new revision token.
    async fn write_file(
        &self,
        location: &RemoteLocation,
        path: &str,
        payload: WritePayload<'_>,
    ) -> Result<String, RemoteError>;
}

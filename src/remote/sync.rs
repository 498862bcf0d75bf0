//! Remote sync adapter: listing-to-tree conversion and per-file push.
//!
//! Pulling converts a host's recursive directory listing into a tree store
//! plus file index; pushing serializes the index's files back as individual
//! remote writes. Tree-building prefers partial success: a workspace with 99
//! of 100 files loaded is more useful than none, so per-file and per-subtree
//! failures are logged and salvaged rather than aborting the walk. Push never
//! swallows failures; every file's outcome is reported individually.

use crate::error::RemoteError;
use crate::index::{FileIndex, FileRecord};
use crate::remote::{EntryKind, RemoteEntry, RemoteHost, RemoteLocation, WritePayload};
use crate::tree::node::{FileNode, FolderNode, Node};
use crate::tree::{path, Tree};
use crate::types::{Language, NodeId};
use crate::workspace::SharedWorkspace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Content stored for a file whose remote fetch failed.
pub const LOAD_FAILURE_SENTINEL: &str = "// Failed to load content";

/// A tree and index materialized from a remote listing, ready for
/// `Workspace::replace_all`.
#[derive(Debug)]
pub struct FetchedWorkspace {
    pub tree: Tree,
    pub files: FileIndex,
}

/// Convert a remote repository's recursive listing into a tree and index.
///
/// The walk is an explicit worklist rather than recursion, so listing depth
/// is bounded by the queue, not the stack. Only a failure to list the
/// repository root aborts; a failed file fetch materializes the file with
/// [`LOAD_FAILURE_SENTINEL`] content, and a failed subtree listing leaves
/// that folder childless.
#[instrument(skip(host), fields(owner = %location.owner, repo = %location.repo, branch = %location.branch))]
pub async fn fetch_workspace(
    host: &dyn RemoteHost,
    location: &RemoteLocation,
) -> Result<FetchedWorkspace, RemoteError> {
    let start = Instant::now();
    info!("Starting remote fetch");

    let mut tree = Tree::new();
    let mut files = FileIndex::new();

    let root_entries = host.list_directory(location, "").await?;

    // (entries to ingest, local path of the folder that owns them)
    let mut worklist: VecDeque<(Vec<RemoteEntry>, String)> = VecDeque::new();
    worklist.push_back((root_entries, path::ROOT.to_string()));

    while let Some((entries, parent_path)) = worklist.pop_front() {
        for entry in entries {
            let name = entry.path.rsplit('/').next().unwrap_or("").to_string();
            let local_path = match path::join(&parent_path, &name) {
                Ok(p) => p,
                Err(e) => {
                    warn!(remote_path = %entry.path, error = %e, "Skipping unrepresentable remote entry");
                    continue;
                }
            };

            match entry.kind {
                EntryKind::Dir => {
                    let folder = Node::Folder(FolderNode {
                        id: NodeId::new(),
                        name,
                        path: local_path.clone(),
                        children: Vec::new(),
                        expanded: true,
                    });
                    if let Err(e) = tree.insert(&parent_path, folder) {
                        warn!(path = %local_path, error = %e, "Skipping remote folder");
                        continue;
                    }
                    match host.list_directory(location, &entry.path).await {
                        Ok(children) => worklist.push_back((children, local_path)),
                        Err(e) => {
                            warn!(path = %local_path, error = %e, "Failed to list remote folder; leaving it empty");
                        }
                    }
                }
                EntryKind::File => {
                    let content = match host.get_file_content(location, &entry.path).await {
                        Ok(content) => content,
                        Err(e) => {
                            warn!(path = %local_path, error = %e, "Failed to fetch file content; using sentinel");
                            LOAD_FAILURE_SENTINEL.to_string()
                        }
                    };

                    let id = NodeId::new();
                    let language = Language::from_filename(&name);
                    let node = Node::File(FileNode {
                        id,
                        name: name.clone(),
                        path: local_path.clone(),
                        language,
                    });
                    if let Err(e) = tree.insert(&parent_path, node) {
                        warn!(path = %local_path, error = %e, "Skipping remote file");
                        continue;
                    }
                    files.insert(FileRecord {
                        id,
                        name,
                        path: local_path,
                        content,
                        language,
                        remote_revision: Some(entry.revision),
                    });
                }
            }
        }
    }

    info!(
        files = files.len(),
        duration_ms = start.elapsed().as_millis(),
        "Remote fetch completed"
    );
    Ok(FetchedWorkspace { tree, files })
}

/// Fetch a repository and atomically replace the workspace contents with it.
/// The active-file pointer is cleared.
pub async fn pull(
    host: &dyn RemoteHost,
    location: &RemoteLocation,
    shared: &SharedWorkspace,
) -> Result<(), RemoteError> {
    let fetched = fetch_workspace(host, location).await?;
    shared.write(|ws| ws.replace_all(fetched.tree, fetched.files, None));
    Ok(())
}

/// Write one file to the remote, supplying its last-known revision as the
/// optimistic-concurrency precondition when present (update) and omitting it
/// otherwise (create). Returns the new revision token.
pub async fn push_file(
    host: &dyn RemoteHost,
    location: &RemoteLocation,
    record: &FileRecord,
    message: &str,
) -> Result<String, RemoteError> {
    let remote_path = record.path.trim_start_matches('/');
    host.write_file(
        location,
        remote_path,
        WritePayload {
            content: &record.content,
            revision: record.remote_revision.as_deref(),
            message,
        },
    )
    .await
}

/// Outcome of pushing one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PushStatus {
    Pushed { revision: String },
    Conflict,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushOutcome {
    pub id: NodeId,
    pub path: String,
    #[serde(flatten)]
    pub status: PushStatus,
}

/// Per-file status list for a bulk push.
///
/// The outcome list is the source of truth for success; nothing here is
/// derived from workspace state read back after the loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushReport {
    pub outcomes: Vec<PushOutcome>,
    pub completed_at: DateTime<Utc>,
}

impl PushReport {
    pub fn all_pushed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| matches!(outcome.status, PushStatus::Pushed { .. }))
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &PushOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, PushStatus::Conflict))
    }
}

/// Push every file in the index, sequentially, in path order.
///
/// Writes are serialized with a fixed inter-call delay to respect the host's
/// rate limits, and the loop continues past per-file failures. Each
/// successful write records the new revision token back into the index
/// through the shared handle.
#[instrument(skip(host, shared), fields(owner = %location.owner, repo = %location.repo))]
pub async fn push_all(
    host: &dyn RemoteHost,
    location: &RemoteLocation,
    shared: &SharedWorkspace,
    message: &str,
    delay: Duration,
) -> PushReport {
    let mut records: Vec<FileRecord> = shared.read(|ws| ws.files().iter().cloned().collect());
    records.sort_by(|a, b| a.path.cmp(&b.path));
    info!(files = records.len(), "Starting bulk push");

    let mut outcomes = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let status = match push_file(host, location, record, message).await {
            Ok(revision) => {
                // The file may have been deleted while the write was in
                // flight; a dangling id is not a push failure.
                let _ = shared.write(|ws| ws.set_remote_revision(record.id, revision.clone()));
                debug!(path = %record.path, "Pushed file");
                PushStatus::Pushed { revision }
            }
            Err(RemoteError::Conflict { .. }) => {
                warn!(path = %record.path, "Push rejected: revision precondition failed");
                PushStatus::Conflict
            }
            Err(e) => {
                warn!(path = %record.path, error = %e, "Push failed");
                PushStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(PushOutcome {
            id: record.id,
            path: record.path.clone(),
            status,
        });
    }

    let report = PushReport {
        outcomes,
        completed_at: Utc::now(),
    };
    info!(all_pushed = report.all_pushed(), "Bulk push completed");
    report
}

//! File index: flat id-keyed map of file records.
//!
//! Kept in lockstep with the tree store by the workspace; its keys are
//! exactly the ids of the file nodes reachable in the tree. Content updates
//! arrive here at keystroke frequency, so `update_content` is a single map
//! lookup and an in-place replacement.

use crate::error::WorkspaceError;
use crate::types::{Language, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Full record for one file: identity, addressing, content, and the
/// last-known remote revision token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub content: String,
    pub language: Language,
    /// Present only for files materialized from a remote host; required as
    /// the optimistic-concurrency precondition when overwriting that file
    /// remotely.
    pub remote_revision: Option<String>,
}

/// Flat mapping from file id to record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileIndex {
    records: HashMap<NodeId, FileRecord>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&FileRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn insert(&mut self, record: FileRecord) {
        self.records.insert(record.id, record);
    }

    pub fn remove(&mut self, id: NodeId) -> Option<FileRecord> {
        self.records.remove(&id)
    }

    /// Replace a file's content, leaving language, path, and revision
    /// untouched. Fails with `FileNotFound` for an absent id.
    pub fn update_content(
        &mut self,
        id: NodeId,
        content: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(WorkspaceError::FileNotFound(id))?;
        record.content = content.into();
        Ok(())
    }

    /// Record the revision token returned by a successful remote write.
    pub fn set_remote_revision(
        &mut self,
        id: NodeId,
        revision: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(WorkspaceError::FileNotFound(id))?;
        record.remote_revision = Some(revision.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.records.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, path: &str, content: &str) -> FileRecord {
        FileRecord {
            id: NodeId::new(),
            name: name.to_string(),
            path: path.to_string(),
            content: content.to_string(),
            language: Language::from_filename(name),
            remote_revision: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = FileIndex::new();
        let rec = record("app.js", "/app.js", "let x = 1;");
        let id = rec.id;
        index.insert(rec);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(id).unwrap().path, "/app.js");
    }

    #[test]
    fn test_update_content_changes_only_content() {
        let mut index = FileIndex::new();
        let rec = record("app.js", "/app.js", "old");
        let id = rec.id;
        index.insert(rec);

        index.update_content(id, "new").unwrap();

        let updated = index.get(id).unwrap();
        assert_eq!(updated.content, "new");
        assert_eq!(updated.language, Language::Javascript);
        assert_eq!(updated.path, "/app.js");
        assert_eq!(updated.id, id);
        assert!(updated.remote_revision.is_none());
    }

    #[test]
    fn test_update_content_missing_id() {
        let mut index = FileIndex::new();
        let id = NodeId::new();
        assert_eq!(
            index.update_content(id, "x"),
            Err(WorkspaceError::FileNotFound(id))
        );
    }

    #[test]
    fn test_set_remote_revision() {
        let mut index = FileIndex::new();
        let rec = record("app.js", "/app.js", "");
        let id = rec.id;
        index.insert(rec);

        index.set_remote_revision(id, "abc123").unwrap();
        assert_eq!(index.get(id).unwrap().remote_revision.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_remove() {
        let mut index = FileIndex::new();
        let rec = record("app.js", "/app.js", "");
        let id = rec.id;
        index.insert(rec);

        assert!(index.remove(id).is_some());
        assert!(index.remove(id).is_none());
        assert!(index.is_empty());
    }
}

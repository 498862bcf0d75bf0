//! Workspace state container.
//!
//! Owns the tree store, the file index, and the active-file pointer, and
//! exposes the mutation API consumed by the UI layer and by remote sync.
//! Every operation is a total function from one valid snapshot to the next:
//! on error the prior snapshot is left unchanged, and readers never observe
//! a partially-applied mutation.

use crate::error::WorkspaceError;
use crate::index::{FileIndex, FileRecord};
use crate::tree::node::{FileNode, FolderNode, Node};
use crate::tree::{path, Tree};
use crate::types::{Language, NodeId};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// The owning state container for the tree, file index, and active file.
#[derive(Debug, Clone)]
pub struct Workspace {
    tree: Tree,
    files: FileIndex,
    active_file: Option<NodeId>,
}

impl Workspace {
    /// An empty workspace: bare root folder, no files.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            files: FileIndex::new(),
            active_file: None,
        }
    }

    /// The built-in starter project: `/index.html`, `/styles.css`,
    /// `/app.js`, with the first file active.
    pub fn seeded() -> Self {
        let mut ws = Self::new();

        // Seed creation cannot collide in an empty tree; creation errors
        // here would be a bug in the seed table itself.
        let mut first = None;
        for (name, content) in seed_files() {
            if let Ok(id) = ws.create_file(name, "/", content) {
                first.get_or_insert(id);
            }
        }
        ws.active_file = first;
        ws
    }

    /// Rebuild a workspace from parts, validating the lockstep invariant:
    /// index keys must be exactly the ids of the file nodes in the tree.
    pub fn from_parts(tree: Tree, files: FileIndex) -> Result<Self, WorkspaceError> {
        let tree_files = tree.files();
        if tree_files.len() != files.len()
            || tree_files.iter().any(|node| !files.contains(node.id))
        {
            return Err(WorkspaceError::IndexMismatch(
                "index keys do not match the tree's file nodes".to_string(),
            ));
        }
        Ok(Self {
            tree,
            files,
            active_file: None,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn files(&self) -> &FileIndex {
        &self.files
    }

    pub fn file(&self, id: NodeId) -> Option<&FileRecord> {
        self.files.get(id)
    }

    pub fn active_file_id(&self) -> Option<NodeId> {
        self.active_file
    }

    /// The record of the active file; `None` when no file is selected or the
    /// pointer dangles (callers may pass ids without validation).
    pub fn active_file(&self) -> Option<&FileRecord> {
        self.active_file.and_then(|id| self.files.get(id))
    }

    /// Create a file under `parent_path` and register it in the index.
    ///
    /// Language is derived from the filename extension once, here. Does not
    /// change the active file.
    pub fn create_file(
        &mut self,
        name: &str,
        parent_path: &str,
        content: impl Into<String>,
    ) -> Result<NodeId, WorkspaceError> {
        let file_path = path::join(parent_path, name)?;
        let id = NodeId::new();
        let language = Language::from_filename(name);

        // Tree insert is the gate; the index is touched only after it
        // succeeds, so a rejected insert leaves the snapshot untouched.
        self.tree.insert(
            parent_path,
            Node::File(FileNode {
                id,
                name: name.to_string(),
                path: file_path.clone(),
                language,
            }),
        )?;
        self.files.insert(FileRecord {
            id,
            name: name.to_string(),
            path: file_path.clone(),
            content: content.into(),
            language,
            remote_revision: None,
        });

        debug!(path = %file_path, language = language.as_str(), "Created file");
        Ok(id)
    }

    /// Create a folder under `parent_path`, expanded by default.
    pub fn create_folder(&mut self, name: &str, parent_path: &str) -> Result<NodeId, WorkspaceError> {
        let folder_path = path::join(parent_path, name)?;
        let id = NodeId::new();

        self.tree.insert(
            parent_path,
            Node::Folder(FolderNode {
                id,
                name: name.to_string(),
                path: folder_path.clone(),
                children: Vec::new(),
                expanded: true,
            }),
        )?;

        debug!(path = %folder_path, "Created folder");
        Ok(id)
    }

    /// Point the editor at a file, or at nothing.
    ///
    /// Membership is not validated; an id that is not in the index simply
    /// resolves to "no file selected" on the read side.
    pub fn set_active_file(&mut self, id: Option<NodeId>) {
        self.active_file = id;
    }

    /// Replace a file's content. The single mutation path for editor
    /// keystroke propagation.
    pub fn update_file_content(
        &mut self,
        id: NodeId,
        content: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        self.files.update_content(id, content)
    }

    /// Record the revision token returned by a successful remote write.
    pub fn set_remote_revision(
        &mut self,
        id: NodeId,
        revision: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        self.files.set_remote_revision(id, revision)
    }

    /// Delete the file at `path`. Idempotent: a missing path is a no-op.
    ///
    /// If the deleted file was active, the active pointer is cleared and not
    /// reassigned; silently switching the editor to another file would
    /// surprise the user.
    pub fn delete_file(&mut self, target: &str) -> Result<(), WorkspaceError> {
        self.remove_path(target)
    }

    /// Delete the folder at `path` and its entire subtree, pruning every
    /// contained file from the index. Root is undeletable.
    pub fn delete_folder(&mut self, target: &str) -> Result<(), WorkspaceError> {
        self.remove_path(target)
    }

    /// Toggle a folder's expansion flag; no-op for files and missing paths.
    pub fn toggle_expanded(&mut self, target: &str) {
        self.tree.toggle_expanded(target);
    }

    /// Atomically swap in a new tree and index, as built by a remote load.
    ///
    /// The active pointer is cleared unless the caller supplies one.
    pub fn replace_all(&mut self, tree: Tree, files: FileIndex, active: Option<NodeId>) {
        self.tree = tree;
        self.files = files;
        self.active_file = active;
        debug!(files = self.files.len(), "Replaced workspace contents");
    }

    fn remove_path(&mut self, target: &str) -> Result<(), WorkspaceError> {
        let removed = self.tree.remove(target)?;
        if let Some(node) = removed {
            let pruned = node.file_ids();
            for id in &pruned {
                self.files.remove(*id);
                if self.active_file == Some(*id) {
                    self.active_file = None;
                }
            }
            debug!(path = %node.path(), pruned = pruned.len(), "Removed node");
        }
        Ok(())
    }

    /// Lockstep invariant check: index keys == reachable file-node ids.
    /// Read-side helper for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let tree_files = self.tree.files();
        tree_files.len() == self.files.len()
            && tree_files.iter().all(|node| self.files.contains(node.id))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_files() -> [(&'static str, &'static str); 3] {
    [
        (
            "index.html",
            "<html>\n  <head>\n    <title>My App</title>\n    <link rel=\"stylesheet\" href=\"styles.css\">\n  </head>\n  <body>\n    <div id=\"app\"></div>\n    <script src=\"app.js\"></script>\n  </body>\n</html>",
        ),
        (
            "styles.css",
            "body {\n  font-family: Arial, sans-serif;\n  margin: 0;\n  padding: 20px;\n}\n\n#app {\n  background-color: #f5f5f5;\n  border-radius: 5px;\n  padding: 20px;\n}",
        ),
        (
            "app.js",
            "// Main application code\ndocument.addEventListener(\"DOMContentLoaded\", () => {\n  const appElement = document.getElementById(\"app\");\n  appElement.innerHTML = \"<h1>Hello, World!</h1>\";\n});",
        ),
    ]
}

/// Cloneable shared handle around a workspace.
///
/// The workspace has a single logical writer: UI operations and remote sync
/// effects both go through this handle, which serializes mutations under a
/// write lock. Remote I/O itself runs outside the lock; only its effects are
/// applied through `write`.
#[derive(Debug, Clone)]
pub struct SharedWorkspace {
    inner: Arc<RwLock<Workspace>>,
}

impl SharedWorkspace {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            inner: Arc::new(RwLock::new(workspace)),
        }
    }

    /// Run a closure against a consistent read snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&Workspace) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a mutation atomically with respect to all other operations.
    pub fn write<R>(&self, f: impl FnOnce(&mut Workspace) -> R) -> R {
        f(&mut self.inner.write())
    }
}

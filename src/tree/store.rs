//! Tree store: the authoritative folder/file tree rooted at `/`.
//!
//! Lookup is a depth-first search by exact path. That is linear in the size
//! of the tree, which is acceptable at editor scale (tens to hundreds of
//! nodes, not a real filesystem). Children keep insertion order; nothing is
//! sorted by name or type, so new items appear where they were created.

use crate::error::WorkspaceError;
use crate::tree::node::{FileNode, FolderNode, Node};
use crate::tree::path::{self, ROOT};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Borrowed view of a node in the tree, root included.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    File(&'a FileNode),
    Folder(&'a FolderNode),
}

impl NodeRef<'_> {
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::File(f) => f.id,
            NodeRef::Folder(d) => d.id,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            NodeRef::File(f) => &f.path,
            NodeRef::Folder(d) => &d.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NodeRef::Folder(_))
    }
}

/// The workspace tree, rooted at exactly one folder with path `/`.
///
/// Invariant: every descendant's path equals `join(parent.path, name)`, and
/// paths are unique across the whole tree. Files and folders share one path
/// namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    root: FolderNode,
}

impl Tree {
    /// Create a tree with an empty root folder.
    pub fn new() -> Self {
        Self {
            root: FolderNode {
                id: NodeId::new(),
                name: "root".to_string(),
                path: ROOT.to_string(),
                children: Vec::new(),
                expanded: true,
            },
        }
    }

    pub fn root(&self) -> &FolderNode {
        &self.root
    }

    /// Find the node at `path`, or `None` if nothing lives there.
    pub fn find(&self, path: &str) -> Option<NodeRef<'_>> {
        let path = path::normalize(path);
        if path == ROOT {
            return Some(NodeRef::Folder(&self.root));
        }
        find_in(&self.root, &path).map(|node| match node {
            Node::File(f) => NodeRef::File(f),
            Node::Folder(d) => NodeRef::Folder(d),
        })
    }

    /// Append `node` to the folder at `parent_path`.
    ///
    /// The caller computes `node.path` via `path::join` beforehand. Fails
    /// with `ParentNotFound` if `parent_path` does not resolve to a folder
    /// and `PathCollision` if any node already occupies `node.path`.
    pub fn insert(&mut self, parent_path: &str, node: Node) -> Result<(), WorkspaceError> {
        let parent_path = path::normalize(parent_path);

        if self.find(node.path()).is_some() {
            return Err(WorkspaceError::PathCollision(node.path().to_string()));
        }

        let parent = self
            .find_folder_mut(&parent_path)
            .ok_or(WorkspaceError::ParentNotFound(parent_path))?;
        parent.children.push(node);
        Ok(())
    }

    /// Detach and return the node at `path`, subtree included.
    ///
    /// Returns `Ok(None)` if nothing exists at `path`; delete is idempotent
    /// from the caller's perspective. The root folder may never be removed.
    pub fn remove(&mut self, path: &str) -> Result<Option<Node>, WorkspaceError> {
        let path = path::normalize(path);
        if path == ROOT {
            return Err(WorkspaceError::RootRemoval);
        }

        // Non-root paths always have a parent; detach from its child list.
        let parent_path = match path::parent(&path) {
            Some(p) => p.to_string(),
            None => return Ok(None),
        };
        let parent = match self.find_folder_mut(&parent_path) {
            Some(folder) => folder,
            None => return Ok(None),
        };

        let position = parent.children.iter().position(|child| child.path() == path);
        Ok(position.map(|idx| parent.children.remove(idx)))
    }

    /// Flip the `expanded` flag of the folder at `path`; no-op if the path
    /// does not resolve to a folder.
    pub fn toggle_expanded(&mut self, path: &str) {
        let path = path::normalize(path);
        if let Some(folder) = self.find_folder_mut(&path) {
            folder.expanded = !folder.expanded;
        }
    }

    /// All file nodes reachable in the tree, depth-first.
    pub fn files(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        collect_files(&self.root, &mut out);
        out
    }

    fn find_folder_mut(&mut self, path: &str) -> Option<&mut FolderNode> {
        if path == ROOT {
            return Some(&mut self.root);
        }
        find_folder_in_mut(&mut self.root, path)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

fn find_in<'a>(folder: &'a FolderNode, path: &str) -> Option<&'a Node> {
    for child in &folder.children {
        if child.path() == path {
            return Some(child);
        }
        if let Node::Folder(sub) = child {
            if let Some(found) = find_in(sub, path) {
                return Some(found);
            }
        }
    }
    None
}

fn find_folder_in_mut<'a>(folder: &'a mut FolderNode, path: &str) -> Option<&'a mut FolderNode> {
    if folder.path == path {
        return Some(folder);
    }
    for child in folder.children.iter_mut() {
        if let Node::Folder(sub) = child {
            if let Some(found) = find_folder_in_mut(sub, path) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_files<'a>(folder: &'a FolderNode, out: &mut Vec<&'a FileNode>) {
    for child in &folder.children {
        match child {
            Node::File(f) => out.push(f),
            Node::Folder(sub) => collect_files(sub, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    fn file_node(name: &str, parent: &str) -> Node {
        let file_path = path::join(parent, name).unwrap();
        Node::File(FileNode {
            id: NodeId::new(),
            name: name.to_string(),
            path: file_path,
            language: Language::from_filename(name),
        })
    }

    fn folder_node(name: &str, parent: &str) -> Node {
        let folder_path = path::join(parent, name).unwrap();
        Node::Folder(FolderNode {
            id: NodeId::new(),
            name: name.to_string(),
            path: folder_path,
            children: Vec::new(),
            expanded: true,
        })
    }

    #[test]
    fn test_find_root() {
        let tree = Tree::new();
        let root = tree.find("/").unwrap();
        assert!(root.is_folder());
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn test_insert_then_find() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("app.js", "/")).unwrap();

        let found = tree.find("/app.js").unwrap();
        assert!(!found.is_folder());
        assert_eq!(found.path(), "/app.js");
    }

    #[test]
    fn test_insert_into_missing_parent() {
        let mut tree = Tree::new();
        let result = tree.insert("/nested", file_node("app.js", "/nested"));
        assert_eq!(
            result,
            Err(WorkspaceError::ParentNotFound("/nested".to_string()))
        );
    }

    #[test]
    fn test_insert_into_file_parent_fails() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("app.js", "/")).unwrap();

        let result = tree.insert("/app.js", file_node("inner.js", "/app.js"));
        assert_eq!(
            result,
            Err(WorkspaceError::ParentNotFound("/app.js".to_string()))
        );
    }

    #[test]
    fn test_insert_collision() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("app.js", "/")).unwrap();

        let result = tree.insert("/", file_node("app.js", "/"));
        assert_eq!(
            result,
            Err(WorkspaceError::PathCollision("/app.js".to_string()))
        );
    }

    #[test]
    fn test_folder_and_file_share_path_namespace() {
        let mut tree = Tree::new();
        tree.insert("/", folder_node("app.js", "/")).unwrap();

        let result = tree.insert("/", file_node("app.js", "/"));
        assert_eq!(
            result,
            Err(WorkspaceError::PathCollision("/app.js".to_string()))
        );
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("zeta.js", "/")).unwrap();
        tree.insert("/", file_node("alpha.js", "/")).unwrap();
        tree.insert("/", folder_node("mid", "/")).unwrap();

        let names: Vec<&str> = tree.root().children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["zeta.js", "alpha.js", "mid"]);
    }

    #[test]
    fn test_remove_file() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("app.js", "/")).unwrap();

        let removed = tree.remove("/app.js").unwrap();
        assert!(removed.is_some());
        assert!(tree.find("/app.js").is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("app.js", "/")).unwrap();

        assert!(tree.remove("/app.js").unwrap().is_some());
        assert!(tree.remove("/app.js").unwrap().is_none());
        assert!(tree.remove("/never-existed.js").unwrap().is_none());
    }

    #[test]
    fn test_remove_folder_detaches_subtree() {
        let mut tree = Tree::new();
        tree.insert("/", folder_node("src", "/")).unwrap();
        tree.insert("/src", file_node("app.js", "/src")).unwrap();
        tree.insert("/src", folder_node("lib", "/src")).unwrap();
        tree.insert("/src/lib", file_node("util.ts", "/src/lib"))
            .unwrap();

        let removed = tree.remove("/src").unwrap().unwrap();
        assert_eq!(removed.file_ids().len(), 2);
        assert!(tree.find("/src").is_none());
        assert!(tree.find("/src/lib/util.ts").is_none());
    }

    #[test]
    fn test_remove_root_rejected() {
        let mut tree = Tree::new();
        assert!(matches!(tree.remove("/"), Err(WorkspaceError::RootRemoval)));
    }

    #[test]
    fn test_toggle_expanded() {
        let mut tree = Tree::new();
        tree.insert("/", folder_node("src", "/")).unwrap();

        tree.toggle_expanded("/src");
        match tree.find("/src").unwrap() {
            NodeRef::Folder(folder) => assert!(!folder.expanded),
            NodeRef::File(_) => panic!("expected a folder"),
        }

        // No-op on files and missing paths
        tree.toggle_expanded("/missing");
        tree.insert("/", file_node("app.js", "/")).unwrap();
        tree.toggle_expanded("/app.js");
    }

    #[test]
    fn test_files_walks_whole_tree() {
        let mut tree = Tree::new();
        tree.insert("/", file_node("top.js", "/")).unwrap();
        tree.insert("/", folder_node("src", "/")).unwrap();
        tree.insert("/src", file_node("app.js", "/src")).unwrap();

        let paths: Vec<&str> = tree.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["/top.js", "/src/app.js"]);
    }
}

//! Tree node types: files, folders, and the tagged union over both.

use crate::types::{Language, NodeId};
use serde::{Deserialize, Serialize};

/// Structural entry for a file in the tree.
///
/// Content lives in the File Index, not here; the tree carries only what the
/// explorer needs to render and address the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub language: Language,
}

/// Folder entry with insertion-ordered children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub children: Vec<Node>,
    pub expanded: bool,
}

/// A tree node is either a file or a folder; every consumer matches
/// exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::File(f) => f.id,
            Node::Folder(d) => d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) => &d.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::File(f) => &f.path,
            Node::Folder(d) => &d.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// Ids of every file in this node's subtree, the node itself included.
    pub fn file_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        collect_file_ids(self, &mut ids);
        ids
    }
}

fn collect_file_ids(node: &Node, out: &mut Vec<NodeId>) {
    match node {
        Node::File(f) => out.push(f.id),
        Node::Folder(d) => {
            for child in &d.children {
                collect_file_ids(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, path: &str) -> Node {
        Node::File(FileNode {
            id: NodeId::new(),
            name: name.to_string(),
            path: path.to_string(),
            language: Language::from_filename(name),
        })
    }

    #[test]
    fn test_file_ids_walks_nested_folders() {
        let inner = Node::Folder(FolderNode {
            id: NodeId::new(),
            name: "lib".to_string(),
            path: "/src/lib".to_string(),
            children: vec![file("util.ts", "/src/lib/util.ts")],
            expanded: true,
        });
        let root = Node::Folder(FolderNode {
            id: NodeId::new(),
            name: "src".to_string(),
            path: "/src".to_string(),
            children: vec![file("app.js", "/src/app.js"), inner],
            expanded: true,
        });

        assert_eq!(root.file_ids().len(), 2);
    }

    #[test]
    fn test_empty_folder_has_no_file_ids() {
        let folder = Node::Folder(FolderNode {
            id: NodeId::new(),
            name: "empty".to_string(),
            path: "/empty".to_string(),
            children: vec![],
            expanded: false,
        });
        assert!(folder.file_ids().is_empty());
    }
}

//! Workspace Views
//!
//! Read-only presentation helpers over a workspace snapshot: a textual
//! explorer outline and breadcrumb segments for the active path. No mutation
//! happens here.

use crate::tree::node::{FolderNode, Node};
use crate::workspace::Workspace;
use std::fmt::Write;

/// Render an indented outline of the tree, in child insertion order.
///
/// Collapsed folders are listed but their contents are not descended into,
/// matching what an explorer pane would show.
pub fn outline(workspace: &Workspace) -> String {
    let mut out = String::new();
    render_folder(workspace.tree().root(), 0, &mut out);
    out
}

fn render_folder(folder: &FolderNode, depth: usize, out: &mut String) {
    for child in &folder.children {
        let indent = "  ".repeat(depth);
        match child {
            Node::File(file) => {
                let _ = writeln!(out, "{}{}", indent, file.name);
            }
            Node::Folder(sub) => {
                let marker = if sub.expanded { "v" } else { ">" };
                let _ = writeln!(out, "{}{} {}/", indent, marker, sub.name);
                if sub.expanded {
                    render_folder(sub, depth + 1, out);
                }
            }
        }
    }
}

/// Path segments for breadcrumb rendering. The root contributes no segment;
/// its name is never shown.
pub fn breadcrumbs(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

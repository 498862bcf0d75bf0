//! Core identifier and language types for the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier for a tree node (file or folder).
///
/// Generated once at node creation and never changed; the File Index is keyed
/// by these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Editor language associated with a file.
///
/// Derived from the filename extension exactly once, at creation time, and
/// never recomputed afterward (renames do not exist in this model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Jsx,
    Tsx,
    Html,
    Css,
    Json,
    Markdown,
    Python,
}

impl Language {
    /// Map a filename to its language via the fixed extension table.
    ///
    /// Files with no extension or an unrecognized one are `Javascript`. That
    /// default is observable, documented behavior other components rely on,
    /// not an accident; there is deliberately no "unknown" variant.
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(stem, ext)| if stem.is_empty() { "" } else { ext })
            .unwrap_or("");

        match extension.to_ascii_lowercase().as_str() {
            "js" => Language::Javascript,
            "ts" => Language::Typescript,
            "jsx" => Language::Jsx,
            "tsx" => Language::Tsx,
            "html" => Language::Html,
            "css" => Language::Css,
            "json" => Language::Json,
            "md" => Language::Markdown,
            "py" => Language::Python,
            _ => Language::Javascript,
        }
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Jsx => "jsx",
            Language::Tsx => "tsx",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Markdown => "markdown",
            Language::Python => "python",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_language_extension_table() {
        assert_eq!(Language::from_filename("app.js"), Language::Javascript);
        assert_eq!(Language::from_filename("app.ts"), Language::Typescript);
        assert_eq!(Language::from_filename("view.jsx"), Language::Jsx);
        assert_eq!(Language::from_filename("view.tsx"), Language::Tsx);
        assert_eq!(Language::from_filename("index.html"), Language::Html);
        assert_eq!(Language::from_filename("styles.css"), Language::Css);
        assert_eq!(Language::from_filename("data.json"), Language::Json);
        assert_eq!(Language::from_filename("README.md"), Language::Markdown);
        assert_eq!(Language::from_filename("tool.py"), Language::Python);
    }

    #[test]
    fn test_language_defaults_to_javascript() {
        assert_eq!(Language::from_filename("Makefile"), Language::Javascript);
        assert_eq!(Language::from_filename("archive.tar"), Language::Javascript);
        assert_eq!(Language::from_filename(""), Language::Javascript);
    }

    #[test]
    fn test_language_extension_case_insensitive() {
        assert_eq!(Language::from_filename("INDEX.HTML"), Language::Html);
        assert_eq!(Language::from_filename("App.Tsx"), Language::Tsx);
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        // ".gitignore" is a bare name, not an empty stem with an extension
        assert_eq!(Language::from_filename(".gitignore"), Language::Javascript);
    }

    #[test]
    fn test_language_serialization_is_lowercase() {
        let serialized = serde_json::to_string(&Language::Markdown).unwrap();
        assert_eq!(serialized, "\"markdown\"");
    }
}

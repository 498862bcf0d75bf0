//! Property-based tests for the path model and tree algebra.

use atelier::tree::path;
use atelier::{Tree, Workspace};
use proptest::prelude::*;

/// Valid path segment names: no slashes, non-empty.
fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}"
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in "[a-zA-Z0-9_./-]{0,40}") {
        let once = path::normalize(&raw);
        let twice = path::normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_normalized_paths_never_end_in_slash(raw in "[a-zA-Z0-9_./-]{0,40}") {
        let normalized = path::normalize(&raw);
        prop_assert!(normalized.starts_with('/'));
        prop_assert!(normalized == "/" || !normalized.ends_with('/'));
        prop_assert!(!normalized.contains("//"));
    }

    #[test]
    fn prop_join_then_parent_round_trips(parents in prop::collection::vec(segment(), 0..4), name in segment()) {
        let mut parent_path = "/".to_string();
        for seg in &parents {
            parent_path = path::join(&parent_path, seg).unwrap();
        }

        let joined = path::join(&parent_path, &name).unwrap();
        prop_assert_eq!(path::parent(&joined), Some(parent_path.as_str()));
        prop_assert_eq!(path::basename(&joined), name.as_str());
        prop_assert!(path::is_ancestor(&parent_path, &joined));
    }

    #[test]
    fn prop_insert_then_find(name in segment()) {
        let mut ws = Workspace::new();
        let file_name = format!("{}.js", name);
        ws.create_file(&file_name, "/", "").unwrap();

        let found = ws.tree().find(&format!("/{}", file_name));
        prop_assert!(found.is_some());
    }

    #[test]
    fn prop_remove_is_idempotent(name in segment()) {
        let mut ws = Workspace::new();
        let file_name = format!("{}.ts", name);
        ws.create_file(&file_name, "/", "").unwrap();
        let target = format!("/{}", file_name);

        ws.delete_file(&target).unwrap();
        let after_first: Vec<String> = ws.files().iter().map(|r| r.path.clone()).collect();

        ws.delete_file(&target).unwrap();
        let after_second: Vec<String> = ws.files().iter().map(|r| r.path.clone()).collect();

        prop_assert_eq!(after_first, after_second);
        prop_assert!(ws.is_consistent());
    }
}

#[test]
fn test_tree_remove_missing_path_is_noop() {
    let mut tree = Tree::new();
    assert!(tree.remove("/never/was/here").unwrap().is_none());
}

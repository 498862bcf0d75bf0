//! Path model: normalization and pure helpers for slash-delimited paths.
//!
//! A workspace path is a normalized string: leading `/`, segments separated
//! by single slashes, no trailing slash except the root `/` itself. Two paths
//! are equal iff their normalized strings are equal. All functions here are
//! pure; only `join` can fail, on a malformed name.

use crate::error::WorkspaceError;
use unicode_normalization::UnicodeNormalization;

/// The root path.
pub const ROOT: &str = "/";

/// Normalize a path string.
///
/// This function:
/// 1. Normalizes Unicode to NFC
/// 2. Ensures a leading `/`
/// 3. Collapses repeated slashes
/// 4. Removes trailing slashes (except root)
pub fn normalize(path: &str) -> String {
    let nfc: String = path.nfc().collect();

    let mut result = String::with_capacity(nfc.len() + 1);
    result.push('/');
    for segment in nfc.split('/').filter(|s| !s.is_empty()) {
        if result.len() > 1 {
            result.push('/');
        }
        result.push_str(segment);
    }

    result
}

/// Join a parent path and a child name into a normalized path.
///
/// Fails with `InvalidPath` if `name` is empty or contains `/`; segment
/// separators belong to the path model, not to names.
pub fn join(parent: &str, name: &str) -> Result<String, WorkspaceError> {
    if name.is_empty() {
        return Err(WorkspaceError::InvalidPath(
            "name must not be empty".to_string(),
        ));
    }
    if name.contains('/') {
        return Err(WorkspaceError::InvalidPath(format!(
            "name must not contain '/': {}",
            name
        )));
    }

    Ok(normalize(&format!("{}/{}", parent, name)))
}

/// True iff `candidate` is `path` itself or lives underneath it.
///
/// Root is an ancestor of everything. Both arguments are assumed normalized.
pub fn is_ancestor(path: &str, candidate: &str) -> bool {
    if path == ROOT {
        return true;
    }
    candidate == path || candidate.starts_with(&format!("{}/", path))
}

/// Last segment of a normalized path; empty string for root.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Parent of a normalized path, or `None` for root.
pub fn parent(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

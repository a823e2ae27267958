//! Dotted-path lookup over configuration trees

use serde_json::Value;

/// Resolve a dotted path such as `plugins.toolbar.textActions`.
///
/// An empty path returns the whole tree. Returns `None` as soon as a segment
/// is missing or the value reached so far cannot be traversed.
pub fn resolve_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(tree);
    }

    path.split('.')
        .try_fold(tree, |current, segment| current.as_object()?.get(segment))
}

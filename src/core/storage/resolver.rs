//! Find the document for an absolute path by walking a granted tree.
//!
//! There is no way to turn `/storage/card/Music/a.mp3` into a document
//! handle directly. We have to find it again: split the path into segments
//! and descend from the tree root, consuming segments as directories match.
//!
//! Matching is loose: a child matches if its name appears *anywhere* in the
//! remaining segments, not just at the next position. So with both
//! `/a/b/c.mp3` and `/b/a/c.mp3` under the root, either may come back,
//! depending on listing order. That's an accepted approximation.
//!
//! No backtracking: once a directory matches we commit to it. No caching
//! either, the tree can change between calls.

use std::path::{Component, Path};

use super::super::types::DocumentHandle;
use super::tree::DocumentTree;

/// What is left to find. Shrinks as directories match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegments(Vec<String>);

impl PathSegments {
    /// `/storage/volume/Music/some.mp3` -> `[storage, volume, Music, some.mp3]`
    pub fn from_path(path: &Path) -> Self {
        Self(
            path.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect(),
        )
    }

    pub fn remaining(&self) -> &[String] {
        &self.0
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|s| s == name)
    }

    fn is_last(&self, index: usize) -> bool {
        index + 1 == self.0.len()
    }

    fn consume(&mut self, index: usize) {
        self.0.remove(index);
    }
}

/// Document for `absolute_path` under the tree rooted at `root`, if any.
///
/// Read-only: only lists directories, never touches them.
pub fn resolve<T>(tree: &T, root: &DocumentHandle, absolute_path: &Path) -> Option<DocumentHandle>
where
    T: DocumentTree + ?Sized,
{
    let mut segments = PathSegments::from_path(absolute_path);
    let found = find_in_tree(tree, root, &mut segments);

    match &found {
        Some(doc) => log::debug!("resolved {} -> {}", absolute_path.display(), doc.uri()),
        None => log::debug!(
            "{} not found under {} (left: {:?})",
            absolute_path.display(),
            root.uri(),
            segments.remaining()
        ),
    }
    found
}

fn find_in_tree<T>(
    tree: &T,
    current_dir: &DocumentHandle,
    remaining: &mut PathSegments,
) -> Option<DocumentHandle>
where
    T: DocumentTree + ?Sized,
{
    let children = match tree.list_children(current_dir) {
        Ok(children) => children,
        Err(e) => {
            log::warn!("cannot list {}: {e}", current_dir.uri());
            return None;
        }
    };

    for child in children {
        let Some(index) = remaining.position(child.name()) else {
            continue;
        };

        if child.is_directory() {
            remaining.consume(index);
            return find_in_tree(tree, &child, remaining);
        }

        if child.is_file() && remaining.is_last(index) {
            return Some(child);
        }
    }

    None
}

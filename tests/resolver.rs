//! Path -> document resolution against an in-memory tree.

mod common;

use std::path::Path;

use common::MemoryTree;
use proptest::prelude::*;
use sonora_scoped::DocumentTree;
use sonora_scoped::core::storage::resolve;

fn resolve_in(tree: &MemoryTree, root: &str, path: &str) -> Option<String> {
    let top = tree.open_tree(&MemoryTree::root(root)).unwrap();
    resolve(tree, &top, Path::new(path)).map(|d| d.name().to_string())
}

#[test]
fn finds_file_two_levels_down() {
    let tree = MemoryTree::with_files(&["/music/rock/song.mp3", "/music/jazz/other.mp3"]);
    assert_eq!(
        resolve_in(&tree, "/music", "/music/rock/song.mp3").as_deref(),
        Some("song.mp3")
    );
}

#[test]
fn absent_file_is_none() {
    let tree = MemoryTree::with_files(&["/music/rock/song.mp3"]);
    assert_eq!(resolve_in(&tree, "/music", "/music/rock/nope.mp3"), None);
    assert_eq!(resolve_in(&tree, "/music", "/music/pop/song.mp3"), None);
}

#[test]
fn root_above_the_path_prefix_still_resolves() {
    // Granted root is the card; the path carries mount segments the tree
    // doesn't have. Those just never match and stay in the list.
    let tree = MemoryTree::with_files(&["/card/Music/a.mp3"]);
    assert_eq!(
        resolve_in(&tree, "/card", "/storage/ABCD-1234/Music/a.mp3").as_deref(),
        Some("a.mp3")
    );
}

#[test]
fn ambiguous_layouts_return_one_of_the_candidates() {
    let tree = MemoryTree::with_files(&["/r/a/b/c.mp3", "/r/b/a/c.mp3"]);
    let got = resolve_in(&tree, "/r", "/r/a/b/c.mp3");
    assert_eq!(got.as_deref(), Some("c.mp3"));
}

#[test]
fn listing_failure_is_treated_as_no_match() {
    let tree = MemoryTree::with_files(&["/music/rock/song.mp3"]);
    let top = tree.open_tree(&MemoryTree::root("/music")).unwrap();
    tree.fail_listings();

    assert_eq!(resolve(&tree, &top, Path::new("/music/rock/song.mp3")), None);
    assert_eq!(tree.listings(), 1);
}

#[test]
fn traversal_does_not_modify_the_tree() {
    let tree = MemoryTree::with_files(&["/music/rock/song.mp3", "/music/rock/b.mp3"]);
    let before = tree.snapshot();

    resolve_in(&tree, "/music", "/music/rock/song.mp3");
    resolve_in(&tree, "/music", "/music/missing/x.mp3");

    assert_eq!(tree.snapshot(), before);
}

#[test]
fn every_call_walks_the_tree_again() {
    let tree = MemoryTree::with_files(&["/music/rock/song.mp3"]);
    resolve_in(&tree, "/music", "/music/rock/song.mp3");
    let first = tree.listings();
    resolve_in(&tree, "/music", "/music/rock/song.mp3");
    assert_eq!(tree.listings(), first * 2);
}

/// 1-4 directory names plus a file name, all distinct (index prefix).
fn unique_path_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,6}", 2..6).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(i, p)| format!("s{i}{p}"))
            .collect()
    })
}

proptest! {
    /// A file with a unique name at every depth is always found, and the
    /// handle is named after the last segment.
    #[test]
    fn unique_paths_resolve_to_their_leaf(segments in unique_path_strategy()) {
        let path = format!("/root/{}", segments.join("/"));
        let leaf = segments.last().unwrap().clone();

        let tree = MemoryTree::with_files(&[path.as_str()]);
        // sibling noise that shares no name with the path
        tree.add_file(Path::new("/root/zz_decoy/other.mp3"), b"");
        tree.add_file(Path::new(&format!("/root/{}/zz_sibling.mp3", segments[0])), b"");

        let got = resolve_in(&tree, "/root", &path);
        prop_assert_eq!(got, Some(leaf));
    }

    /// A path whose leaf isn't in the tree never resolves.
    #[test]
    fn paths_not_in_the_tree_resolve_to_none(segments in unique_path_strategy()) {
        let dirs = &segments[..segments.len() - 1];
        let existing = format!("/root/{}/zz_present.mp3", dirs.join("/"));
        let wanted = format!("/root/{}", segments.join("/"));

        let tree = MemoryTree::with_files(&[existing.as_str()]);
        prop_assert_eq!(resolve_in(&tree, "/root", &wanted), None);
    }
}

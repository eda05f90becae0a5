//! The platform collaborator: everything the engine needs from whoever
//! embeds it, and nothing more.

use std::path::Path;

use super::super::types::Notice;

pub trait Host {
    /// True when `path` cannot be written directly and must go through a
    /// granted document tree.
    fn needs_scoped_storage(&self, path: &Path) -> bool;

    /// Show the user a prompt asking for access to the tree containing
    /// `target`. The answer comes back later through
    /// `WriteThroughEngine::on_grant_result`.
    fn request_tree_access(&mut self, target: &Path);

    /// Completion notice for a write that finished (either way).
    fn notify(&mut self, notice: &Notice);

    /// Ask the media index to pick up changes at `path`. Fire-and-forget.
    fn refresh_media_index(&mut self, path: &Path);
}

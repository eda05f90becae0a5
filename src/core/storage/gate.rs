//! Permission gate: do we have a standing grant, and if not, ask for one.
//!
//! `Idle -> AwaitingGrant -> Granted(root) | Denied`
//!
//! Asking issues exactly one prompt. The answer arrives on a single callback
//! (`on_grant_result`). There is no timeout: a prompt dismissed without an
//! answer leaves the gate waiting until its owner is dropped.

use std::path::{Path, PathBuf};

use super::super::prefs::Preferences;
use super::super::types::StorageRoot;
use super::host::Host;
use super::tree::DocumentTree;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GrantState {
    #[default]
    Idle,
    AwaitingGrant {
        target: PathBuf,
    },
    Granted(StorageRoot),
    Denied,
}

/// What the picker handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantResponse {
    Selected(StorageRoot),
    Denied,
}

impl From<Option<String>> for GrantResponse {
    /// Empty or missing token = denied.
    fn from(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => Self::Selected(StorageRoot::new(t)),
            _ => Self::Denied,
        }
    }
}

#[derive(Debug, Default)]
pub struct PermissionGate {
    state: GrantState,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_standing_grant(prefs: &Preferences) -> bool {
        Self::standing_grant(prefs).is_some()
    }

    /// The root a previous grant left in `prefs`, if any.
    pub fn standing_grant(prefs: &Preferences) -> Option<&StorageRoot> {
        prefs.storage_root()
    }

    pub fn state(&self) -> &GrantState {
        &self.state
    }

    /// A prompt is out and nobody has answered yet.
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, GrantState::AwaitingGrant { .. })
    }

    /// Prompt for access to the tree containing `target`.
    ///
    /// Returns false (and prompts nothing) if a prompt is already out.
    pub fn request_grant<H>(&mut self, host: &mut H, target: &Path) -> bool
    where
        H: Host + ?Sized,
    {
        if self.is_awaiting() {
            log::debug!("grant prompt already pending, not asking again");
            return false;
        }

        log::info!("requesting tree access for {}", target.display());
        host.request_tree_access(target);
        self.state = GrantState::AwaitingGrant {
            target: target.to_path_buf(),
        };
        true
    }

    /// Handle the picker's answer.
    ///
    /// On a usable root: persist it and return it. On denial, or a token
    /// this platform can't open: clear the persisted root and return `None`.
    pub fn on_grant_result<T>(
        &mut self,
        response: GrantResponse,
        tree: &T,
        prefs: &mut Preferences,
    ) -> Option<StorageRoot>
    where
        T: DocumentTree + ?Sized,
    {
        if !self.is_awaiting() {
            log::warn!("grant response with no prompt outstanding, ignoring");
            return None;
        }

        match response {
            GrantResponse::Selected(root) if tree.open_tree(&root).is_some() => {
                log::info!("tree access granted: {root}");
                if let Err(e) = prefs.set_storage_root(root.clone()) {
                    log::warn!("granted root not persisted: {e}");
                }
                self.state = GrantState::Granted(root.clone());
                Some(root)
            }
            GrantResponse::Selected(root) => {
                log::warn!("picker returned an unusable root: {root}");
                self.deny(prefs);
                None
            }
            GrantResponse::Denied => {
                log::info!("tree access denied");
                self.deny(prefs);
                None
            }
        }
    }

    fn deny(&mut self, prefs: &mut Preferences) {
        if let Err(e) = prefs.clear_storage_root() {
            log::warn!("stale root not cleared: {e}");
        }
        self.state = GrantState::Denied;
    }
}

//! Write-through engine: get an edited tag onto disk, whatever it takes.
//!
//! Three ways a `write()` can go:
//! 1. The host says the path is directly writable: the codec writes the file
//!    in place. `Completed`.
//! 2. There is a persisted storage root: resolve the file's document under
//!    it, then stage + copy. `Completed` or `Failed`.
//! 3. No root yet: park the edit as a `PendingWrite`, prompt for access,
//!    return `Suspended`. The answer comes in through `on_grant_result`,
//!    which runs step 2 for the parked edit exactly once.
//!
//! At most one edit is parked. Writing again while suspended replaces it
//! (the earlier edit is lost) and does not prompt a second time.

use std::path::Path;

use super::super::config::EngineConfig;
use super::super::error::WriteError;
use super::super::prefs::Preferences;
use super::super::tags::{AudioTagFile, Id3Codec, TagCodec};
use super::super::types::{Notice, StorageRoot, WriteOutcome};
use super::gate::{GrantResponse, PermissionGate};
use super::host::Host;
use super::pending::PendingWrite;
use super::resolver;
use super::staging::TempStagingWriter;
use super::tree::DocumentTree;

pub struct WriteThroughEngine<T, H, C = Id3Codec> {
    tree: T,
    host: H,
    prefs: Preferences,
    gate: PermissionGate,
    pending: Option<PendingWrite>,
    stager: TempStagingWriter<C>,
}

impl<T: DocumentTree, H: Host> WriteThroughEngine<T, H, Id3Codec> {
    pub fn new(tree: T, host: H, prefs: Preferences) -> Self {
        Self::with_codec(tree, host, prefs, Id3Codec, EngineConfig::default())
    }
}

impl<T, H, C> WriteThroughEngine<T, H, C>
where
    T: DocumentTree,
    H: Host,
    C: TagCodec,
{
    pub fn with_codec(tree: T, host: H, prefs: Preferences, codec: C, config: EngineConfig) -> Self {
        Self {
            tree,
            host,
            prefs,
            gate: PermissionGate::new(),
            pending: None,
            stager: TempStagingWriter::new(codec, config),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn pending(&self) -> Option<&PendingWrite> {
        self.pending.as_ref()
    }

    /// A prompt is out. Hosts use this to keep their session open.
    pub fn is_waiting_for_grant(&self) -> bool {
        self.gate.is_awaiting()
    }

    /// Commit the edits in `file` to storage.
    pub fn write(&mut self, file: &AudioTagFile) -> WriteOutcome {
        let path = file.path();

        if !self.host.needs_scoped_storage(path) {
            let result = self.write_direct(file);
            return self.finish(path, result);
        }

        // always re-read: a grant or a failure may have changed it since last call
        if let Some(root) = PermissionGate::standing_grant(&self.prefs).cloned() {
            let result = self.persist_through_tree(&root, file);
            return self.finish(path, result);
        }

        self.suspend(file)
    }

    /// Deliver the picker's answer.
    ///
    /// Returns the outcome of the resumed write, or `None` when there was
    /// nothing to resume (no prompt out, or no parked edit).
    pub fn on_grant_result(&mut self, response: GrantResponse) -> Option<WriteOutcome> {
        if !self.gate.is_awaiting() {
            log::warn!("grant response arrived with no prompt outstanding");
            return None;
        }

        let granted = self
            .gate
            .on_grant_result(response, &self.tree, &mut self.prefs);

        // cleared no matter how the resumed write goes
        let pending = self.pending.take()?;

        let result = match granted {
            Some(root) => pending
                .restore()
                .and_then(|file| self.persist_through_tree(&root, &file)),
            None => Err(WriteError::GrantDenied),
        };
        Some(self.finish(pending.target(), result))
    }

    fn write_direct(&self, file: &AudioTagFile) -> Result<(), WriteError> {
        log::debug!("direct write: {}", file.path().display());
        self.stager
            .codec()
            .write_tag(file.tag(), file.version(), file.path())
    }

    fn persist_through_tree(
        &mut self,
        root: &StorageRoot,
        file: &AudioTagFile,
    ) -> Result<(), WriteError> {
        let Some(top) = self.tree.open_tree(root) else {
            log::warn!("persisted root no longer resolves: {root}");
            return Err(WriteError::GrantDenied);
        };

        let Some(doc) = resolver::resolve(&self.tree, &top, file.path()) else {
            return Err(WriteError::NotFound {
                path: file.path().to_path_buf(),
            });
        };

        self.stager.commit(file, &doc, &self.tree)
    }

    fn suspend(&mut self, file: &AudioTagFile) -> WriteOutcome {
        let pending = match PendingWrite::capture(file) {
            Ok(p) => p,
            Err(e) => return self.finish(file.path(), Err(e)),
        };

        if let Some(previous) = self.pending.replace(pending) {
            log::warn!(
                "unsaved edit for {} replaced while waiting for access",
                previous.target().display()
            );
        }
        self.gate.request_grant(&mut self.host, file.path());
        WriteOutcome::Suspended
    }

    fn finish(&mut self, path: &Path, result: Result<(), WriteError>) -> WriteOutcome {
        match &result {
            Ok(()) => {
                log::info!("written: {}", path.display());
                self.host.refresh_media_index(path);
                self.host.notify(&Notice::Written {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                log::error!("write failed for {}: {e}", path.display());
                if e.clears_storage_root() {
                    if let Err(pe) = self.prefs.clear_storage_root() {
                        log::warn!("stale root not cleared: {pe}");
                    }
                }
                self.host.notify(&Notice::failed(path, e));
            }
        }
        result.into()
    }
}

//! Process-wide persisted preferences.
//!
//! Holds exactly one thing the engine cares about: the granted storage root.
//! Other keys in the same file are carried through untouched.
//! Lifecycle:
//! - read once when the engine starts (`load`)
//! - written when a grant comes back (`set_storage_root`)
//! - cleared when resolution against it fails structurally (`clear_storage_root`)
//!
//! Changes hit disk immediately, via temp file + rename so a crash never
//! leaves half a JSON document behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::error::PrefsError;
use super::types::StorageRoot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PrefsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sdcard_uri: Option<StorageRoot>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// `None` = in-memory only.
    file: Option<PathBuf>,
    doc: PrefsDoc,
}

impl Preferences {
    /// Load from `file`. A missing file is just empty preferences.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let file = file.into();
        let doc = match fs::read(&file) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => PrefsDoc::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            file: Some(file),
            doc,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            file: None,
            doc: PrefsDoc::default(),
        }
    }

    pub fn storage_root(&self) -> Option<&StorageRoot> {
        self.doc.sdcard_uri.as_ref()
    }

    pub fn set_storage_root(&mut self, root: StorageRoot) -> Result<(), PrefsError> {
        self.doc.sdcard_uri = Some(root);
        self.persist()
    }

    pub fn clear_storage_root(&mut self) -> Result<(), PrefsError> {
        if self.doc.sdcard_uri.take().is_none() {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), PrefsError> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &self.doc)?;
        tmp.flush()?;
        tmp.persist(file).map_err(|e| e.error)?;
        Ok(())
    }
}

//! Core data types shared between the engine and its collaborators.
//!
//! Rule of thumb:
//! - These are "boring bags of data"
//! - No filesystem code
//! - No tag parsing code
//!
//! `StorageRoot` and `DocumentHandle` are opaque on purpose: a handle only
//! ever comes out of a `DocumentTree` traversal, never out of a path string.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::WriteError;

/// Persisted token for a directory tree the user granted standing access to.
///
/// Think: the URI a document picker hands back. We never look inside it;
/// only a `DocumentTree` knows how to open it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageRoot(String);

impl StorageRoot {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File or directory?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Directory,
    File,
}

/// One file or directory inside a `StorageRoot`.
///
/// Resolved fresh for every write. Do not cache these across calls: the
/// tree behind them can change between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    name: String,
    kind: DocumentKind,
    uri: String,
}

impl DocumentHandle {
    /// Providers build handles while listing a tree.
    pub fn new(name: impl Into<String>, kind: DocumentKind, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            uri: uri.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.kind == DocumentKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == DocumentKind::File
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Completion notice handed to the host (rendered as a toast, a status
/// line, whatever the host likes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Written { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl Notice {
    pub(crate) fn failed(path: &Path, err: &WriteError) -> Self {
        Self::Failed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Result of one `write()` (or of a resumed write after a grant).
#[derive(Debug)]
pub enum WriteOutcome {
    /// Bytes reached the destination.
    Completed,
    /// Waiting on the user to grant tree access; the edit is parked.
    Suspended,
    Failed(WriteError),
}

impl WriteOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }
}

impl From<Result<(), WriteError>> for WriteOutcome {
    fn from(result: Result<(), WriteError>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(e) => Self::Failed(e),
        }
    }
}

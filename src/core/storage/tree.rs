//! Document-provider seam.
//!
//! The engine never opens restricted paths directly. It asks a
//! [`DocumentTree`] for the root of a granted tree, walks it one listing at
//! a time, and opens the file it found as a byte channel.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::super::types::{DocumentHandle, DocumentKind, StorageRoot};

/// What the platform's document provider must offer.
pub trait DocumentTree {
    /// Directory handle for the top of a granted tree.
    ///
    /// `None` means the token does not resolve on this platform at all
    /// (stale grant, wrong provider). That is a structural failure.
    fn open_tree(&self, root: &StorageRoot) -> Option<DocumentHandle>;

    /// Direct children of a directory document.
    fn list_children(&self, dir: &DocumentHandle) -> io::Result<Vec<DocumentHandle>>;

    /// Read/write byte channel on a file document, truncated before use.
    fn open_rw(&self, doc: &DocumentHandle) -> io::Result<Box<dyn Write>>;
}

const TREE_SCHEME: &str = "tree:";
const DOCUMENT_SCHEME: &str = "document:";

/// A document provider backed by a plain directory on this machine.
///
/// Root tokens look like `tree:/mnt/sdcard`, document URIs like
/// `document:/mnt/sdcard/Music/a.mp3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocumentTree;

impl LocalDocumentTree {
    /// Token a picker would hand back for `dir`.
    pub fn root_for(dir: &Path) -> StorageRoot {
        StorageRoot::new(format!("{TREE_SCHEME}{}", dir.display()))
    }

    fn handle_for(path: &Path, kind: DocumentKind) -> DocumentHandle {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        DocumentHandle::new(name, kind, format!("{DOCUMENT_SCHEME}{}", path.display()))
    }

    fn path_of(doc: &DocumentHandle) -> io::Result<PathBuf> {
        doc.uri()
            .strip_prefix(DOCUMENT_SCHEME)
            .map(PathBuf::from)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a local document: {}", doc.uri()),
                )
            })
    }
}

impl DocumentTree for LocalDocumentTree {
    fn open_tree(&self, root: &StorageRoot) -> Option<DocumentHandle> {
        let dir = Path::new(root.as_str().strip_prefix(TREE_SCHEME)?);
        if !dir.is_absolute() || !dir.is_dir() {
            return None;
        }
        Some(Self::handle_for(dir, DocumentKind::Directory))
    }

    fn list_children(&self, dir: &DocumentHandle) -> io::Result<Vec<DocumentHandle>> {
        let dir = Self::path_of(dir)?;
        let mut out = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            // follows symlinks; a dangling link lists as a file
            let is_dir = fs::metadata(&path).is_ok_and(|m| m.is_dir());
            let kind = if is_dir {
                DocumentKind::Directory
            } else {
                DocumentKind::File
            };
            out.push(Self::handle_for(&path, kind));
        }

        // read_dir order is whatever the filesystem says; keep walks repeatable
        out.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(out)
    }

    fn open_rw(&self, doc: &DocumentHandle) -> io::Result<Box<dyn Write>> {
        if !doc.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file document: {}", doc.uri()),
            ));
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(true)
            .open(Self::path_of(doc)?)?;
        Ok(Box::new(file))
    }
}

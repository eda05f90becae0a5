//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sonora_scoped::{DocumentHandle, DocumentKind, DocumentTree, Host, Notice, StorageRoot};

/// A few bytes that look enough like an MPEG frame for the codec to leave alone.
pub const FAKE_AUDIO: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55];

pub fn write_fake_mp3(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, FAKE_AUDIO).unwrap();
}

/// Host that records everything the engine tells it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Paths under here need scoped storage.
    pub scoped_under: Option<PathBuf>,
    pub prompts: Vec<PathBuf>,
    pub notices: Vec<Notice>,
    pub refreshed: Vec<PathBuf>,
}

impl RecordingHost {
    pub fn scoped(dir: &Path) -> Self {
        Self {
            scoped_under: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Host for RecordingHost {
    fn needs_scoped_storage(&self, path: &Path) -> bool {
        self.scoped_under
            .as_deref()
            .is_some_and(|dir| path.starts_with(dir))
    }

    fn request_tree_access(&mut self, target: &Path) {
        self.prompts.push(target.to_path_buf());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn refresh_media_index(&mut self, path: &Path) {
        self.refreshed.push(path.to_path_buf());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
}

type Nodes = Rc<RefCell<BTreeMap<PathBuf, Node>>>;

/// In-memory document provider. Tokens are `mem:<dir>`, URIs `mem-doc:<path>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: Nodes,
    listings: Rc<Cell<usize>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryTree {
    /// Tree containing `files` (absolute paths) and every directory above them.
    pub fn with_files(files: &[&str]) -> Self {
        let tree = Self::default();
        for f in files {
            tree.add_file(Path::new(f), b"");
        }
        tree
    }

    pub fn add_file(&self, path: &Path, content: &[u8]) {
        let mut nodes = self.nodes.borrow_mut();
        for dir in path.ancestors().skip(1) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            nodes.insert(dir.to_path_buf(), Node::Dir);
        }
        nodes.insert(path.to_path_buf(), Node::File(content.to_vec()));
    }

    pub fn root(dir: &str) -> StorageRoot {
        StorageRoot::new(format!("mem:{dir}"))
    }

    pub fn snapshot(&self) -> BTreeMap<PathBuf, Node> {
        self.nodes.borrow().clone()
    }

    pub fn content(&self, path: &str) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(Path::new(path)) {
            Some(Node::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    pub fn listings(&self) -> usize {
        self.listings.get()
    }

    /// Make every later `list_children` call fail.
    pub fn fail_listings(&self) {
        self.failing.set(true);
    }

    fn handle(path: &Path, node: &Node) -> DocumentHandle {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = match node {
            Node::Dir => DocumentKind::Directory,
            Node::File(_) => DocumentKind::File,
        };
        DocumentHandle::new(name, kind, format!("mem-doc:{}", path.display()))
    }

    fn path_of(doc: &DocumentHandle) -> PathBuf {
        PathBuf::from(doc.uri().trim_start_matches("mem-doc:"))
    }
}

impl DocumentTree for MemoryTree {
    fn open_tree(&self, root: &StorageRoot) -> Option<DocumentHandle> {
        let dir = Path::new(root.as_str().strip_prefix("mem:")?);
        match self.nodes.borrow().get(dir) {
            Some(node @ Node::Dir) => Some(Self::handle(dir, node)),
            _ => None,
        }
    }

    fn list_children(&self, dir: &DocumentHandle) -> io::Result<Vec<DocumentHandle>> {
        self.listings.set(self.listings.get() + 1);
        if self.failing.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "provider refused the listing",
            ));
        }
        let dir = Self::path_of(dir);
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|(p, _)| p.parent() == Some(dir.as_path()))
            .map(|(p, n)| Self::handle(p, n))
            .collect())
    }

    fn open_rw(&self, doc: &DocumentHandle) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(MemoryChannel {
            nodes: Rc::clone(&self.nodes),
            path: Self::path_of(doc),
            buf: Vec::new(),
        }))
    }
}

/// Buffers writes, stores them on flush.
struct MemoryChannel {
    nodes: Nodes,
    path: PathBuf,
    buf: Vec<u8>,
}

impl Write for MemoryChannel {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.nodes
            .borrow_mut()
            .insert(self.path.clone(), Node::File(self.buf.clone()));
        Ok(())
    }
}

//! Sonora scoped-storage tag writer.
//!
//! Takes an audio file whose tag was edited in memory and gets it back onto
//! disk. When the file sits somewhere the process may not open directly, the
//! write goes through a granted document tree instead: find the file's
//! document by walking the tree, rebuild the file in a private temp file,
//! and copy the bytes into the document.
//!
//! ```no_run
//! use sonora_scoped::{AudioTagFile, FieldKey, LocalDocumentTree, Preferences, WriteThroughEngine};
//! # fn run(host: impl sonora_scoped::Host) -> Result<(), Box<dyn std::error::Error>> {
//! let prefs = Preferences::load("prefs.json")?;
//! let mut engine = WriteThroughEngine::new(LocalDocumentTree, host, prefs);
//!
//! let mut file = AudioTagFile::open("/mnt/card/Music/roads.mp3")?;
//! file.set_field(FieldKey::Title, "Roads")?;
//!
//! if engine.write(&file).is_suspended() {
//!     // host shows its picker; its answer goes to engine.on_grant_result(..)
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{CodecError, PrefsError, WriteError};
pub use crate::core::prefs::Preferences;
pub use crate::core::storage::{
    DocumentTree, GrantResponse, GrantState, Host, LocalDocumentTree, PendingWrite,
    PermissionGate, WriteThroughEngine,
};
pub use crate::core::tags::{Artwork, AudioTagFile, FieldKey, Id3Codec, TagCodec};
pub use crate::core::types::{DocumentHandle, DocumentKind, Notice, StorageRoot, WriteOutcome};

//! core/tags/mod.rs
//!
//! The tag object the engine persists, plus the codec that writes it.
//! Public API:
//! - [`AudioTagFile`] loads a file's tag and carries edits (fields + artwork).
//! - [`TagCodec`] / [`Id3Codec`] write a tag into a file on disk.

mod art;
mod fields;
mod file;
mod util;
mod write;

pub use art::Artwork;
pub use fields::FieldKey;
pub use file::AudioTagFile;
pub use write::{Id3Codec, TagCodec};

pub(crate) use util::extension;

//! Write an ID3 tag into an audio file on disk.
//!
//! This is the black box the engine hands a file path to. It rewrites the
//! tag region in place and expects the rest of the stream to already be there.

use std::path::Path;

use id3::{Tag, Version};

use super::super::error::{CodecError, WriteError};
use super::util::{extension, is_tag_container};

/// Something that can place a tag into the file at `target`.
pub trait TagCodec {
    fn write_tag(&self, tag: &Tag, version: Version, target: &Path) -> Result<(), WriteError>;
}

/// The `id3` crate. It finds the ID3 chunk in MPEG, WAV and AIFF files on
/// its own; other extensions are refused before it is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Codec;

impl TagCodec for Id3Codec {
    fn write_tag(&self, tag: &Tag, version: Version, target: &Path) -> Result<(), WriteError> {
        if !is_tag_container(target) {
            return Err(unsupported(target).into());
        }
        tag.write_to_path(target, version)?;
        Ok(())
    }
}

pub(crate) fn unsupported(path: &Path) -> CodecError {
    CodecError::Unsupported(extension(path).unwrap_or_default().to_string())
}

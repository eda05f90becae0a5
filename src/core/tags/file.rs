//! `AudioTagFile`: one audio file on disk plus the tag we are editing for it.

use std::path::{Path, PathBuf};

use id3::{Tag, Version};

use super::super::error::WriteError;
use super::art::{self, Artwork};
use super::fields::{self, FieldKey};
use super::util::is_tag_container;
use super::write::unsupported;

/// An audio file with its (possibly edited) tag.
///
/// Edits only touch the in-memory tag. Nothing reaches disk until the
/// engine writes the file.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTagFile {
    path: PathBuf,
    tag: Tag,
    version: Version,
}

impl AudioTagFile {
    /// Load the tag of an existing audio file.
    ///
    /// A file without a tag gets a fresh ID3v2.4 tag.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, WriteError> {
        let path = path.into();
        if !is_tag_container(&path) {
            return Err(unsupported(&path).into());
        }

        let tag = match Tag::read_from_path(&path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                log::debug!("{}: no tag yet, starting fresh", path.display());
                Tag::with_version(Version::Id3v24)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::from_tag(path, tag))
    }

    /// Wrap a tag that was built (or restored) elsewhere.
    pub fn from_tag(path: impl Into<PathBuf>, tag: Tag) -> Self {
        let version = writable_version(tag.version());
        Self {
            path: path.into(),
            tag,
            version,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// ID3 version the next write will encode.
    pub fn version(&self) -> Version {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = writable_version(version);
    }

    pub fn first(&self, key: FieldKey) -> Option<String> {
        fields::first(&self.tag, key)
    }

    /// Set a field. Empty/whitespace removes it.
    pub fn set_field(&mut self, key: FieldKey, value: &str) -> Result<(), WriteError> {
        fields::set(&mut self.tag, self.version, key, value)?;
        Ok(())
    }

    pub fn remove_field(&mut self, key: FieldKey) {
        fields::remove(&mut self.tag, key);
    }

    pub fn first_artwork(&self) -> Option<Artwork> {
        art::first_artwork(&self.tag)
    }

    /// Replace all embedded pictures with `data` as the front cover.
    pub fn set_artwork(&mut self, data: Vec<u8>) -> Result<(), WriteError> {
        art::set_artwork(&mut self.tag, data)?;
        Ok(())
    }

    pub fn needs_id3v24_upgrade(&self) -> bool {
        self.version != Version::Id3v24
    }

    /// Re-encode as ID3v2.4 on the next write.
    pub fn upgrade_to_id3v24(&mut self) {
        self.version = Version::Id3v24;
        fields::migrate_year_to_v24(&mut self.tag);
    }
}

/// The codec writes 2.3 and 2.4 only; 2.2 tags get bumped to 2.3.
fn writable_version(version: Version) -> Version {
    match version {
        Version::Id3v22 => Version::Id3v23,
        v => v,
    }
}

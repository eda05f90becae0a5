//! The edit parked while we wait for the user to grant tree access.
//!
//! Stored as plain serialisable data (target path + encoded tag), so a host
//! can stash it and the resumption can be tested without a live prompt.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use id3::{Tag, Version};
use serde::{Deserialize, Serialize};

use super::super::error::WriteError;
use super::super::tags::AudioTagFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingWrite {
    target: PathBuf,
    /// ID3 major version the write should use (3 or 4).
    version: u8,
    /// The edited tag, encoded in `version`.
    tag_bytes: Vec<u8>,
}

impl PendingWrite {
    pub fn capture(file: &AudioTagFile) -> Result<Self, WriteError> {
        let mut tag_bytes = Vec::new();
        file.tag().write_to(&mut tag_bytes, file.version())?;
        Ok(Self {
            target: file.path().to_path_buf(),
            version: major(file.version()),
            tag_bytes,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rebuild the tag object exactly as it was when captured.
    pub fn restore(&self) -> Result<AudioTagFile, WriteError> {
        let tag = match Tag::read_from2(Cursor::new(&self.tag_bytes)) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::with_version(Version::Id3v24),
            Err(e) => return Err(e.into()),
        };

        let mut file = AudioTagFile::from_tag(&self.target, tag);
        file.set_version(from_major(self.version));
        Ok(file)
    }
}

fn major(version: Version) -> u8 {
    match version {
        Version::Id3v22 => 2,
        Version::Id3v23 => 3,
        Version::Id3v24 => 4,
    }
}

fn from_major(major: u8) -> Version {
    match major {
        2 => Version::Id3v22,
        3 => Version::Id3v23,
        _ => Version::Id3v24,
    }
}

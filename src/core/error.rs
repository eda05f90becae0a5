//! Error types for the write-through engine.
//!
//! [`WriteError`] is what a failed write reports to the caller. It maps onto
//! four kinds of failure:
//!
//! | Kind | Variant | Clears persisted root? |
//! |------|---------|------------------------|
//! | not found | [`WriteError::NotFound`] | yes |
//! | grant denied / root invalid | [`WriteError::GrantDenied`] | yes |
//! | I/O | [`WriteError::Io`] | no |
//! | codec | [`WriteError::Codec`] | no |
//!
//! None of these are retried automatically. A retry is the user calling
//! `write()` again.

use std::io;
use std::path::PathBuf;

/// The tag codec (`id3`) refused to do what we asked.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// We only know how to place ID3 tags in a handful of containers.
    #[error("unsupported audio container: .{0}")]
    Unsupported(String),

    /// Malformed tag data, bad frame content, and friends.
    #[error("tag codec error: {0}")]
    Tag(#[from] id3::Error),

    /// A field value the tag frame can't hold (a year that isn't a number...).
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// Artwork bytes didn't start with any image signature we recognise.
    #[error("unrecognised artwork format")]
    UnknownImageFormat,
}

/// Why a write did not complete.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The file could not be found under the granted storage root.
    #[error("{} not found under the granted storage root", .path.display())]
    NotFound { path: PathBuf },

    /// The user declined access, or the persisted root no longer resolves.
    #[error("access to storage was not granted")]
    GrantDenied,

    /// Staging or copy failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl WriteError {
    /// Failures that mean the persisted root is known-bad, so the next
    /// attempt must re-prompt instead of repeating the same resolution.
    pub fn clears_storage_root(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::GrantDenied)
    }
}

impl From<id3::Error> for WriteError {
    fn from(err: id3::Error) -> Self {
        match err.kind {
            id3::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Codec(CodecError::Tag(err)),
        }
    }
}

/// Reading or persisting the preferences file failed.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("preferences I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),
}

//! Staging write: rebuild the whole file privately, then push it through the
//! document channel.
//!
//! The codec can only edit real files on disk, and the destination is only
//! reachable as a byte channel. So:
//! 1. temp file with the source's extension (the codec refuses anything else)
//! 2. copy the original in, since the codec only rewrites the tag region
//! 3. codec writes the tag into the temp file
//! 4. read the temp file fully, write it fully into the destination channel
//! 5. delete the temp file (a failed delete is only logged)
//!
//! The temp file is a `NamedTempFile`, so every early return removes it too.
//! Step 4 holds the whole file in memory. Fine for audio files, not for
//! arbitrarily large ones.

use std::fs::{self, File};
use std::io::{self, Write};

use tempfile::NamedTempFile;

use super::super::config::EngineConfig;
use super::super::error::WriteError;
use super::super::tags::{AudioTagFile, TagCodec, extension};
use super::super::types::DocumentHandle;
use super::tree::DocumentTree;

pub struct TempStagingWriter<C> {
    codec: C,
    config: EngineConfig,
}

impl<C: TagCodec> TempStagingWriter<C> {
    pub fn new(codec: C, config: EngineConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Write `source` (original bytes + edited tag) into `destination`.
    pub fn commit<T>(
        &self,
        source: &AudioTagFile,
        destination: &DocumentHandle,
        tree: &T,
    ) -> Result<(), WriteError>
    where
        T: DocumentTree + ?Sized,
    {
        let mut temp = self.create_temp(source)?;
        log::debug!(
            "staging {} via {}",
            source.path().display(),
            temp.path().display()
        );

        // codec writes only the header, the rest must already be there
        let mut original = File::open(source.path())?;
        io::copy(&mut original, temp.as_file_mut())?;
        temp.as_file_mut().flush()?;

        self.codec
            .write_tag(source.tag(), source.version(), temp.path())?;

        let content = fs::read(temp.path())?;
        let mut channel = tree.open_rw(destination)?;
        channel.write_all(&content)?;
        channel.flush()?;
        drop(channel);

        log::debug!("{} bytes written to {}", content.len(), destination.uri());

        let temp_path = temp.path().to_path_buf();
        if let Err(e) = temp.close() {
            log::warn!("couldn't delete temporary file {}: {e}", temp_path.display());
        }
        Ok(())
    }

    fn create_temp(&self, source: &AudioTagFile) -> io::Result<NamedTempFile> {
        let suffix = extension(source.path())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        tempfile::Builder::new()
            .prefix(&self.config.temp_prefix)
            .suffix(&suffix)
            .tempfile_in(self.config.staging_dir())
    }
}

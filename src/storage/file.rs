//! Database file
//!
//! Whole-file reads and writes of the dataset.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Dataset;

use super::codec;

/// Permission bits for a newly created database file (owner read/write)
pub const FILE_MODE: u32 = 0o600;

/// Handle on the database file location
///
/// Holds no open file descriptor. Each `load`/`save` opens, reads or
/// writes, and closes the file on its own.
#[derive(Debug, Clone)]
pub struct DatabaseFile {
    path: PathBuf,
    sync_on_write: bool,
}

impl DatabaseFile {
    pub fn new(path: impl Into<PathBuf>, sync_on_write: bool) -> Self {
        Self {
            path: path.into(),
            sync_on_write,
        }
    }

    /// Read and decode the whole file
    pub fn load(&self) -> Result<Dataset> {
        let bytes = fs::read(&self.path)?;
        codec::decode(&bytes)
    }

    /// Encode and overwrite the whole file
    ///
    /// The file is truncated in place. A failure halfway leaves a partial
    /// file behind; the next `load` will report it as corrupt.
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        let bytes = codec::encode(dataset)?;

        let mut file = Self::open_for_write(&self.path)?;
        file.write_all(&bytes)?;
        if self.sync_on_write {
            file.sync_all()?;
        }

        tracing::trace!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(unix)]
    fn open_for_write(path: &Path) -> std::io::Result<File> {
        use std::os::unix::fs::OpenOptionsExt;

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(FILE_MODE)
            .open(path)
    }

    #[cfg(not(unix))]
    fn open_for_write(path: &Path) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
    }
}

//! Output files that appear only once complete.
//!
//! Bytes go to a sibling `<name>.tmp` file which is synced and renamed over
//! the target on [`AtomicFile::commit`]. Dropping an uncommitted file removes
//! the temp file, so a failed run never leaves a partial output behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// A file being written through a temp path.
#[derive(Debug)]
pub struct AtomicFile {
    file: Option<BufWriter<File>>,
    temp_path: PathBuf,
    target_path: PathBuf,
}

impl AtomicFile {
    /// Creates the temp file next to `target`, creating parent directories.
    pub fn create(target: &Path) -> Result<Self> {
        let temp_path = temp_path_for(target)?;

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| OutputError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = File::create(&temp_path).map_err(|e| OutputError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        tracing::debug!(temp = %temp_path.display(), "Opened temporary output");
        Ok(Self {
            file: Some(BufWriter::new(file)),
            temp_path,
            target_path: target.to_path_buf(),
        })
    }

    /// Final destination of the file.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Path bytes are written to before commit.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flushes, syncs, and renames the temp file over the target.
    pub fn commit(mut self) -> Result<PathBuf> {
        let Some(writer) = self.file.take() else {
            return Err(OutputError::Io {
                operation: "commit",
                path: self.temp_path.clone(),
                source: io::Error::other("output already closed"),
            });
        };

        let file = writer.into_inner().map_err(|e| OutputError::Io {
            operation: "write",
            path: self.temp_path.clone(),
            source: e.into_error(),
        })?;

        file.sync_all().map_err(|e| OutputError::Io {
            operation: "sync",
            path: self.temp_path.clone(),
            source: e,
        })?;
        drop(file);

        fs::rename(&self.temp_path, &self.target_path).map_err(|e| {
            OutputError::AtomicWriteFailed {
                temp_path: self.temp_path.clone(),
                target_path: self.target_path.clone(),
                source: e,
            }
        })?;

        tracing::debug!(target = %self.target_path.display(), "Committed output");
        Ok(std::mem::take(&mut self.target_path))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::other("output already closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        // A successful commit has already renamed the temp file away.
        if self.file.take().is_some() || self.temp_path.exists() {
            if let Err(error) = fs::remove_file(&self.temp_path) {
                if error.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        temp = %self.temp_path.display(),
                        %error,
                        "Failed to remove temporary output"
                    );
                }
            } else {
                tracing::debug!(temp = %self.temp_path.display(), "Discarded temporary output");
            }
        }
    }
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let Some(name) = target.file_name() else {
        return Err(OutputError::InvalidPath {
            path: target.to_path_buf(),
        });
    };
    let mut temp_name = name.to_os_string();
    temp_name.push(".tmp");
    Ok(target.with_file_name(temp_name))
}

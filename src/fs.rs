//! Filesystem access for scanning and for the CLI's output files.
//!
//! Every operation reports the path it touched, so callers turn a failure
//! into a user-facing error with `?` and nothing else.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failed filesystem operation and the path it concerned.
#[derive(Debug, Error)]
#[error("Failed to {action} {}: {source}", .path.display())]
pub struct FsError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsError {
    fn new(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub trait FileSystem: Send + Sync {
    /// Contents of a source file. Called from rayon workers.
    fn read_source(&self, path: &Path) -> Result<String, FsError>;

    /// Write a report, replacing any previous one.
    fn write_output(&self, path: &Path, content: &str) -> Result<(), FsError>;

    /// Create `path` holding `content`. `Ok(false)` when it already exists,
    /// in which case it is left untouched.
    fn create_new(&self, path: &Path, content: &str) -> Result<bool, FsError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read_source(&self, path: &Path) -> Result<String, FsError> {
        std::fs::read_to_string(path).map_err(|e| FsError::new("read", path, e))
    }

    fn write_output(&self, path: &Path, content: &str) -> Result<(), FsError> {
        std::fs::write(path, content).map_err(|e| FsError::new("write", path, e))
    }

    fn create_new(&self, path: &Path, content: &str) -> Result<bool, FsError> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(FsError::new("create", path, e)),
        };
        file.write_all(content.as_bytes())
            .map_err(|e| FsError::new("write", path, e))?;
        Ok(true)
    }
}

/// Shared real filesystem for callers that don't inject one.
pub fn default_fs() -> &'static RealFs {
    static INSTANCE: RealFs = RealFs;
    &INSTANCE
}

//! File persistence for documents.
//!
//! Synchronous and minimal: reads and writes are blocking calls issued inline
//! by the registry. The `Persistence` trait is the seam that lets hosts and
//! tests swap the filesystem for an in-memory store.
//!
//! Failures are reported as `PersistError` values carrying the path and a
//! kind the caller can branch on; nothing here panics or retries.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use core_state::{LineEnding, normalize_line_endings};
use thiserror::Error;
use tracing::{debug, error};

mod memory;
pub use memory::MemoryPersistence;

/// Filesystem failure, classified by what the caller can do about it.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("File is not valid UTF-8 text: {}", .path.display())]
    InvalidData { path: PathBuf },
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            ErrorKind::InvalidData => Self::InvalidData { path },
            _ => Self::Io { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::InvalidData { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Text read from storage, normalized to LF when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub text: String,
    pub line_ending: LineEnding,
    pub mixed_line_endings: bool,
}

impl LoadedText {
    /// Build from raw file contents.
    ///
    /// Normalization only applies to files with a single line-ending style.
    /// Raw text is reported as `LineEnding::Lf` so writing it back is a
    /// byte-for-byte copy.
    pub fn from_raw(raw: String, normalize: bool) -> Self {
        let norm = normalize_line_endings(&raw);
        if !normalize || norm.mixed {
            return Self {
                text: raw,
                line_ending: LineEnding::Lf,
                mixed_line_endings: norm.mixed,
            };
        }
        Self {
            text: norm.text,
            line_ending: norm.line_ending,
            mixed_line_endings: false,
        }
    }
}

/// Storage backend used by the tab registry.
pub trait Persistence: Send {
    fn read(&self, path: &Path) -> Result<LoadedText, PersistError>;

    /// Write LF-only `text` to `path`, expanding newlines to `line_ending`.
    fn write(&self, path: &Path, text: &str, line_ending: LineEnding) -> Result<(), PersistError>;
}

/// `std::fs` backed persistence.
#[derive(Debug, Clone, Copy)]
pub struct FsPersistence {
    normalize_line_endings: bool,
}

impl Default for FsPersistence {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FsPersistence {
    pub fn new(normalize_line_endings: bool) -> Self {
        Self {
            normalize_line_endings,
        }
    }
}

impl Persistence for FsPersistence {
    fn read(&self, path: &Path) -> Result<LoadedText, PersistError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let size_bytes = raw.len();
                let loaded = LoadedText::from_raw(raw, self.normalize_line_endings);
                debug!(
                    target: "io",
                    file = %path.display(),
                    size_bytes,
                    line_ending = ?loaded.line_ending,
                    mixed = loaded.mixed_line_endings,
                    "file_read_ok"
                );
                Ok(loaded)
            }
            Err(e) => {
                error!(target: "io", file = %path.display(), ?e, "file_open_error");
                Err(PersistError::from_io(path, e))
            }
        }
    }

    fn write(&self, path: &Path, text: &str, line_ending: LineEnding) -> Result<(), PersistError> {
        let content = line_ending.apply(text);
        match std::fs::write(path, content.as_bytes()) {
            Ok(()) => {
                debug!(target: "io", file = %path.display(), size_bytes = content.len(), "file_write_ok");
                Ok(())
            }
            Err(e) => {
                error!(target: "io", file = %path.display(), ?e, "file_write_error");
                Err(PersistError::from_io(path, e))
            }
        }
    }
}

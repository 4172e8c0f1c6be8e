//! In-memory persistence for tests and embedding hosts that manage storage
//! themselves.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use core_state::LineEnding;

use crate::{LoadedText, PersistError, Persistence};

#[derive(Debug, Default)]
struct Store {
    files: HashMap<PathBuf, String>,
    read_only: HashSet<PathBuf>,
}

/// Map-backed store. Content is kept exactly as written (line endings
/// expanded), and reads follow the same normalization rules as
/// `FsPersistence`.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    store: Mutex<Store>,
    normalize_line_endings: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalization(mut self, normalize_line_endings: bool) -> Self {
        self.normalize_line_endings = normalize_line_endings;
        self
    }

    /// Seed (or overwrite) a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.lock().files.insert(path.into(), content.into());
    }

    /// Raw stored content of `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    pub fn set_read_only(&self, path: impl Into<PathBuf>) {
        self.lock().read_only.insert(path.into());
    }

    pub fn len(&self) -> usize {
        self.lock().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().files.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self, path: &Path) -> Result<LoadedText, PersistError> {
        let raw = self
            .lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| PersistError::NotFound {
                path: path.to_path_buf(),
            })?;
        Ok(LoadedText::from_raw(raw, self.normalize_line_endings))
    }

    fn write(&self, path: &Path, text: &str, line_ending: LineEnding) -> Result<(), PersistError> {
        let mut store = self.lock();
        if store.read_only.contains(path) {
            return Err(PersistError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        store.files.insert(path.to_path_buf(), line_ending.apply(text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_raw_by_default() {
        let mem = MemoryPersistence::new();
        mem.insert("a.txt", "x\r\ny");
        let loaded = mem.read(Path::new("a.txt")).unwrap();
        assert_eq!(loaded.text, "x\r\ny");
        assert_eq!(loaded.line_ending, LineEnding::Lf);
    }

    #[test]
    fn round_trips_through_store() {
        let mem = MemoryPersistence::new().with_normalization(true);
        mem.write(Path::new("a.txt"), "x\ny", LineEnding::Crlf).unwrap();
        assert_eq!(mem.get("a.txt").as_deref(), Some("x\r\ny"));
        let loaded = mem.read(Path::new("a.txt")).unwrap();
        assert_eq!(loaded.text, "x\ny");
        assert_eq!(loaded.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn missing_and_read_only_paths_fail() {
        let mem = MemoryPersistence::new();
        assert!(matches!(
            mem.read(Path::new("missing")),
            Err(PersistError::NotFound { .. })
        ));
        mem.set_read_only("locked.txt");
        assert!(matches!(
            mem.write(Path::new("locked.txt"), "x", LineEnding::Lf),
            Err(PersistError::PermissionDenied { .. })
        ));
        assert!(mem.is_empty());
    }
}

//! Filesystem abstraction used by the configuration store.
//!
//! Responsibilities:
//! - Define the four operations the store needs (read, write, create dir, exists).
//! - Provide the real implementation with atomic, owner-only writes.
//! - Provide an in-memory implementation for tests and embedding.
//!
//! Does NOT handle:
//! - JSON parsing or patching (see `persistence` and `document`).
//! - Locking between processes. Two concurrent writers race and the last rename wins.
//!
//! Invariants:
//! - `OsFileSystem::write` never leaves a partially written target file:
//!   content goes to a temp file in the same directory, then is renamed over the target.
//! - On Unix the written file has mode `0600`.
//! - A symlinked target is resolved first, so the link stays and the file it points to is replaced.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The filesystem operations the store depends on.
pub trait FileSystem: Send + Sync {
    /// Reads the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces the whole file with `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Creates `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// The operating system's filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // Write through a symlinked config file instead of replacing the link.
        let resolved;
        let path = if path.is_symlink() {
            resolved = std::fs::canonicalize(path)?;
            resolved.as_path()
        } else {
            path
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // NamedTempFile is created with mode 0600 on Unix and removed on drop
        // if we bail out before persisting it.
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// An in-memory filesystem.
///
/// Directories must exist (via [`FileSystem::create_dir_all`] or
/// [`MemoryFileSystem::insert_file`]) before a file can be written into them,
/// which mirrors the real filesystem closely enough to exercise bootstrap.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    read_only: bool,
    unreadable: bool,
    writes: usize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `contents` at `path`, creating parent directories as needed.
    pub fn insert_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.add_dirs(parent);
        }
        state.files.insert(path.to_path_buf(), contents.into());
    }

    /// Returns the current contents of the file at `path`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Makes every subsequent write and directory creation fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.lock().read_only = read_only;
    }

    /// Makes every subsequent read fail with `PermissionDenied`.
    pub fn set_unreadable(&self, unreadable: bool) {
        self.lock().unreadable = unreadable;
    }

    /// Number of successful file writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn add_dirs(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.lock();
        if state.unreadable {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        if state.read_only {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if let Some(parent) = path.parent()
            && !state.has_dir(parent)
        {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.read_only {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        state.add_dirs(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }
}

//! File-reading capability.
//!
//! The loader and the TLS materializer never open files themselves; they read
//! through a [`FileSource`] supplied by the host. [`HostFs`] reads the real
//! filesystem, [`MemFs`] serves staged bytes from memory.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Something that can return the bytes stored at a path.
pub trait FileSource {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file does not exist or cannot be read.
    /// A missing file must be reported as [`io::ErrorKind::NotFound`].
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

impl<T: FileSource + ?Sized> FileSource for Box<T> {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// Reads from the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSource for HostFs {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory file map.
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemFs {
    /// Create an empty file map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Remove a file, returning its contents.
    pub fn remove(&mut self, path: &Path) -> Option<Vec<u8>> {
        self.files.remove(path)
    }
}

impl FileSource for MemFs {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

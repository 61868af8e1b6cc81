// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory filesystem for tests.
///
/// Clones share the same storage, so a test can keep one handle and mutate
/// files while the runtime reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock()
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.lock().remove(path.as_ref());
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let content = self.read(path)?;
        String::from_utf8(content).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }
}

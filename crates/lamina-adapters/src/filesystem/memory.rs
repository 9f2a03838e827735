//! In-memory template root for testing and embedded template sets.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use lamina_core::{
    application::{ApplicationError, ports::TemplateRoot},
    error::LaminaResult,
};

/// In-memory template root.
///
/// Clones share storage, so a test can keep a handle while the engine owns a
/// boxed copy and still observe read counts. The inner state is a plain map,
/// so a poisoned lock is recovered rather than surfaced: every access goes
/// through [`MemoryRoot::state`] / [`MemoryRoot::state_mut`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRoot {
    inner: Arc<RwLock<MemoryRootInner>>,
}

#[derive(Debug, Default)]
struct MemoryRootInner {
    files: HashMap<PathBuf, String>,
    reads: usize,
}

impl MemoryRoot {
    /// Create a new empty memory root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.state_mut().files.insert(path.into(), content.into());
    }

    /// Number of reads served so far (testing helper).
    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.state().files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.state_mut();
        inner.files.clear();
        inner.reads = 0;
    }

    fn state(&self) -> RwLockReadGuard<'_, MemoryRootInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, MemoryRootInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TemplateRoot for MemoryRoot {
    fn read(&self, path: &Path) -> LaminaResult<String> {
        let mut inner = self.state_mut();
        inner.reads += 1;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::RootIo {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }

    fn walk(&self) -> LaminaResult<Vec<PathBuf>> {
        let mut files: Vec<_> = self.state().files.keys().cloned().collect();
        files.sort();
        Ok(files)
    }

    fn narrow(&self, dir: &Path) -> LaminaResult<Box<dyn TemplateRoot>> {
        let narrowed = MemoryRoot::new();
        {
            let inner = self.state();
            let mut target = narrowed.state_mut();
            for (path, content) in &inner.files {
                if let Ok(rel) = path.strip_prefix(dir) {
                    target.files.insert(rel.to_path_buf(), content.clone());
                }
            }
            if target.files.is_empty() {
                return Err(ApplicationError::RootNarrowing {
                    dir: dir.to_path_buf(),
                }
                .into());
            }
        }
        Ok(Box::new(narrowed))
    }
}

//! Local filesystem root using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use lamina_core::{
    application::{ApplicationError, ports::TemplateRoot},
    error::LaminaResult,
};

/// Production template root backed by an OS directory.
#[derive(Debug, Clone)]
pub struct LocalRoot {
    base: PathBuf,
}

impl LocalRoot {
    /// Create a root over the given directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl TemplateRoot for LocalRoot {
    fn read(&self, path: &Path) -> LaminaResult<String> {
        let full = self.base.join(path);
        std::fs::read_to_string(&full).map_err(|e| map_io_error(&full, e, "read file"))
    }

    fn walk(&self) -> LaminaResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.base).follow_links(true) {
            let entry =
                entry.map_err(|e| map_walk_error(&self.base, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.base)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "relativize"))?;
            files.push(rel.to_path_buf());
        }
        Ok(files)
    }

    fn narrow(&self, dir: &Path) -> LaminaResult<Box<dyn TemplateRoot>> {
        let base = self.base.join(dir);
        if !base.is_dir() {
            return Err(ApplicationError::RootNarrowing {
                dir: dir.to_path_buf(),
            }
            .into());
        }
        Ok(Box::new(Self { base }))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> lamina_core::error::LaminaError {
    ApplicationError::RootIo {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(base: &Path, e: walkdir::Error) -> lamina_core::error::LaminaError {
    ApplicationError::RootIo {
        path: e
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base.to_path_buf()),
        reason: format!("Failed to walk root: {}", e),
    }
    .into()
}

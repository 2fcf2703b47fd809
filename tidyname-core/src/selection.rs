use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A file selected for renaming, captured at selection time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File name including extension
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Directory containing the file
    pub directory: PathBuf,
}

impl FileEntry {
    /// Build an entry from an absolute path and a known size without touching
    /// the filesystem.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .ok_or_else(|| anyhow!("invalid path, no file name: {}", path.display()))?
            .to_str()
            .ok_or_else(|| anyhow!("invalid file name, not valid UTF-8: {}", path.display()))?
            .to_string();
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("invalid path, no parent directory: {}", path.display()))?;

        Ok(Self {
            path,
            name,
            size,
            directory,
        })
    }

    /// Stat `path` and capture it as an entry. Relative paths are resolved
    /// against the current directory. Symlinks are not resolved, so selecting a
    /// link renames the link itself.
    pub fn from_path(path: &Path) -> Result<Self> {
        let absolute = absolutize(path)?;
        let metadata = fs::symlink_metadata(&absolute)
            .with_context(|| format!("File not found: {}", absolute.display()))?;

        if metadata.is_dir() {
            return Err(anyhow!(
                "invalid selection, {} is a directory",
                absolute.display()
            ));
        }

        Self::new(absolute, metadata.len())
    }
}

/// Capture a selection of paths as entries, keeping the given order. A path
/// listed twice is kept once, at its first position.
pub fn select_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(paths.len());

    for path in paths {
        let entry = FileEntry::from_path(path.as_ref())?;
        if seen.insert(entry.path.clone()) {
            entries.push(entry);
        } else {
            tracing::debug!(path = %entry.path.display(), "Skipping duplicate selection");
        }
    }

    Ok(entries)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(path)
    };

    // Lexical only; `..` pops the previous component without following links
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

//! Batch orchestration: preview, apply and single-level undo.
//!
//! Every batch is processed strictly in order, one item at a time, and each
//! item resolves on its own to success or a [`RenameError`]. Nothing is rolled
//! back when a later item fails. Existence checks look at the live filesystem
//! only, never at other operations in the same batch.

use crate::error::RenameError;
use crate::gateway::FsGateway;
use crate::history::{create_history_entry, History};
use crate::rules::{compute_new_name, split_extension, RenameConfig};
use crate::selection::FileEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How one selected file would be renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub file: FileEntry,
    pub new_name: String,
    /// The new name differs from the current one
    pub changed: bool,
    /// Another file in the batch maps to the same new name
    pub conflicted: bool,
    /// The rules removed the whole base name
    pub empty_name: bool,
}

/// A single planned (or executed) rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    pub old_path: PathBuf,
    pub old_name: String,
    pub new_name: String,
    pub directory: PathBuf,
}

impl RenameOperation {
    pub fn from_entry(entry: &FileEntry, config: &RenameConfig) -> Self {
        Self {
            old_path: entry.path.clone(),
            old_name: entry.name.clone(),
            new_name: compute_new_name(&entry.name, config),
            directory: entry.directory.clone(),
        }
    }

    /// Where the file ends up after the rename
    pub fn target_path(&self) -> PathBuf {
        self.directory.join(&self.new_name)
    }

    /// Where the file lived before the rename
    pub fn original_path(&self) -> PathBuf {
        self.directory.join(&self.old_name)
    }
}

/// Outcome of one rename or undo step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameResult {
    pub success: bool,
    /// Name before this step
    pub old_name: String,
    /// Name after this step (or the name it would have had)
    pub new_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<RenameError>,
}

impl RenameResult {
    fn succeeded(old_name: &str, new_name: &str) -> Self {
        Self {
            success: true,
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            error: None,
        }
    }

    fn failed(old_name: &str, new_name: &str, error: RenameError) -> Self {
        Self {
            success: false,
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            error: Some(error),
        }
    }
}

/// Compute the new name of every file in the batch and flag conflicts.
///
/// Conflicts are exact, case-sensitive matches of the new name anywhere in the
/// batch, regardless of directory. Does not touch the filesystem.
pub fn preview(files: &[FileEntry], config: &RenameConfig) -> Vec<PreviewRow> {
    let new_names: Vec<String> = files
        .iter()
        .map(|file| compute_new_name(&file.name, config))
        .collect();

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for name in &new_names {
        *name_counts.entry(name.as_str()).or_insert(0) += 1;
    }

    files
        .iter()
        .zip(&new_names)
        .map(|(file, new_name)| {
            let (_, extension) = split_extension(&file.name);
            PreviewRow {
                file: file.clone(),
                new_name: new_name.clone(),
                changed: *new_name != file.name,
                conflicted: name_counts[new_name.as_str()] > 1,
                empty_name: new_name.len() == extension.len(),
            }
        })
        .collect()
}

/// Whether any row in the preview is conflicted
pub fn has_conflicts(rows: &[PreviewRow]) -> bool {
    rows.iter().any(|row| row.conflicted)
}

/// Build the operations for an apply call. Files whose name would not change
/// are left out.
pub fn plan(files: &[FileEntry], config: &RenameConfig) -> Vec<RenameOperation> {
    files
        .iter()
        .map(|file| RenameOperation::from_entry(file, config))
        .filter(|op| op.new_name != op.old_name)
        .collect()
}

/// Executes batches against a filesystem gateway and owns the undo history
pub struct Renamer<G: FsGateway> {
    gateway: G,
    history: History,
}

impl<G: FsGateway> Renamer<G> {
    /// Orchestrator with an empty in-memory history
    pub fn new(gateway: G) -> Self {
        Self::with_history(gateway, History::new())
    }

    /// Orchestrator that continues an existing history
    pub fn with_history(gateway: G, history: History) -> Self {
        Self { gateway, history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Run each operation in order. The successful ones are recorded as one
    /// history entry when there is at least one.
    pub fn apply(&mut self, operations: &[RenameOperation]) -> Vec<RenameResult> {
        let mut results = Vec::with_capacity(operations.len());
        let mut succeeded = Vec::new();

        for op in operations {
            let target = op.target_path();
            match self.move_file(&op.old_path, &target) {
                Ok(()) => {
                    debug!(from = %op.old_path.display(), to = %target.display(), "Renamed");
                    succeeded.push(op.clone());
                    results.push(RenameResult::succeeded(&op.old_name, &op.new_name));
                },
                Err(error) => {
                    warn!(file = %op.old_path.display(), %error, "Rename failed");
                    results.push(RenameResult::failed(&op.old_name, &op.new_name, error));
                },
            }
        }

        info!(
            total = operations.len(),
            succeeded = succeeded.len(),
            "Applied rename batch"
        );

        if !succeeded.is_empty() {
            self.history.push(create_history_entry(succeeded));
        }

        results
    }

    /// Rename the files of the most recent batch back to their original names.
    ///
    /// Returns an empty list when there is nothing to undo. The batch is only
    /// removed from history when every file was restored; otherwise it stays so
    /// the undo can be retried.
    pub fn undo_last(&mut self) -> Vec<RenameResult> {
        let Some(entry) = self.history.last_entry() else {
            debug!("Nothing to undo");
            return Vec::new();
        };

        let mut results = Vec::with_capacity(entry.operations.len());
        for op in &entry.operations {
            let current = op.target_path();
            let original = op.original_path();

            let outcome = if self.gateway.exists(&current) {
                move_file(&self.gateway, &current, &original)
            } else {
                Err(RenameError::SourceMissing)
            };

            match outcome {
                Ok(()) => {
                    debug!(from = %current.display(), to = %original.display(), "Restored");
                    results.push(RenameResult::succeeded(&op.new_name, &op.old_name));
                },
                Err(error) => {
                    warn!(file = %current.display(), %error, "Undo failed");
                    results.push(RenameResult::failed(&op.new_name, &op.old_name, error));
                },
            }
        }

        let entry_id = entry.id.clone();
        if results.iter().all(|r| r.success) {
            self.history.pop();
            info!(id = %entry_id, files = results.len(), "Undid rename batch");
        } else {
            info!(id = %entry_id, "Undo incomplete, keeping history entry");
        }

        results
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), RenameError> {
        move_file(&self.gateway, from, to)
    }
}

fn move_file<G: FsGateway>(gateway: &G, from: &Path, to: &Path) -> Result<(), RenameError> {
    if gateway.exists(to) && !is_case_only_rename(gateway, from, to) {
        return Err(RenameError::TargetExists);
    }

    gateway
        .rename(from, to)
        .map_err(|e| RenameError::RenameFailed(e.to_string()))
}

/// A target that differs from the source only by letter case, resolves to the
/// same file and has no directory entry of its own is the source itself on a
/// case-insensitive filesystem. A hard link spelled with the new case is a
/// real entry and still counts as taken.
fn is_case_only_rename<G: FsGateway>(gateway: &G, from: &Path, to: &Path) -> bool {
    from != to
        && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
        && gateway.is_same_file(from, to)
        && !gateway.has_exact_entry(to)
}

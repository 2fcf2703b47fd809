use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single rename (or undo of a rename) did not happen.
///
/// These never abort a batch; each item resolves to success or one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum RenameError {
    /// The destination name is already taken in the target directory
    #[error("File already exists")]
    TargetExists,
    /// The file to restore during undo is gone
    #[error("File not found (may have been moved or deleted)")]
    SourceMissing,
    /// The filesystem rejected the rename; carries the underlying message
    #[error("{0}")]
    RenameFailed(String),
}

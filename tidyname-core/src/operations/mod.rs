//! High-level operations that correspond to CLI commands
//!
//! These modules wire selection, the rule engine and the batch orchestrator to
//! the on-disk state in `.tidyname/`, separated from CLI concerns like
//! argument parsing, prompting and output formatting.

pub mod apply;
pub mod history;
pub mod preview;
pub mod undo;

pub use apply::apply_operation;
pub use history::history_operation;
pub use preview::preview_operation;
pub use undo::{pending_undo, undo_operation};

use crate::config::STATE_DIR_NAME;
use std::path::{Path, PathBuf};

/// `.tidyname/` under `working_dir`, or under the current directory
pub(crate) fn state_dir(working_dir: Option<&Path>) -> PathBuf {
    working_dir
        .unwrap_or_else(|| Path::new("."))
        .join(STATE_DIR_NAME)
}

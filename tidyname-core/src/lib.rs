#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod history;
pub mod interrupt;
pub mod lock;
pub mod operations;
pub mod output;
pub mod preview;
pub mod renamer;
pub mod rules;
pub mod selection;

pub use config::Config;
pub use error::RenameError;
pub use gateway::{FsGateway, StdFs};
pub use history::{create_history_entry, format_history, History, HistoryEntry};
pub use lock::LockFile;
pub use operations::{
    apply_operation, history_operation, pending_undo, preview_operation, undo_operation,
};
pub use output::{
    ApplyResult, HistoryResult, OutputFormat, OutputFormatter, PreviewResult, UndoResult,
    VersionResult,
};
pub use preview::{render_preview, should_use_color};
pub use renamer::{has_conflicts, plan, PreviewRow, RenameOperation, RenameResult, Renamer};
pub use rules::{compute_new_name, split_extension, Capitalization, RenameConfig};
pub use selection::{select_files, FileEntry};

use crate::output::PreviewResult;
use crate::renamer::preview;
use crate::rules::RenameConfig;
use crate::selection::select_files;
use anyhow::Result;
use std::path::PathBuf;

/// Preview operation - select the files and compute their new names without
/// touching the filesystem
pub fn preview_operation(files: &[PathBuf], config: &RenameConfig) -> Result<PreviewResult> {
    let selection = select_files(files)?;
    Ok(PreviewResult::new(preview(&selection, config)))
}

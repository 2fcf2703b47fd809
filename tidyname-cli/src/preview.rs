use anyhow::Result;
use std::path::PathBuf;
use tidyname_core::{preview_operation, OutputFormatter, RenameConfig};

use crate::cli::OutputFormat;

/// Exit code 1 when any new names collide
pub fn handle_preview(
    files: &[PathBuf],
    rules: &RenameConfig,
    output: OutputFormat,
    use_color: bool,
) -> Result<i32> {
    let result = preview_operation(files, rules)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary(use_color)),
    }

    Ok(i32::from(result.has_conflicts))
}

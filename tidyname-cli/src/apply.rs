use anyhow::Result;
use std::path::PathBuf;
use tidyname_core::{apply_operation, preview_operation, OutputFormatter, RenameConfig};

use crate::cli::OutputFormat;
use crate::prompt::confirm;

pub struct ApplyOptions {
    pub force_with_conflicts: bool,
    pub yes: bool,
    pub quiet: bool,
    pub use_color: bool,
}

pub fn handle_apply(
    files: &[PathBuf],
    rules: &RenameConfig,
    output: OutputFormat,
    options: &ApplyOptions,
) -> Result<i32> {
    let preview = preview_operation(files, rules)?;
    let changed = preview.rows.iter().filter(|r| r.changed).count();

    if output == OutputFormat::Summary && !options.quiet {
        print!("{}", preview.format_summary(options.use_color));
    }

    // Unforced conflicts or empty names make the apply below refuse, so don't ask first
    let will_refuse = (preview.has_conflicts
        || preview.rows.iter().any(|r| r.empty_name && r.changed))
        && !options.force_with_conflicts;
    if changed > 0
        && !options.yes
        && !will_refuse
        && !confirm(&format!("Rename {changed} file(s)?"))?
    {
        eprintln!("Aborted");
        return Ok(0);
    }

    let result = apply_operation(files, rules, options.force_with_conflicts, None)?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => println!("{}", result.format_summary(options.use_color)),
    }

    Ok(i32::from(result.results.iter().any(|r| !r.success)))
}

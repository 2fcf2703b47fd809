use anyhow::Result;
use tidyname_core::{pending_undo, undo_operation, OutputFormatter, UndoResult};

use crate::cli::OutputFormat;
use crate::prompt::confirm;

pub fn handle_undo(output: OutputFormat, yes: bool, use_color: bool) -> Result<i32> {
    let result = match pending_undo(None)? {
        None => UndoResult {
            history_id: None,
            results: Vec::new(),
            entry_kept: false,
        },
        Some(count) => {
            if !yes && !confirm(&format!("Undo the last rename operation ({count} file(s))?"))? {
                eprintln!("Aborted");
                return Ok(0);
            }
            undo_operation(None)?
        },
    };

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => println!("{}", result.format_summary(use_color)),
    }

    Ok(i32::from(result.results.iter().any(|r| !r.success)))
}

use anyhow::Result;
use tidyname_core::{history_operation, OutputFormatter};

use crate::cli::OutputFormat;

pub fn handle_history(limit: Option<usize>, output: OutputFormat, use_color: bool) -> Result<i32> {
    let result = history_operation(limit, None)?;
    println!("{}", result.format(output.into(), use_color));
    Ok(0)
}

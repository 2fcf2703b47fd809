use crate::history::History;
use crate::output::HistoryResult;
use anyhow::Result;
use std::path::Path;

/// History operation - recorded batches, most recent first
pub fn history_operation(
    limit: Option<usize>,
    working_dir: Option<&Path>,
) -> Result<HistoryResult> {
    let history = History::load(&super::state_dir(working_dir))?;
    let entries = history.list_entries(limit).into_iter().cloned().collect();
    Ok(HistoryResult { entries })
}

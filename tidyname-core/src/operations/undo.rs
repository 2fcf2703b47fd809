use crate::gateway::StdFs;
use crate::history::History;
use crate::lock::LockFile;
use crate::output::UndoResult;
use crate::renamer::Renamer;
use anyhow::Result;
use std::path::Path;

/// High-level undo operation - equivalent to `tidyname undo` command.
///
/// Restores the most recent batch. The batch stays in history when any file
/// could not be restored so the undo can be retried.
pub fn undo_operation(working_dir: Option<&Path>) -> Result<UndoResult> {
    let state_dir = super::state_dir(working_dir);
    let lock = LockFile::acquire(&state_dir)?;

    let history = History::load(&state_dir)?;
    let history_id = history.last_entry().map(|e| e.id.clone());

    let mut renamer = Renamer::with_history(StdFs, history);
    let results = renamer.undo_last();
    let history = renamer.into_history();

    let entry_kept = history_id.is_some()
        && history.last_entry().map(|e| &e.id) == history_id.as_ref();
    if history_id.is_some() && !entry_kept {
        history.save()?;
    }

    lock.release()?;

    Ok(UndoResult {
        history_id,
        results,
        entry_kept,
    })
}

/// Number of files the next undo would restore, or `None` when there is
/// nothing to undo
pub fn pending_undo(working_dir: Option<&Path>) -> Result<Option<usize>> {
    let history = History::load(&super::state_dir(working_dir))?;
    Ok(history.last_entry().map(|e| e.operations.len()))
}

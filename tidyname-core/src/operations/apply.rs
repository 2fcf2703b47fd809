use crate::gateway::StdFs;
use crate::history::History;
use crate::lock::LockFile;
use crate::output::ApplyResult;
use crate::renamer::{plan, preview, Renamer};
use crate::rules::RenameConfig;
use crate::selection::select_files;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// High-level apply operation - equivalent to `tidyname apply` command.
///
/// Refuses to run when two selected files would end up with the same name or
/// when a name would lose its whole base, unless `force_with_conflicts` is set.
/// Item failures are reported in the result; only setup problems are errors.
pub fn apply_operation(
    files: &[PathBuf],
    config: &RenameConfig,
    force_with_conflicts: bool,
    working_dir: Option<&Path>,
) -> Result<ApplyResult> {
    let state_dir = super::state_dir(working_dir);
    let lock = LockFile::acquire(&state_dir)?;

    let selection = select_files(files)?;
    let rows = preview(&selection, config);

    if !force_with_conflicts {
        let conflicted = rows.iter().filter(|r| r.conflicted).count();
        if conflicted > 0 {
            return Err(anyhow!(
                "{conflicted} file(s) would be renamed to a name used by another selected file \
                (conflict). Use --force-with-conflicts to apply anyway"
            ));
        }

        let empty: Vec<&str> = rows
            .iter()
            .filter(|r| r.empty_name && r.changed)
            .map(|r| r.file.name.as_str())
            .collect();
        if !empty.is_empty() {
            return Err(anyhow!(
                "invalid rules, these files would be left without a name: {}. \
                Use --force-with-conflicts to apply anyway",
                empty.join(", ")
            ));
        }
    }

    let operations = plan(&selection, config);
    let history = History::load(&state_dir)?;
    let before = history.len();

    let mut renamer = Renamer::with_history(StdFs, history);
    let results = renamer.apply(&operations);

    let history = renamer.into_history();
    let history_id = if history.len() > before {
        history.save()?;
        history.last_entry().map(|e| e.id.clone())
    } else {
        None
    };

    lock.release()?;

    Ok(ApplyResult {
        history_id,
        results,
    })
}

use crate::renamer::RenameOperation;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// The successful renames from one apply call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this batch
    pub id: String,
    /// Timestamp when the batch was applied
    pub created_at: String,
    /// Renames that succeeded, in the order they were performed
    pub operations: Vec<RenameOperation>,
}

/// Stack of applied batches, most recent last.
///
/// Every entry is kept, but only the most recent one is ever undone. A history
/// created with [`History::new`] lives in memory only; one loaded from a path
/// can be written back with [`History::save`].
#[derive(Debug, Default)]
pub struct History {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Empty in-memory history
    pub fn new() -> Self {
        Self::default()
    }

    /// Load history from the state directory
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join("history.json");
        Self::load_from_path(&path)
    }

    /// Load history from a specific path. A missing file is an empty history.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open history file: {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse history file: {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Write the history back to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to create history file: {}", path.display()))?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.entries)
            .with_context(|| format!("Failed to write history file: {}", path.display()))?;

        Ok(())
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    /// The entry `undo_last` would act on
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries most recent first, optionally limited to the newest N
    pub fn list_entries(&self, limit: Option<usize>) -> Vec<&HistoryEntry> {
        let entries = self.entries.iter().rev();
        match limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Create a history entry stamped with the current time
pub fn create_history_entry(operations: Vec<RenameOperation>) -> HistoryEntry {
    let created_at = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, false);
    HistoryEntry {
        id: generate_entry_id(&created_at, &operations),
        created_at,
        operations,
    }
}

fn generate_entry_id(created_at: &str, operations: &[RenameOperation]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(created_at.as_bytes());
    for op in operations {
        hasher.update(op.old_path.to_string_lossy().as_bytes());
        hasher.update([0]);
        hasher.update(op.new_name.as_bytes());
        hasher.update([0]);
    }
    format!("{:x}", hasher.finalize())[..16].to_string()
}

/// Format history entries as a table
pub fn format_history(entries: &[&HistoryEntry], use_color: bool) -> String {
    use comfy_table::{Cell, Color, Table};

    let mut table = Table::new();
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Date").fg(Color::Cyan),
            Cell::new("Files").fg(Color::Cyan),
            Cell::new("Example").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["ID", "Date", "Files", "Example"]);
    }

    for entry in entries {
        let date = entry
            .created_at
            .split('T')
            .next()
            .unwrap_or(&entry.created_at);
        let example = entry
            .operations
            .first()
            .map(|op| format!("{} → {}", op.old_name, op.new_name))
            .unwrap_or_default();

        table.add_row(vec![
            entry.id.clone(),
            date.to_string(),
            entry.operations.len().to_string(),
            example,
        ]);
    }

    table.to_string()
}

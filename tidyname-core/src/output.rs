use crate::history::{format_history, HistoryEntry};
use crate::error::RenameError;
use crate::preview::{render_preview, PreviewCounts};
use crate::renamer::{PreviewRow, RenameResult};
use nu_ansi_term::Color as AnsiColor;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a preview operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResult {
    pub rows: Vec<PreviewRow>,
    pub has_conflicts: bool,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    /// History entry recorded for the batch, if anything was renamed
    pub history_id: Option<String>,
    pub results: Vec<RenameResult>,
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    /// The history entry that was undone (or retried)
    pub history_id: Option<String>,
    pub results: Vec<RenameResult>,
    /// The entry is still in history because some files were not restored
    pub entry_kept: bool,
}

/// Result of a history operation
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub entries: Vec<HistoryEntry>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format_json(&self) -> String;
    fn format_summary(&self, use_color: bool) -> String;

    fn format(&self, format: OutputFormat, use_color: bool) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(use_color),
        }
    }
}

/// Per-item outcome counts for an apply or undo batch
fn tally(results: &[RenameResult]) -> (usize, usize) {
    let succeeded = results.iter().filter(|r| r.success).count();
    (succeeded, results.len() - succeeded)
}

fn paint(color: AnsiColor, text: &str, use_color: bool) -> String {
    if use_color {
        color.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Undo moves files back, so an occupied target is the original name
fn undo_error_text(error: &RenameError) -> String {
    match error {
        RenameError::TargetExists => "Original filename already exists".to_string(),
        other => other.to_string(),
    }
}

/// Headline plus one `name: error` line per failed item
fn notification(
    results: &[RenameResult],
    all_ok: impl Fn(usize) -> String,
    partial: impl Fn(usize, usize) -> String,
    error_text: fn(&RenameError) -> String,
    use_color: bool,
) -> String {
    let (succeeded, failed) = tally(results);
    if failed == 0 {
        return paint(AnsiColor::Green, &all_ok(succeeded), use_color);
    }

    let mut output = paint(AnsiColor::Yellow, &partial(succeeded, failed), use_color);
    for result in results.iter().filter(|r| !r.success) {
        let error = result
            .error
            .as_ref()
            .map(error_text)
            .unwrap_or_default();
        output.push('\n');
        output.push_str(&result.old_name);
        output.push_str(": ");
        output.push_str(&paint(AnsiColor::Red, &error, use_color));
    }
    output
}

impl PreviewResult {
    pub fn new(rows: Vec<PreviewRow>) -> Self {
        let has_conflicts = crate::renamer::has_conflicts(&rows);
        Self {
            rows,
            has_conflicts,
        }
    }
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        let counts = PreviewCounts::from_rows(&self.rows);
        let rows: Vec<_> = self
            .rows
            .iter()
            .map(|row| {
                json!({
                    "path": row.file.path,
                    "old_name": row.file.name,
                    "new_name": row.new_name,
                    "changed": row.changed,
                    "conflicted": row.conflicted,
                    "empty_name": row.empty_name,
                })
            })
            .collect();

        serde_json::to_string(&json!({
            "success": !self.has_conflicts,
            "operation": "preview",
            "has_conflicts": self.has_conflicts,
            "summary": {
                "files": counts.files,
                "changed": counts.changed,
                "conflicted": counts.conflicted,
                "empty_names": counts.empty_names,
            },
            "rows": rows,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, use_color: bool) -> String {
        let mut output = render_preview(&self.rows, use_color);
        if self.has_conflicts {
            output.push_str(&paint(
                AnsiColor::Red,
                "Some files would end up with the same name",
                use_color,
            ));
            output.push('\n');
        }
        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        let (succeeded, failed) = tally(&self.results);
        serde_json::to_string(&json!({
            "success": failed == 0,
            "operation": "apply",
            "history_id": self.history_id,
            "summary": {
                "renamed": succeeded,
                "failed": failed,
            },
            "results": self.results,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, use_color: bool) -> String {
        if self.results.is_empty() {
            return "No files need renaming".to_string();
        }
        notification(
            &self.results,
            |n| format!("Successfully renamed {n} file(s)!"),
            |s, f| format!("Renamed {s} file(s). {f} failed:"),
            ToString::to_string,
            use_color,
        )
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        let (succeeded, failed) = tally(&self.results);
        serde_json::to_string(&json!({
            "success": failed == 0,
            "operation": "undo",
            "history_id": self.history_id,
            "entry_kept": self.entry_kept,
            "summary": {
                "restored": succeeded,
                "failed": failed,
            },
            "results": self.results,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, use_color: bool) -> String {
        if self.results.is_empty() {
            return "Nothing to undo".to_string();
        }
        notification(
            &self.results,
            |n| format!("Successfully undid rename of {n} file(s)!"),
            |s, f| format!("Undid {s} file(s). {f} failed:"),
            undo_error_text,
            use_color,
        )
    }
}

impl OutputFormatter for HistoryResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "entries": self.entries
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, use_color: bool) -> String {
        if self.entries.is_empty() {
            return "No history entries found".to_string();
        }
        let entries: Vec<&HistoryEntry> = self.entries.iter().collect();
        format_history(&entries, use_color)
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self, _use_color: bool) -> String {
        format!("{} {}", self.name, self.version)
    }
}

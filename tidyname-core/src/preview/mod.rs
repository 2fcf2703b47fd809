mod table;

pub use table::render_table;

use crate::renamer::PreviewRow;
use std::io::{self, IsTerminal};

/// Counts shown under the preview table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewCounts {
    pub files: usize,
    pub changed: usize,
    pub conflicted: usize,
    pub empty_names: usize,
}

impl PreviewCounts {
    pub fn from_rows(rows: &[PreviewRow]) -> Self {
        Self {
            files: rows.len(),
            changed: rows.iter().filter(|r| r.changed).count(),
            conflicted: rows.iter().filter(|r| r.conflicted).count(),
            empty_names: rows.iter().filter(|r| r.empty_name).count(),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the preview table followed by a one-line count summary. The table
/// stretches to the terminal width only when stdout is a terminal.
pub fn render_preview(rows: &[PreviewRow], use_color: bool) -> String {
    render_preview_with_width(rows, use_color, io::stdout().is_terminal())
}

pub fn render_preview_with_width(
    rows: &[PreviewRow],
    use_color: bool,
    dynamic_width: bool,
) -> String {
    if rows.is_empty() {
        return "No files selected\n".to_string();
    }

    let mut output = render_table(rows, use_color, dynamic_width);
    output.push('\n');
    output.push_str(&count_line(PreviewCounts::from_rows(rows)));
    output.push('\n');
    output
}

fn count_line(counts: PreviewCounts) -> String {
    let mut line = format!("{} file(s), {} to rename", counts.files, counts.changed);
    if counts.conflicted > 0 {
        line.push_str(&format!(", {} conflicted", counts.conflicted));
    }
    if counts.empty_names > 0 {
        line.push_str(&format!(", {} with empty names", counts.empty_names));
    }
    line
}

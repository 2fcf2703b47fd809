use crate::renamer::PreviewRow;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

const ARROW: &str = "→";

/// Render preview rows as a table: status marker, current name, an arrow when
/// the name changes, and the new name.
pub fn render_table(rows: &[PreviewRow], use_color: bool, dynamic_width: bool) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    if dynamic_width {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new(""),
            Cell::new("New name").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Status", "Current name", "", "New name"]);
    }

    for row in rows {
        let arrow = if row.changed { ARROW } else { "" };
        let status = status_label(row);

        if use_color {
            let status_cell = match status {
                "conflict" => Cell::new(status).fg(Color::Red),
                "empty" => Cell::new(status).fg(Color::Yellow),
                _ => Cell::new(status),
            };
            let new_name_cell = if row.changed {
                Cell::new(&row.new_name).fg(Color::Green)
            } else {
                Cell::new(&row.new_name).fg(Color::DarkGrey)
            };
            table.add_row(vec![
                status_cell,
                Cell::new(&row.file.name),
                Cell::new(arrow).fg(Color::Magenta),
                new_name_cell,
            ]);
        } else {
            table.add_row(vec![status, &row.file.name, arrow, &row.new_name]);
        }
    }

    table.to_string()
}

fn status_label(row: &PreviewRow) -> &'static str {
    if row.conflicted {
        "conflict"
    } else if row.empty_name {
        "empty"
    } else {
        ""
    }
}

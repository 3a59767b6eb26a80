use chrono::{DateTime, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Colors a deployment cell by age: green within a day, yellow within a
/// week, red beyond.
pub fn color_coded_age_cell(
    text: String,
    finished_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Cell {
    let hours = (now - finished_at).num_hours();
    if hours < 24 {
        Cell::new(text).fg(TableColor::Green)
    } else if hours < 24 * 7 {
        Cell::new(text).fg(TableColor::Yellow)
    } else {
        Cell::new(text).fg(TableColor::Red)
    }
}

pub fn empty_cell() -> Cell {
    Cell::new("-").fg(TableColor::DarkGrey)
}

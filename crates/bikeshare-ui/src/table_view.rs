//! Raw trip records rendered as an aligned text table.
//!
//! Only the city file's original columns are shown; derived month, weekday
//! and start hour never appear here.

use bikeshare_core::models::{Schema, TripRecord};
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::themes::Theme;

/// Render `rows` under the header from `schema`.
///
/// Column widths are computed per call, so each page is aligned on its own.
pub fn render_rows(schema: &Schema, rows: &[TripRecord], theme: &Theme) -> String {
    let mut table = borderless_table(theme);
    table.set_header(
        schema
            .columns
            .iter()
            .map(|h| emphasised(Cell::new(h), theme))
            .collect::<Vec<_>>(),
    );
    for row in rows {
        table.add_row(row.raw.iter().map(Cell::new).collect::<Vec<_>>());
    }
    table_lines(&table).join("\n")
}

// ── Shared table helpers ──────────────────────────────────────────────────────

/// A table with no borders or rules and no wrapping. Styling follows the
/// theme rather than whether stdout is a terminal.
pub(crate) fn borderless_table(theme: &Theme) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    if theme.is_enabled() {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

/// Bold when the theme is coloured.
pub(crate) fn emphasised(cell: Cell, theme: &Theme) -> Cell {
    if theme.is_enabled() {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

/// Rendered lines with trailing padding removed and empty rule lines dropped.
pub(crate) fn table_lines(table: &Table) -> Vec<String> {
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

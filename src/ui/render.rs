//! Terminal rendering of table views with per-row alert colors.

use crate::core::view::TableView;
use crate::utils::colors::{RESET, color_for_level};
use crate::utils::table::Table;

/// Render a table with one ANSI color per data row, driven by the matching
/// visible row's alert level. `table` must have been filled from
/// `view.visible_rows()` in order.
pub fn render_with_levels(table: &Table, view: &TableView) -> String {
    let rendered = table.render();
    let mut lines = rendered.lines();

    let mut out = String::new();
    // header + separator, uncolored
    if let Some(h) = lines.next() {
        out.push_str(h);
        out.push('\n');
    }
    if let Some(s) = lines.next() {
        out.push_str(s);
        out.push('\n');
    }

    for (line, row) in lines.zip(view.visible_rows()) {
        match row.level {
            Some(level) => {
                out.push_str(color_for_level(level));
                out.push_str(line);
                out.push_str(RESET);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// Summary panel shown above the lot listing when enabled.
pub fn render_summary_panel(counts: (usize, usize, usize)) -> String {
    let (ok, near, danger) = counts;
    let total = ok + near + danger;
    format!(
        "┌─ Résumé ────────────────────────────\n\
         │ Lots visibles : {total}\n\
         │ ok: {ok}  near: {near}  danger: {danger}\n\
         └─────────────────────────────────────"
    )
}

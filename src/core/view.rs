//! In-memory table view: rows with visibility flags plus the pure
//! search / filter / sort operations applied to every listing.
//!
//! The CLI commands build a TableView from DB rows, apply the requested
//! operations, and render only the visible rows. Nothing in this module
//! touches the database or the terminal.

use crate::models::alert_level::AlertLevel;
use crate::utils::normalize;

/// Column index holding the quantity in lot/product listings.
pub const QTY_COL: usize = 4;

#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<String>,
    pub level: Option<AlertLevel>,
    visible: bool,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            level: None,
            visible: true,
        }
    }

    pub fn with_level(cells: Vec<String>, level: AlertLevel) -> Self {
        Self {
            cells,
            level: Some(level),
            visible: true,
        }
    }

    /// All cells joined, the equivalent of a rendered row's full text.
    fn full_text(&self) -> String {
        self.cells.join(" ")
    }

    fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map(String::as_str).unwrap_or("")
    }

    fn qty(&self) -> i64 {
        self.cell(QTY_COL).trim().parse::<i64>().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct TableView {
    rows: Vec<Row>,
}

impl TableView {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    /// Free-text search: a row stays visible iff its full text contains
    /// the normalized term. The empty term shows every row.
    pub fn search(&mut self, term: &str) {
        let term = normalize(term);
        for row in &mut self.rows {
            row.visible = row.visible && normalize(&row.full_text()).contains(&term);
        }
    }

    /// Exact-match filter on one column. An empty value shows every row;
    /// an out-of-range column behaves as an empty cell.
    pub fn filter_column(&mut self, col: usize, value: &str) {
        let value = normalize(value);
        for row in &mut self.rows {
            let cell = normalize(row.cell(col));
            row.visible = row.visible && (value.is_empty() || cell == value);
        }
    }

    /// Exact-match filter on the row's alert level attribute.
    pub fn filter_level(&mut self, value: &str) {
        let value = normalize(value);
        for row in &mut self.rows {
            let level = row.level.map(|l| l.as_str()).unwrap_or("");
            row.visible = row.visible && (value.is_empty() || level == value);
        }
    }

    /// Reorder rows by a discrete key:
    /// - "name": lexicographic ascending on column 0
    /// - "qty":  numeric descending on QTY_COL (non-numeric counts as 0)
    /// - anything else: no-op, original order preserved.
    ///
    /// sort_by is stable, so equal keys keep their original relative order.
    pub fn sort(&mut self, key: &str) {
        match key {
            "name" => self.rows.sort_by(|a, b| a.cell(0).cmp(b.cell(0))),
            "qty" => self.rows.sort_by(|a, b| b.qty().cmp(&a.qty())),
            _ => {}
        }
    }

    /// Count visible rows per alert level, for the summary panel.
    pub fn level_counts(&self) -> (usize, usize, usize) {
        let mut ok = 0;
        let mut near = 0;
        let mut danger = 0;
        for row in self.visible_rows() {
            match row.level {
                Some(AlertLevel::Ok) | None => ok += 1,
                Some(AlertLevel::Near) => near += 1,
                Some(AlertLevel::Danger) => danger += 1,
            }
        }
        (ok, near, danger)
    }
}

/// Open/closed state of the lot listing's summary panel.
/// Persisted in the config file; `config --toggle-panel` flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryPanel {
    open: bool,
}

impl SummaryPanel {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel state, returning the new one.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

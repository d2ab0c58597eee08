//! Result table with a collapsed/expanded row window.

use shared::protocol::SeatRow;

/// Rows shown before the table is expanded.
pub const INITIAL_ROW_LIMIT: usize = 10;
pub const SHOW_LESS_LABEL: &str = "Show Less";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleControl {
    pub label: String,
}

/// One rendered result set. Each search builds a fresh table, so the
/// expanded flag never outlives the rows it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    rows: Vec<SeatRow>,
    expanded: bool,
}

impl ResultsTable {
    pub fn new(rows: Vec<SeatRow>) -> Self {
        Self {
            rows,
            expanded: false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible_rows(&self) -> &[SeatRow] {
        if self.expanded {
            &self.rows
        } else {
            &self.rows[..self.rows.len().min(INITIAL_ROW_LIMIT)]
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.rows.len().saturating_sub(INITIAL_ROW_LIMIT)
    }

    /// `None` when every row already fits in the collapsed window.
    pub fn toggle_control(&self) -> Option<ToggleControl> {
        let hidden = self.hidden_count();
        if hidden == 0 {
            return None;
        }

        let label = if self.expanded {
            SHOW_LESS_LABEL.to_string()
        } else {
            format!("View {hidden} More Rows")
        };
        Some(ToggleControl { label })
    }

    /// Flips the window and returns the new `expanded` state. Tables without
    /// a toggle control are left untouched.
    pub fn toggle(&mut self) -> bool {
        if self.hidden_count() > 0 {
            self.expanded = !self.expanded;
        }
        self.expanded
    }
}

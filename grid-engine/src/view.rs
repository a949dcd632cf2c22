//! Derived, render-ready grid state.

use crate::model::{Cell, Direction, RowId, SortOrdering};
use crate::registry::ComponentRole;
use crate::selection::SelectionMode;

/// Skeleton rows shown while loading when neither a loader row count nor a
/// page size is configured.
pub const DEFAULT_SKELETON_ROWS: usize = 5;

/// A column with its resolved width.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub index: usize,
    pub name: Option<String>,
    pub label: String,
    /// Resolved width in pixels.
    pub width: f64,
    pub is_resizable: bool,
    pub tooltip: Option<String>,
    pub sortable: bool,
    /// Direction indicator if this column is the sorted one.
    pub sort: Option<Direction>,
}

/// A row as it appears on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub id: RowId,
    /// Position in the rows the grid was given.
    pub original_index: usize,
    pub cells: Vec<Cell>,
    pub selected: bool,
}

/// Pager summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub row_count: usize,
    pub page_size_options: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Selection summary for the header checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub mode: SelectionMode,
    /// Selected identities across all pages.
    pub selected_count: usize,
    pub all_visible_selected: bool,
    pub some_visible_selected: bool,
}

impl SelectionView {
    /// Header checkbox should render as indeterminate.
    pub fn is_indeterminate(&self) -> bool {
        self.some_visible_selected && !self.all_visible_selected
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub columns: Vec<ResolvedColumn>,
    pub rows: Vec<VisibleRow>,
    pub total_width: f64,
    pub sort: Option<SortOrdering>,
    pub pagination: Option<PaginationView>,
    pub selection: Option<SelectionView>,
    pub is_loading: bool,
    /// Placeholder rows to draw while loading. Zero otherwise.
    pub skeleton_rows: usize,
    pub overridden_roles: Vec<ComponentRole>,
}

impl GridView {
    /// Identities of the visible rows, in display order.
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id.clone()).collect()
    }

    /// Content of column `column` for every visible row.
    pub fn column_contents(&self, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.cells.get(column).map(|c| c.content.as_str()).unwrap_or(""))
            .collect()
    }

    /// Returns `true` if there is nothing to draw but the empty state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.skeleton_rows == 0
    }
}

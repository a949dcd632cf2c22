//! The grid facade.
//!
//! [`Grid`] ties the engines together: it owns the rows, the column model
//! and the feature state, turns user interactions into state changes and
//! change notifications, and derives a [`GridView`] for rendering.
//!
//! Rows flow through a fixed pipeline on every view:
//!
//! 1. enumerate, so every row keeps its original index
//! 2. sort (local sorting only)
//! 3. slice the current page (local pagination only)
//! 4. annotate selection by identity

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::columns::{ColumnModel, ResizeEngine};
use crate::config::GridConfig;
use crate::coordinator::{
    ChangeCoordinator, ChangeHandler, ChangedFeature, CommitOutcome, Completion, GridChange,
    PageOptions, PendingChange, Settlement, SortOptions,
};
use crate::error::{ConfigurationError, GridError};
use crate::model::{Column, PageState, Row, RowId, SortOrdering, validate_rows};
use crate::pagination::{PaginationEngine, PaginationOptions};
use crate::registry::ComponentRegistry;
use crate::selection::{Selection, SelectionMode, SelectionOptions};
use crate::sorting::{SortingEngine, SortingOptions};
use crate::state::{FeatureState, Setter, StateController};
use crate::view::{
    DEFAULT_SKELETON_ROWS, GridView, PaginationView, ResolvedColumn, SelectionView, VisibleRow,
};

/// Builder for [`Grid`].
///
/// # Example
///
/// ```
/// use grid_engine::prelude::*;
///
/// let grid = Grid::builder(vec![
///     Column::new("ID").name("id"),
///     Column::new("Name").name("name").flex(2.0),
/// ])
/// .rows(vec![
///     Row::from_texts(["1", "Alice"]).with_id(1),
///     Row::from_texts(["2", "Bobie"]).with_id(2),
/// ])
/// .sorting(SortingOptions::new())
/// .pagination(PaginationOptions::new().with_page_size(1))
/// .build()
/// .unwrap();
///
/// let view = grid.view(600.0);
/// assert_eq!(view.rows.len(), 1);
/// assert_eq!(view.pagination.map(|p| p.page_count), Some(2));
/// ```
pub struct GridBuilder {
    columns: Vec<Column>,
    rows: Vec<Row>,
    config: GridConfig,
    controlled_sort: Option<(Option<SortOrdering>, Setter<Option<SortOrdering>>)>,
    controlled_page: Option<(PageState, Setter<PageState>)>,
    controlled_selection: Option<(Vec<RowId>, Setter<Selection>)>,
    handler: Option<Arc<dyn ChangeHandler>>,
    registry: ComponentRegistry,
}

impl GridBuilder {
    /// Start a grid with the given columns and no features.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            config: GridConfig::default(),
            controlled_sort: None,
            controlled_page: None,
            controlled_selection: None,
            handler: None,
            registry: ComponentRegistry::default(),
        }
    }

    /// Set the initial rows.
    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Apply a whole config, replacing any feature set so far.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable sorting.
    pub fn sorting(mut self, options: SortingOptions) -> Self {
        self.config.sorting = Some(options);
        self
    }

    /// Enable pagination.
    pub fn pagination(mut self, options: PaginationOptions) -> Self {
        self.config.pagination = Some(options);
        self
    }

    /// Enable selection.
    pub fn selection(mut self, options: SelectionOptions) -> Self {
        self.config.selection = Some(options);
        self
    }

    /// Skeleton rows shown while loading.
    pub fn loader_rows_count(mut self, count: usize) -> Self {
        self.config.loader_rows_count = Some(count);
        self
    }

    /// Initial loading flag.
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.config.is_loading = is_loading;
        self
    }

    /// Let the caller own the ordering.
    pub fn controlled_sort(
        mut self,
        ordering: Option<SortOrdering>,
        setter: impl Fn(&Option<SortOrdering>) + Send + Sync + 'static,
    ) -> Self {
        self.controlled_sort = Some((ordering, Arc::new(setter)));
        self
    }

    /// Let the caller own the page state.
    pub fn controlled_page(
        mut self,
        page: PageState,
        setter: impl Fn(&PageState) + Send + Sync + 'static,
    ) -> Self {
        self.controlled_page = Some((page, Arc::new(setter)));
        self
    }

    /// Let the caller own the selection.
    pub fn controlled_selection<I, K>(
        mut self,
        selected: I,
        setter: impl Fn(&Selection) + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<RowId>,
    {
        let ids = selected.into_iter().map(Into::into).collect();
        self.controlled_selection = Some((ids, Arc::new(setter)));
        self
    }

    /// Install the change handler.
    pub fn on_change(mut self, handler: impl ChangeHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Install a shared change handler.
    pub fn on_change_shared(mut self, handler: Arc<dyn ChangeHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Set the component overrides.
    pub fn registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Validate everything and build the grid.
    pub fn build(self) -> Result<Grid, GridError> {
        let config = self.config.validate()?;
        let columns = ColumnModel::new(self.columns)?;
        validate_rows(&self.rows, columns.len())?;

        let sorting = config
            .sorting
            .map(|options| SortingEngine::new(options, columns.columns()));
        let pagination = config.pagination.map(PaginationEngine::new).transpose()?;
        let selection_mode = config
            .selection
            .as_ref()
            .map_or(SelectionMode::None, |s| s.mode);

        let sort = match self.controlled_sort {
            Some((value, setter)) => FeatureState::Controlled { value, setter },
            None => FeatureState::uncontrolled(
                sorting
                    .as_ref()
                    .and_then(|engine| engine.options().initial_ordering()),
            ),
        };
        let page = match self.controlled_page {
            Some((value, setter)) => FeatureState::Controlled { value, setter },
            None => FeatureState::uncontrolled(
                pagination
                    .as_ref()
                    .map(|engine| engine.initial_state())
                    .unwrap_or_default(),
            ),
        };
        let selection = match self.controlled_selection {
            Some((ids, setter)) => {
                let mut value = Selection::new(selection_mode);
                value.selected.extend(ids);
                FeatureState::Controlled { value, setter }
            }
            None => FeatureState::uncontrolled(
                config
                    .selection
                    .as_ref()
                    .map_or_else(|| Selection::new(SelectionMode::None), |s| s.initial_selection()),
            ),
        };

        debug!(
            "[grid] built with {} columns, {} rows (sorting: {}, pagination: {}, selection: {:?})",
            columns.len(),
            self.rows.len(),
            sorting.is_some(),
            pagination.is_some(),
            selection_mode
        );

        Ok(Grid {
            columns,
            rows: self.rows,
            resize: ResizeEngine::new(),
            sorting,
            pagination,
            state: StateController {
                sort,
                page,
                selection,
            },
            coordinator: ChangeCoordinator::new(self.handler),
            registry: self.registry,
            is_loading: config.is_loading,
            loader_rows_count: config.loader_rows_count,
        })
    }
}

/// A data grid's state and behaviour, without any rendering.
#[derive(Debug)]
pub struct Grid {
    columns: ColumnModel,
    rows: Vec<Row>,
    resize: ResizeEngine,
    sorting: Option<SortingEngine>,
    pagination: Option<PaginationEngine>,
    state: StateController,
    coordinator: ChangeCoordinator,
    registry: ComponentRegistry,
    is_loading: bool,
    loader_rows_count: Option<usize>,
}

impl Grid {
    /// Start building a grid.
    pub fn builder(columns: Vec<Column>) -> GridBuilder {
        GridBuilder::new(columns)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn state(&self) -> &StateController {
        &self.state
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Current ordering.
    pub fn ordering(&self) -> Option<&SortOrdering> {
        self.state.ordering()
    }

    /// Current page state.
    pub fn page_state(&self) -> PageState {
        self.state.page()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Total rows the pager counts.
    pub fn row_count(&self) -> usize {
        self.pagination
            .as_ref()
            .map_or(self.rows.len(), |engine| engine.row_count(self.rows.len()))
    }

    /// Number of pages, or 1 without pagination.
    pub fn page_count(&self) -> usize {
        match &self.pagination {
            Some(engine) => engine.page_count(&self.state.page(), self.row_count()),
            None => 1,
        }
    }

    // -------------------------------------------------------------------------
    // View derivation
    // -------------------------------------------------------------------------

    fn derive(&self, ordering: Option<&SortOrdering>, page: &PageState) -> Vec<(usize, &Row)> {
        let mut rows: Vec<(usize, &Row)> = self.rows.iter().enumerate().collect();
        if let Some(engine) = &self.sorting {
            rows = engine.apply(rows, ordering);
        }
        if let Some(engine) = &self.pagination {
            rows = engine.apply(rows, page);
        }
        rows
    }

    /// Visible rows with their original indices, in display order.
    pub fn visible_rows(&self) -> Vec<(usize, &Row)> {
        self.derive(self.state.ordering(), &self.state.page())
    }

    /// Identities of the visible rows, in display order.
    pub fn visible_ids(&self) -> Vec<RowId> {
        self.visible_rows()
            .into_iter()
            .map(|(index, row)| row.identity(index))
            .collect()
    }

    /// Derive everything a renderer needs for a container of the given width.
    pub fn view(&self, container_width: f64) -> GridView {
        let ordering = self.state.ordering();
        let page = self.state.page();

        let widths = self.columns.resolve(container_width);
        let columns = self
            .columns
            .columns()
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (column, &width))| {
                let name = column.name.as_deref();
                ResolvedColumn {
                    index,
                    name: column.name.clone(),
                    label: column.label.clone(),
                    width,
                    is_resizable: column.is_resizable,
                    tooltip: column.tooltip.clone(),
                    sortable: match (&self.sorting, name) {
                        (Some(engine), Some(name)) => engine.is_sortable(name),
                        _ => false,
                    },
                    sort: ordering
                        .filter(|o| name == Some(o.field.as_str()))
                        .map(|o| o.direction),
                }
            })
            .collect();

        let selection = self.state.selection();
        let rows: Vec<VisibleRow> = self
            .derive(ordering, &page)
            .into_iter()
            .map(|(index, row)| {
                let id = row.identity(index);
                VisibleRow {
                    selected: selection.is_selected(&id),
                    id,
                    original_index: index,
                    cells: row.cells.clone(),
                }
            })
            .collect();

        let pagination = self.pagination.as_ref().map(|engine| {
            let row_count = engine.row_count(self.rows.len());
            let page = engine.clamp(page, row_count);
            let page_count = engine.page_count(&page, row_count);
            PaginationView {
                page: page.page,
                page_size: page.page_size,
                page_count,
                row_count,
                page_size_options: engine.options().page_size_options.clone(),
                has_prev: page.page > 1,
                has_next: page.page < page_count,
            }
        });

        let selection_view = (selection.mode != SelectionMode::None).then(|| {
            let visible: Vec<RowId> = rows.iter().map(|r| r.id.clone()).collect();
            SelectionView {
                mode: selection.mode,
                selected_count: selection.len(),
                all_visible_selected: selection.all_selected(&visible),
                some_visible_selected: selection.any_selected(&visible),
            }
        });

        GridView {
            columns,
            rows,
            total_width: widths.iter().sum(),
            sort: ordering.cloned(),
            pagination,
            selection: selection_view,
            is_loading: self.is_loading,
            skeleton_rows: self.skeleton_rows(),
            overridden_roles: self.registry.overridden_roles(),
        }
    }

    fn skeleton_rows(&self) -> usize {
        if !self.is_loading {
            return 0;
        }
        self.loader_rows_count
            .or_else(|| self.pagination.as_ref().map(|_| self.state.page().page_size))
            .unwrap_or(DEFAULT_SKELETON_ROWS)
    }

    // -------------------------------------------------------------------------
    // Sorting and pagination
    // -------------------------------------------------------------------------

    /// Build the combined change for the given target state and dispatch it.
    fn dispatch(
        &mut self,
        changed: ChangedFeature,
        ordering: Option<SortOrdering>,
        page: PageState,
    ) -> Option<PendingChange> {
        let sort_options = self.sorting.as_ref().map(|engine| SortOptions {
            rows: (!engine.is_remote()).then(|| {
                let indexed = self.rows.iter().enumerate().collect();
                owned(engine.apply(indexed, ordering.as_ref()))
            }),
            api_params: engine.api_params(ordering.as_ref()),
            ordering: ordering.clone(),
        });
        let page_options = self.pagination.as_ref().map(|engine| {
            let page = engine.clamp(page, engine.row_count(self.rows.len()));
            PageOptions {
                page: page.page,
                page_size: page.page_size,
                api_params: engine.api_params(&page),
                rows: (!engine.is_remote()).then(|| owned(self.derive(ordering.as_ref(), &page))),
            }
        });

        self.coordinator.dispatch(|generation| GridChange {
            generation,
            changed,
            page_options,
            sort_options,
        })
    }

    /// Header click on `field`: cycles ascending, descending, unsorted.
    ///
    /// Returns the pending change to resolve, or `None` if sorting is off,
    /// the field is not sortable or no handler is installed.
    pub fn header_clicked(&mut self, field: &str) -> Option<PendingChange> {
        let next = self
            .sorting
            .as_ref()?
            .next_on_header_click(self.state.ordering(), field)?;
        if !self.state.sort.propose(next.clone()) {
            return None;
        }
        let page = self.state.page();
        self.dispatch(ChangedFeature::Sort, next, page)
    }

    fn change_page(&mut self, next: PageState) -> Option<PendingChange> {
        if !self.state.page.propose(next) {
            trace!("[grid] page {} unchanged", next.page);
            return None;
        }
        let ordering = self.state.ordering().cloned();
        self.dispatch(ChangedFeature::Page, ordering, next)
    }

    /// Go to page `page`, clamped into range.
    pub fn page_changed(&mut self, page: usize) -> Option<PendingChange> {
        let next = self
            .pagination
            .as_ref()?
            .set_page(&self.state.page(), page, self.row_count());
        self.change_page(next)
    }

    /// Change the page size. Returns to the first page.
    pub fn page_size_changed(&mut self, page_size: usize) -> Option<PendingChange> {
        let next = self.pagination.as_ref()?.set_page_size(page_size);
        self.change_page(next)
    }

    /// Advance one page. No-op on the last page.
    pub fn next_page(&mut self) -> Option<PendingChange> {
        let next = self
            .pagination
            .as_ref()?
            .next_page(&self.state.page(), self.row_count())?;
        self.change_page(next)
    }

    /// Go back one page. No-op on the first page.
    pub fn prev_page(&mut self) -> Option<PendingChange> {
        let next = self
            .pagination
            .as_ref()?
            .prev_page(&self.state.page(), self.row_count())?;
        self.change_page(next)
    }

    /// Dispatch the current state unchanged, typically for the first fetch
    /// of a remote grid.
    pub fn refresh(&mut self) -> Option<PendingChange> {
        let ordering = self.state.ordering().cloned();
        let page = self.state.page();
        self.dispatch(ChangedFeature::Refresh, ordering, page)
    }

    /// Apply the result of a resolved change.
    ///
    /// Results superseded by a later change are dropped. A failed current
    /// result is returned as an error and leaves the rows in place.
    pub fn commit(&mut self, completion: Completion) -> Result<CommitOutcome, GridError> {
        match self.coordinator.settle(completion) {
            Settlement::Stale => Ok(CommitOutcome::Discarded),
            Settlement::Failed(err) => {
                warn!("[grid] fetch failed: {}", err);
                Err(err.into())
            }
            Settlement::Ready(None) => Ok(CommitOutcome::Unchanged),
            Settlement::Ready(Some(data)) => {
                let (rows, total_count) = data.into_parts();
                self.set_rows(rows)?;
                self.set_row_count(total_count);
                Ok(CommitOutcome::Applied)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle one row. Returns `true` if the selection changed.
    pub fn row_toggled(&mut self, id: impl Into<RowId>) -> bool {
        let mut next = self.state.selection().clone();
        if !next.toggle(id.into()) {
            trace!("[grid] toggle ignored");
            return false;
        }
        self.state.selection.propose(next)
    }

    /// Select every visible row. Returns the newly selected identities.
    pub fn select_all_visible(&mut self) -> Vec<RowId> {
        let visible = self.visible_ids();
        let mut next = self.state.selection().clone();
        let added = next.select_all(&visible);
        if !added.is_empty() {
            self.state.selection.propose(next);
        }
        added
    }

    /// Header checkbox: select all visible rows, or deselect them if they
    /// are all selected already.
    pub fn toggle_all_visible(&mut self) -> bool {
        let visible = self.visible_ids();
        let mut next = self.state.selection().clone();
        next.toggle_all(&visible) && self.state.selection.propose(next)
    }

    /// Deselect everything. Returns the removed identities.
    pub fn clear_selection(&mut self) -> Vec<RowId> {
        let mut next = self.state.selection().clone();
        let removed = next.clear();
        if !removed.is_empty() {
            self.state.selection.propose(next);
        }
        removed
    }

    /// Returns `true` if the identity is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.state.selection().is_selected(id)
    }

    // -------------------------------------------------------------------------
    // Resizing
    // -------------------------------------------------------------------------

    /// Start dragging a column's resize handle.
    pub fn begin_resize(&mut self, column: usize, pointer: f64, container_width: f64) -> bool {
        self.resize
            .begin_resize(&self.columns, column, pointer, container_width)
    }

    /// Move the pointer during a drag. Returns the new width.
    pub fn update_resize(&mut self, pointer: f64) -> Option<f64> {
        self.resize.update_resize(&mut self.columns, pointer)
    }

    /// Finish the drag. Returns the final width.
    pub fn end_resize(&mut self) -> Option<f64> {
        self.resize.end_resize()
    }

    /// Resize a column by `delta` pixels in one step.
    pub fn resize_handle_dragged(
        &mut self,
        column: usize,
        delta: f64,
        container_width: f64,
    ) -> Option<f64> {
        self.resize
            .resize_by(&mut self.columns, column, delta, container_width)
    }

    /// Drop a column's resized width and go back to its declared width.
    pub fn reset_column_width(&mut self, column: usize) {
        self.columns.clear_override(column);
    }

    // -------------------------------------------------------------------------
    // Caller-owned data
    // -------------------------------------------------------------------------

    /// Replace the rows. Selection is kept.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<(), ConfigurationError> {
        validate_rows(&rows, self.columns.len())?;
        trace!("[grid] {} rows set", rows.len());
        self.rows = rows;
        Ok(())
    }

    /// Replace columns and rows together. Resize overrides are dropped.
    pub fn set_data(&mut self, columns: Vec<Column>, rows: Vec<Row>) -> Result<(), ConfigurationError> {
        let model = ColumnModel::new(columns)?;
        validate_rows(&rows, model.len())?;
        if let Some(engine) = &mut self.sorting {
            engine.set_columns(model.columns());
        }
        self.columns = model;
        self.rows = rows;
        self.resize = ResizeEngine::new();
        Ok(())
    }

    /// Set the total row count reported by a remote source.
    pub fn set_row_count(&mut self, row_count: usize) {
        if let Some(engine) = &mut self.pagination {
            engine.set_remote_row_count(row_count);
        }
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    /// Push the caller's ordering into a controlled grid.
    pub fn sync_sort(&mut self, ordering: Option<SortOrdering>) -> bool {
        self.state.sort.sync(ordering)
    }

    /// Push the caller's page state into a controlled grid.
    pub fn sync_page(&mut self, page: PageState) -> bool {
        self.state.page.sync(page)
    }

    /// Push the caller's selection into a controlled grid.
    pub fn sync_selection<I, K>(&mut self, selected: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<RowId>,
    {
        let mut next = Selection::new(self.state.selection().mode);
        next.selected.extend(selected.into_iter().map(Into::into));
        self.state.selection.sync(next)
    }
}

fn owned(rows: Vec<(usize, &Row)>) -> Vec<Row> {
    rows.into_iter().map(|(_, row)| row.clone()).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::coordinator::handler_fn;
    use crate::error::DataFetchError;
    use crate::model::Direction;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID").name("id"),
            Column::new("Name").name("name").flex(2.0),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::from_texts(["1", "Carol"]).with_id(1),
            Row::from_texts(["2", "Alice"]).with_id(2),
            Row::from_texts(["3", "Bobie"]).with_id(3),
        ]
    }

    fn names(grid: &Grid) -> Vec<String> {
        grid.view(300.0)
            .column_contents(1)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_header_click_cycles() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .build()
            .unwrap();

        grid.header_clicked("name");
        assert_eq!(names(&grid), ["Alice", "Bobie", "Carol"]);
        grid.header_clicked("name");
        assert_eq!(names(&grid), ["Carol", "Bobie", "Alice"]);
        grid.header_clicked("name");
        assert_eq!(grid.ordering(), None);
        assert_eq!(names(&grid), ["Carol", "Alice", "Bobie"]);
    }

    #[test]
    fn test_sort_indicator_on_column() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .build()
            .unwrap();
        grid.header_clicked("id");

        let view = grid.view(300.0);
        assert_eq!(view.columns[0].sort, Some(Direction::Asc));
        assert_eq!(view.columns[1].sort, None);
        assert!(view.columns[1].sortable);
    }

    #[test]
    fn test_sorting_keeps_page() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .pagination(PaginationOptions::new().with_page_size(2))
            .build()
            .unwrap();

        grid.page_changed(2);
        grid.header_clicked("name");
        assert_eq!(grid.page_state().page, 2);
        assert_eq!(names(&grid), ["Carol"]);
    }

    #[test]
    fn test_page_clamps_after_rows_shrink() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .pagination(PaginationOptions::new().with_page_size(1))
            .build()
            .unwrap();

        grid.page_changed(3);
        grid.set_rows(rows().into_iter().take(1).collect()).unwrap();

        let view = grid.view(300.0);
        assert_eq!(view.rows.len(), 1);
        let pager = view.pagination.unwrap();
        assert_eq!(pager.page, 1);
        assert!(!pager.has_next);
    }

    #[test]
    fn test_change_after_rows_shrink_reports_clamped_page() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .pagination(PaginationOptions::new().with_page_size(1))
            .on_change(handler_fn(|_change: GridChange| async {
                Ok::<_, DataFetchError>(None)
            }))
            .build()
            .unwrap();

        grid.page_changed(3);
        grid.set_rows(rows().into_iter().take(1).collect()).unwrap();
        let pending = grid.header_clicked("id").unwrap();

        let page = pending.change().page_options.clone().unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.api_params.offset, 0);
        assert_eq!(page.rows.map(|rows| rows.len()), Some(1));
    }

    #[test]
    fn test_controlled_page_waits_for_sync() {
        let proposed = Arc::new(Mutex::new(Vec::new()));
        let sink = proposed.clone();
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .pagination(PaginationOptions::new().with_page_size(2))
            .controlled_page(PageState::new(1, 2), move |next: &PageState| {
                sink.lock().unwrap().push(*next);
            })
            .build()
            .unwrap();

        grid.next_page();
        assert_eq!(grid.page_state().page, 1);
        assert_eq!(*proposed.lock().unwrap(), vec![PageState::new(2, 2)]);

        assert!(grid.sync_page(PageState::new(2, 2)));
        assert_eq!(grid.view(300.0).rows.len(), 1);
    }

    #[test]
    fn test_sync_on_uncontrolled_ignored() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .build()
            .unwrap();
        assert!(!grid.sync_sort(Some(SortOrdering::desc("id"))));
        assert_eq!(grid.ordering(), None);
    }

    #[test]
    fn test_selection_survives_sort() {
        let mut grid = Grid::builder(columns())
            .rows(rows())
            .sorting(SortingOptions::new())
            .selection(SelectionOptions::new())
            .build()
            .unwrap();

        assert!(grid.row_toggled(2));
        grid.header_clicked("name");

        let view = grid.view(300.0);
        assert!(view.rows[0].selected);
        assert_eq!(view.rows[0].id, RowId::Number(2));
        let summary = view.selection.unwrap();
        assert_eq!(summary.selected_count, 1);
        assert!(summary.is_indeterminate());
    }

    #[test]
    fn test_toggle_ignored_without_selection() {
        let mut grid = Grid::builder(columns()).rows(rows()).build().unwrap();
        assert!(!grid.row_toggled(1));
        assert!(grid.view(300.0).selection.is_none());
    }

    #[test]
    fn test_skeleton_rows() {
        let mut grid = Grid::builder(columns())
            .pagination(PaginationOptions::new().with_page_size(25))
            .loading(true)
            .build()
            .unwrap();
        assert_eq!(grid.view(300.0).skeleton_rows, 25);

        grid.set_loading(false);
        assert_eq!(grid.view(300.0).skeleton_rows, 0);

        let grid = Grid::builder(columns())
            .loader_rows_count(3)
            .loading(true)
            .build()
            .unwrap();
        assert_eq!(grid.view(300.0).skeleton_rows, 3);

        let grid = Grid::builder(columns()).loading(true).build().unwrap();
        assert_eq!(grid.view(300.0).skeleton_rows, DEFAULT_SKELETON_ROWS);
    }

    #[test]
    fn test_build_rejects_bad_rows() {
        let result = Grid::builder(columns())
            .rows(vec![Row::from_texts(["1"])])
            .build();
        assert!(matches!(
            result,
            Err(GridError::Configuration(ConfigurationError::CellCountMismatch { .. }))
        ));
    }

    #[test]
    fn test_resize_through_grid() {
        let mut grid = Grid::builder(vec![
            Column::new("A").name("a").fixed(150.0).resizable(),
            Column::new("B").name("b").fixed(100.0),
        ])
        .build()
        .unwrap();

        assert_eq!(grid.resize_handle_dragged(0, 30.0, 400.0), Some(180.0));
        assert_eq!(grid.view(400.0).columns[0].width, 180.0);
        assert_eq!(grid.resize_handle_dragged(1, 30.0, 400.0), None);

        grid.reset_column_width(0);
        assert_eq!(grid.view(400.0).columns[0].width, 150.0);
    }

    #[test]
    fn test_resizing_flex_column_leaves_neighbour() {
        let mut grid = Grid::builder(vec![
            Column::new("A").name("a").flex(1.0).resizable(),
            Column::new("B").name("b").flex(1.0),
        ])
        .build()
        .unwrap();

        assert_eq!(grid.resize_handle_dragged(0, 50.0, 400.0), Some(250.0));
        let view = grid.view(400.0);
        assert_eq!(view.columns[0].width, 250.0);
        assert_eq!(view.columns[1].width, 200.0);
        assert_eq!(view.total_width, 450.0);
    }
}

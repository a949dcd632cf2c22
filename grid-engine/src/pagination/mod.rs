//! Pagination: page navigation, local slicing and remote page parameters.

use log::{debug, warn};
use serde::Deserialize;

use crate::config::DataMode;
use crate::error::ConfigurationError;
use crate::model::{DEFAULT_PAGE_SIZE, PageState, PaginationApiParams};

/// Page sizes offered when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Pagination configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationOptions {
    /// Whether rows are sliced here or already paged by a remote source.
    pub mode: DataMode,
    /// Initial page size.
    pub page_size: usize,
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
    /// Total row count reported by a remote source.
    pub row_count: Option<usize>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            mode: DataMode::Local,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            row_count: None,
        }
    }
}

impl PaginationOptions {
    /// Creates local pagination options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for rows that a remote source already pages.
    pub fn remote(row_count: usize) -> Self {
        Self {
            mode: DataMode::Remote,
            row_count: Some(row_count),
            ..Self::default()
        }
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets the remote row count.
    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = Some(row_count);
        self
    }

    /// Check the options and normalize them.
    ///
    /// A zero in `page_size_options` is rejected. A zero initial page size is
    /// clamped to 1. The initial page size is added to the offered sizes if
    /// it is missing.
    pub fn validate(mut self) -> Result<Self, ConfigurationError> {
        if self.page_size_options.contains(&0) {
            return Err(ConfigurationError::InvalidPageSize(0));
        }
        if self.page_size == 0 {
            warn!("[pagination] page size 0 clamped to 1");
            self.page_size = 1;
        }
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size_options.push(self.page_size);
        }
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        Ok(self)
    }
}

/// Pagination engine.
///
/// Like [`SortingEngine`](crate::sorting::SortingEngine), it holds no page
/// state: transitions take the current [`PageState`] and return the next.
#[derive(Debug, Clone)]
pub struct PaginationEngine {
    options: PaginationOptions,
    remote_row_count: usize,
}

impl PaginationEngine {
    /// Create an engine from validated options.
    pub fn new(options: PaginationOptions) -> Result<Self, ConfigurationError> {
        let options = options.validate()?;
        Ok(Self {
            remote_row_count: options.row_count.unwrap_or(0),
            options,
        })
    }

    /// Get the options.
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Initial page state.
    pub fn initial_state(&self) -> PageState {
        PageState::new(1, self.options.page_size)
    }

    /// Returns `true` if rows arrive already paged.
    pub fn is_remote(&self) -> bool {
        self.options.mode == DataMode::Remote
    }

    /// Set the total row count reported by the remote source.
    pub fn set_remote_row_count(&mut self, row_count: usize) {
        self.remote_row_count = row_count;
    }

    /// Total rows the pager counts: the remote count in remote mode, else
    /// the number of local rows.
    pub fn row_count(&self, local_rows: usize) -> usize {
        if self.is_remote() {
            self.remote_row_count
        } else {
            local_rows
        }
    }

    /// Number of pages for the given state and row count.
    pub fn page_count(&self, state: &PageState, row_count: usize) -> usize {
        state.page_count(row_count)
    }

    /// Clamp a page into `[1, max(page_count, 1)]`.
    pub fn clamp(&self, state: PageState, row_count: usize) -> PageState {
        let last = state.page_count(row_count).max(1);
        let page = state.page.clamp(1, last);
        if page != state.page {
            debug!(
                "[pagination] page {} out of range, clamped to {}",
                state.page, page
            );
        }
        PageState::new(page, state.page_size)
    }

    /// Go to page `page`. Pages past the end clamp to the last page.
    pub fn set_page(&self, state: &PageState, page: usize, row_count: usize) -> PageState {
        self.clamp(PageState::new(page, state.page_size), row_count)
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&self, page_size: usize) -> PageState {
        if page_size == 0 {
            warn!("[pagination] page size 0 clamped to 1");
        }
        PageState::new(1, page_size)
    }

    /// Next page, or `None` on the last page.
    pub fn next_page(&self, state: &PageState, row_count: usize) -> Option<PageState> {
        let state = self.clamp(*state, row_count);
        if state.page < state.page_count(row_count) {
            Some(PageState::new(state.page + 1, state.page_size))
        } else {
            None
        }
    }

    /// Previous page, or `None` on the first page.
    pub fn prev_page(&self, state: &PageState, row_count: usize) -> Option<PageState> {
        let state = self.clamp(*state, row_count);
        if state.page > 1 {
            Some(PageState::new(state.page - 1, state.page_size))
        } else {
            None
        }
    }

    /// Slice the rows for the view. Remote rows are returned untouched.
    pub fn apply<T>(&self, rows: Vec<T>, state: &PageState) -> Vec<T> {
        if self.is_remote() {
            return rows;
        }
        let state = self.clamp(*state, rows.len());
        rows.into_iter()
            .skip(state.offset())
            .take(state.limit())
            .collect()
    }

    /// Remote parameters for a page.
    pub fn api_params(&self, state: &PageState) -> PaginationApiParams {
        state.api_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PaginationEngine {
        PaginationEngine::new(PaginationOptions::default().with_page_size(2)).unwrap()
    }

    #[test]
    fn test_local_slices() {
        let engine = engine();
        let rows: Vec<u32> = (1..=5).collect();

        assert_eq!(engine.apply(rows.clone(), &PageState::new(1, 2)), vec![1, 2]);
        assert_eq!(engine.apply(rows.clone(), &PageState::new(3, 2)), vec![5]);
        // stale page clamps to the last page
        assert_eq!(engine.apply(rows, &PageState::new(9, 2)), vec![5]);
    }

    #[test]
    fn test_set_page_clamps() {
        let engine = engine();
        let state = engine.initial_state();
        assert_eq!(engine.set_page(&state, 10, 5).page, 3);
        assert_eq!(engine.set_page(&state, 0, 5).page, 1);
        assert_eq!(engine.set_page(&state, 4, 0).page, 1);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let engine = engine();
        assert_eq!(engine.set_page_size(25), PageState::new(1, 25));
        assert_eq!(engine.set_page_size(0).page_size, 1);
    }

    #[test]
    fn test_next_and_prev_bounds() {
        let engine = engine();
        let first = engine.initial_state();
        assert_eq!(engine.prev_page(&first, 5), None);

        let second = engine.next_page(&first, 5).unwrap();
        assert_eq!(second.page, 2);
        let last = engine.next_page(&second, 5).unwrap();
        assert_eq!(engine.next_page(&last, 5), None);
        assert_eq!(engine.prev_page(&last, 5).map(|s| s.page), Some(2));
    }

    #[test]
    fn test_remote_does_not_slice() {
        let engine =
            PaginationEngine::new(PaginationOptions::remote(53).with_page_size(10)).unwrap();
        let rows: Vec<u32> = (1..=10).collect();
        assert_eq!(engine.apply(rows.clone(), &PageState::new(4, 10)), rows);
        assert_eq!(engine.row_count(10), 53);
        assert_eq!(engine.page_count(&PageState::new(1, 10), 53), 6);
        assert_eq!(
            engine.api_params(&PageState::new(4, 10)),
            PaginationApiParams {
                limit: 10,
                offset: 30
            }
        );
    }

    #[test]
    fn test_validate_options() {
        let options = PaginationOptions::default()
            .with_page_size(5)
            .with_page_size_options([25, 10])
            .validate()
            .unwrap();
        assert_eq!(options.page_size_options, vec![5, 10, 25]);

        assert!(matches!(
            PaginationOptions::default()
                .with_page_size_options([0, 10])
                .validate(),
            Err(ConfigurationError::InvalidPageSize(0))
        ));
    }
}

//! Page state and remote page results.

use super::PaginationApiParams;
use super::Row;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    /// Current page, starting at 1.
    pub page: usize,
    /// Rows per page. Always at least 1 once normalized.
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Creates a page state, normalizing zero values to 1.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Index of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> usize {
        self.page_size.max(1)
    }

    /// Number of pages needed for `row_count` rows.
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.limit())
    }

    /// Remote parameters for this page.
    pub fn api_params(&self) -> PaginationApiParams {
        PaginationApiParams {
            limit: self.limit(),
            offset: self.offset(),
        }
    }
}

/// A page of rows returned by a remote source.
///
/// `total_count` is the size of the full remote result set and drives the
/// page count display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteData {
    rows: Vec<Row>,
    total_count: usize,
}

impl RemoteData {
    /// Creates a new remote result.
    pub fn new(rows: Vec<Row>, total_count: usize) -> Self {
        Self { rows, total_count }
    }

    /// Returns a reference to the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the total number of rows available remotely.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Consumes the result and returns the rows and total count.
    pub fn into_parts(self) -> (Vec<Row>, usize) {
        (self.rows, self.total_count)
    }

    /// Returns `true` if this result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

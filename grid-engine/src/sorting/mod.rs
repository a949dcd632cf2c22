//! Sorting: header click transitions, local stable sorting and remote
//! ordering parameters.

mod collate;

pub use collate::compare;

use std::collections::HashMap;

use log::trace;
use serde::Deserialize;

use crate::config::DataMode;
use crate::model::{Column, DESCENDING_PREFIX, Direction, Row, SortOrdering, SortingApiParams};

/// Sorting configuration.
///
/// # Example
///
/// ```
/// use grid_engine::sorting::SortingOptions;
///
/// let options = SortingOptions::default().with_default_ordering("-name");
/// assert_eq!(options.initial_ordering().unwrap().field, "name");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortingOptions {
    /// Whether rows are sorted here or by a remote source.
    pub mode: DataMode,
    /// Initial ordering in wire form, e.g. `"id"` or `"-name"`.
    pub default_ordering: Option<String>,
    /// Marker prepended to the field name for descending order.
    pub descending_prefix: char,
}

impl Default for SortingOptions {
    fn default() -> Self {
        Self {
            mode: DataMode::Local,
            default_ordering: None,
            descending_prefix: DESCENDING_PREFIX,
        }
    }
}

impl SortingOptions {
    /// Creates local sorting options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that delegate sorting to a remote source.
    pub fn remote() -> Self {
        Self::default().with_mode(DataMode::Remote)
    }

    /// Sets the data mode.
    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial ordering.
    pub fn with_default_ordering(mut self, ordering: impl Into<String>) -> Self {
        self.default_ordering = Some(ordering.into());
        self
    }

    /// Sets the descending marker.
    pub fn with_descending_prefix(mut self, prefix: char) -> Self {
        self.descending_prefix = prefix;
        self
    }

    /// Parses the default ordering.
    pub fn initial_ordering(&self) -> Option<SortOrdering> {
        self.default_ordering
            .as_deref()
            .and_then(|o| SortOrdering::parse_with_prefix(o, self.descending_prefix))
    }
}

/// Resolves a field name to the value used for sorting a row.
///
/// Built once per column set. Fields map to the cell at the column's index.
#[derive(Debug, Clone, Default)]
pub struct FieldAccessor {
    indices: HashMap<String, usize>,
}

impl FieldAccessor {
    /// Build an accessor for the given columns.
    pub fn new(columns: &[Column]) -> Self {
        let indices = columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.name.clone().map(|name| (name, i)))
            .collect();
        Self { indices }
    }

    /// Value of `field` on `row`. Unknown fields and missing cells yield `""`.
    pub fn value<'r>(&self, row: &'r Row, field: &str) -> &'r str {
        self.indices
            .get(field)
            .and_then(|&i| row.content(i))
            .unwrap_or("")
    }

    /// Returns `true` if a column with this field name exists.
    pub fn contains(&self, field: &str) -> bool {
        self.indices.contains_key(field)
    }
}

/// Sorting engine.
///
/// Holds no sort state itself: callers pass the current ordering in and
/// get the next ordering or the sorted rows back, so the same engine
/// serves controlled and uncontrolled grids.
#[derive(Debug, Clone)]
pub struct SortingEngine {
    options: SortingOptions,
    accessor: FieldAccessor,
    sortable: Vec<String>,
}

impl SortingEngine {
    /// Create an engine for the given columns.
    pub fn new(options: SortingOptions, columns: &[Column]) -> Self {
        let mut engine = Self {
            options,
            accessor: FieldAccessor::default(),
            sortable: Vec::new(),
        };
        engine.set_columns(columns);
        engine
    }

    /// Rebuild the field accessor for a new column set.
    pub fn set_columns(&mut self, columns: &[Column]) {
        self.accessor = FieldAccessor::new(columns);
        self.sortable = columns
            .iter()
            .filter(|c| c.is_sortable())
            .filter_map(|c| c.name.clone())
            .collect();
    }

    /// Get the options.
    pub fn options(&self) -> &SortingOptions {
        &self.options
    }

    /// Returns `true` if ordering is delegated to a remote source.
    pub fn is_remote(&self) -> bool {
        self.options.mode == DataMode::Remote
    }

    /// Returns `true` if header clicks on `field` sort.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.iter().any(|f| f == field)
    }

    /// Compute the ordering after a header click on `field`.
    ///
    /// Clicking the sorted field cycles ascending, descending, unsorted.
    /// Clicking any other field starts ascending on it. Returns `None`
    /// when `field` is not sortable.
    pub fn next_on_header_click(
        &self,
        current: Option<&SortOrdering>,
        field: &str,
    ) -> Option<Option<SortOrdering>> {
        if !self.is_sortable(field) {
            trace!("[sort] header '{}' is not sortable", field);
            return None;
        }

        let next = match current {
            Some(ordering) if ordering.field == field => match ordering.direction {
                Direction::Asc => Some(SortOrdering::desc(field)),
                Direction::Desc => None,
            },
            _ => Some(SortOrdering::asc(field)),
        };
        Some(next)
    }

    /// Stable sort of indexed rows in place.
    ///
    /// Descending order compares with the operands swapped rather than
    /// reversing the result, so rows with equal keys keep their original
    /// relative order in both directions.
    pub fn sort(&self, rows: &mut [(usize, &Row)], ordering: &SortOrdering) {
        let field = ordering.field.as_str();
        match ordering.direction {
            Direction::Asc => rows.sort_by(|(_, a), (_, b)| {
                compare(self.accessor.value(a, field), self.accessor.value(b, field))
            }),
            Direction::Desc => rows.sort_by(|(_, a), (_, b)| {
                compare(self.accessor.value(b, field), self.accessor.value(a, field))
            }),
        }
    }

    /// Apply the ordering for the view. Remote mode and `None` leave the
    /// caller's order untouched.
    pub fn apply<'r>(
        &self,
        mut rows: Vec<(usize, &'r Row)>,
        ordering: Option<&SortOrdering>,
    ) -> Vec<(usize, &'r Row)> {
        if let Some(ordering) = ordering
            && !self.is_remote()
        {
            self.sort(&mut rows, ordering);
        }
        rows
    }

    /// Remote parameters for an ordering.
    pub fn api_params(&self, ordering: Option<&SortOrdering>) -> SortingApiParams {
        SortingApiParams {
            ordering: ordering.map(|o| o.to_wire(self.options.descending_prefix)),
        }
    }
}

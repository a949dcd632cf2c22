//! Grid configuration
//!
//! A [`GridConfig`] switches features on and tunes them. It can be built in
//! code or loaded from a JSON props document:
//!
//! ```
//! use grid_engine::config::GridConfig;
//!
//! let config = GridConfig::from_json(r#"{
//!     "isPagination": true,
//!     "sortingOptions": { "defaultOrdering": "id" },
//!     "isHasSelect": true,
//!     "selectedRows": [1, 3],
//!     "tableStyleOptions": { "loaderRowsCount": 3 }
//! }"#).unwrap();
//!
//! assert!(config.pagination.is_some());
//! assert_eq!(config.loader_rows_count, Some(3));
//! ```

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::model::RowId;
use crate::pagination::PaginationOptions;
use crate::selection::{SelectionMode, SelectionOptions};
use crate::sorting::SortingOptions;

/// Where a feature is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// The engine sorts or slices the rows it was given.
    #[default]
    Local,
    /// A remote source does the work from serialized query parameters.
    Remote,
}

/// Feature switches and options for a grid.
///
/// `None` disables a feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ConfigRepr")]
pub struct GridConfig {
    /// Sorting options.
    pub sorting: Option<SortingOptions>,
    /// Pagination options.
    pub pagination: Option<PaginationOptions>,
    /// Selection options.
    pub selection: Option<SelectionOptions>,
    /// Skeleton rows shown while loading.
    pub loader_rows_count: Option<usize>,
    /// Initial loading flag.
    pub is_loading: bool,
}

impl GridConfig {
    /// Creates a config with every feature disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON props document.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Enables sorting.
    pub fn with_sorting(mut self, options: SortingOptions) -> Self {
        self.sorting = Some(options);
        self
    }

    /// Enables pagination.
    pub fn with_pagination(mut self, options: PaginationOptions) -> Self {
        self.pagination = Some(options);
        self
    }

    /// Enables selection.
    pub fn with_selection(mut self, options: SelectionOptions) -> Self {
        self.selection = Some(options);
        self
    }

    /// Sets the number of skeleton rows shown while loading.
    pub fn with_loader_rows_count(mut self, count: usize) -> Self {
        self.loader_rows_count = Some(count);
        self
    }

    /// Sets the initial loading flag.
    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Check the config and normalize pagination options.
    pub fn validate(mut self) -> Result<Self, ConfigurationError> {
        if let Some(pagination) = self.pagination.take() {
            self.pagination = Some(pagination.validate()?);
        }
        Ok(self)
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ConfigRepr {
    is_pagination: bool,
    pagination_options: Option<PaginationOptions>,
    sorting_options: Option<SortingOptions>,
    is_has_select: bool,
    selection_mode: Option<SelectionMode>,
    selected_rows: Option<Vec<RowId>>,
    table_style_options: StyleRepr,
    is_loading: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StyleRepr {
    loader_rows_count: Option<usize>,
}

impl From<ConfigRepr> for GridConfig {
    fn from(repr: ConfigRepr) -> Self {
        let pagination = match repr.pagination_options {
            Some(options) => Some(options),
            None if repr.is_pagination => Some(PaginationOptions::default()),
            None => None,
        };

        let selection = if repr.is_has_select || repr.selected_rows.is_some() {
            Some(SelectionOptions {
                mode: repr.selection_mode.unwrap_or_default(),
                selected_rows: repr.selected_rows.unwrap_or_default(),
            })
        } else {
            None
        };

        Self {
            sorting: repr.sorting_options,
            pagination,
            selection,
            loader_rows_count: repr.table_style_options.loader_rows_count,
            is_loading: repr.is_loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_disables_features() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn test_is_pagination_uses_defaults() {
        let config = GridConfig::from_json(r#"{"isPagination": true}"#).unwrap();
        let pagination = config.pagination.unwrap();
        assert_eq!(pagination.page_size, 10);
        assert_eq!(pagination.mode, DataMode::Local);
    }

    #[test]
    fn test_pagination_options_enable_pagination() {
        let config = GridConfig::from_json(
            r#"{"paginationOptions": {"rowCount": 100, "pageSizeOptions": [5, 10, 25, 50], "mode": "remote"}}"#,
        )
        .unwrap();
        let pagination = config.pagination.unwrap();
        assert_eq!(pagination.row_count, Some(100));
        assert_eq!(pagination.page_size_options, vec![5, 10, 25, 50]);
        assert_eq!(pagination.mode, DataMode::Remote);
    }

    #[test]
    fn test_empty_sorting_options_enable_local_sort() {
        let config = GridConfig::from_json(r#"{"sortingOptions": {}}"#).unwrap();
        assert_eq!(config.sorting, Some(SortingOptions::default()));
    }

    #[test]
    fn test_selected_rows_enable_selection() {
        let config = GridConfig::from_json(r#"{"selectedRows": ["1"]}"#).unwrap();
        let selection = config.selection.unwrap();
        assert_eq!(selection.mode, SelectionMode::Multiple);
        assert_eq!(selection.selected_rows, vec![RowId::from("1")]);
    }

    #[test]
    fn test_invalid_page_size_option() {
        let result = GridConfig::from_json(r#"{"paginationOptions": {"pageSizeOptions": [0]}}"#);
        assert!(matches!(result, Err(ConfigurationError::InvalidPageSize(0))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GridConfig::from_json("{"),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = GridConfig::new()
            .with_sorting(SortingOptions::remote())
            .with_pagination(PaginationOptions::remote(53))
            .with_loader_rows_count(4)
            .with_loading(true);
        assert_eq!(config.sorting.unwrap().mode, DataMode::Remote);
        assert_eq!(config.pagination.unwrap().row_count, Some(53));
        assert!(config.is_loading);
    }
}

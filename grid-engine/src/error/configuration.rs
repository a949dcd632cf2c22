//! Configuration error types

/// Errors caused by invalid columns, rows or grid options.
///
/// These are reported synchronously to the caller. The grid keeps its
/// previous columns and rows when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A row does not have exactly one cell per column.
    #[error("Row {row} has {actual} cells, expected {expected}")]
    CellCountMismatch {
        /// Position of the offending row in the supplied row set.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of cells found on the row.
        actual: usize,
    },

    /// A page size that can never be valid (zero) was configured.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// A column width string could not be parsed.
    #[error("Invalid column width: '{0}'")]
    InvalidWidth(String),

    /// A resizable column has `min > max`.
    #[error("Column {column} has invalid resize bounds: min {min} > max {max}")]
    InvalidResizeBounds {
        /// Column index.
        column: usize,
        /// Configured minimum width.
        min: f64,
        /// Configured maximum width.
        max: f64,
    },

    /// Two columns share the same field name.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumnName(String),

    /// A JSON configuration document could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// Creates a new cell count mismatch error.
    pub fn cell_count(row: usize, expected: usize, actual: usize) -> Self {
        Self::CellCountMismatch {
            row,
            expected,
            actual,
        }
    }

    /// Creates a new invalid width error.
    pub fn invalid_width(width: impl Into<String>) -> Self {
        Self::InvalidWidth(width.into())
    }
}

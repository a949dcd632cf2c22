//! Row and cell types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Stable identity of a row, used for selection.
///
/// Positional identities never compare equal to explicit ones, so a row
/// without an identifier at index 1 and a row declared with id `1` can be
/// selected independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    Text(String),
    /// Index in the original row set, for rows without an identifier.
    /// Serializes as the bare index and is never produced by deserializing.
    #[serde(skip_deserializing)]
    Position(usize),
}

impl RowId {
    /// Identity of a row that has no `select_identifier`.
    pub fn positional(index: usize) -> Self {
        RowId::Position(index)
    }

    /// Check if this identity was derived from a row position.
    pub fn is_positional(&self) -> bool {
        matches!(self, RowId::Position(_))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
            RowId::Position(i) => write!(f, "#{}", i),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Number(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        RowId::Number(n.into())
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

/// A single cell of a row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Display content. Also the value used for local sorting.
    pub content: String,
    /// Optional style hook for the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Cell {
    /// Creates a cell with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            class_name: None,
        }
    }

    /// Sets the class name.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// A row of cells aligned 1:1 with the grid's columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Stable identity. Falls back to the row's position when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_identifier: Option<RowId>,
    /// Cells, one per column.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Creates a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            select_identifier: None,
            cells,
        }
    }

    /// Creates a row whose cells hold the given texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(Cell::new).collect())
    }

    /// Sets the selection identity.
    pub fn with_id(mut self, id: impl Into<RowId>) -> Self {
        self.select_identifier = Some(id.into());
        self
    }

    /// Returns the identity of this row, falling back to `index`.
    ///
    /// `index` must be the row's position in the original, unsorted and
    /// unpaginated row set.
    pub fn identity(&self, index: usize) -> RowId {
        self.select_identifier
            .clone()
            .unwrap_or_else(|| RowId::positional(index))
    }

    /// Content of the cell at `index`, if present.
    pub fn content(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.content.as_str())
    }
}

/// Check that every row has exactly `column_count` cells.
pub fn validate_rows(rows: &[Row], column_count: usize) -> Result<(), ConfigurationError> {
    match rows
        .iter()
        .position(|row| row.cells.len() != column_count)
    {
        Some(index) => Err(ConfigurationError::cell_count(
            index,
            column_count,
            rows[index].cells.len(),
        )),
        None => Ok(()),
    }
}

//! Sort ordering types.

use std::fmt;

/// Default marker prepended to a field name to request descending order.
pub const DESCENDING_PREFIX: char = '-';

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// The single field a grid is currently sorted by.
///
/// # Example
///
/// ```
/// use grid_engine::model::{Direction, SortOrdering};
///
/// let ordering = SortOrdering::parse("-name").unwrap();
/// assert_eq!(ordering.direction, Direction::Desc);
/// assert_eq!(ordering.to_string(), "-name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOrdering {
    /// Field name of the sorted column.
    pub field: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortOrdering {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses the wire form using the default `-` prefix.
    pub fn parse(ordering: &str) -> Option<Self> {
        Self::parse_with_prefix(ordering, DESCENDING_PREFIX)
    }

    /// Parses the wire form. An empty field yields `None`.
    pub fn parse_with_prefix(ordering: &str, prefix: char) -> Option<Self> {
        let ordering = ordering.trim();
        let (field, direction) = match ordering.strip_prefix(prefix) {
            Some(field) => (field, Direction::Desc),
            None => (ordering, Direction::Asc),
        };
        if field.is_empty() {
            None
        } else {
            Some(Self {
                field: field.to_string(),
                direction,
            })
        }
    }

    /// Renders the wire form with the given descending prefix.
    pub fn to_wire(&self, prefix: char) -> String {
        match self.direction {
            Direction::Asc => self.field.clone(),
            Direction::Desc => format!("{}{}", prefix, self.field),
        }
    }

    /// Returns `true` for descending order.
    pub fn is_descending(&self) -> bool {
        self.direction == Direction::Desc
    }
}

impl fmt::Display for SortOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire(DESCENDING_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordering() {
        assert_eq!(SortOrdering::parse("id"), Some(SortOrdering::asc("id")));
        assert_eq!(SortOrdering::parse("-name"), Some(SortOrdering::desc("name")));
        assert_eq!(SortOrdering::parse(""), None);
        assert_eq!(SortOrdering::parse("-"), None);
    }

    #[test]
    fn test_custom_prefix() {
        let ordering = SortOrdering::parse_with_prefix("~email", '~').unwrap();
        assert_eq!(ordering, SortOrdering::desc("email"));
        assert_eq!(ordering.to_wire('~'), "~email");
        assert_eq!(ordering.to_string(), "-email");
    }
}

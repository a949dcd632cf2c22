//! Column definitions and declared widths.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigurationError;

/// Declared column width.
///
/// Parsed from CSS-like track sizes: `"70px"` or `"70"` is fixed,
/// `"2fr"` is flexible. Missing widths are [`ColumnWidth::Auto`].
#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
#[serde(try_from = "WidthRepr")]
pub enum ColumnWidth {
    /// Fixed width in pixels.
    Fixed(f64),
    /// Share of the remaining space, like a CSS `fr` unit.
    Flex(f64),
    /// No declared width. Resolves as `Flex(1.0)`.
    #[default]
    Auto,
}

impl ColumnWidth {
    /// Flex weight of this width, or `None` for fixed widths.
    pub fn weight(&self) -> Option<f64> {
        match self {
            ColumnWidth::Fixed(_) => None,
            ColumnWidth::Flex(w) => Some(*w),
            ColumnWidth::Auto => Some(1.0),
        }
    }

    fn check(self) -> Result<Self, ConfigurationError> {
        let value = match self {
            ColumnWidth::Fixed(v) | ColumnWidth::Flex(v) => v,
            ColumnWidth::Auto => return Ok(self),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(self)
        } else {
            Err(ConfigurationError::invalid_width(format!("{:?}", self)))
        }
    }
}

impl FromStr for ColumnWidth {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(ColumnWidth::Auto);
        }

        let parse = |n: &str| {
            n.trim()
                .parse::<f64>()
                .map_err(|_| ConfigurationError::invalid_width(s))
        };

        let width = if let Some(n) = trimmed.strip_suffix("fr") {
            ColumnWidth::Flex(parse(n)?)
        } else if let Some(n) = trimmed.strip_suffix("px") {
            ColumnWidth::Fixed(parse(n)?)
        } else {
            ColumnWidth::Fixed(parse(trimmed)?)
        };

        width
            .check()
            .map_err(|_| ConfigurationError::invalid_width(s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WidthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<WidthRepr> for ColumnWidth {
    type Error = ConfigurationError;

    fn try_from(repr: WidthRepr) -> Result<Self, Self::Error> {
        match repr {
            WidthRepr::Number(n) => ColumnWidth::Fixed(n).check(),
            WidthRepr::Text(s) => s.parse(),
        }
    }
}

/// Absolute bounds for an interactively resized column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ResizeOptions {
    /// Smallest width the column may be dragged to.
    #[serde(default)]
    pub min: Option<f64>,
    /// Largest width the column may be dragged to.
    #[serde(default)]
    pub max: Option<f64>,
}

impl ResizeOptions {
    /// Bounds with both a minimum and a maximum.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Clamp a width into the configured bounds. Unset bounds are ignored.
    pub fn clamp(&self, width: f64) -> f64 {
        let mut width = width;
        if let Some(max) = self.max {
            width = width.min(max);
        }
        if let Some(min) = self.min {
            width = width.max(min);
        }
        width
    }
}

/// A grid column definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Stable field key. Required for sorting and remote parameters.
    #[serde(default)]
    pub name: Option<String>,
    /// Header text.
    #[serde(default)]
    pub label: String,
    /// Declared width.
    #[serde(default)]
    pub width: ColumnWidth,
    /// Whether the column can be dragged to a new width.
    #[serde(default)]
    pub is_resizable: bool,
    /// Bounds applied to resizable columns.
    #[serde(default)]
    pub resize_options: ResizeOptions,
    /// Header tooltip text.
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Whether header clicks sort by this column. Ignored without a `name`.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl Column {
    /// Create a new column with the given header label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            name: None,
            label: label.into(),
            width: ColumnWidth::Auto,
            is_resizable: false,
            resize_options: ResizeOptions::default(),
            tooltip: None,
            sortable: true,
        }
    }

    /// Set the field name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the declared width.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Set a fixed width in pixels.
    pub fn fixed(self, px: f64) -> Self {
        self.width(ColumnWidth::Fixed(px))
    }

    /// Set a flex weight.
    pub fn flex(self, weight: f64) -> Self {
        self.width(ColumnWidth::Flex(weight))
    }

    /// Make the column resizable without bounds.
    pub fn resizable(mut self) -> Self {
        self.is_resizable = true;
        self
    }

    /// Make the column resizable within the given bounds.
    pub fn resizable_within(mut self, options: ResizeOptions) -> Self {
        self.is_resizable = true;
        self.resize_options = options;
        self
    }

    /// Set the header tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Exclude the column from header-click sorting.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Whether a header click on this column should sort.
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.name.is_some()
    }

    /// Clamp a width to this column's resize bounds.
    ///
    /// Non-resizable columns are returned unchanged.
    pub fn clamp_width(&self, width: f64) -> f64 {
        if self.is_resizable {
            self.resize_options.clamp(width)
        } else {
            width
        }
    }
}

/// Check a column set for duplicate names, bad widths and inverted bounds.
pub fn validate_columns(columns: &[Column]) -> Result<(), ConfigurationError> {
    let mut names = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        if let Some(name) = &column.name
            && !names.insert(name.as_str())
        {
            return Err(ConfigurationError::DuplicateColumnName(name.clone()));
        }

        column.width.check()?;

        if let ResizeOptions {
            min: Some(min),
            max: Some(max),
        } = column.resize_options
            && min > max
        {
            return Err(ConfigurationError::InvalidResizeBounds {
                column: index,
                min,
                max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_widths() {
        assert_eq!("70px".parse::<ColumnWidth>().unwrap(), ColumnWidth::Fixed(70.0));
        assert_eq!("120".parse::<ColumnWidth>().unwrap(), ColumnWidth::Fixed(120.0));
        assert_eq!("2fr".parse::<ColumnWidth>().unwrap(), ColumnWidth::Flex(2.0));
        assert_eq!("1.5fr".parse::<ColumnWidth>().unwrap(), ColumnWidth::Flex(1.5));
        assert_eq!("".parse::<ColumnWidth>().unwrap(), ColumnWidth::Auto);
    }

    #[test]
    fn test_parse_invalid_width() {
        assert!(matches!(
            "wide".parse::<ColumnWidth>(),
            Err(ConfigurationError::InvalidWidth(_))
        ));
        assert!("-3fr".parse::<ColumnWidth>().is_err());
    }

    #[test]
    fn test_deserialize_column() {
        let column: Column = serde_json::from_str(
            r#"{"name":"name","label":"Name","width":"130px","isResizable":true,"resizeOptions":{"min":100,"max":300}}"#,
        )
        .unwrap();
        assert_eq!(column.name.as_deref(), Some("name"));
        assert_eq!(column.width, ColumnWidth::Fixed(130.0));
        assert!(column.is_resizable);
        assert_eq!(column.resize_options, ResizeOptions::new(100.0, 300.0));
        assert!(column.is_sortable());
    }

    #[test]
    fn test_column_without_name_is_not_sortable() {
        assert!(!Column::new("id").is_sortable());
        assert!(!Column::new("id").name("id").unsortable().is_sortable());
    }

    #[test]
    fn test_clamp_single_bound() {
        let options = ResizeOptions {
            min: Some(80.0),
            max: None,
        };
        assert_eq!(options.clamp(20.0), 80.0);
        assert_eq!(options.clamp(900.0), 900.0);
    }

    #[test]
    fn test_validate_duplicate_names() {
        let columns = vec![Column::new("A").name("a"), Column::new("B").name("a")];
        assert!(matches!(
            validate_columns(&columns),
            Err(ConfigurationError::DuplicateColumnName(name)) if name == "a"
        ));
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let columns = vec![Column::new("A").resizable_within(ResizeOptions::new(300.0, 100.0))];
        assert!(matches!(
            validate_columns(&columns),
            Err(ConfigurationError::InvalidResizeBounds { column: 0, .. })
        ));
    }
}

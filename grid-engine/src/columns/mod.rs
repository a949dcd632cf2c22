//! Column width resolution.
//!
//! Widths are resolved like CSS grid tracks: fixed columns take their
//! declared size and flexible columns share whatever space remains in
//! proportion to their weights. Resizable columns are clamped to their
//! bounds afterwards.

mod resize;

pub use resize::*;

use crate::error::ConfigurationError;
use crate::model::{Column, ColumnWidth, validate_columns};

/// Resolve column widths for a container.
///
/// A non-positive `container_width` leaves no room for flexible columns:
/// fixed columns keep their declared width and flexible columns get 0.
pub fn resolve(columns: &[Column], container_width: f64) -> Vec<f64> {
    let mut fixed_total = 0.0;
    let mut weight_total = 0.0;
    for column in columns {
        match column.width {
            ColumnWidth::Fixed(px) => fixed_total += px,
            width => weight_total += width.weight().unwrap_or(1.0),
        }
    }

    let remaining = if container_width > 0.0 {
        (container_width - fixed_total).max(0.0)
    } else {
        0.0
    };

    columns
        .iter()
        .map(|column| {
            let resolved = match column.width {
                ColumnWidth::Fixed(px) => px,
                width => {
                    let weight = width.weight().unwrap_or(1.0);
                    if weight_total > 0.0 {
                        remaining * (weight / weight_total)
                    } else {
                        0.0
                    }
                }
            };
            column.clamp_width(resolved)
        })
        .collect()
}

/// Validated column set plus interactive width overrides.
#[derive(Debug, Clone, Default)]
pub struct ColumnModel {
    columns: Vec<Column>,
    /// Absolute widths set by resizing, indexed by column.
    overrides: Vec<Option<f64>>,
}

impl ColumnModel {
    /// Validate and wrap a column set.
    pub fn new(columns: Vec<Column>) -> Result<Self, ConfigurationError> {
        validate_columns(&columns)?;
        Ok(Self {
            overrides: vec![None; columns.len()],
            columns,
        })
    }

    /// Get the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replace the column set. Resize overrides are dropped.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<(), ConfigurationError> {
        *self = Self::new(columns)?;
        Ok(())
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by index.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Find the index of the column with the given field name.
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.as_deref() == Some(field))
    }

    /// Width used for resolution: the resize override if any, else the declared width.
    pub fn effective_width(&self, index: usize) -> Option<ColumnWidth> {
        let column = self.columns.get(index)?;
        Some(match self.override_width(index) {
            Some(px) => ColumnWidth::Fixed(px),
            None => column.width,
        })
    }

    /// Absolute width set by resizing, if any.
    pub fn override_width(&self, index: usize) -> Option<f64> {
        self.overrides.get(index).copied().flatten()
    }

    pub(crate) fn set_override(&mut self, index: usize, width: f64) {
        if let Some(slot) = self.overrides.get_mut(index) {
            *slot = Some(width);
        }
    }

    /// Drop the resize override of one column.
    pub fn clear_override(&mut self, index: usize) {
        if let Some(slot) = self.overrides.get_mut(index) {
            *slot = None;
        }
    }

    /// Drop all resize overrides.
    pub fn clear_overrides(&mut self) {
        self.overrides.iter_mut().for_each(|slot| *slot = None);
    }

    /// Resolve widths, honouring resize overrides.
    ///
    /// Flexible shares come from the declared widths, so an overridden
    /// column never hands space to or takes space from its neighbours.
    pub fn resolve(&self, container_width: f64) -> Vec<f64> {
        resolve(&self.columns, container_width)
            .into_iter()
            .zip(self.columns.iter().zip(self.overrides.iter()))
            .map(|(declared, (column, over))| match over {
                Some(px) => column.clamp_width(*px),
                None => declared,
            })
            .collect()
    }

    /// Sum of the resolved widths.
    pub fn total_width(&self, container_width: f64) -> f64 {
        self.resolve(container_width).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResizeOptions;

    fn approx(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_flex_shares_remaining_space() {
        let columns = vec![
            Column::new("id").name("id"),
            Column::new("name").name("name").flex(2.0),
            Column::new("email").name("email").flex(2.0),
        ];
        approx(&resolve(&columns, 500.0), &[100.0, 200.0, 200.0]);
    }

    #[test]
    fn test_fixed_and_flex() {
        let columns = vec![
            Column::new("ID").fixed(70.0),
            Column::new("Name").flex(1.5),
            Column::new("Dept").flex(1.5),
            Column::new("Perf"),
        ];
        approx(&resolve(&columns, 470.0), &[70.0, 150.0, 150.0, 100.0]);
    }

    #[test]
    fn test_remaining_floored_at_zero() {
        let columns = vec![Column::new("A").fixed(300.0), Column::new("B")];
        approx(&resolve(&columns, 200.0), &[300.0, 0.0]);
    }

    #[test]
    fn test_non_positive_container() {
        let columns = vec![Column::new("A").fixed(70.0), Column::new("B").flex(2.0)];
        approx(&resolve(&columns, 0.0), &[70.0, 0.0]);
        approx(&resolve(&columns, -50.0), &[70.0, 0.0]);
    }

    #[test]
    fn test_resizable_clamped_after_resolution() {
        let columns = vec![
            Column::new("A").resizable_within(ResizeOptions::new(100.0, 300.0)),
            Column::new("B").fixed(50.0),
        ];
        approx(&resolve(&columns, 1050.0), &[300.0, 50.0]);
        approx(&resolve(&columns, 80.0), &[100.0, 50.0]);
    }

    #[test]
    fn test_zero_total_weight() {
        let columns = vec![Column::new("A").flex(0.0), Column::new("B").fixed(10.0)];
        approx(&resolve(&columns, 100.0), &[0.0, 10.0]);
    }

    #[test]
    fn test_override_turns_flex_into_fixed() {
        let mut model = ColumnModel::new(vec![
            Column::new("A").flex(1.0),
            Column::new("B").flex(1.0),
        ])
        .unwrap();
        model.set_override(0, 150.0);
        assert_eq!(model.effective_width(0), Some(ColumnWidth::Fixed(150.0)));
        approx(&model.resolve(400.0), &[150.0, 200.0]);

        model.clear_overrides();
        approx(&model.resolve(400.0), &[200.0, 200.0]);
    }

    #[test]
    fn test_override_keeps_flex_neighbours() {
        let mut model = ColumnModel::new(vec![
            Column::new("A").flex(1.0).resizable(),
            Column::new("B").flex(1.0),
            Column::new("C").fixed(100.0),
        ])
        .unwrap();
        approx(&model.resolve(500.0), &[200.0, 200.0, 100.0]);

        model.set_override(0, 250.0);
        approx(&model.resolve(500.0), &[250.0, 200.0, 100.0]);
        assert!((model.total_width(500.0) - 550.0).abs() < 1e-9);

        model.set_override(0, 50.0);
        approx(&model.resolve(500.0), &[50.0, 200.0, 100.0]);
    }

    #[test]
    fn test_index_of() {
        let model = ColumnModel::new(vec![Column::new("ID").name("id"), Column::new("X")]).unwrap();
        assert_eq!(model.index_of("id"), Some(0));
        assert_eq!(model.index_of("missing"), None);
    }
}

//! Interactive column resizing.

use log::{debug, trace};

use super::ColumnModel;

/// An in-progress drag on a column's resize handle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveResize {
    column: usize,
    pointer_start: f64,
    start_width: f64,
    width: f64,
}

/// Drag state for resizable columns.
///
/// A drag only ever changes the dragged column: its width becomes an
/// absolute override on the [`ColumnModel`], clamped live to the column's
/// resize bounds. Neighbouring columns keep their widths, so the total
/// track width grows or shrinks with the drag.
#[derive(Debug, Clone, Default)]
pub struct ResizeEngine {
    active: Option<ActiveResize>,
}

impl ResizeEngine {
    /// Create an idle resize engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging the handle of `column_index`.
    ///
    /// Returns `false` (and starts nothing) for non-resizable or unknown
    /// columns.
    pub fn begin_resize(
        &mut self,
        model: &ColumnModel,
        column_index: usize,
        pointer_start: f64,
        container_width: f64,
    ) -> bool {
        let Some(column) = model.column(column_index) else {
            return false;
        };
        if !column.is_resizable {
            trace!("[resize] column {} is not resizable", column_index);
            return false;
        }

        let start_width = model
            .resolve(container_width)
            .get(column_index)
            .copied()
            .unwrap_or(0.0);

        debug!(
            "[resize] begin column {} at width {}",
            column_index, start_width
        );
        self.active = Some(ActiveResize {
            column: column_index,
            pointer_start,
            start_width,
            width: start_width,
        });
        true
    }

    /// Move the pointer. Returns the new clamped width of the dragged column,
    /// or `None` when no drag is active.
    pub fn update_resize(&mut self, model: &mut ColumnModel, pointer_current: f64) -> Option<f64> {
        let active = self.active.as_mut()?;
        let column = model.column(active.column)?;

        let requested = active.start_width + (pointer_current - active.pointer_start);
        let width = column.clamp_width(requested).max(0.0);

        active.width = width;
        model.set_override(active.column, width);
        Some(width)
    }

    /// Finish the drag. Returns the final width, if a drag was active.
    pub fn end_resize(&mut self) -> Option<f64> {
        let active = self.active.take()?;
        debug!(
            "[resize] end column {} at width {}",
            active.column, active.width
        );
        Some(active.width)
    }

    /// Resize a column by `delta` in one step.
    pub fn resize_by(
        &mut self,
        model: &mut ColumnModel,
        column_index: usize,
        delta: f64,
        container_width: f64,
    ) -> Option<f64> {
        if !self.begin_resize(model, column_index, 0.0, container_width) {
            return None;
        }
        self.update_resize(model, delta);
        self.end_resize()
    }

    /// Returns `true` while a drag is active.
    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    /// Index of the column being dragged.
    pub fn active_column(&self) -> Option<usize> {
        self.active.map(|a| a.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ResizeOptions};

    fn model() -> ColumnModel {
        ColumnModel::new(vec![
            Column::new("ID").name("id").fixed(70.0),
            Column::new("Name")
                .name("name")
                .fixed(130.0)
                .resizable_within(ResizeOptions::new(100.0, 300.0)),
            Column::new("Email").name("email").flex(1.0).resizable(),
        ])
        .unwrap()
    }

    #[test]
    fn test_clamps_to_bounds() {
        let mut model = model();
        let mut engine = ResizeEngine::new();

        assert!(engine.begin_resize(&model, 1, 500.0, 800.0));
        // 130 - 80 = 50, clamped to min
        assert_eq!(engine.update_resize(&mut model, 420.0), Some(100.0));
        // 130 + 370 = 500, clamped to max
        assert_eq!(engine.update_resize(&mut model, 870.0), Some(300.0));
        assert_eq!(engine.end_resize(), Some(300.0));
        assert_eq!(model.resolve(800.0)[1], 300.0);
    }

    #[test]
    fn test_non_resizable_is_noop() {
        let mut model = model();
        let mut engine = ResizeEngine::new();

        assert!(!engine.begin_resize(&model, 0, 10.0, 800.0));
        assert_eq!(engine.update_resize(&mut model, 50.0), None);
        assert_eq!(engine.end_resize(), None);
        assert_eq!(model.override_width(0), None);
    }

    #[test]
    fn test_flex_column_becomes_fixed_without_redistribution() {
        let mut model = model();
        let mut engine = ResizeEngine::new();

        // email resolves to 800 - 200 = 600
        assert_eq!(engine.resize_by(&mut model, 2, -100.0, 800.0), Some(500.0));
        let widths = model.resolve(800.0);
        assert_eq!(widths, vec![70.0, 130.0, 500.0]);
        assert_eq!(model.total_width(800.0), 700.0);
    }

    #[test]
    fn test_unbounded_width_never_negative() {
        let mut model = model();
        let mut engine = ResizeEngine::new();
        assert_eq!(engine.resize_by(&mut model, 2, -10_000.0, 800.0), Some(0.0));
    }

    #[test]
    fn test_out_of_range_column() {
        let model = model();
        let mut engine = ResizeEngine::new();
        assert!(!engine.begin_resize(&model, 9, 0.0, 800.0));
        assert!(!engine.is_resizing());
    }
}

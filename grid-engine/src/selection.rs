//! Row selection keyed by stable row identity.

use std::collections::HashSet;

use serde::Deserialize;

use crate::model::RowId;

/// Selection mode for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multiple,
}

/// Selection configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionOptions {
    /// Selection mode.
    pub mode: SelectionMode,
    /// Identities selected when the grid is created.
    pub selected_rows: Vec<RowId>,
}

impl SelectionOptions {
    /// Creates multi-select options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection mode.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initially selected identities.
    pub fn with_selected<I, K>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<RowId>,
    {
        self.selected_rows = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Initial selection built from these options.
    pub fn initial_selection(&self) -> Selection {
        let mut selection = Selection::new(self.mode);
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if let Some(id) = self.selected_rows.first() {
                    selection.selected.insert(id.clone());
                }
            }
            SelectionMode::Multiple => {
                selection.selected.extend(self.selected_rows.iter().cloned());
            }
        }
        selection
    }
}

/// Tracks selected rows by identity.
///
/// Identities survive sorting and paging: nothing here is pruned when the
/// visible rows change. Only [`clear`](Selection::clear),
/// [`deselect`](Selection::deselect) and toggles remove entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub mode: SelectionMode,
    pub selected: HashSet<RowId>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Create an empty multi-selection.
    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    /// Toggle selection for an identity. Returns true if selection changed.
    ///
    /// In `Multiple` mode toggling twice restores the previous set.
    pub fn toggle(&mut self, id: RowId) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(&id) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(id);
                }
                true
            }
            SelectionMode::Multiple => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
        }
    }

    /// Select every given visible identity.
    /// Returns the identities that were newly selected.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a RowId>) -> Vec<RowId> {
        if self.mode != SelectionMode::Multiple {
            return Vec::new();
        }
        visible
            .into_iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect()
    }

    /// Deselect the given identities.
    /// Returns the identities that were removed.
    pub fn deselect<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) -> Vec<RowId> {
        ids.into_iter()
            .filter(|id| self.selected.remove(*id))
            .cloned()
            .collect()
    }

    /// Header checkbox behaviour: deselect the visible rows if all of them
    /// are selected, otherwise select them all. Returns true if anything changed.
    pub fn toggle_all(&mut self, visible: &[RowId]) -> bool {
        if self.mode != SelectionMode::Multiple || visible.is_empty() {
            return false;
        }
        if self.all_selected(visible) {
            !self.deselect(visible).is_empty()
        } else {
            !self.select_all(visible).is_empty()
        }
    }

    /// Check if an identity is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Check if every given identity is selected. False for an empty slice.
    pub fn all_selected(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Check if at least one given identity is selected.
    pub fn any_selected(&self, ids: &[RowId]) -> bool {
        ids.iter().any(|id| self.selected.contains(id))
    }

    /// Clear all selections.
    /// Returns the identities that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.selected.drain().collect()
    }

    /// Number of selected identities.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get all selected identities, sorted.
    pub fn to_vec(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> Vec<RowId> {
        values.iter().map(|&n| RowId::Number(n)).collect()
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut selection = Selection::multiple();
        selection.toggle(RowId::Number(1));
        let before = selection.clone();

        selection.toggle(RowId::Number(2));
        selection.toggle(RowId::Number(2));
        assert_eq!(selection, before);

        selection.toggle(RowId::Number(1));
        selection.toggle(RowId::Number(1));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::new(SelectionMode::Single);
        selection.toggle(RowId::Number(1));
        selection.toggle(RowId::Number(2));
        assert_eq!(selection.to_vec(), ids(&[2]));
        selection.toggle(RowId::Number(2));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_none_mode_never_changes() {
        let mut selection = Selection::new(SelectionMode::None);
        assert!(!selection.toggle(RowId::Number(1)));
        assert!(selection.select_all(&ids(&[1, 2])).is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_only_visible() {
        let mut selection = Selection::multiple();
        selection.toggle(RowId::Number(1));

        let added = selection.select_all(&ids(&[1, 2, 3]));
        assert_eq!(added, ids(&[2, 3]));
        assert_eq!(selection.to_vec(), ids(&[1, 2, 3]));
        assert!(!selection.is_selected(&RowId::Number(4)));
    }

    #[test]
    fn test_toggle_all() {
        let mut selection = Selection::multiple();
        selection.toggle(RowId::Number(9));
        let visible = ids(&[1, 2]);

        assert!(selection.toggle_all(&visible));
        assert!(selection.all_selected(&visible));

        assert!(selection.toggle_all(&visible));
        assert!(!selection.any_selected(&visible));
        // rows outside the page are untouched
        assert!(selection.is_selected(&RowId::Number(9)));
    }

    #[test]
    fn test_initial_selection_from_options() {
        let options = SelectionOptions::new().with_selected([1, 3]);
        assert_eq!(options.initial_selection().to_vec(), ids(&[1, 3]));

        let single = SelectionOptions::new()
            .with_mode(SelectionMode::Single)
            .with_selected(["a", "b"]);
        assert_eq!(single.initial_selection().to_vec(), vec![RowId::from("a")]);
    }
}

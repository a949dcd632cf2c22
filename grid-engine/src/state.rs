//! Controlled and uncontrolled feature state.
//!
//! Each of sorting, pagination and selection is owned either by the grid
//! (uncontrolled) or by the caller (controlled). Ownership is decided once,
//! when the grid is built, and never re-derived afterwards.

use std::fmt;
use std::sync::Arc;

use log::{trace, warn};

use crate::model::{PageState, SortOrdering};
use crate::selection::Selection;

/// Callback that receives the next state of a controlled feature.
pub type Setter<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Who owns a feature's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The caller supplies the value and a setter.
    Controlled,
    /// The grid stores the value.
    Uncontrolled,
}

/// State of one feature, owned by the grid or by the caller.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use grid_engine::state::FeatureState;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let mut page = FeatureState::controlled(1usize, move |next: &usize| {
///     sink.lock().unwrap().push(*next);
/// });
///
/// page.propose(2);
/// assert_eq!(*page.get(), 1); // unchanged until the caller syncs
/// assert_eq!(*seen.lock().unwrap(), vec![2]);
/// ```
pub enum FeatureState<T> {
    /// Grid-owned value.
    Uncontrolled(T),
    /// Caller-owned value. The grid only reads `value` and proposes changes
    /// through `setter`.
    Controlled { value: T, setter: Setter<T> },
}

impl<T: Clone + PartialEq> FeatureState<T> {
    /// Grid-owned state starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        FeatureState::Uncontrolled(default)
    }

    /// Caller-owned state.
    pub fn controlled(value: T, setter: impl Fn(&T) + Send + Sync + 'static) -> Self {
        FeatureState::Controlled {
            value,
            setter: Arc::new(setter),
        }
    }

    /// Who owns this state.
    pub fn ownership(&self) -> Ownership {
        match self {
            FeatureState::Uncontrolled(_) => Ownership::Uncontrolled,
            FeatureState::Controlled { .. } => Ownership::Controlled,
        }
    }

    /// Returns `true` if the caller owns this state.
    pub fn is_controlled(&self) -> bool {
        self.ownership() == Ownership::Controlled
    }

    /// Current value.
    pub fn get(&self) -> &T {
        match self {
            FeatureState::Uncontrolled(value) => value,
            FeatureState::Controlled { value, .. } => value,
        }
    }

    /// Propose the next value.
    ///
    /// Uncontrolled state stores it. Controlled state hands it to the setter
    /// and keeps the current value until the caller calls [`sync`](Self::sync).
    /// Returns `false` without doing anything if `next` equals the current value.
    pub fn propose(&mut self, next: T) -> bool {
        if *self.get() == next {
            return false;
        }
        match self {
            FeatureState::Uncontrolled(value) => *value = next,
            FeatureState::Controlled { setter, .. } => setter(&next),
        }
        true
    }

    /// Push a new caller-owned value. Ignored for uncontrolled state.
    pub fn sync(&mut self, next: T) -> bool {
        match self {
            FeatureState::Controlled { value, .. } => {
                trace!("[state] controlled value synced");
                *value = next;
                true
            }
            FeatureState::Uncontrolled(_) => {
                warn!("[state] sync on uncontrolled state ignored");
                false
            }
        }
    }

    /// Replace the value regardless of ownership, without calling the setter.
    pub fn reset(&mut self, next: T) {
        match self {
            FeatureState::Uncontrolled(value) => *value = next,
            FeatureState::Controlled { value, .. } => *value = next,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FeatureState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureState::Uncontrolled(value) => f.debug_tuple("Uncontrolled").field(value).finish(),
            FeatureState::Controlled { value, .. } => f
                .debug_struct("Controlled")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

/// Ownership-resolved state for every feature of a grid.
///
/// Features are resolved independently: sorting may be controlled while
/// selection is not.
#[derive(Debug)]
pub struct StateController {
    pub sort: FeatureState<Option<SortOrdering>>,
    pub page: FeatureState<PageState>,
    pub selection: FeatureState<Selection>,
}

impl StateController {
    /// All features uncontrolled with the given defaults.
    pub fn uncontrolled(
        sort: Option<SortOrdering>,
        page: PageState,
        selection: Selection,
    ) -> Self {
        Self {
            sort: FeatureState::uncontrolled(sort),
            page: FeatureState::uncontrolled(page),
            selection: FeatureState::uncontrolled(selection),
        }
    }

    /// Current ordering.
    pub fn ordering(&self) -> Option<&SortOrdering> {
        self.sort.get().as_ref()
    }

    /// Current page state.
    pub fn page(&self) -> PageState {
        *self.page.get()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.selection.get()
    }
}

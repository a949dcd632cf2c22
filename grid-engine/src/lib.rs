//! Grid engine
//!
//! The state engine behind a data grid: column width resolution and
//! resizing, local or remote sorting and pagination, identity-based row
//! selection, controlled/uncontrolled state ownership and ordering of async
//! data refreshes. Rendering is left to the host.

pub mod columns;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod grid;
pub mod model;
pub mod pagination;
pub mod registry;
pub mod selection;
pub mod sorting;
pub mod state;
pub mod view;

pub use grid::{Grid, GridBuilder};

pub mod prelude {
    pub use crate::columns::{ColumnModel, ResizeEngine};
    pub use crate::config::{DataMode, GridConfig};
    pub use crate::coordinator::{
        ChangeHandler, ChangedFeature, CommitOutcome, Completion, GridChange, PageOptions,
        PendingChange, SortOptions, handler_fn,
    };
    pub use crate::error::{ConfigurationError, DataFetchError, GridError};
    pub use crate::grid::{Grid, GridBuilder};
    pub use crate::model::{
        Cell, Column, ColumnWidth, Direction, GridQuery, PageState, RemoteData, ResizeOptions,
        Row, RowId, SortOrdering,
    };
    pub use crate::pagination::PaginationOptions;
    pub use crate::registry::{ComponentRegistry, ComponentRole};
    pub use crate::selection::{Selection, SelectionMode, SelectionOptions};
    pub use crate::sorting::SortingOptions;
    pub use crate::view::GridView;
}

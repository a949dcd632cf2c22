//! Change coordination.
//!
//! Every sorting or pagination interaction produces one [`GridChange`]
//! carrying a complete snapshot of both features, so a remote source always
//! receives a consistent combined query. Changes are tagged with a
//! [`Generation`]; when results come back out of order, only the result of
//! the latest change is committed and everything older is dropped.
//!
//! In-flight requests are never cancelled. Superseded results are ignored
//! when they arrive.

mod generation;

pub use generation::*;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, trace};

use crate::error::DataFetchError;
use crate::model::{
    GridQuery, PaginationApiParams, RemoteData, Row, SortOrdering, SortingApiParams,
};

/// Which feature an interaction touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedFeature {
    /// Page or page size changed.
    Page,
    /// Ordering changed.
    Sort,
    /// No feature changed. The caller asked for a reload of the current view.
    Refresh,
}

/// Pagination part of a change.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Parameters for a remote source.
    pub api_params: PaginationApiParams,
    /// The sliced rows for local pagination. `None` in remote mode.
    pub rows: Option<Vec<Row>>,
}

/// Sorting part of a change.
#[derive(Debug, Clone, PartialEq)]
pub struct SortOptions {
    /// Current ordering. `None` means unsorted.
    pub ordering: Option<SortOrdering>,
    /// Parameters for a remote source.
    pub api_params: SortingApiParams,
    /// The sorted rows for local sorting. `None` in remote mode.
    pub rows: Option<Vec<Row>>,
}

/// Unified change notification.
///
/// Both option blocks are present whenever their feature is enabled, no
/// matter which one the interaction touched.
#[derive(Debug, Clone, PartialEq)]
pub struct GridChange {
    /// Generation of this change.
    pub generation: Generation,
    /// Feature touched by the interaction.
    pub changed: ChangedFeature,
    /// Pagination snapshot, if pagination is enabled.
    pub page_options: Option<PageOptions>,
    /// Sorting snapshot, if sorting is enabled.
    pub sort_options: Option<SortOptions>,
}

impl GridChange {
    /// Combined remote query for this change.
    pub fn query(&self) -> GridQuery {
        GridQuery::new(
            self.page_options.as_ref().map(|p| p.api_params),
            self.sort_options.as_ref().map(|s| s.api_params.clone()),
        )
    }
}

/// Receives grid changes.
///
/// `on_change` runs for every sorting or pagination interaction. A remote
/// data source returns `Ok(Some(data))` with the fetched page. Observers
/// that only watch the grid return `Ok(None)`.
///
/// # Example
///
/// ```ignore
/// struct Api { client: reqwest::Client }
///
/// #[async_trait]
/// impl ChangeHandler for Api {
///     async fn on_change(&self, change: GridChange) -> Result<Option<RemoteData>, DataFetchError> {
///         let url = format!("http://localhost:3000/rows?{}", change.query().to_query_string());
///         let body: ApiResponse = self.client.get(url).send().await?.json().await?;
///         Ok(Some(RemoteData::new(body.rows, body.total_count)))
///     }
/// }
/// ```
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    /// Handle a change, optionally returning fresh rows.
    async fn on_change(&self, change: GridChange) -> Result<Option<RemoteData>, DataFetchError>;

    /// Called synchronously when the page or page size changes.
    fn on_page_change(&self, _options: &PageOptions) {}

    /// Called synchronously when the ordering changes.
    fn on_sort_change(&self, _options: &SortOptions) {}
}

/// [`ChangeHandler`] backed by an async closure.
pub struct FnHandler<F>(F);

/// Wrap an async closure as a [`ChangeHandler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(GridChange) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<RemoteData>, DataFetchError>> + Send + 'static,
{
    FnHandler(f)
}

#[async_trait]
impl<F, Fut> ChangeHandler for FnHandler<F>
where
    F: Fn(GridChange) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<RemoteData>, DataFetchError>> + Send + 'static,
{
    async fn on_change(&self, change: GridChange) -> Result<Option<RemoteData>, DataFetchError> {
        (self.0)(change).await
    }
}

/// A dispatched change whose handler has not run yet.
///
/// Owns everything it needs, so it can be awaited on another task while
/// the grid keeps handling interactions.
pub struct PendingChange {
    handler: Arc<dyn ChangeHandler>,
    change: GridChange,
}

impl PendingChange {
    /// Generation of the change.
    pub fn generation(&self) -> Generation {
        self.change.generation
    }

    /// The change that will be handed to the handler.
    pub fn change(&self) -> &GridChange {
        &self.change
    }

    /// Run the handler and wait for its result.
    pub async fn resolve(self) -> Completion {
        let generation = self.change.generation;
        let result = self.handler.on_change(self.change).await;
        Completion { generation, result }
    }
}

impl fmt::Debug for PendingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingChange")
            .field("change", &self.change)
            .finish_non_exhaustive()
    }
}

/// The result of a handler run, tagged with its generation.
#[derive(Debug, Clone)]
pub struct Completion {
    pub generation: Generation,
    pub result: Result<Option<RemoteData>, DataFetchError>,
}

impl Completion {
    /// Build a completion for a change fetched outside of [`PendingChange::resolve`].
    pub fn new(
        generation: Generation,
        result: Result<Option<RemoteData>, DataFetchError>,
    ) -> Self {
        Self { generation, result }
    }
}

/// What committing a completion did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Fresh rows replaced the view.
    Applied,
    /// The handler returned no data. The view is unchanged.
    Unchanged,
    /// A newer change superseded this one. The result was dropped.
    Discarded,
}

/// Outcome of settling a completion against the generation counter.
#[derive(Debug)]
pub enum Settlement {
    /// Superseded. Dropped silently.
    Stale,
    /// Current, and the handler failed.
    Failed(DataFetchError),
    /// Current, and the handler succeeded.
    Ready(Option<RemoteData>),
}

/// Issues generations, runs observer hooks and settles completions.
#[derive(Default)]
pub struct ChangeCoordinator {
    handler: Option<Arc<dyn ChangeHandler>>,
    generations: GenerationCounter,
}

impl ChangeCoordinator {
    /// Create a coordinator with an optional handler.
    pub fn new(handler: Option<Arc<dyn ChangeHandler>>) -> Self {
        Self {
            handler,
            generations: GenerationCounter::new(),
        }
    }

    /// Returns `true` if a change handler is installed.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Replace the change handler.
    pub fn set_handler(&mut self, handler: Option<Arc<dyn ChangeHandler>>) {
        self.handler = handler;
    }

    /// The generation counter.
    pub fn generations(&self) -> &GenerationCounter {
        &self.generations
    }

    /// Issue a generation for a change and notify the handler's observer hooks.
    ///
    /// The generation is issued even without a handler so that any result
    /// still in flight is superseded. Returns `None` when no handler is
    /// installed.
    pub fn dispatch(
        &mut self,
        build: impl FnOnce(Generation) -> GridChange,
    ) -> Option<PendingChange> {
        let generation = self.generations.issue();
        let change = build(generation);
        debug!(
            "[coordinator] dispatch {} ({:?})",
            generation, change.changed
        );

        let handler = self.handler.clone()?;
        match change.changed {
            ChangedFeature::Page => {
                if let Some(options) = &change.page_options {
                    handler.on_page_change(options);
                }
            }
            ChangedFeature::Sort => {
                if let Some(options) = &change.sort_options {
                    handler.on_sort_change(options);
                }
            }
            ChangedFeature::Refresh => {}
        }

        Some(PendingChange { handler, change })
    }

    /// Settle a completion. Only the latest generation is accepted, once.
    pub fn settle(&mut self, completion: Completion) -> Settlement {
        let Completion { generation, result } = completion;
        if !self.generations.commit(generation) {
            debug!(
                "[coordinator] discarding stale result {} (latest {:?})",
                generation,
                self.generations.latest()
            );
            return Settlement::Stale;
        }
        trace!("[coordinator] settling {}", generation);
        match result {
            Ok(data) => Settlement::Ready(data),
            Err(err) => Settlement::Failed(err),
        }
    }
}

impl fmt::Debug for ChangeCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeCoordinator")
            .field("has_handler", &self.has_handler())
            .field("generations", &self.generations)
            .finish()
    }
}

//! Top-level grid error

use super::ConfigurationError;
use super::DataFetchError;

/// Any error the grid can report to its caller.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid columns, rows or options.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The change handler failed to refresh data.
    #[error(transparent)]
    Fetch(#[from] DataFetchError),
}

impl GridError {
    /// Returns `true` if this error came from a remote refresh.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

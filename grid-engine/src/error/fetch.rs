//! Remote data fetch errors

/// A remote refresh failed.
///
/// Returned by a [`ChangeHandler`](crate::coordinator::ChangeHandler) when
/// the remote source rejects or cannot be reached. The grid keeps the last
/// committed rows when this is surfaced.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Data fetch failed: {message}")]
pub struct DataFetchError {
    /// Error message
    pub message: String,
}

impl DataFetchError {
    /// Create a new fetch error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DataFetchError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for DataFetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for DataFetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

//! Serialized query parameters handed to a remote data source.

use serde::{Deserialize, Serialize};

/// Pagination parameters for a remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationApiParams {
    /// Maximum number of rows to return.
    pub limit: usize,
    /// Number of rows to skip.
    pub offset: usize,
}

/// Sorting parameters for a remote source.
///
/// `ordering` is the field name, prefixed for descending order.
/// `None` means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortingApiParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

/// The combined remote query for one grid change.
///
/// # Example
///
/// ```
/// use grid_engine::model::{GridQuery, PaginationApiParams, SortingApiParams};
///
/// let query = GridQuery::new(
///     Some(PaginationApiParams { limit: 10, offset: 20 }),
///     Some(SortingApiParams { ordering: Some("-name".into()) }),
/// );
/// assert_eq!(query.to_query_string(), "limit=10&offset=20&ordering=-name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GridQuery {
    #[serde(flatten)]
    pub pagination: Option<PaginationApiParams>,
    #[serde(flatten)]
    pub sorting: Option<SortingApiParams>,
}

impl GridQuery {
    /// Creates a query from its parts.
    pub fn new(
        pagination: Option<PaginationApiParams>,
        sorting: Option<SortingApiParams>,
    ) -> Self {
        Self {
            pagination,
            sorting,
        }
    }

    /// Returns the ordering string, if the query is sorted.
    pub fn ordering(&self) -> Option<&str> {
        self.sorting.as_ref().and_then(|s| s.ordering.as_deref())
    }

    /// Renders the query as a URL-encoded query string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(page) = &self.pagination {
            serializer.append_pair("limit", &page.limit.to_string());
            serializer.append_pair("offset", &page.offset.to_string());
        }
        if let Some(ordering) = self.ordering() {
            serializer.append_pair("ordering", ordering);
        }
        serializer.finish()
    }

    /// Appends the query to a base URL, replacing any existing grid parameters.
    pub fn apply_to(&self, url: &mut url::Url) {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !matches!(k.as_ref(), "limit" | "offset" | "ordering"))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &retained {
            pairs.append_pair(k, v);
        }
        if let Some(page) = &self.pagination {
            pairs.append_pair("limit", &page.limit.to_string());
            pairs.append_pair("offset", &page.offset.to_string());
        }
        if let Some(ordering) = self.ordering() {
            pairs.append_pair("ordering", ordering);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_without_ordering() {
        let query = GridQuery::new(
            Some(PaginationApiParams {
                limit: 10,
                offset: 0,
            }),
            Some(SortingApiParams::default()),
        );
        assert_eq!(query.to_query_string(), "limit=10&offset=0");
    }

    #[test]
    fn test_query_json() {
        let query = GridQuery::new(
            Some(PaginationApiParams {
                limit: 5,
                offset: 5,
            }),
            Some(SortingApiParams {
                ordering: Some("id".into()),
            }),
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "limit": 5, "offset": 5, "ordering": "id" })
        );
    }

    #[test]
    fn test_apply_to_url() {
        let mut url = url::Url::parse("http://localhost:3000/api/rows?team=ops&limit=99").unwrap();
        GridQuery::new(
            Some(PaginationApiParams {
                limit: 10,
                offset: 10,
            }),
            None,
        )
        .apply_to(&mut url);
        assert_eq!(url.query(), Some("team=ops&limit=10&offset=10"));
    }
}

//! Product search.

use super::client::{ApiClient, ApiResponse};
use crate::result::ShopResult;

/// Client for the search endpoint
#[derive(Debug, Clone)]
pub struct SearchApi {
    client: ApiClient,
    search_url: String,
}

impl SearchApi {
    /// Bind to the search endpoint
    #[must_use]
    pub fn new(client: ApiClient, search_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
        }
    }

    /// GET the search endpoint with arbitrary query parameters
    #[tracing::instrument(skip(self))]
    pub async fn search_by_phrase(&self, params: &[(&str, &str)]) -> ShopResult<ApiResponse> {
        self.client.get_with_query(&self.search_url, params).await
    }

    /// Search for a phrase (`phrase=<phrase>`)
    pub async fn search(&self, phrase: &str) -> ShopResult<ApiResponse> {
        self.search_by_phrase(&[("phrase", phrase)]).await
    }
}

/// Collapse whitespace runs to one space, trim, and lowercase.
///
/// Makes phrase comparisons insensitive to case and spacing.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

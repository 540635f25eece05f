//! Identity and redirect resolution.

use super::client::ApiClient;
use crate::result::{ShopError, ShopResult};
use serde_json::Value;

/// Resolves the storefront URL the API considers current
#[derive(Debug, Clone)]
pub struct IdentityApi {
    client: ApiClient,
    base_url: String,
    track_url: String,
}

impl IdentityApi {
    /// Bind to the API base and its track endpoint
    #[must_use]
    pub fn new(client: ApiClient, base_url: impl Into<String>, track_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            track_url: track_url.into(),
        }
    }

    /// API base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The redirect-resolved `requestUri` reported by the track endpoint
    #[tracing::instrument(skip(self), fields(url = %self.track_url))]
    pub async fn current_url(&self) -> ShopResult<String> {
        let body: Value = self.client.get(&self.track_url).await?.json()?;
        body.get("requestUri")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ShopError::parse("requestUri", "field absent from track response"))
    }
}

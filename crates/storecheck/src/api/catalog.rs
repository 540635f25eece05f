//! Catalog sampling for cart checks.

use super::client::ApiClient;
use super::models::{CatalogPage, ProductAttributes};
use crate::result::{ShopError, ShopResult};

/// Reads the product listing to pick a product for cart operations
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: ApiClient,
    listing_url: String,
}

impl CatalogApi {
    /// Bind to the product listing endpoint.
    ///
    /// The listing is fetched without a `Content-Type` header, so `client`
    /// should be built from identity headers only.
    #[must_use]
    pub fn new(client: ApiClient, listing_url: impl Into<String>) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
        }
    }

    /// Attributes of the first listed product
    #[tracing::instrument(skip(self), fields(url = %self.listing_url))]
    pub async fn sample_product(&self) -> ShopResult<ProductAttributes> {
        let page: CatalogPage = self.client.get(&self.listing_url).await?.json()?;
        let product = page
            .data
            .into_iter()
            .next()
            .map(|entry| entry.attributes)
            .ok_or_else(|| ShopError::parse("data[0].attributes", "product listing is empty"))?;
        tracing::debug!(id = %product.id, "sampled product");
        Ok(product)
    }
}

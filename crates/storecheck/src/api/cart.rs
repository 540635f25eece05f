//! Cart mutation and inspection.
//!
//! Every call returns the raw response. Status checks and count deltas are
//! the caller's business.

use super::client::{ApiClient, ApiResponse};
use super::models::{AddItem, ProductId, QuantityUpdate};
use crate::result::ShopResult;

/// Client for the cart endpoints
#[derive(Debug, Clone)]
pub struct CartApi {
    client: ApiClient,
    cart_url: String,
    cart_short_url: String,
}

impl CartApi {
    /// Bind to the full and short cart endpoints
    #[must_use]
    pub fn new(
        client: ApiClient,
        cart_url: impl Into<String>,
        cart_short_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cart_url: cart_url.into(),
            cart_short_url: cart_short_url.into(),
        }
    }

    /// Remove everything from the cart
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> ShopResult<ApiResponse> {
        self.client.delete(&self.cart_url).await
    }

    /// Quantity-only view
    #[tracing::instrument(skip(self))]
    pub async fn summary(&self) -> ShopResult<ApiResponse> {
        self.client.get(&self.cart_short_url).await
    }

    /// Full line-item view
    #[tracing::instrument(skip(self))]
    pub async fn details(&self) -> ShopResult<ApiResponse> {
        self.client.get(&self.cart_url).await
    }

    /// Add one unit of a product
    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub async fn add_item(&self, id: &ProductId) -> ShopResult<ApiResponse> {
        let url = format!("{}/product", self.cart_url);
        self.client.post_json(&url, &AddItem { id }).await
    }

    /// Remove a cart line by id
    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub async fn remove_item(&self, id: &ProductId) -> ShopResult<ApiResponse> {
        let url = format!("{}/product/{id}", self.cart_url);
        self.client.delete(&url).await
    }

    /// Replace line quantities with the given list
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(&self, updates: &[QuantityUpdate]) -> ShopResult<ApiResponse> {
        self.client.put_json(&self.cart_url, updates).await
    }
}

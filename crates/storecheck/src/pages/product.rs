//! Product page.

use super::{BasePage, PageObject};
use crate::result::{ShopError, ShopResult};

/// Locators used on the product page
pub mod locators {
    use crate::locator::Locator;

    /// "Buy" button of the offer block
    #[must_use]
    pub fn buy_button() -> Locator {
        Locator::class_name("product-offer-button")
    }
}

/// Page of a single product
#[derive(Debug, Clone)]
pub struct ProductPage {
    base: BasePage,
    url: String,
}

impl ProductPage {
    /// Bind to a session for the product at `url`
    #[must_use]
    pub fn new(base: BasePage, url: impl Into<String>) -> Self {
        Self {
            base,
            url: url.into(),
        }
    }

    /// Navigate to the product
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn open(&self) -> ShopResult<()> {
        self.base.navigate(&self.url).await
    }

    /// Click "buy" once it becomes clickable.
    ///
    /// A timeout is reported as `PurchaseControlUnavailable`; other failures
    /// pass through unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn buy_product(&self) -> ShopResult<()> {
        match self.base.click(&locators::buy_button()).await {
            Err(ShopError::ElementNotClickable { timeout_ms, reason, .. }) => {
                tracing::debug!(reason = %reason, "buy button never clickable");
                Err(ShopError::PurchaseControlUnavailable { timeout_ms })
            }
            other => other,
        }
    }
}

impl PageObject for ProductPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn url(&self) -> &str {
        &self.url
    }
}

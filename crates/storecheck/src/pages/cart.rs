//! Cart page.

use super::{BasePage, PageObject};
use crate::config::SiteUrls;
use crate::result::ShopResult;

/// Locators used on the cart page
pub mod locators {
    use crate::locator::Locator;

    /// Title of each cart line
    #[must_use]
    pub fn line_title() -> Locator {
        Locator::class_name("product-cart-title__head")
    }
}

/// The cart page
#[derive(Debug, Clone)]
pub struct CartPage {
    base: BasePage,
    cart_url: String,
}

impl CartPage {
    /// Bind to a session
    #[must_use]
    pub fn new(base: BasePage, urls: &SiteUrls) -> Self {
        Self {
            base,
            cart_url: urls.cart_url.clone(),
        }
    }

    /// Navigate to the cart
    #[tracing::instrument(skip(self))]
    pub async fn go_to_cart(&self) -> ShopResult<()> {
        self.base.navigate(&self.cart_url).await
    }

    /// Whether a rendered cart line title equals `name` exactly.
    ///
    /// Waits for the first line to be displayed, then scans every line. Never
    /// fails: a cart that does not render within the wait bound, or any
    /// driver error, reads as "not in cart".
    #[tracing::instrument(skip(self))]
    pub async fn product_in_cart(&self, name: &str) -> bool {
        match self.line_titles().await {
            Ok(titles) => titles.iter().any(|title| title == name),
            Err(e) => {
                tracing::warn!(error = %e, "cart lines unreadable");
                false
            }
        }
    }

    /// Titles of the displayed cart lines, in page order
    async fn line_titles(&self) -> ShopResult<Vec<String>> {
        let locator = locators::line_title();
        self.base.wait_visible(&locator).await?;
        Ok(self
            .base
            .driver()
            .query(&locator)
            .await?
            .iter()
            .filter(|line| line.is_displayed())
            .map(|line| line.text().to_string())
            .collect())
    }
}

impl PageObject for CartPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn url(&self) -> &str {
        &self.cart_url
    }
}

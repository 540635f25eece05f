//! Page objects for the storefront.
//!
//! Each page holds a [`BasePage`] by value and adds page-specific workflows.
//! Locators are kept next to the page that uses them; they mirror the site's
//! markup and change when it does.

mod base;
mod cart;
mod main_page;
mod product;

pub use base::BasePage;
pub use cart::CartPage;
pub use main_page::{MainPage, ProductLink};
pub use product::ProductPage;

/// Locator catalogs, one per page
pub mod locators {
    pub use super::cart::locators as cart;
    pub use super::main_page::locators as main;
    pub use super::product::locators as product;
}

/// Trait for page objects representing a page of the storefront.
pub trait PageObject {
    /// Shared navigation and wait capabilities
    fn base(&self) -> &BasePage;

    /// URL this page lives at
    fn url(&self) -> &str;

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("page")
    }

    /// Whether `current_url` points at this page
    fn is_at(&self, current_url: &str) -> bool {
        current_url.trim_end_matches('/') == self.url().trim_end_matches('/')
    }
}

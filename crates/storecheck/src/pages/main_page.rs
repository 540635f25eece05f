//! Storefront home page: search, catalog entry points and login modal.

use super::{BasePage, PageObject};
use crate::config::SiteUrls;
use crate::result::{ShopError, ShopResult};

/// Locators used on the home page
pub mod locators {
    use crate::locator::Locator;

    /// Search input in the header
    #[must_use]
    pub fn search_field() -> Locator {
        Locator::name("search")
    }

    /// Magnifier icon that submits the search
    #[must_use]
    pub fn search_icon() -> Locator {
        Locator::class_name("search-form__icon-search")
    }

    /// Container rendered once search results arrive
    #[must_use]
    pub fn search_results() -> Locator {
        Locator::class_name("search-page")
    }

    /// Heading that summarises the search outcome
    #[must_use]
    pub fn search_title() -> Locator {
        Locator::class_name("search-title")
    }

    /// Title link of each product card
    #[must_use]
    pub fn product_card_title() -> Locator {
        Locator::class_name("product-card__title")
    }

    /// Currently selected header section tab
    #[must_use]
    pub fn active_section() -> Locator {
        Locator::class_name("header-bottom__link.nuxt-link-exact-active.nuxt-link-active")
    }

    /// Profile button that opens the login modal
    #[must_use]
    pub fn profile_button() -> Locator {
        Locator::css("button.header-controls__btn[aria-label='Меню профиля']")
    }

    /// Phone number input of the login modal
    #[must_use]
    pub fn phone_input() -> Locator {
        Locator::id("tid-input")
    }

    /// "Get code" button of the login modal
    #[must_use]
    pub fn get_code_button() -> Locator {
        Locator::css("button.auth-modal-content__button")
    }
}

/// Link to a product as rendered on a product card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    /// Absolute product page URL
    pub href: String,
    /// Product title as displayed
    pub title: String,
}

/// The storefront home page
#[derive(Debug, Clone)]
pub struct MainPage {
    base: BasePage,
    base_url: String,
}

impl MainPage {
    /// Bind to a session
    #[must_use]
    pub fn new(base: BasePage, urls: &SiteUrls) -> Self {
        Self {
            base,
            base_url: urls.base_url.clone(),
        }
    }

    /// Navigate to the home page
    #[tracing::instrument(skip(self))]
    pub async fn go_home(&self) -> ShopResult<()> {
        self.base.navigate(&self.base_url).await
    }

    /// Navigate to a section path under the home page, e.g. `/sales`
    #[tracing::instrument(skip(self))]
    pub async fn open_section(&self, path: &str) -> ShopResult<()> {
        self.base.navigate(&format!("{}{path}", self.base_url)).await
    }

    /// Search for `phrase` and return the results heading text
    #[tracing::instrument(skip(self))]
    pub async fn search_by_phrase(&self, phrase: &str) -> ShopResult<String> {
        self.base.enter_text(&locators::search_field(), phrase).await?;
        self.base.click(&locators::search_icon()).await?;
        self.base.wait_visible(&locators::search_results()).await?;
        let title = self.base.find_element(&locators::search_title()).await?;
        tracing::debug!(title = title.text(), "search finished");
        Ok(title.text().to_string())
    }

    /// Link and title of the first product card on the page
    #[tracing::instrument(skip(self))]
    pub async fn first_product(&self) -> ShopResult<ProductLink> {
        let card = locators::product_card_title();
        let href = self.base.get_attribute(&card, "href").await?;
        let title = self.base.get_attribute(&card, "text").await?;
        match (href, title) {
            (Some(href), Some(title)) => Ok(ProductLink {
                href,
                title: title.trim().to_string(),
            }),
            _ => Err(ShopError::driver(format!("{card} has no href or text"))),
        }
    }

    /// Title of the highlighted header section, if any
    #[tracing::instrument(skip(self))]
    pub async fn active_section_title(&self) -> ShopResult<Option<String>> {
        self.base
            .get_attribute(&locators::active_section(), "text")
            .await
    }

    /// Open the login modal from the profile button
    #[tracing::instrument(skip(self))]
    pub async fn open_login(&self) -> ShopResult<()> {
        self.base.click(&locators::profile_button()).await
    }

    /// Type a phone number into the login modal
    #[tracing::instrument(skip(self))]
    pub async fn enter_phone(&self, number: &str) -> ShopResult<()> {
        self.base.enter_text(&locators::phone_input(), number).await
    }

    /// Whether the "get code" button became disabled within the wait bound
    #[tracing::instrument(skip(self))]
    pub async fn get_code_button_disabled(&self) -> ShopResult<bool> {
        Ok(self
            .base
            .is_disabled(&locators::get_code_button())
            .await?
            .is_some())
    }
}

impl PageObject for MainPage {
    fn base(&self) -> &BasePage {
        &self.base
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}

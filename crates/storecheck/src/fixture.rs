//! Fixture composition.
//!
//! [`Fixtures`] is built once per process from the loaded settings and test
//! data, then passed by reference. It hands out ready-to-use API clients,
//! page objects and parameter lists. [`BrowserSession`] scopes a browser so it
//! is quit on every exit path.

use crate::api::{ApiClient, AuthContext, CartApi, CatalogApi, IdentityApi, SearchApi};
use crate::config::{Settings, SiteUrls};
use crate::driver::BrowserDriver;
use crate::pages::{BasePage, CartPage, MainPage, ProductPage};
use crate::result::ShopResult;
use crate::testdata::TestData;
use crate::wait::WaitOptions;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

/// Read-only settings and test data shared by every case of a run
#[derive(Debug, Clone)]
pub struct Fixtures {
    settings: Arc<Settings>,
    data: Arc<TestData>,
}

impl Fixtures {
    /// Wrap loaded stores
    #[must_use]
    pub fn new(settings: Settings, data: TestData) -> Self {
        Self::from_shared(Arc::new(settings), Arc::new(data))
    }

    /// Wrap already shared stores
    #[must_use]
    pub fn from_shared(settings: Arc<Settings>, data: Arc<TestData>) -> Self {
        Self { settings, data }
    }

    /// Load both stores from disk
    pub fn load(config_path: impl AsRef<Path>, data_path: impl AsRef<Path>) -> ShopResult<Self> {
        Ok(Self::new(
            Settings::load(config_path)?,
            TestData::load(data_path)?,
        ))
    }

    /// Configuration store
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Test data store
    #[must_use]
    pub fn data(&self) -> &TestData {
        &self.data
    }

    // =========================================================================
    // API clients
    // =========================================================================

    /// Credentials from test data
    pub fn auth(&self) -> ShopResult<AuthContext> {
        AuthContext::from_test_data(&self.data)
    }

    fn client(&self) -> ShopResult<ApiClient> {
        ApiClient::new(&self.auth()?, self.settings.request_timeout()?)
    }

    /// Track endpoint client
    pub fn identity_api(&self) -> ShopResult<IdentityApi> {
        Ok(IdentityApi::new(
            self.client()?,
            self.settings.api_url(None)?,
            self.settings.api_url(Some("track"))?,
        ))
    }

    /// Cart endpoints client
    pub fn cart_api(&self) -> ShopResult<CartApi> {
        Ok(CartApi::new(
            self.client()?,
            self.settings.api_url(Some("cart"))?,
            self.settings.api_url(Some("cart_short"))?,
        ))
    }

    /// Search endpoint client
    pub fn search_api(&self) -> ShopResult<SearchApi> {
        Ok(SearchApi::new(
            self.client()?,
            self.settings.api_url(Some("search"))?,
        ))
    }

    /// Product listing client; sends Authorization and user-agent only
    pub fn catalog_api(&self) -> ShopResult<CatalogApi> {
        let client = ApiClient::with_headers(
            self.auth()?.identity_headers()?,
            self.settings.request_timeout()?,
        )?;
        Ok(CatalogApi::new(
            client,
            self.settings.api_url(Some("for_data"))?,
        ))
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Home and cart URLs
    pub fn site_urls(&self) -> ShopResult<SiteUrls> {
        self.settings.site_urls()
    }

    /// Wait bound from `ui.wait_driver` and `ui.poll_interval_ms`
    pub fn wait_options(&self) -> ShopResult<WaitOptions> {
        Ok(WaitOptions::new()
            .with_timeout(self.settings.wait_timeout()?)
            .with_poll_interval(self.settings.poll_interval()?))
    }

    /// Shared page capabilities bound to a driver
    pub fn base_page(&self, driver: Arc<dyn BrowserDriver>) -> ShopResult<BasePage> {
        Ok(BasePage::new(driver, self.wait_options()?))
    }

    /// Home page bound to a driver
    pub fn main_page(&self, driver: Arc<dyn BrowserDriver>) -> ShopResult<MainPage> {
        Ok(MainPage::new(self.base_page(driver)?, &self.site_urls()?))
    }

    /// Cart page bound to a driver
    pub fn cart_page(&self, driver: Arc<dyn BrowserDriver>) -> ShopResult<CartPage> {
        Ok(CartPage::new(self.base_page(driver)?, &self.site_urls()?))
    }

    /// Product page at `url` bound to a driver
    pub fn product_page(
        &self,
        driver: Arc<dyn BrowserDriver>,
        url: impl Into<String>,
    ) -> ShopResult<ProductPage> {
        Ok(ProductPage::new(self.base_page(driver)?, url))
    }

    /// Launch the configured browser
    #[cfg(feature = "browser")]
    pub async fn launch_browser(&self) -> ShopResult<Arc<dyn BrowserDriver>> {
        let driver = crate::browser::CdpDriver::launch(&self.settings.browser_settings()?).await?;
        Ok(Arc::new(driver))
    }

    // =========================================================================
    // Parameter lists
    // =========================================================================

    /// Phrases expected to find products
    pub fn search_phrases_positive(&self) -> ShopResult<Vec<String>> {
        self.data.get_list("search_phrase_positive")
    }

    /// Phrases expected to find nothing
    pub fn search_phrases_negative(&self) -> ShopResult<Vec<String>> {
        self.data.get_list("search_phrase_negative")
    }

    /// Phone numbers the login modal must reject
    pub fn invalid_phone_numbers(&self) -> ShopResult<Vec<String>> {
        self.data.get_list("number_phone_invalid")
    }
}

/// A browser acquired for the whole run and released on every exit path
#[derive(Debug, Clone)]
pub struct BrowserSession {
    driver: Arc<dyn BrowserDriver>,
}

impl BrowserSession {
    /// Take ownership of a launched driver
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>) -> Self {
        Self { driver }
    }

    /// Driver for pages
    #[must_use]
    pub fn driver(&self) -> Arc<dyn BrowserDriver> {
        Arc::clone(&self.driver)
    }

    /// Run `body` with the driver, then quit it.
    ///
    /// The driver is quit whether `body` succeeds, fails or panics. A body
    /// error takes precedence over a quit error; a panic is resumed after
    /// quitting.
    pub async fn scoped<F, Fut, T>(driver: Arc<dyn BrowserDriver>, body: F) -> ShopResult<T>
    where
        F: FnOnce(Arc<dyn BrowserDriver>) -> Fut,
        Fut: Future<Output = ShopResult<T>>,
    {
        let session = Self::new(driver);
        let outcome = AssertUnwindSafe(body(session.driver())).catch_unwind().await;
        let quit = session.driver.quit().await;

        match outcome {
            Ok(Ok(value)) => quit.map(|()| value),
            Ok(Err(e)) => {
                if let Err(quit_error) = quit {
                    tracing::warn!(error = %quit_error, "browser quit failed after case error");
                }
                Err(e)
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

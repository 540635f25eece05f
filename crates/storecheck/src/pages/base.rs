//! Capabilities shared by every page.

use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use crate::wait::{Condition, WaitOptions, WaitOutcome, Waiter};
use std::sync::Arc;

/// Navigation and wait-bounded element interaction over one driver.
///
/// Page types hold a `BasePage` by value and delegate to it.
#[derive(Debug, Clone)]
pub struct BasePage {
    driver: Arc<dyn BrowserDriver>,
    waiter: Waiter,
}

impl BasePage {
    /// Bind to a driver with the given wait bound
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>, options: WaitOptions) -> Self {
        let waiter = Waiter::new(Arc::clone(&driver), options);
        Self { driver, waiter }
    }

    /// Underlying driver
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn BrowserDriver> {
        &self.driver
    }

    /// Waiter used for every bounded wait
    #[must_use]
    pub const fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    fn timeout_ms(&self) -> u64 {
        self.waiter.options().timeout_ms()
    }

    /// Navigate unconditionally
    #[tracing::instrument(skip(self))]
    pub async fn navigate(&self, url: &str) -> ShopResult<()> {
        self.driver.navigate(url).await
    }

    /// Current browser URL
    pub async fn current_url(&self) -> ShopResult<String> {
        self.driver.current_url().await
    }

    /// Wait until the element is present, displayed and enabled.
    ///
    /// Fails with `ElementNotClickable` both when the element never appears
    /// and when it appears but never becomes interactable; `reason` tells the
    /// two apart.
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn wait_clickable(&self, locator: &Locator) -> ShopResult<ElementHandle> {
        match self.waiter.until(locator, &Condition::Clickable).await? {
            WaitOutcome::Resolved(element) => Ok(element),
            WaitOutcome::TimedOut { last_seen, .. } => Err(ShopError::ElementNotClickable {
                locator: locator.to_string(),
                timeout_ms: self.timeout_ms(),
                reason: match last_seen {
                    None => "never present".to_string(),
                    Some(e) if !e.is_displayed() => "present but not displayed".to_string(),
                    Some(_) => "present but disabled".to_string(),
                },
            }),
        }
    }

    /// Wait until the element is displayed
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn wait_visible(&self, locator: &Locator) -> ShopResult<ElementHandle> {
        self.waiter
            .until(locator, &Condition::Visible)
            .await?
            .resolved()
            .ok_or_else(|| ShopError::ElementNotVisible {
                locator: locator.to_string(),
                timeout_ms: self.timeout_ms(),
            })
    }

    /// Wait until the element is present
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn find_element(&self, locator: &Locator) -> ShopResult<ElementHandle> {
        self.waiter
            .until(locator, &Condition::Present)
            .await?
            .resolved()
            .ok_or_else(|| ShopError::ElementNotFound {
                locator: locator.to_string(),
                timeout_ms: self.timeout_ms(),
            })
    }

    /// Wait for clickability, clear, then type `text`
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn enter_text(&self, locator: &Locator, text: &str) -> ShopResult<()> {
        let field = self.wait_clickable(locator).await?;
        self.driver.clear(&field).await?;
        self.driver.send_keys(&field, text).await
    }

    /// Wait for clickability, then click
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn click(&self, locator: &Locator) -> ShopResult<()> {
        let target = self.wait_clickable(locator).await?;
        self.driver.click(&target).await
    }

    /// Wait for a `disabled` attribute on the element.
    ///
    /// `Some` means the element carried the attribute within the bound, so
    /// the control is disabled. A timeout is a legitimate negative result and
    /// yields `None`; only driver failures are errors.
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn is_disabled(&self, locator: &Locator) -> ShopResult<Option<ElementHandle>> {
        let outcome = self
            .waiter
            .until(locator, &Condition::AttributeIncluded("disabled".to_string()))
            .await?;
        Ok(outcome.resolved())
    }

    /// Wait for presence, then read a property or attribute
    #[tracing::instrument(skip(self, locator), fields(locator = %locator))]
    pub async fn get_attribute(&self, locator: &Locator, name: &str) -> ShopResult<Option<String>> {
        let element = self.find_element(locator).await?;
        self.driver.attribute(&element, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use std::time::Duration;

    fn page(driver: MockDriver) -> (Arc<MockDriver>, BasePage) {
        let driver = Arc::new(driver);
        let options = WaitOptions::new()
            .with_timeout(Duration::from_millis(100))
            .with_poll_interval(Duration::from_millis(10));
        let page = BasePage::new(driver.clone(), options);
        (driver, page)
    }

    mod navigation_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_and_current_url() {
            let (driver, page) = page(MockDriver::new());
            page.navigate("https://shop.test/cart").await.unwrap();
            assert_eq!(page.current_url().await.unwrap(), "https://shop.test/cart");
            assert!(driver.was_called("navigate:"));
        }
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_clickable_resolves() {
            let locator = Locator::class_name("buy");
            let (_d, page) = page(MockDriver::new().with_element(MockElement::new(locator.clone())));
            assert_eq!(page.wait_clickable(&locator).await.unwrap().index, 0);
        }

        #[tokio::test]
        async fn test_wait_clickable_never_present() {
            let (_d, page) = page(MockDriver::new());
            let err = page.wait_clickable(&Locator::class_name("buy")).await.unwrap_err();
            match err {
                ShopError::ElementNotClickable { timeout_ms, reason, .. } => {
                    assert_eq!(timeout_ms, 100);
                    assert_eq!(reason, "never present");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_wait_clickable_present_but_disabled() {
            let locator = Locator::class_name("buy");
            let (_d, page) =
                page(MockDriver::new().with_element(MockElement::new(locator.clone()).disabled()));
            let err = page.wait_clickable(&locator).await.unwrap_err();
            assert!(matches!(
                err,
                ShopError::ElementNotClickable { ref reason, .. } if reason == "present but disabled"
            ));
        }

        #[tokio::test]
        async fn test_wait_visible_timeout_kind() {
            let locator = Locator::class_name("search-page");
            let (_d, page) = page(MockDriver::new().with_element(MockElement::new(locator.clone()).hidden()));
            assert!(matches!(
                page.wait_visible(&locator).await,
                Err(ShopError::ElementNotVisible { .. })
            ));
        }

        #[tokio::test]
        async fn test_find_element_ignores_visibility() {
            let locator = Locator::id("hidden-input");
            let (_d, page) = page(MockDriver::new().with_element(MockElement::new(locator.clone()).hidden()));
            assert!(page.find_element(&locator).await.is_ok());
        }

        #[tokio::test]
        async fn test_find_element_timeout_kind() {
            let (_d, page) = page(MockDriver::new());
            assert!(matches!(
                page.find_element(&Locator::id("nope")).await,
                Err(ShopError::ElementNotFound { .. })
            ));
        }
    }

    mod interaction_tests {
        use super::*;

        #[tokio::test]
        async fn test_enter_text_clears_then_types() {
            let locator = Locator::name("search");
            let (driver, page) = page(
                MockDriver::new()
                    .with_element(MockElement::new(locator.clone()).with_attribute("value", "stale")),
            );

            page.enter_text(&locator, "Дюна").await.unwrap();

            assert_eq!(
                page.get_attribute(&locator, "value").await.unwrap().as_deref(),
                Some("Дюна")
            );
            let history = driver.history();
            let clear = history.iter().position(|c| c.starts_with("clear:"));
            let typed = history.iter().position(|c| c.starts_with("send_keys:"));
            assert!(clear < typed);
        }

        #[tokio::test]
        async fn test_click_waits_for_enablement() {
            let locator = Locator::css("button.go");
            let (driver, page) =
                page(MockDriver::new().with_element(MockElement::new(locator.clone()).enabled_after(2)));
            page.click(&locator).await.unwrap();
            assert!(driver.was_called("click:css=button.go[0]"));
            assert_eq!(driver.poll_count(&locator), 3);
        }

        #[tokio::test]
        async fn test_is_disabled_some_when_attribute_present() {
            let locator = Locator::css("button.auth-modal-content__button");
            let (_d, page) = page(
                MockDriver::new()
                    .with_element(MockElement::new(locator.clone()).with_attribute("disabled", "")),
            );
            assert!(page.is_disabled(&locator).await.unwrap().is_some());
        }

        #[tokio::test]
        async fn test_is_disabled_none_on_timeout() {
            let locator = Locator::css("button.auth-modal-content__button");
            let (_d, page) = page(MockDriver::new().with_element(MockElement::new(locator.clone())));
            assert!(page.is_disabled(&locator).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_get_attribute_text_and_missing() {
            let locator = Locator::class_name("product-card__title");
            let (_d, page) = page(
                MockDriver::new().with_element(
                    MockElement::new(locator.clone())
                        .with_text("Дюна")
                        .with_attribute("href", "/product/dune-123"),
                ),
            );
            assert_eq!(page.get_attribute(&locator, "text").await.unwrap().as_deref(), Some("Дюна"));
            assert_eq!(page.get_attribute(&locator, "title").await.unwrap(), None);
        }
    }
}

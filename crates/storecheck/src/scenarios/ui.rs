//! Browser UI checks.

use super::ensure;
use crate::driver::BrowserDriver;
use crate::fixture::Fixtures;
use crate::result::ShopResult;
use std::sync::Arc;

/// Buy the first product on the home page and find it in the cart
#[tracing::instrument(skip_all)]
pub(super) async fn add_to_cart_from_product_page(
    fx: &Fixtures,
    driver: Arc<dyn BrowserDriver>,
) -> ShopResult<()> {
    let main = fx.main_page(Arc::clone(&driver))?;
    let cart = fx.cart_page(Arc::clone(&driver))?;

    main.go_home().await?;
    let link = main.first_product().await?;
    let product = fx.product_page(driver, link.href.as_str())?;
    product.open().await?;
    product.buy_product().await?;
    cart.go_to_cart().await?;

    ensure(cart.product_in_cart(&link.title).await, || {
        format!("'{}' is not in the cart", link.title)
    })
}

/// Search from the home page; the results heading must contain `marker`
#[tracing::instrument(skip(fx, driver))]
pub(super) async fn search_expecting(
    fx: &Fixtures,
    driver: Arc<dyn BrowserDriver>,
    phrase: &str,
    marker: &str,
) -> ShopResult<()> {
    let main = fx.main_page(driver)?;
    main.go_home().await?;
    let heading = main.search_by_phrase(phrase).await?;
    ensure(heading.contains(marker), || {
        format!("results heading '{heading}' lacks '{marker}'")
    })
}

/// Opening a section path highlights the tab titled `title`
#[tracing::instrument(skip(fx, driver))]
pub(super) async fn navigation(
    fx: &Fixtures,
    driver: Arc<dyn BrowserDriver>,
    title: &str,
    path: &str,
) -> ShopResult<()> {
    let main = fx.main_page(driver)?;
    main.open_section(path).await?;
    let active = main.active_section_title().await?.unwrap_or_default();
    ensure(active.contains(title), || {
        format!("page {path} highlights '{active}', expected '{title}'")
    })
}

/// With an invalid phone number the "get code" button stays disabled
#[tracing::instrument(skip(fx, driver))]
pub(super) async fn invalid_phone(
    fx: &Fixtures,
    driver: Arc<dyn BrowserDriver>,
    number: &str,
) -> ShopResult<()> {
    let main = fx.main_page(driver)?;
    main.go_home().await?;
    main.open_login().await?;
    main.enter_phone(number).await?;
    ensure(main.get_code_button_disabled().await?, || {
        format!("'get code' is enabled for invalid number '{number}'")
    })
}

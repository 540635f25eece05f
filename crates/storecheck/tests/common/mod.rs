//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use storecheck::{BasePage, Fixtures, MockDriver, Settings, TestData, WaitOptions};
use tracing_subscriber::EnvFilter;

pub const TOKEN: &str = "Bearer test-token";
pub const USER_AGENT: &str = "storecheck-tests/1.0";
pub const CONTENT_TYPE: &str = "application/json";

pub const CART_PATH: &str = "/api/v1/cart";
pub const CART_SHORT_PATH: &str = "/api/v1/cart/short";
pub const TRACK_PATH: &str = "/api/v1/track";
pub const SEARCH_PATH: &str = "/api/v2/search/product";
pub const LISTING_PATH: &str = "/api/v2/products";

pub const SHOP_URL: &str = "https://shop.test";

/// Settings pointing the API section at `api_base`
pub fn settings(api_base: &str) -> Settings {
    Settings::from_ini_str(&format!(
        "[ui]
base_url = {SHOP_URL}
cart = /cart
wait_driver = 1
poll_interval_ms = 10

[api]
base_url = {api_base}
track = {TRACK_PATH}
cart = {CART_PATH}
cart_short = {CART_SHORT_PATH}
search = {SEARCH_PATH}
for_data = {LISTING_PATH}
request_timeout = 5
"
    ))
    .unwrap()
}

pub fn test_data() -> TestData {
    TestData::from_json_str(&format!(
        r#"{{
            "token": "{TOKEN}",
            "user_agent": "{USER_AGENT}",
            "content_type": "{CONTENT_TYPE}",
            "search_phrase_positive": ["Дюна"],
            "search_phrase_negative": ["ъъъqqq"],
            "number_phone_invalid": ["+7 000"]
        }}"#
    ))
    .unwrap()
}

pub fn fixtures(api_base: &str) -> Fixtures {
    init_tracing();
    Fixtures::new(settings(api_base), test_data())
}

/// Route library logs through the test writer; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storecheck=debug")),
        )
        .try_init();
}

/// Fast waits for mock-driven page tests
pub fn fast_waits() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(150))
        .with_poll_interval(Duration::from_millis(10))
}

pub fn base_page(driver: &Arc<MockDriver>) -> BasePage {
    init_tracing();
    BasePage::new(driver.clone(), fast_waits())
}

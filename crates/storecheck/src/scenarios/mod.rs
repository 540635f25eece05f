//! Scenario catalog.
//!
//! The end-to-end checks, expressed as data plus async functions. Parametrised
//! checks are expanded into one [`Scenario`] per parameter by [`catalog`].
//! Checks fail with `AssertionFailed`; any error aborts only its own case.

mod api;
mod ui;

use crate::api::ApiResponse;
use crate::driver::BrowserDriver;
use crate::fixture::Fixtures;
use crate::harness::{FailureMode, NamedCase, SuiteReport};
use crate::result::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Header sections visited by the navigation check: (tab title, path)
pub const NAVIGATION_SECTIONS: &[(&str, &str)] = &[
    ("Акции", "/promotions"),
    ("Распродажа", "/sales"),
    ("Комиксы и манга", "/comics"),
    ("Настольные игры", "/nastolnyj-klub"),
    ("Что ещё почитать?", "/collections"),
    ("Читай-журнал", "/articles"),
    ("Подарочные сертификаты", "/certificate"),
];

/// Marker the results heading carries when a search found products
pub const FOUND_MARKER: &str = "найдено";

/// Marker the results heading carries when a search found nothing
pub const NOT_FOUND_MARKER: &str = "не принёс результатов";

/// Which surface a scenario exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    /// REST API only
    Api,
    /// Browser UI; needs a browser session
    Ui,
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Ui => f.write_str("ui"),
        }
    }
}

/// One runnable check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scenario {
    /// Add a product, clear the cart, expect zero units
    CartClear,
    /// Adding one product grows the cart by one line
    AddToCart,
    /// Removing a line shrinks the cart by one
    DeleteFromCart,
    /// Setting a line quantity changes it
    ChangeQuantity,
    /// API search returns the phrase in the first title
    ApiSearchPositive {
        /// Search phrase
        phrase: String,
    },
    /// A product bought from its page shows up in the cart
    UiAddToCart,
    /// UI search reports results
    UiSearchPositive {
        /// Search phrase
        phrase: String,
    },
    /// UI search reports no results
    UiSearchNegative {
        /// Search phrase
        phrase: String,
    },
    /// Opening a section highlights its header tab
    Navigation {
        /// Expected tab title
        title: String,
        /// Section path below the home page
        path: String,
    },
    /// An invalid phone number keeps "get code" disabled
    InvalidPhone {
        /// Phone number typed into the login modal
        number: String,
    },
}

impl Scenario {
    /// Stable case name, with the parameter in brackets
    #[must_use]
    pub fn name(&self) -> String {
        let base = match self {
            Self::CartClear => "cart_clear",
            Self::AddToCart => "add_to_cart",
            Self::DeleteFromCart => "delete_from_cart",
            Self::ChangeQuantity => "change_quantity",
            Self::ApiSearchPositive { .. } | Self::UiSearchPositive { .. } => "search_positive",
            Self::UiAddToCart => "add_to_cart_from_product_page",
            Self::UiSearchNegative { .. } => "search_negative",
            Self::Navigation { .. } => "navigation",
            Self::InvalidPhone { .. } => "number_phone_invalid",
        };
        match self.parameter() {
            Some(param) => format!("{}::{base}[{param}]", self.suite()),
            None => format!("{}::{base}", self.suite()),
        }
    }

    /// Surface exercised
    #[must_use]
    pub const fn suite(&self) -> Suite {
        match self {
            Self::CartClear
            | Self::AddToCart
            | Self::DeleteFromCart
            | Self::ChangeQuantity
            | Self::ApiSearchPositive { .. } => Suite::Api,
            Self::UiAddToCart
            | Self::UiSearchPositive { .. }
            | Self::UiSearchNegative { .. }
            | Self::Navigation { .. }
            | Self::InvalidPhone { .. } => Suite::Ui,
        }
    }

    fn parameter(&self) -> Option<&str> {
        match self {
            Self::ApiSearchPositive { phrase }
            | Self::UiSearchPositive { phrase }
            | Self::UiSearchNegative { phrase } => Some(phrase),
            Self::Navigation { path, .. } => Some(path),
            Self::InvalidPhone { number } => Some(number),
            _ => None,
        }
    }

    /// Run the check
    pub async fn run(&self, ctx: &ScenarioContext) -> ShopResult<()> {
        let fx = &ctx.fixtures;
        match self {
            Self::CartClear => api::cart_clear(fx).await,
            Self::AddToCart => api::add_to_cart(fx).await,
            Self::DeleteFromCart => api::delete_from_cart(fx).await,
            Self::ChangeQuantity => api::change_quantity(fx).await,
            Self::ApiSearchPositive { phrase } => api::search_positive(fx, phrase).await,
            Self::UiAddToCart => ui::add_to_cart_from_product_page(fx, ctx.driver()?).await,
            Self::UiSearchPositive { phrase } => {
                ui::search_expecting(fx, ctx.driver()?, phrase, FOUND_MARKER).await
            }
            Self::UiSearchNegative { phrase } => {
                ui::search_expecting(fx, ctx.driver()?, phrase, NOT_FOUND_MARKER).await
            }
            Self::Navigation { title, path } => ui::navigation(fx, ctx.driver()?, title, path).await,
            Self::InvalidPhone { number } => ui::invalid_phone(fx, ctx.driver()?, number).await,
        }
    }
}

impl NamedCase for Scenario {
    fn name(&self) -> String {
        Self::name(self)
    }

    fn suite(&self) -> Suite {
        Self::suite(self)
    }
}

/// What a running scenario can reach
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    fixtures: Fixtures,
    driver: Option<Arc<dyn BrowserDriver>>,
}

impl ScenarioContext {
    /// Context for API-only runs
    #[must_use]
    pub fn api_only(fixtures: Fixtures) -> Self {
        Self {
            fixtures,
            driver: None,
        }
    }

    /// Context with a browser session
    #[must_use]
    pub fn with_browser(fixtures: Fixtures, driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            fixtures,
            driver: Some(driver),
        }
    }

    /// Shared fixtures
    #[must_use]
    pub const fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    fn driver(&self) -> ShopResult<Arc<dyn BrowserDriver>> {
        self.driver
            .clone()
            .ok_or_else(|| ShopError::driver("UI scenario needs a browser session"))
    }
}

/// Every case, with parametrised checks expanded from test data
pub fn catalog(fixtures: &Fixtures) -> ShopResult<Vec<Scenario>> {
    let positive = fixtures.search_phrases_positive()?;
    let negative = fixtures.search_phrases_negative()?;
    let phones = fixtures.invalid_phone_numbers()?;

    let mut cases = vec![
        Scenario::CartClear,
        Scenario::AddToCart,
        Scenario::DeleteFromCart,
        Scenario::ChangeQuantity,
    ];
    cases.extend(positive.iter().map(|phrase| Scenario::ApiSearchPositive {
        phrase: phrase.clone(),
    }));
    cases.push(Scenario::UiAddToCart);
    cases.extend(positive.into_iter().map(|phrase| Scenario::UiSearchPositive { phrase }));
    cases.extend(negative.into_iter().map(|phrase| Scenario::UiSearchNegative { phrase }));
    cases.extend(NAVIGATION_SECTIONS.iter().map(|(title, path)| Scenario::Navigation {
        title: (*title).to_string(),
        path: (*path).to_string(),
    }));
    cases.extend(phones.into_iter().map(|number| Scenario::InvalidPhone { number }));
    Ok(cases)
}

/// Keep cases of one suite and/or whose name contains `pattern`
#[must_use]
pub fn select(cases: Vec<Scenario>, suite: Option<Suite>, pattern: Option<&str>) -> Vec<Scenario> {
    cases
        .into_iter()
        .filter(|case| suite.map_or(true, |s| case.suite() == s))
        .filter(|case| pattern.map_or(true, |p| case.name().contains(p)))
        .collect()
}

/// Run scenarios in order against one context
pub async fn run_scenarios(
    cases: Vec<Scenario>,
    ctx: &ScenarioContext,
    mode: FailureMode,
    on_result: impl FnMut(&crate::harness::CaseResult),
) -> SuiteReport {
    crate::harness::run_cases(cases, mode, move |case| async move { case.run(ctx).await }, on_result).await
}

/// Fail with `AssertionFailed` unless `response` has the expected status
pub(crate) fn expect_status(response: &ApiResponse, expected: u16, step: &str) -> ShopResult<()> {
    if response.status() == expected {
        Ok(())
    } else {
        Err(ShopError::assertion(format!(
            "{step}: expected status {expected}, got {}",
            response.status()
        )))
    }
}

/// Fail with `AssertionFailed` unless `condition` holds
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> ShopResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ShopError::assertion(message()))
    }
}

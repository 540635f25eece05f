//! Storecheck: end-to-end checks for an online bookshop.
//!
//! Two surfaces are exercised against a live storefront:
//!
//! - the REST API (cart, search, product listing, request tracking) through
//!   thin [`api`] clients that carry a fixed header set;
//! - the web UI through [`pages`] objects driving a browser with bounded,
//!   polling [`wait`]s.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐
//! │ Settings     │   │ Fixtures     │   │ Scenarios            │
//! │ (INI)        │──►│ clients,     │──►│ run_cases → report   │
//! │ TestData     │   │ pages, lists │   │                      │
//! │ (JSON)       │   └──────────────┘   └──────────────────────┘
//! └──────────────┘          │
//!                 ┌─────────┴─────────┐
//!                 ▼                   ▼
//!          reqwest (HTTP)    BrowserDriver (CDP / mock)
//! ```
//!
//! The real browser lives behind the `browser` feature. Everything else runs
//! against [`driver::MockDriver`] and any HTTP mock server.

#![warn(missing_docs)]

pub mod api;
pub mod browser;
pub mod config;
pub mod driver;
pub mod fixture;
pub mod harness;
pub mod locator;
pub mod pages;
mod result;
pub mod scenarios;
pub mod testdata;
pub mod wait;

pub use api::{
    normalize, ApiClient, ApiResponse, AuthContext, CartApi, CatalogApi, IdentityApi, ProductId,
    SearchApi,
};
pub use browser::BrowserSettings;
#[cfg(feature = "browser")]
pub use browser::CdpDriver;
pub use config::{Settings, SiteUrls};
pub use driver::{BrowserDriver, ElementHandle, ElementSnapshot, MockDriver, MockElement};
pub use fixture::{BrowserSession, Fixtures};
pub use harness::{run_cases, CaseResult, CaseStatus, FailureMode, NamedCase, SuiteReport};
pub use locator::{By, Locator};
pub use pages::{BasePage, CartPage, MainPage, PageObject, ProductLink, ProductPage};
pub use result::{ShopError, ShopResult};
pub use scenarios::{Scenario, ScenarioContext, Suite};
pub use testdata::TestData;
pub use wait::{Condition, WaitOptions, WaitOutcome, Waiter};

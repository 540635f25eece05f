//! Browser driver abstraction.
//!
//! Pages talk to the browser only through [`BrowserDriver`]. The CDP-backed
//! implementation lives in [`crate::browser`]; [`MockDriver`] is an in-memory
//! DOM used by the unit and integration tests.

use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// ELEMENT HANDLES
// =============================================================================

/// State of an element at the moment it was queried
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Rendered text
    pub text: String,
    /// Attributes present on the element
    pub attributes: BTreeMap<String, String>,
    /// Whether the element is rendered and visible
    pub displayed: bool,
    /// Whether the element accepts interaction
    pub enabled: bool,
}

/// A resolved element: the locator, which match it was and what it looked like.
///
/// Handles are produced fresh by every driver query and are never reused
/// across waits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Locator that produced this element
    pub locator: Locator,
    /// Position among the locator's matches
    pub index: usize,
    /// State at query time
    pub snapshot: ElementSnapshot,
}

impl ElementHandle {
    /// Create a handle
    #[must_use]
    pub fn new(locator: Locator, index: usize, snapshot: ElementSnapshot) -> Self {
        Self {
            locator,
            index,
            snapshot,
        }
    }

    /// Rendered text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.snapshot.text
    }

    /// Attribute value as seen at query time
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.snapshot.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute was present at query time
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.snapshot.attributes.contains_key(name)
    }

    /// Visible at query time
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        self.snapshot.displayed
    }

    /// Visible and enabled at query time
    #[must_use]
    pub const fn is_interactable(&self) -> bool {
        self.snapshot.displayed && self.snapshot.enabled
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.locator, self.index)
    }
}

// =============================================================================
// DRIVER TRAIT
// =============================================================================

/// Commands the page layer needs from a browser.
///
/// Methods take `&self` so one session can be shared by several pages.
#[async_trait]
pub trait BrowserDriver: Send + Sync + fmt::Debug {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> ShopResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ShopResult<String>;

    /// All current matches for a locator, in document order
    async fn query(&self, locator: &Locator) -> ShopResult<Vec<ElementHandle>>;

    /// Click element
    async fn click(&self, element: &ElementHandle) -> ShopResult<()>;

    /// Clear an input's value
    async fn clear(&self, element: &ElementHandle) -> ShopResult<()>;

    /// Type text into element
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ShopResult<()>;

    /// Live read of a property or attribute, property first
    async fn attribute(&self, element: &ElementHandle, name: &str) -> ShopResult<Option<String>>;

    /// Close the browser
    async fn quit(&self) -> ShopResult<()>;
}

// =============================================================================
// MOCK DRIVER
// =============================================================================

/// Scripted element for [`MockDriver`].
///
/// Thresholds count queries made for the element's locator: an element with
/// `appears_after(2)` is absent from the first two queries and present from
/// the third on.
#[derive(Debug, Clone)]
pub struct MockElement {
    locator: Locator,
    text: String,
    attributes: BTreeMap<String, String>,
    appear_after: u32,
    visible_after: Option<u32>,
    enabled_after: Option<u32>,
    navigates_to: Option<String>,
}

impl MockElement {
    /// Visible, enabled element present from the first query
    #[must_use]
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            text: String::new(),
            attributes: BTreeMap::new(),
            appear_after: 0,
            visible_after: Some(0),
            enabled_after: Some(0),
            navigates_to: None,
        }
    }

    /// Set rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Absent for the first `polls` queries
    #[must_use]
    pub const fn appears_after(mut self, polls: u32) -> Self {
        self.appear_after = polls;
        self
    }

    /// Not displayed for the first `polls` queries
    #[must_use]
    pub const fn visible_after(mut self, polls: u32) -> Self {
        self.visible_after = Some(polls);
        self
    }

    /// Never displayed
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible_after = None;
        self
    }

    /// Disabled for the first `polls` queries
    #[must_use]
    pub const fn enabled_after(mut self, polls: u32) -> Self {
        self.enabled_after = Some(polls);
        self
    }

    /// Never enabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled_after = None;
        self
    }

    /// Clicking the element navigates to `url`
    #[must_use]
    pub fn navigates_to(mut self, url: impl Into<String>) -> Self {
        self.navigates_to = Some(url.into());
        self
    }

    fn snapshot(&self, polls: u32) -> Option<ElementSnapshot> {
        if polls <= self.appear_after {
            return None;
        }
        let reached = |threshold: Option<u32>| threshold.is_some_and(|n| polls > n);
        Some(ElementSnapshot {
            text: self.text.clone(),
            attributes: self.attributes.clone(),
            displayed: reached(self.visible_after),
            enabled: reached(self.enabled_after) && !self.attributes.contains_key("disabled"),
        })
    }
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    elements: Vec<MockElement>,
    polls: HashMap<Locator, u32>,
    call_history: Vec<String>,
    query_error: Option<String>,
    quit: bool,
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mock element
    pub fn add_element(&self, element: MockElement) {
        self.lock().elements.push(element);
    }

    /// Builder form of [`Self::add_element`]
    #[must_use]
    pub fn with_element(self, element: MockElement) -> Self {
        self.add_element(element);
        self
    }

    /// Remove every element matching a locator
    pub fn remove_elements(&self, locator: &Locator) {
        self.lock().elements.retain(|e| &e.locator != locator);
    }

    /// Make every subsequent query fail with a driver error
    pub fn fail_queries(&self, message: impl Into<String>) {
        self.lock().query_error = Some(message.into());
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().call_history.iter().any(|c| c.starts_with(method))
    }

    /// Number of queries issued for a locator
    #[must_use]
    pub fn poll_count(&self, locator: &Locator) -> u32 {
        self.lock().polls.get(locator).copied().unwrap_or(0)
    }

    /// Whether `quit` has been called
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.lock().quit
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_target<T>(
        &self,
        element: &ElementHandle,
        f: impl FnOnce(&mut MockElement) -> T,
    ) -> ShopResult<T> {
        let mut state = self.lock();
        state
            .elements
            .iter_mut()
            .filter(|e| e.locator == element.locator)
            .nth(element.index)
            .map(f)
            .ok_or_else(|| ShopError::driver(format!("stale element {element}")))
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> ShopResult<()> {
        let mut state = self.lock();
        state.call_history.push(format!("navigate:{url}"));
        state.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ShopResult<String> {
        Ok(self.lock().current_url.clone())
    }

    async fn query(&self, locator: &Locator) -> ShopResult<Vec<ElementHandle>> {
        let mut state = self.lock();
        if let Some(message) = &state.query_error {
            return Err(ShopError::driver(message.clone()));
        }
        let polls = {
            let count = state.polls.entry(locator.clone()).or_insert(0);
            *count += 1;
            *count
        };
        Ok(state
            .elements
            .iter()
            .filter(|e| &e.locator == locator)
            .enumerate()
            .filter_map(|(index, e)| {
                e.snapshot(polls)
                    .map(|snapshot| ElementHandle::new(locator.clone(), index, snapshot))
            })
            .collect())
    }

    async fn click(&self, element: &ElementHandle) -> ShopResult<()> {
        let target = self.with_target(element, |e| e.navigates_to.clone())?;
        let mut state = self.lock();
        state.call_history.push(format!("click:{element}"));
        if let Some(url) = target {
            state.current_url = url;
        }
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> ShopResult<()> {
        self.with_target(element, |e| {
            e.attributes.insert("value".to_string(), String::new());
        })?;
        self.lock().call_history.push(format!("clear:{element}"));
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ShopResult<()> {
        self.with_target(element, |e| {
            e.attributes
                .entry("value".to_string())
                .or_default()
                .push_str(text);
        })?;
        self.lock()
            .call_history
            .push(format!("send_keys:{element}:{text}"));
        Ok(())
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> ShopResult<Option<String>> {
        self.with_target(element, |e| {
            if name == "text" {
                Some(e.text.clone())
            } else {
                e.attributes.get(name).cloned()
            }
        })
    }

    async fn quit(&self) -> ShopResult<()> {
        let mut state = self.lock();
        state.call_history.push("quit".to_string());
        state.quit = true;
        Ok(())
    }
}

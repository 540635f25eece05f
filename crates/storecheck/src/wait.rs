//! Bounded element waits.
//!
//! Every wait is a single poll loop with a deadline. Each poll re-queries the
//! driver, so a resolved handle always reflects the page at resolution time.
//! There is no retry beyond the one loop and no implicit driver wait.

use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::Locator;
use crate::result::ShopResult;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Upper bound for one wait
    pub timeout: Duration,
    /// Pause between polls
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Timeout in whole milliseconds, for error reporting
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// What must hold for the first match of a locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// At least one match exists
    Present,
    /// The first match is displayed
    Visible,
    /// The first match is displayed and enabled
    Clickable,
    /// The first match carries the named attribute
    AttributeIncluded(String),
}

impl Condition {
    /// Whether the condition holds for an element snapshot
    #[must_use]
    pub fn holds(&self, element: &ElementHandle) -> bool {
        match self {
            Self::Present => true,
            Self::Visible => element.is_displayed(),
            Self::Clickable => element.is_interactable(),
            Self::AttributeIncluded(name) => element.has_attribute(name),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Visible => write!(f, "visible"),
            Self::Clickable => write!(f, "clickable"),
            Self::AttributeIncluded(name) => write!(f, "has attribute '{name}'"),
        }
    }
}

// =============================================================================
// WAIT OUTCOME
// =============================================================================

/// Terminal state of a wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T = ElementHandle> {
    /// Condition held; the value was resolved on the final poll
    Resolved(T),
    /// Budget elapsed without the condition holding
    TimedOut {
        /// Description of what was waited for
        waited_for: String,
        /// Time spent waiting
        elapsed: Duration,
        /// First match seen on the final poll, if any
        last_seen: Option<ElementHandle>,
    },
}

impl<T> WaitOutcome<T> {
    /// Whether the wait resolved
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Resolved value, dropping timeout details
    #[must_use]
    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::TimedOut { .. } => None,
        }
    }
}

// =============================================================================
// WAITER
// =============================================================================

/// Runs bounded waits against a driver
#[derive(Debug, Clone)]
pub struct Waiter {
    driver: Arc<dyn BrowserDriver>,
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter over a driver
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>, options: WaitOptions) -> Self {
        Self { driver, options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Wait until `condition` holds for the first match of `locator`
    pub async fn until(&self, locator: &Locator, condition: &Condition) -> ShopResult<WaitOutcome> {
        self.poll(locator, &format!("{locator} {condition}"), |matches| {
            match matches.into_iter().next() {
                Some(first) if condition.holds(&first) => Ok(first),
                first => Err(first),
            }
        })
        .await
    }

    /// The poll loop shared by all waits.
    ///
    /// Polls at least once, even with a zero timeout.
    async fn poll<T, F>(&self, locator: &Locator, waited_for: &str, check: F) -> ShopResult<WaitOutcome<T>>
    where
        F: Fn(Vec<ElementHandle>) -> Result<T, Option<ElementHandle>>,
    {
        let start = Instant::now();
        let mut polls = 0_u32;
        loop {
            polls += 1;
            let matches = self.driver.query(locator).await?;
            let last_seen = match check(matches) {
                Ok(value) => {
                    tracing::trace!(waited_for, polls, elapsed_ms = start.elapsed().as_millis() as u64, "wait resolved");
                    return Ok(WaitOutcome::Resolved(value));
                }
                Err(last_seen) => last_seen,
            };

            let elapsed = start.elapsed();
            if elapsed >= self.options.timeout {
                tracing::debug!(waited_for, polls, elapsed_ms = elapsed.as_millis() as u64, "wait timed out");
                return Ok(WaitOutcome::TimedOut {
                    waited_for: waited_for.to_string(),
                    elapsed,
                    last_seen,
                });
            }
            let remaining = self.options.timeout - elapsed;
            tokio::time::sleep(self.options.poll_interval.min(remaining)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn fast() -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(100))
            .with_poll_interval(Duration::from_millis(10))
    }

    fn waiter(driver: MockDriver) -> (Arc<MockDriver>, Waiter) {
        let driver = Arc::new(driver);
        let waiter = Waiter::new(driver.clone(), fast());
        (driver, waiter)
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout, Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS));
            assert_eq!(opts.poll_interval, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
        }

        #[test]
        fn test_builder() {
            let opts = fast();
            assert_eq!(opts.timeout_ms(), 100);
            assert_eq!(opts.poll_interval, Duration::from_millis(10));
        }
    }

    mod condition_tests {
        use super::*;
        use crate::driver::ElementSnapshot;

        fn element(displayed: bool, enabled: bool) -> ElementHandle {
            ElementHandle::new(
                Locator::id("e"),
                0,
                ElementSnapshot {
                    displayed,
                    enabled,
                    ..Default::default()
                },
            )
        }

        #[test]
        fn test_clickable_requires_both() {
            assert!(Condition::Clickable.holds(&element(true, true)));
            assert!(!Condition::Clickable.holds(&element(true, false)));
            assert!(!Condition::Clickable.holds(&element(false, true)));
        }

        #[test]
        fn test_present_ignores_state() {
            assert!(Condition::Present.holds(&element(false, false)));
        }

        #[test]
        fn test_attribute_included() {
            let mut e = element(true, false);
            assert!(!Condition::AttributeIncluded("disabled".into()).holds(&e));
            e.snapshot.attributes.insert("disabled".into(), String::new());
            assert!(Condition::AttributeIncluded("disabled".into()).holds(&e));
        }
    }

    mod waiter_tests {
        use super::*;

        #[tokio::test]
        async fn test_resolves_immediately_when_true() {
            let locator = Locator::class_name("ready");
            let (driver, waiter) = waiter(MockDriver::new().with_element(MockElement::new(locator.clone())));

            let outcome = waiter.until(&locator, &Condition::Clickable).await.unwrap();

            assert!(outcome.is_resolved());
            assert_eq!(driver.poll_count(&locator), 1);
        }

        #[tokio::test]
        async fn test_resolves_after_element_appears() {
            let locator = Locator::class_name("late");
            let (driver, waiter) =
                waiter(MockDriver::new().with_element(MockElement::new(locator.clone()).appears_after(3)));

            let outcome = waiter.until(&locator, &Condition::Present).await.unwrap();

            assert!(outcome.is_resolved());
            assert_eq!(driver.poll_count(&locator), 4);
        }

        #[tokio::test]
        async fn test_times_out_when_never_present() {
            let locator = Locator::id("ghost");
            let (driver, waiter) = waiter(MockDriver::new());

            let outcome = waiter.until(&locator, &Condition::Visible).await.unwrap();

            match outcome {
                WaitOutcome::TimedOut { elapsed, last_seen, .. } => {
                    assert!(elapsed >= Duration::from_millis(100));
                    assert!(last_seen.is_none());
                }
                WaitOutcome::Resolved(_) => panic!("expected timeout"),
            }
            assert!(driver.poll_count(&locator) > 1);
        }

        #[tokio::test]
        async fn test_timeout_keeps_last_seen() {
            let locator = Locator::css("button.buy");
            let (_driver, waiter) =
                waiter(MockDriver::new().with_element(MockElement::new(locator.clone()).disabled()));

            let outcome = waiter.until(&locator, &Condition::Clickable).await.unwrap();

            assert!(matches!(outcome, WaitOutcome::TimedOut { last_seen: Some(_), .. }));
        }

        #[tokio::test]
        async fn test_zero_timeout_polls_once() {
            let locator = Locator::id("x");
            let driver = Arc::new(MockDriver::new());
            let waiter = Waiter::new(driver.clone(), WaitOptions::new().with_timeout(Duration::ZERO));

            let outcome = waiter.until(&locator, &Condition::Present).await.unwrap();

            assert!(!outcome.is_resolved());
            assert_eq!(driver.poll_count(&locator), 1);
        }

        #[tokio::test]
        async fn test_driver_error_propagates() {
            let driver = MockDriver::new();
            driver.fail_queries("session closed");
            let (_driver, waiter) = waiter(driver);
            assert!(waiter.until(&Locator::id("a"), &Condition::Present).await.is_err());
        }
    }
}
